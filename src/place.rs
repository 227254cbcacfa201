//! Place categories and a concrete place record.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::traits::Place;

const SECS_PER_DAY: i32 = 24 * 3600;

/// Structural category of a place. Every block requires exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Hotel,
    Activity,
}

const HOTEL_TAGS: &[&str] = &[
    "lodging",
    "hotel",
    "hostel",
    "guest_house",
    "inn",
    "motel",
    "resort_hotel",
];

const RESTAURANT_TAGS: &[&str] = &[
    "restaurant",
    "meal_delivery",
    "meal_takeaway",
    "cafe",
    "bakery",
    "coffee_shop",
    "food",
    "bistro",
    "diner",
    "steak_house",
    "sandwich_shop",
];

impl PlaceCategory {
    /// Classify raw tags. Lodging wins over dining; anything else is an activity.
    pub fn from_tags(tags: &[String]) -> Self {
        let has = |table: &[&str]| {
            tags.iter().any(|tag| {
                let tag = tag.to_ascii_lowercase();
                table.contains(&tag.as_str())
            })
        };

        if has(HOTEL_TAGS) {
            PlaceCategory::Hotel
        } else if has(RESTAURANT_TAGS) || tags.iter().any(|t| t.ends_with("_restaurant")) {
            PlaceCategory::Restaurant
        } else {
            PlaceCategory::Activity
        }
    }
}

/// Finer activity classification, used for visit durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Museum,
    Park,
    Landmark,
    Shopping,
    Nightlife,
    Other,
}

impl ActivityKind {
    pub fn from_tags(tags: &[String]) -> Self {
        for tag in tags {
            let kind = match tag.to_ascii_lowercase().as_str() {
                "museum" | "art_gallery" => ActivityKind::Museum,
                "park" | "garden" | "beach" | "zoo" | "aquarium" | "nature_reserve"
                | "viewpoint" => ActivityKind::Park,
                "tourist_attraction" | "historical_landmark" | "cultural_landmark"
                | "monument" | "temple" | "church" | "place_of_worship" | "shrine" => {
                    ActivityKind::Landmark
                }
                "shopping_mall" | "market" | "store" => ActivityKind::Shopping,
                "night_club" | "bar" | "pub" | "casino" => ActivityKind::Nightlife,
                _ => continue,
            };
            return kind;
        }
        ActivityKind::Other
    }
}

/// A weekly opening period. `close < open` means the period runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningPeriod {
    pub day: Weekday,
    /// Seconds from midnight.
    pub open: i32,
    /// Seconds from midnight.
    pub close: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub periods: Vec<OpeningPeriod>,
}

impl OpeningHours {
    pub fn new(periods: Vec<OpeningPeriod>) -> Self {
        Self { periods }
    }

    /// Same hours every day of the week.
    pub fn daily(open: i32, close: i32) -> Self {
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        Self {
            periods: days
                .into_iter()
                .map(|day| OpeningPeriod { day, open, close })
                .collect(),
        }
    }

    pub fn is_open_at(&self, weekday: Weekday, secs: i32) -> bool {
        let (weekday, secs) = normalise(weekday, secs);
        self.periods.iter().any(|period| {
            if period.close >= period.open {
                period.day == weekday && secs >= period.open && secs < period.close
            } else {
                (period.day == weekday && secs >= period.open)
                    || (period.day.succ() == weekday && secs < period.close)
            }
        })
    }
}

/// Fold clock values past midnight into the following day.
fn normalise(weekday: Weekday, secs: i32) -> (Weekday, i32) {
    let mut day = weekday;
    for _ in 0..secs.div_euclid(SECS_PER_DAY).rem_euclid(7) {
        day = day.succ();
    }
    (day, secs.rem_euclid(SECS_PER_DAY))
}

/// Concrete place record, as loaded from a JSON document or built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub price_level: u8,
    /// `None` means no hours are published; the place is treated as always open.
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

impl PlaceRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lng,
            tags: Vec::new(),
            rating: 0.0,
            avg_price: 0.0,
            price_level: 0,
            opening_hours: None,
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn avg_price(mut self, price: f64) -> Self {
        self.avg_price = price;
        self
    }

    pub fn price_level(mut self, level: u8) -> Self {
        self.price_level = level;
        self
    }

    pub fn hours(mut self, hours: OpeningHours) -> Self {
        self.opening_hours = Some(hours);
        self
    }
}

impl Place for PlaceRecord {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn rating(&self) -> f64 {
        self.rating
    }

    fn avg_price(&self) -> f64 {
        self.avg_price
    }

    fn price_level(&self) -> u8 {
        self.price_level
    }

    fn is_open_at(&self, weekday: Weekday, secs: i32) -> bool {
        match &self.opening_hours {
            Some(hours) => hours.is_open_at(weekday, secs),
            None => true,
        }
    }
}

//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data including:
//! - Da Nang places with approximate real coordinates
//! - Builders for place records and user contexts
//! - Deterministic score providers and an in-memory place source

#![allow(dead_code)]

pub mod da_nang_places;

pub use da_nang_places::*;

use std::collections::HashMap;

use chrono::NaiveDate;

use itinerary_planner::error::{PlanError, Result};
use itinerary_planner::place::PlaceRecord;
use itinerary_planner::traits::{CollaborativeScorer, ContentScorer, PlaceSource};
use itinerary_planner::UserContext;

pub const DESTINATION: &str = "Da Nang";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A Monday.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

pub fn context(trip_days: i64) -> UserContext<String> {
    UserContext::new("traveller-1", DESTINATION, trip_days, start_date())
}

fn slug(name: &str) -> String {
    name.to_ascii_lowercase().replace(' ', "-")
}

pub fn place(location: &Location, tag: &str) -> PlaceRecord {
    PlaceRecord::new(slug(location.name), location.name, location.lat, location.lng)
        .tag(tag)
        .rating(4.2)
        .avg_price(5.0)
}

pub fn restaurant(location: &Location) -> PlaceRecord {
    place(location, "restaurant").avg_price(8.0)
}

pub fn hotel(location: &Location) -> PlaceRecord {
    place(location, "lodging").avg_price(45.0)
}

pub fn activity(location: &Location) -> PlaceRecord {
    place(location, "tourist_attraction")
}

/// Scenario set: 3 restaurants, 2 hotels and 3 activities, all walkable.
pub fn centre_places() -> Vec<PlaceRecord> {
    let mut places: Vec<PlaceRecord> = CENTRE_RESTAURANTS.iter().map(restaurant).collect();
    places.extend(CENTRE_HOTELS.iter().map(hotel));
    places.extend(CENTRE_ACTIVITIES.iter().map(activity));
    places
}

/// Every city place, ratings spread so that scores differ.
pub fn city_places() -> Vec<PlaceRecord> {
    let mut places = centre_places();
    places.push(place(&CHAM_MUSEUM, "museum"));
    places.extend(RESTAURANTS.iter().map(restaurant));
    places.extend(HOTELS.iter().map(hotel));
    places.extend(ACTIVITIES.iter().map(activity));
    for (i, place) in places.iter_mut().enumerate() {
        place.rating = 3.5 + (i % 7) as f64 * 0.2;
    }
    places
}

pub fn ids(places: &[PlaceRecord]) -> Vec<String> {
    places.iter().map(|p| p.id.clone()).collect()
}

/// Content score fixed per place id, defaulting to a constant.
#[derive(Debug, Default)]
pub struct FixedContent {
    pub default: f64,
    pub scores: HashMap<String, f64>,
}

impl FixedContent {
    pub fn new(default: f64) -> Self {
        Self {
            default,
            scores: HashMap::new(),
        }
    }

    pub fn with(mut self, id: &str, score: f64) -> Self {
        self.scores.insert(id.to_string(), score);
        self
    }
}

impl ContentScorer<PlaceRecord> for FixedContent {
    fn content_score(&self, _selected: &[&PlaceRecord], candidate: &PlaceRecord) -> f64 {
        self.scores.get(&candidate.id).copied().unwrap_or(self.default)
    }
}

/// Collaborative score derived from the public rating.
#[derive(Debug, Default)]
pub struct RatingCollab;

impl CollaborativeScorer<PlaceRecord> for RatingCollab {
    fn collab_score(&self, _user_id: &str, candidate: &PlaceRecord) -> Option<f64> {
        Some(candidate.rating / 5.0)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySource {
    places: HashMap<String, Vec<PlaceRecord>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, destination: &str, places: Vec<PlaceRecord>) -> Self {
        self.places.insert(destination.to_string(), places);
        self
    }
}

impl PlaceSource for InMemorySource {
    type Place = PlaceRecord;

    fn load_places(&self, destination: &str) -> Result<Vec<PlaceRecord>> {
        self.places
            .get(destination)
            .cloned()
            .ok_or_else(|| PlanError::NoPlaces {
                destination: destination.to_string(),
            })
    }
}

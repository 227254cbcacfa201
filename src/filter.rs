//! Pre-filter of the destination's places against the user's criteria.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::context::UserContext;
use crate::place::PlaceCategory;
use crate::traits::Place;

/// Interest keywords and the place tags that satisfy them.
const INTEREST_TAGS: &[(&str, &[&str])] = &[
    (
        "landmarks",
        &["tourist_attraction", "cultural_landmark", "historical_landmark", "monument"],
    ),
    ("museums", &["museum", "art_gallery"]),
    ("parks", &["park", "garden", "nature_reserve", "beach"]),
    ("shopping", &["shopping_mall", "store", "market"]),
    ("nightlife", &["night_club", "bar", "casino"]),
    ("entertainment", &["amusement_park", "movie_theater", "casino"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilter {
    pub min_rating: f64,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self { min_rating: 3.0 }
    }
}

impl CandidateFilter {
    /// Drop disliked, low-rated, out-of-budget and off-interest places.
    ///
    /// A category that had places never comes out empty: if the criteria
    /// would remove all of them, its unfiltered places are kept instead.
    pub fn apply<'a, P: Place>(
        &self,
        places: &'a [P],
        context: &UserContext<P::Id>,
    ) -> Vec<&'a P> {
        let disliked: HashSet<&P::Id> = context.disliked.iter().collect();
        let eligible = |place: &P| !disliked.contains(place.id());

        let mut keep: Vec<bool> = places
            .iter()
            .map(|place| eligible(place) && self.accepts(place, context))
            .collect();

        for category in [PlaceCategory::Restaurant, PlaceCategory::Hotel, PlaceCategory::Activity] {
            let in_category = |place: &P| eligible(place) && place.category() == category;
            let available = places.iter().filter(|place| in_category(place)).count();
            let kept = places
                .iter()
                .zip(&keep)
                .filter(|(place, kept)| **kept && in_category(place))
                .count();
            if available > 0 && kept == 0 {
                warn!(
                    ?category,
                    count = available,
                    "criteria removed every place of category, keeping them unfiltered"
                );
                for (place, kept) in places.iter().zip(keep.iter_mut()) {
                    if in_category(place) {
                        *kept = true;
                    }
                }
            }
        }

        let result: Vec<&'a P> = places
            .iter()
            .zip(keep)
            .filter_map(|(place, kept)| kept.then_some(place))
            .collect();

        info!(
            loaded = places.len(),
            kept = result.len(),
            "filtered places by user criteria"
        );
        result
    }

    fn accepts<P: Place>(&self, place: &P, context: &UserContext<P::Id>) -> bool {
        if place.rating() < self.min_rating {
            return false;
        }
        if let Some(budget) = context.budget {
            if !budget.allows(place.price_level()) {
                return false;
            }
        }
        match place.category() {
            PlaceCategory::Restaurant | PlaceCategory::Hotel => true,
            PlaceCategory::Activity => matches_interests(place.tags(), &context.interests),
        }
    }
}

fn matches_interests(tags: &[String], interests: &[String]) -> bool {
    if interests.is_empty() {
        return true;
    }
    let tags: HashSet<String> = tags.iter().map(|t| t.to_ascii_lowercase()).collect();
    interests.iter().any(|interest| {
        let interest = interest.to_ascii_lowercase();
        if tags.contains(&interest) {
            return true;
        }
        INTEREST_TAGS
            .iter()
            .find(|(name, _)| *name == interest)
            .is_some_and(|(_, related)| related.iter().any(|tag| tags.contains(*tag)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Budget;
    use crate::place::PlaceRecord;
    use chrono::NaiveDate;

    fn context() -> UserContext<String> {
        UserContext::new("u1", "Da Nang", 2, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
    }

    fn ids(places: &[&PlaceRecord]) -> Vec<String> {
        places.iter().map(|p| p.id.clone()).collect()
    }

    fn sample() -> Vec<PlaceRecord> {
        vec![
            PlaceRecord::new("museum", "Cham Museum", 16.06, 108.22)
                .tag("museum")
                .rating(4.5)
                .price_level(1),
            PlaceRecord::new("beach", "My Khe", 16.06, 108.25).tag("beach").rating(4.7),
            PlaceRecord::new("mall", "Vincom", 16.07, 108.23)
                .tag("shopping_mall")
                .rating(4.2)
                .price_level(3),
            PlaceRecord::new("dive", "Dive Bar", 16.07, 108.22).tag("bar").rating(2.1),
            PlaceRecord::new("pho", "Pho 29", 16.06, 108.21).tag("restaurant").rating(4.1),
            PlaceRecord::new("fine", "Fine Dining", 16.06, 108.21)
                .tag("restaurant")
                .rating(4.8)
                .price_level(4),
            PlaceRecord::new("hotel", "Sea Hotel", 16.05, 108.24).tag("hotel").rating(4.0),
        ]
    }

    #[test]
    fn test_min_rating_and_dislikes() {
        let places = sample();
        let ctx = context().disliked(["beach".to_string()]);
        let kept = CandidateFilter::default().apply(&places, &ctx);
        let kept = ids(&kept);
        assert!(!kept.contains(&"dive".to_string()));
        assert!(!kept.contains(&"beach".to_string()));
        assert!(kept.contains(&"museum".to_string()));
    }

    #[test]
    fn test_budget_excludes_expensive_places() {
        let places = sample();
        let ctx = context().budget(Budget::Low);
        let kept = ids(&CandidateFilter::default().apply(&places, &ctx));
        assert!(!kept.contains(&"fine".to_string()));
        assert!(!kept.contains(&"mall".to_string()));
        assert!(kept.contains(&"pho".to_string()), "unknown price level passes");
    }

    #[test]
    fn test_interests_only_restrict_activities() {
        let places = sample();
        let ctx = context().interest("parks");
        let kept = ids(&CandidateFilter::default().apply(&places, &ctx));
        assert!(kept.contains(&"beach".to_string()));
        assert!(!kept.contains(&"museum".to_string()));
        assert!(kept.contains(&"pho".to_string()));
        assert!(kept.contains(&"hotel".to_string()));
    }

    #[test]
    fn test_direct_tag_interest() {
        let places = sample();
        let ctx = context().interest("museum");
        let kept = ids(&CandidateFilter::default().apply(&places, &ctx));
        assert!(kept.contains(&"museum".to_string()));
        assert!(!kept.contains(&"mall".to_string()));
    }

    #[test]
    fn test_emptied_category_is_restored() {
        let places = sample();
        let ctx = context().interest("opera");
        let kept = ids(&CandidateFilter::default().apply(&places, &ctx));
        // No activity matches "opera": all activities come back, source order kept.
        assert_eq!(kept, vec!["museum", "beach", "mall", "dive", "pho", "fine", "hotel"]);
    }
}

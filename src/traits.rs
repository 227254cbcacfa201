//! Core domain traits for the itinerary planner.
//!
//! Places, score providers and distance sources are owned by collaborators
//! outside this crate. The planner only references them through these
//! interfaces, so concrete apps implement them for their own data models.

use std::fmt::Debug;
use std::hash::Hash;

use chrono::Weekday;

use crate::error::Result;
use crate::place::{ActivityKind, PlaceCategory};

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash + Debug {}

impl<T> Id for T where T: Clone + Eq + Hash + Debug {}

/// A point of interest that can be scheduled into a time block.
pub trait Place {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    fn name(&self) -> &str;

    /// Location coordinates (lat, lng).
    fn location(&self) -> (f64, f64);

    /// Raw category tags from the data source (e.g. "museum", "lodging").
    fn tags(&self) -> &[String];

    /// Rating in 0..=5.
    fn rating(&self) -> f64;

    /// Average spend per visit.
    fn avg_price(&self) -> f64;

    /// Price level 0..=4, where 0 means unknown.
    fn price_level(&self) -> u8 {
        0
    }

    /// Whether the place is open at `secs` seconds from midnight on `weekday`.
    fn is_open_at(&self, weekday: Weekday, secs: i32) -> bool;

    fn category(&self) -> PlaceCategory {
        PlaceCategory::from_tags(self.tags())
    }

    fn activity_kind(&self) -> ActivityKind {
        ActivityKind::from_tags(self.tags())
    }
}

/// Supplies the places of a destination (persistence layer).
pub trait PlaceSource {
    type Place: Place;

    /// Load every place of `destination`. Implementations return
    /// [`crate::PlanError::NoPlaces`] when the destination is unknown.
    fn load_places(&self, destination: &str) -> Result<Vec<Self::Place>>;
}

/// Semantic similarity between the user's selections and a candidate.
///
/// Implementations own their caches; the planner treats them as read-only.
pub trait ContentScorer<P: Place>: Send + Sync {
    /// Score in 0..=1.
    fn content_score(&self, selected: &[&P], candidate: &P) -> f64;
}

/// Predicted affinity between a user and a candidate.
pub trait CollaborativeScorer<P: Place>: Send + Sync {
    /// Score in 0..=1, or `None` when the user or place is unknown to the model.
    fn collab_score(&self, user_id: &str, candidate: &P) -> Option<f64>;

    /// Score used for cold-start users and places (normalised population mean).
    fn fallback(&self) -> f64 {
        0.5
    }
}

/// Provides a distance matrix in kilometres for a set of locations.
///
/// The matrix is indexed by the provided location order. Providers are
/// shared read-only between concurrent planning requests.
pub trait DistanceMatrixProvider: Send + Sync {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>>;

    /// True when the matrix already holds shortest distances (symmetric and
    /// satisfying the triangle inequality), so no relaxation is needed.
    fn is_metric(&self) -> bool {
        false
    }
}

//! Error taxonomy for a planning request.
//!
//! Under-filled blocks are not errors; they are reported through
//! [`crate::itinerary::Underfill`] records on the itinerary itself.

use thiserror::Error;

pub type Result<T, E = PlanError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PlanError {
    /// The destination has no places to plan with.
    #[error("no places found for destination {destination:?}")]
    NoPlaces { destination: String },

    /// Trip length must be at least one day.
    #[error("invalid trip length: {0} day(s)")]
    InvalidTripLength(i64),

    /// A shortest-path lookup used an id outside the index build set.
    ///
    /// This means the scorer and index were built from different candidate
    /// sets. The request must stop: defaulting the distance would corrupt
    /// cost totals.
    #[error("place {id} is not part of the shortest-path index")]
    UnknownPlace { id: String },

    /// A configuration document could not be read, or an itinerary could
    /// not be rendered.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),

    #[error("distance source unavailable: {0}")]
    DistanceSource(String),
}

impl PlanError {
    /// Errors caused by the request itself (client errors at the API boundary).
    pub fn is_input_error(&self) -> bool {
        matches!(self, PlanError::NoPlaces { .. } | PlanError::InvalidTripLength(_))
    }

    pub(crate) fn unknown_place(id: &impl std::fmt::Debug) -> Self {
        PlanError::UnknownPlace {
            id: format!("{:?}", id),
        }
    }
}

//! itinerary-planner core
//!
//! Turns a destination's places and a user's preferences into a day-by-day
//! trip itinerary: hybrid relevance scoring, an all-pairs shortest-path index
//! over the candidates, and a greedy scheduler that fills fixed daily time
//! blocks (meals, activities, rest) with travel legs between visits.

pub mod blocks;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod haversine;
pub mod itinerary;
pub mod osrm;
pub mod path_index;
pub mod place;
pub mod planner;
pub mod scheduler;
pub mod scoring;
pub mod traits;
pub mod transport;

pub use config::PlannerConfig;
pub use context::{Budget, UserContext};
pub use error::{PlanError, Result};
pub use itinerary::TripItinerary;
pub use place::{PlaceCategory, PlaceRecord};
pub use planner::TripPlanner;

//! End-to-end planning of one trip request.

use std::collections::HashSet;

use tracing::{info, info_span};

use crate::config::PlannerConfig;
use crate::context::UserContext;
use crate::error::{PlanError, Result};
use crate::itinerary::TripItinerary;
use crate::path_index::ShortestPathIndex;
use crate::scheduler::BlockScheduler;
use crate::scoring::HybridScorer;
use crate::traits::{CollaborativeScorer, ContentScorer, DistanceMatrixProvider, Place, PlaceSource};

type PlaceId<S> = <<S as PlaceSource>::Place as Place>::Id;

/// Holds the injected providers. All of them are treated as read-only, so
/// one planner can serve concurrent requests.
pub struct TripPlanner<'p, S: PlaceSource> {
    source: &'p S,
    content: &'p dyn ContentScorer<S::Place>,
    collaborative: &'p dyn CollaborativeScorer<S::Place>,
    distances: &'p dyn DistanceMatrixProvider,
    config: PlannerConfig,
}

impl<'p, S: PlaceSource> TripPlanner<'p, S> {
    pub fn new(
        source: &'p S,
        content: &'p dyn ContentScorer<S::Place>,
        collaborative: &'p dyn CollaborativeScorer<S::Place>,
        distances: &'p dyn DistanceMatrixProvider,
    ) -> Self {
        Self {
            source,
            content,
            collaborative,
            distances,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Load the destination's places and plan the trip.
    pub fn plan(&self, context: &UserContext<PlaceId<S>>) -> Result<TripItinerary<PlaceId<S>>> {
        validate_trip_days(context.trip_days, self.config.max_trip_days)?;
        let places = self.source.load_places(&context.destination)?;
        self.plan_with_places(&places, context)
    }

    /// Plan the trip over places the caller already loaded.
    pub fn plan_with_places(
        &self,
        places: &[S::Place],
        context: &UserContext<PlaceId<S>>,
    ) -> Result<TripItinerary<PlaceId<S>>> {
        let _span = info_span!(
            "plan_trip",
            user = %context.user_id,
            destination = %context.destination,
            days = context.trip_days
        )
        .entered();

        self.config.validate()?;
        let trip_days = validate_trip_days(context.trip_days, self.config.max_trip_days)?;
        if places.is_empty() {
            return Err(PlanError::NoPlaces {
                destination: context.destination.clone(),
            });
        }

        let candidates = self.config.filter.apply(places, context);

        let selected_ids: HashSet<&PlaceId<S>> = context.selected.iter().collect();
        let selected: Vec<&S::Place> = places
            .iter()
            .filter(|place| selected_ids.contains(place.id()))
            .collect();

        let scorer = HybridScorer::new(self.content, self.collaborative, self.config.alpha.clone());
        let alpha = scorer.alpha(context.selected_count(), candidates.len(), trip_days);
        let mut scored = scorer.score(alpha, &context.user_id, &selected, &candidates);
        if let Some(k) = self.config.shortlist_size {
            scored = self.config.quotas.shortlist(&scored, k);
        }

        let index_set: Vec<&S::Place> = scored.iter().map(|candidate| candidate.place).collect();
        let index = ShortestPathIndex::build(&index_set, self.distances);

        let scheduler = BlockScheduler::new(
            &index,
            &self.config.transport,
            &self.config.day,
            &self.config.durations,
        );
        let days = scheduler.schedule_trip(&scored, context.start_date, trip_days)?;

        let trip = TripItinerary::assemble(
            &context.user_id,
            &context.destination,
            context.start_date,
            alpha,
            self.config.day.target_places(),
            days,
        );
        info!(
            scheduled = trip.summary.scheduled_places,
            requested = trip.summary.requested_places,
            coverage = trip.coverage(),
            total_cost = trip.summary.total_cost,
            "trip planned"
        );
        Ok(trip)
    }
}

fn validate_trip_days(trip_days: i64, max_trip_days: u32) -> Result<u32> {
    u32::try_from(trip_days)
        .ok()
        .filter(|days| (1..=max_trip_days).contains(days))
        .ok_or(PlanError::InvalidTripLength(trip_days))
}

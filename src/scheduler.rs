//! Greedy block scheduler.
//!
//! Walks the days of the trip and the blocks of each day in order. For every
//! block it ranks the unused places of the block's category by score and
//! commits them one by one while travel plus visit still fits before the
//! block's budget end. The outgoing leg of a visit is only known once the next
//! visit is committed, so the walk keeps the last committed visit pending and
//! fills its leg at that point.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::{debug, info, info_span};

use crate::blocks::{DayTemplate, TimeBlock, VisitDurations};
use crate::error::{PlanError, Result};
use crate::itinerary::{BlockSchedule, DayItinerary, ScheduledVisit, Underfill, UnderfillReason};
use crate::path_index::ShortestPathIndex;
use crate::place::PlaceCategory;
use crate::scoring::{ScoredCandidate, sort_by_score};
use crate::traits::{Id, Place};
use crate::transport::{TransportLeg, TransportModel};

pub struct BlockScheduler<'a, I: Id> {
    index: &'a ShortestPathIndex<I>,
    transport: &'a TransportModel,
    template: &'a DayTemplate,
    durations: &'a VisitDurations,
}

/// State carried from one day to the next.
#[derive(Debug)]
struct TripState<I> {
    /// Non-hotel places already scheduled on any day.
    consumed: HashSet<I>,
    /// Where the previous night was spent.
    hotel: Option<I>,
}

/// Position of a committed visit inside the day's block schedules.
#[derive(Debug, Clone, Copy)]
struct VisitSlot {
    block: usize,
    visit: usize,
}

impl<'a, I: Id> BlockScheduler<'a, I> {
    pub fn new(
        index: &'a ShortestPathIndex<I>,
        transport: &'a TransportModel,
        template: &'a DayTemplate,
        durations: &'a VisitDurations,
    ) -> Self {
        Self {
            index,
            transport,
            template,
            durations,
        }
    }

    /// Schedule `trip_days` consecutive days starting at `start_date`.
    ///
    /// Every candidate must come from the set the index was built over;
    /// anything else fails with [`PlanError::UnknownPlace`].
    pub fn schedule_trip<P: Place<Id = I>>(
        &self,
        candidates: &[ScoredCandidate<'_, P>],
        start_date: NaiveDate,
        trip_days: u32,
    ) -> Result<Vec<DayItinerary<I>>> {
        let invalid = || PlanError::InvalidTripLength(i64::from(trip_days));
        if trip_days == 0 {
            return Err(invalid());
        }
        // Every trip date must exist before anything is scheduled.
        start_date
            .checked_add_days(Days::new(u64::from(trip_days - 1)))
            .ok_or_else(invalid)?;

        let mut ranked = candidates.to_vec();
        sort_by_score(&mut ranked);

        let mut state = TripState {
            consumed: HashSet::new(),
            hotel: None,
        };
        let mut days = Vec::new();
        for day in 1..=trip_days {
            let date = start_date
                .checked_add_days(Days::new(u64::from(day - 1)))
                .ok_or_else(invalid)?;
            days.push(self.schedule_day(&ranked, day, date, &mut state)?);
        }
        Ok(days)
    }

    fn schedule_day<P: Place<Id = I>>(
        &self,
        ranked: &[ScoredCandidate<'_, P>],
        day: u32,
        date: NaiveDate,
        state: &mut TripState<I>,
    ) -> Result<DayItinerary<I>> {
        let _span = info_span!("schedule_day", day, %date).entered();
        let weekday = date.weekday();

        let mut blocks: Vec<BlockSchedule<I>> = Vec::with_capacity(self.template.blocks.len());
        let mut location = state.hotel.take();
        let mut clock = i32::MIN;
        let mut pending: Option<VisitSlot> = None;
        let mut start_leg: Option<TransportLeg> = None;
        let mut night: Option<I> = None;

        for block in self.template.ordered() {
            let pool = self.pool(block, ranked, weekday, &state.consumed);
            let budget_end = block.budget_end();
            let mut schedule = BlockSchedule::new(block);
            let mut skipped = 0usize;
            let block_idx = blocks.len();

            for candidate in &pool {
                if schedule.visits.len() >= block.target {
                    break;
                }
                let place = candidate.place;
                if schedule.visits.iter().any(|v| &v.place_id == place.id()) {
                    continue;
                }

                let leg = match &location {
                    Some(from) => Some(self.index.leg(from, place.id(), self.transport)?),
                    None => None,
                };
                let travel = leg.as_ref().map_or(0, |leg| leg.travel_secs);
                let arrival = clock.max(block.start).saturating_add(travel);
                let duration = self.visit_duration(block, place, arrival);
                if arrival.saturating_add(duration) > budget_end {
                    debug!(place = ?place.id(), arrival, duration, budget_end, "candidate does not fit");
                    skipped += 1;
                    continue;
                }

                // Commit: the new pick closes the pending visit's outgoing leg.
                match pending {
                    Some(slot) if slot.block == block_idx => {
                        schedule.visits[slot.visit].next_leg = leg;
                    }
                    Some(slot) => blocks[slot.block].visits[slot.visit].next_leg = leg,
                    None => start_leg = leg,
                }

                let departure = arrival + duration;
                schedule.visits.push(ScheduledVisit {
                    place_id: place.id().clone(),
                    name: place.name().to_string(),
                    category: place.category(),
                    block: block.kind,
                    score: candidate.score,
                    arrival,
                    departure,
                    avg_price: place.avg_price(),
                    next_leg: None,
                });
                pending = Some(VisitSlot {
                    block: block_idx,
                    visit: schedule.visits.len() - 1,
                });
                clock = departure;
                location = Some(place.id().clone());

                if block.kind.is_rest() {
                    night = Some(place.id().clone());
                } else {
                    state.consumed.insert(place.id().clone());
                }
            }

            let scheduled = schedule.visits.len();
            if scheduled < block.target {
                let reason = if skipped > 0 {
                    UnderfillReason::NoFeasibleWindow
                } else {
                    UnderfillReason::NoCandidates
                };
                info!(block = ?block.kind, target = block.target, scheduled, ?reason, "block underfilled");
                schedule.underfill = Some(Underfill {
                    target: block.target,
                    scheduled,
                    reason,
                });
            }
            blocks.push(schedule);
        }

        state.hotel = night;
        let itinerary = DayItinerary::assemble(day, date, start_leg, blocks);
        info!(
            places = itinerary.summary.places,
            cost = itinerary.summary.total_cost,
            "day scheduled"
        );
        Ok(itinerary)
    }

    /// Candidates for `block`, best first.
    ///
    /// Places open at the block start are preferred; when none of the
    /// eligible places is open the hours are ignored.
    fn pool<'c, P: Place<Id = I>>(
        &self,
        block: &TimeBlock,
        ranked: &[ScoredCandidate<'c, P>],
        weekday: Weekday,
        consumed: &HashSet<I>,
    ) -> Vec<ScoredCandidate<'c, P>> {
        let category = block.required_category();
        let eligible: Vec<ScoredCandidate<'c, P>> = ranked
            .iter()
            .filter(|c| c.place.category() == category)
            .filter(|c| match category {
                PlaceCategory::Hotel => true,
                PlaceCategory::Restaurant | PlaceCategory::Activity => {
                    !consumed.contains(c.place.id())
                }
            })
            .copied()
            .collect();

        let open: Vec<ScoredCandidate<'c, P>> = eligible
            .iter()
            .filter(|c| c.place.is_open_at(weekday, block.start))
            .copied()
            .collect();

        if open.is_empty() {
            if !eligible.is_empty() {
                debug!(block = ?block.kind, "no place open at block start, ignoring hours");
            }
            eligible
        } else {
            open
        }
    }

    fn visit_duration<P: Place>(&self, block: &TimeBlock, place: &P, arrival: i32) -> i32 {
        match block.required_category() {
            PlaceCategory::Restaurant => self.durations.meal(block.kind),
            PlaceCategory::Activity => self.durations.activity(place.activity_kind()),
            PlaceCategory::Hotel => (block.budget_end() - arrival).max(self.durations.min_rest),
        }
    }
}

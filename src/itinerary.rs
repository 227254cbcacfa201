//! Planner output: scheduled visits grouped by block, day and trip.

use chrono::NaiveDate;
use serde::Serialize;

use crate::blocks::{BlockKind, TimeBlock, format_clock};
use crate::error::Result;
use crate::place::PlaceCategory;
use crate::transport::TransportLeg;

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledVisit<I> {
    pub place_id: I,
    pub name: String,
    pub category: PlaceCategory,
    pub block: BlockKind,
    pub score: f64,
    /// Seconds from midnight of the trip day.
    pub arrival: i32,
    pub departure: i32,
    pub avg_price: f64,
    /// Travel from this visit to the next one of the day.
    pub next_leg: Option<TransportLeg>,
}

impl<I> ScheduledVisit<I> {
    pub fn duration_secs(&self) -> i32 {
        self.departure - self.arrival
    }

    pub fn time_range(&self) -> String {
        format!("{}-{}", format_clock(self.arrival), format_clock(self.departure))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderfillReason {
    /// No unvisited place of the required category was left.
    NoCandidates,
    /// Candidates existed but none fit in the remaining time.
    NoFeasibleWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Underfill {
    pub target: usize,
    pub scheduled: usize,
    pub reason: UnderfillReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockSchedule<I> {
    pub kind: BlockKind,
    pub start: i32,
    pub end: i32,
    pub visits: Vec<ScheduledVisit<I>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underfill: Option<Underfill>,
}

impl<I> BlockSchedule<I> {
    pub fn new(block: &TimeBlock) -> Self {
        Self {
            kind: block.kind,
            start: block.start,
            end: block.end,
            visits: Vec::new(),
            underfill: None,
        }
    }

    pub fn is_underfilled(&self) -> bool {
        self.underfill.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySummary {
    pub places: usize,
    pub places_cost: f64,
    pub transport_cost: f64,
    pub total_cost: f64,
    pub travel_secs: i32,
    pub visit_secs: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayItinerary<I> {
    /// 1-based.
    pub day: u32,
    pub date: NaiveDate,
    /// From the previous night's hotel to the first visit of the day.
    pub start_leg: Option<TransportLeg>,
    pub blocks: Vec<BlockSchedule<I>>,
    pub summary: DaySummary,
}

impl<I> DayItinerary<I> {
    pub fn assemble(
        day: u32,
        date: NaiveDate,
        start_leg: Option<TransportLeg>,
        blocks: Vec<BlockSchedule<I>>,
    ) -> Self {
        let mut summary = DaySummary::default();
        if let Some(leg) = &start_leg {
            summary.transport_cost += leg.cost;
            summary.travel_secs += leg.travel_secs;
        }
        for visit in blocks.iter().flat_map(|block| &block.visits) {
            summary.places += 1;
            summary.places_cost += visit.avg_price;
            summary.visit_secs += visit.duration_secs();
            if let Some(leg) = &visit.next_leg {
                summary.transport_cost += leg.cost;
                summary.travel_secs += leg.travel_secs;
            }
        }
        summary.total_cost = summary.places_cost + summary.transport_cost;

        Self {
            day,
            date,
            start_leg,
            blocks,
            summary,
        }
    }

    pub fn visits(&self) -> impl Iterator<Item = &ScheduledVisit<I>> {
        self.blocks.iter().flat_map(|block| block.visits.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripSummary {
    pub days: usize,
    pub requested_places: usize,
    pub scheduled_places: usize,
    pub underfilled_blocks: usize,
    pub places_cost: f64,
    pub transport_cost: f64,
    pub total_cost: f64,
    pub travel_secs: i32,
}

impl TripSummary {
    /// Share of requested places that made it into the itinerary.
    pub fn coverage(&self) -> f64 {
        if self.requested_places == 0 {
            return 1.0;
        }
        self.scheduled_places as f64 / self.requested_places as f64
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripItinerary<I> {
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    /// Content weight of the scoring pass that produced this trip.
    pub alpha: f64,
    pub days: Vec<DayItinerary<I>>,
    pub summary: TripSummary,
}

impl<I> TripItinerary<I> {
    pub fn assemble(
        user_id: &str,
        destination: &str,
        start_date: NaiveDate,
        alpha: f64,
        requested_per_day: usize,
        days: Vec<DayItinerary<I>>,
    ) -> Self {
        let mut summary = TripSummary {
            days: days.len(),
            requested_places: requested_per_day * days.len(),
            ..TripSummary::default()
        };
        for day in &days {
            summary.scheduled_places += day.summary.places;
            summary.places_cost += day.summary.places_cost;
            summary.transport_cost += day.summary.transport_cost;
            summary.travel_secs += day.summary.travel_secs;
            summary.underfilled_blocks += day.blocks.iter().filter(|b| b.is_underfilled()).count();
        }
        summary.total_cost = summary.places_cost + summary.transport_cost;

        Self {
            user_id: user_id.to_string(),
            destination: destination.to_string(),
            start_date,
            alpha,
            days,
            summary,
        }
    }

    pub fn coverage(&self) -> f64 {
        self.summary.coverage()
    }

    pub fn visits(&self) -> impl Iterator<Item = &ScheduledVisit<I>> {
        self.days.iter().flat_map(|day| day.visits())
    }
}

impl<I: Serialize> TripItinerary<I> {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::hm;
    use crate::transport::TransportModel;

    fn visit(id: &str, block: BlockKind, arrival: i32, departure: i32) -> ScheduledVisit<String> {
        ScheduledVisit {
            place_id: id.to_string(),
            name: id.to_uppercase(),
            category: block.required_category(),
            block,
            score: 0.5,
            arrival,
            departure,
            avg_price: 10.0,
            next_leg: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_day_summary_counts_every_leg_once() {
        let model = TransportModel::default();
        let block = TimeBlock::new(BlockKind::Morning, hm(8, 0), hm(11, 0), 2);
        let mut schedule = BlockSchedule::new(&block);
        let mut first = visit("a", BlockKind::Morning, hm(8, 0), hm(9, 0));
        first.next_leg = Some(model.leg(5.0));
        schedule.visits.push(first);
        schedule.visits.push(visit("b", BlockKind::Morning, hm(9, 15), hm(10, 15)));

        let day = DayItinerary::assemble(1, date(), Some(model.leg(1.0)), vec![schedule]);

        assert_eq!(day.summary.places, 2);
        assert!((day.summary.places_cost - 20.0).abs() < 1e-9);
        assert!((day.summary.transport_cost - 2.0).abs() < 1e-9);
        assert!((day.summary.total_cost - 22.0).abs() < 1e-9);
        assert_eq!(day.summary.visit_secs, hm(2, 0));
    }

    #[test]
    fn test_trip_coverage() {
        let block = TimeBlock::new(BlockKind::Lunch, hm(11, 0), hm(13, 0), 1);
        let mut schedule = BlockSchedule::new(&block);
        schedule.visits.push(visit("r", BlockKind::Lunch, hm(11, 0), hm(12, 0)));
        let mut empty = BlockSchedule::new(&block);
        empty.underfill = Some(Underfill {
            target: 1,
            scheduled: 0,
            reason: UnderfillReason::NoCandidates,
        });
        let day = DayItinerary::assemble(1, date(), None, vec![schedule, empty]);

        let trip = TripItinerary::assemble("u1", "Da Nang", date(), 0.3, 2, vec![day]);

        assert_eq!(trip.summary.requested_places, 2);
        assert_eq!(trip.summary.scheduled_places, 1);
        assert_eq!(trip.summary.underfilled_blocks, 1);
        assert!((trip.coverage() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_json_rendering() {
        let trip: TripItinerary<String> =
            TripItinerary::assemble("u1", "Hoi An", date(), 0.3, 10, Vec::new());
        let json = trip.to_json_pretty().unwrap();
        assert!(json.contains("\"destination\": \"Hoi An\""));
        assert!(json.contains("\"start_date\": \"2025-06-01\""));
    }
}

//! Daily time blocks and visit durations.
//!
//! Clock values are seconds from midnight of the trip day. The overnight rest
//! block ends after 24h (07:00 next morning is `31 * 3600`).

use serde::{Deserialize, Serialize};

use crate::place::{ActivityKind, PlaceCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Breakfast,
    Morning,
    Lunch,
    Afternoon,
    Dinner,
    Evening,
    Rest,
}

impl BlockKind {
    pub fn required_category(self) -> PlaceCategory {
        match self {
            BlockKind::Breakfast | BlockKind::Lunch | BlockKind::Dinner => PlaceCategory::Restaurant,
            BlockKind::Morning | BlockKind::Afternoon | BlockKind::Evening => PlaceCategory::Activity,
            BlockKind::Rest => PlaceCategory::Hotel,
        }
    }

    pub fn is_meal(self) -> bool {
        self.required_category() == PlaceCategory::Restaurant
    }

    pub fn is_rest(self) -> bool {
        self.required_category() == PlaceCategory::Hotel
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub kind: BlockKind,
    pub start: i32,
    pub end: i32,
    /// How many places the block aims to hold.
    pub target: usize,
    /// Slack kept free at the end of the block.
    #[serde(default)]
    pub buffer: i32,
}

impl TimeBlock {
    pub fn new(kind: BlockKind, start: i32, end: i32, target: usize) -> Self {
        Self {
            kind,
            start,
            end,
            target,
            buffer: 0,
        }
    }

    pub fn with_buffer(mut self, buffer: i32) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn required_category(&self) -> PlaceCategory {
        self.kind.required_category()
    }

    /// Latest departure a visit in this block may have.
    pub fn budget_end(&self) -> i32 {
        (self.end - self.buffer).max(self.start)
    }

    pub fn duration(&self) -> i32 {
        self.end - self.start
    }
}

/// Render seconds from midnight as `HH:MM`, wrapping past midnight.
pub fn format_clock(secs: i32) -> String {
    let minutes = secs.rem_euclid(24 * 3600) / 60;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub const fn hm(hours: i32, minutes: i32) -> i32 {
    hours * 3600 + minutes * 60
}

/// The ordered blocks of every trip day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayTemplate {
    pub blocks: Vec<TimeBlock>,
}

impl Default for DayTemplate {
    fn default() -> Self {
        Self {
            blocks: vec![
                TimeBlock::new(BlockKind::Breakfast, hm(7, 0), hm(8, 0), 1).with_buffer(hm(0, 10)),
                TimeBlock::new(BlockKind::Morning, hm(8, 0), hm(11, 0), 2).with_buffer(hm(0, 20)),
                TimeBlock::new(BlockKind::Lunch, hm(11, 0), hm(13, 0), 1).with_buffer(hm(0, 15)),
                TimeBlock::new(BlockKind::Afternoon, hm(13, 0), hm(18, 30), 3)
                    .with_buffer(hm(0, 30)),
                TimeBlock::new(BlockKind::Dinner, hm(18, 30), hm(20, 30), 1)
                    .with_buffer(hm(0, 15)),
                TimeBlock::new(BlockKind::Evening, hm(20, 30), hm(22, 0), 1)
                    .with_buffer(hm(0, 10)),
                TimeBlock::new(BlockKind::Rest, hm(22, 0), hm(31, 0), 1),
            ],
        }
    }
}

impl DayTemplate {
    /// Places a full day asks for.
    pub fn target_places(&self) -> usize {
        self.blocks.iter().map(|block| block.target).sum()
    }

    /// Blocks sorted by start time; the scheduler walks them in this order.
    pub fn ordered(&self) -> Vec<&TimeBlock> {
        let mut blocks: Vec<&TimeBlock> = self.blocks.iter().collect();
        blocks.sort_by_key(|block| block.start);
        blocks
    }
}

/// How long a visit lasts, by block and activity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitDurations {
    pub breakfast: i32,
    pub lunch: i32,
    pub dinner: i32,
    pub museum: i32,
    pub park: i32,
    pub landmark: i32,
    pub shopping: i32,
    pub nightlife: i32,
    pub other_activity: i32,
    /// Shortest stay that still counts as a night at a hotel.
    pub min_rest: i32,
}

impl Default for VisitDurations {
    fn default() -> Self {
        Self {
            breakfast: hm(0, 45),
            lunch: hm(1, 0),
            dinner: hm(1, 30),
            museum: hm(1, 30),
            park: hm(1, 0),
            landmark: hm(1, 0),
            shopping: hm(1, 15),
            nightlife: hm(1, 0),
            other_activity: hm(1, 0),
            min_rest: hm(6, 0),
        }
    }
}

impl VisitDurations {
    pub fn meal(&self, kind: BlockKind) -> i32 {
        match kind {
            BlockKind::Breakfast => self.breakfast,
            BlockKind::Dinner => self.dinner,
            _ => self.lunch,
        }
    }

    pub fn activity(&self, kind: ActivityKind) -> i32 {
        match kind {
            ActivityKind::Museum => self.museum,
            ActivityKind::Park => self.park,
            ActivityKind::Landmark => self.landmark,
            ActivityKind::Shopping => self.shopping,
            ActivityKind::Nightlife => self.nightlife,
            ActivityKind::Other => self.other_activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_categories() {
        assert_eq!(BlockKind::Breakfast.required_category(), PlaceCategory::Restaurant);
        assert_eq!(BlockKind::Evening.required_category(), PlaceCategory::Activity);
        assert_eq!(BlockKind::Rest.required_category(), PlaceCategory::Hotel);
        assert!(BlockKind::Dinner.is_meal());
        assert!(!BlockKind::Rest.is_meal());
        assert!(BlockKind::Rest.is_rest());
    }

    #[test]
    fn test_default_template_is_contiguous() {
        let template = DayTemplate::default();
        let blocks = template.ordered();
        for pair in blocks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "{:?} -> {:?}", pair[0].kind, pair[1].kind);
        }
        assert_eq!(template.target_places(), 10);
    }

    #[test]
    fn test_budget_end_respects_buffer() {
        let block = TimeBlock::new(BlockKind::Lunch, hm(11, 0), hm(13, 0), 1).with_buffer(hm(0, 15));
        assert_eq!(block.budget_end(), hm(12, 45));
        let tiny = TimeBlock::new(BlockKind::Lunch, hm(11, 0), hm(11, 5), 1).with_buffer(hm(0, 15));
        assert_eq!(tiny.budget_end(), hm(11, 0));
    }

    #[test]
    fn test_format_clock_wraps() {
        assert_eq!(format_clock(hm(7, 5)), "07:05");
        assert_eq!(format_clock(hm(31, 0)), "07:00");
    }

    #[test]
    fn test_museums_take_longer_than_parks() {
        let durations = VisitDurations::default();
        assert!(durations.activity(ActivityKind::Museum) > durations.activity(ActivityKind::Park));
    }
}

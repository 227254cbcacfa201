//! The planning request as seen by the core.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl Budget {
    /// Price levels (1..=4) a budget accepts. Level 0 means unknown and is
    /// accepted by every budget.
    pub fn allows(self, price_level: u8) -> bool {
        if price_level == 0 {
            return true;
        }
        match self {
            Budget::Low => price_level <= 1,
            Budget::Medium => (1..=3).contains(&price_level),
            Budget::High => (2..=4).contains(&price_level),
        }
    }
}

/// Created once per planning call and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext<I> {
    pub user_id: String,
    pub destination: String,
    pub trip_days: i64,
    pub start_date: NaiveDate,
    /// Places the user explicitly picked.
    // A path default keeps serde from requiring `I: Default`.
    #[serde(default = "Vec::new")]
    pub selected: Vec<I>,
    #[serde(default = "Vec::new")]
    pub disliked: Vec<I>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget: Option<Budget>,
}

impl<I: std::hash::Hash + Eq> UserContext<I> {
    pub fn new(
        user_id: impl Into<String>,
        destination: impl Into<String>,
        trip_days: i64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            destination: destination.into(),
            trip_days,
            start_date,
            selected: Vec::new(),
            disliked: Vec::new(),
            interests: Vec::new(),
            budget: None,
        }
    }

    pub fn selected(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        self.selected.extend(ids);
        self
    }

    pub fn disliked(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        self.disliked.extend(ids);
        self
    }

    pub fn interest(mut self, interest: &str) -> Self {
        self.interests.push(interest.to_string());
        self
    }

    pub fn budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Size of the pre-selection set, ignoring repeated ids.
    pub fn selected_count(&self) -> usize {
        self.selected.iter().collect::<HashSet<_>>().len()
    }
}

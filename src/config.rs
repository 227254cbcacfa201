//! Planner configuration.
//!
//! Every section has working defaults, so a JSON document only needs the
//! values it overrides.

use serde::{Deserialize, Serialize};

use crate::blocks::{DayTemplate, VisitDurations};
use crate::error::{PlanError, Result};
use crate::filter::CandidateFilter;
use crate::scoring::{AlphaPolicy, CategoryQuotas};
use crate::transport::TransportModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub transport: TransportModel,
    pub alpha: AlphaPolicy,
    pub quotas: CategoryQuotas,
    pub filter: CandidateFilter,
    pub day: DayTemplate,
    pub durations: VisitDurations,
    /// Reduce the scored candidates to a category-balanced shortlist of this
    /// size before scheduling. `None` keeps every scored place.
    pub shortlist_size: Option<usize>,
    /// Longest trip a request may ask for.
    pub max_trip_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transport: TransportModel::default(),
            alpha: AlphaPolicy::default(),
            quotas: CategoryQuotas::default(),
            filter: CandidateFilter::default(),
            day: DayTemplate::default(),
            durations: VisitDurations::default(),
            shortlist_size: None,
            max_trip_days: 14,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scheduler cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.transport.validate()?;
        if self.max_trip_days == 0 {
            return Err(PlanError::InvalidConfig(
                "max_trip_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

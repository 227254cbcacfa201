//! Distance to transport mode, travel time and cost.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walking,
    Motorbike,
    Taxi,
}

/// One entry of the priority-ordered tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportTier {
    pub mode: TransportMode,
    /// Inclusive upper bound on distance. `None` accepts any distance.
    pub max_distance_km: Option<f64>,
    pub speed_kmh: f64,
    pub cost_per_km: f64,
}

impl TransportTier {
    pub fn accepts(&self, distance_km: f64) -> bool {
        self.max_distance_km.is_none_or(|max| distance_km <= max)
    }

    pub fn travel_secs(&self, distance_km: f64) -> i32 {
        let hours = distance_km / self.speed_kmh;
        (hours * 3600.0).round() as i32
    }

    pub fn cost(&self, distance_km: f64) -> f64 {
        distance_km * self.cost_per_km
    }
}

/// A single travel leg between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportLeg {
    pub mode: TransportMode,
    pub distance_km: f64,
    pub travel_secs: i32,
    pub cost: f64,
}

impl TransportLeg {
    pub fn travel_hours(&self) -> f64 {
        self.travel_secs as f64 / 3600.0
    }
}

/// Used only when a configuration supplies an empty tier table.
static FALLBACK_TIER: TransportTier = TransportTier {
    mode: TransportMode::Taxi,
    max_distance_km: None,
    speed_kmh: 30.0,
    cost_per_km: 0.75,
};

/// Maps a distance to the first tier that accepts it.
///
/// Tiers are evaluated in order; the last tier is used for anything the
/// others reject, so selection is total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportModel {
    pub tiers: Vec<TransportTier>,
}

impl Default for TransportModel {
    fn default() -> Self {
        Self {
            tiers: vec![
                TransportTier {
                    mode: TransportMode::Walking,
                    max_distance_km: Some(1.5),
                    speed_kmh: 5.0,
                    cost_per_km: 0.0,
                },
                TransportTier {
                    mode: TransportMode::Motorbike,
                    max_distance_km: Some(30.0),
                    speed_kmh: 35.0,
                    cost_per_km: 0.4,
                },
                TransportTier {
                    mode: TransportMode::Taxi,
                    max_distance_km: None,
                    speed_kmh: 30.0,
                    cost_per_km: 0.75,
                },
            ],
        }
    }
}

impl TransportModel {
    /// Speeds must be positive and finite, costs non-negative.
    pub fn validate(&self) -> Result<()> {
        for tier in &self.tiers {
            if !(tier.speed_kmh.is_finite() && tier.speed_kmh > 0.0) {
                return Err(PlanError::InvalidConfig(format!(
                    "{:?} tier speed must be positive, got {}",
                    tier.mode, tier.speed_kmh
                )));
            }
            if !(tier.cost_per_km.is_finite() && tier.cost_per_km >= 0.0) {
                return Err(PlanError::InvalidConfig(format!(
                    "{:?} tier cost must be non-negative, got {}",
                    tier.mode, tier.cost_per_km
                )));
            }
        }
        Ok(())
    }

    pub fn select(&self, distance_km: f64) -> &TransportTier {
        debug_assert!(distance_km >= 0.0, "negative distance {distance_km}");
        self.tiers
            .iter()
            .find(|tier| tier.accepts(distance_km))
            .or_else(|| self.tiers.last())
            .unwrap_or(&FALLBACK_TIER)
    }

    /// Like [`select`](Self::select), but skips tiers whose travel time
    /// exceeds `available_secs`. When no tier is fast enough the last tier
    /// is used.
    pub fn select_within(&self, distance_km: f64, available_secs: i32) -> &TransportTier {
        self.tiers
            .iter()
            .filter(|tier| tier.accepts(distance_km))
            .find(|tier| tier.travel_secs(distance_km) <= available_secs)
            .or_else(|| self.tiers.last())
            .unwrap_or(&FALLBACK_TIER)
    }

    pub fn leg(&self, distance_km: f64) -> TransportLeg {
        Self::leg_for(self.select(distance_km), distance_km)
    }

    pub fn leg_within(&self, distance_km: f64, available_secs: i32) -> TransportLeg {
        Self::leg_for(self.select_within(distance_km, available_secs), distance_km)
    }

    fn leg_for(tier: &TransportTier, distance_km: f64) -> TransportLeg {
        TransportLeg {
            mode: tier.mode,
            distance_km,
            travel_secs: tier.travel_secs(distance_km),
            cost: tier.cost(distance_km),
        }
    }
}

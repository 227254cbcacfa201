//! Hybrid relevance scoring.
//!
//! Blends a content-similarity score and a collaborative score per place:
//!
//! ```text
//! hybrid = alpha * content + (1 - alpha) * collaborative
//! ```
//!
//! `alpha` is computed once per planning request from how much of the visible
//! candidate pool the user already selected, so it is identical for every
//! candidate of one scoring pass.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::place::PlaceCategory;
use crate::traits::{CollaborativeScorer, ContentScorer, Place};

/// Tunable constants of the alpha computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaPolicy {
    /// The visible interaction pool is clipped to `[min_pool, max_pool]`.
    pub min_pool: usize,
    pub max_pool: usize,
    /// Alpha when nothing was selected. Favours the non-personalised signal;
    /// needs product validation.
    pub cold_start_alpha: f64,
    pub min_alpha: f64,
    /// Alpha reached at `pivot_rate`; the two linear segments meet here.
    pub pivot_alpha: f64,
    pub max_alpha: f64,
    pub pivot_rate: f64,
    pub engagement_places_per_day: f64,
    pub engagement_bonus: f64,
}

impl Default for AlphaPolicy {
    fn default() -> Self {
        Self {
            min_pool: 30,
            max_pool: 200,
            cold_start_alpha: 0.3,
            min_alpha: 0.3,
            pivot_alpha: 0.6,
            max_alpha: 0.9,
            pivot_rate: 0.5,
            engagement_places_per_day: 5.0,
            engagement_bonus: 0.05,
        }
    }
}

impl AlphaPolicy {
    /// Visible pool size after clipping.
    pub fn clip_pool(&self, total_candidates: usize) -> usize {
        total_candidates.clamp(self.min_pool, self.max_pool.max(self.min_pool))
    }

    /// Blend weight for the content score, in `[min_alpha, max_alpha]`.
    pub fn alpha(&self, selected_count: usize, total_candidates: usize, trip_days: u32) -> f64 {
        if selected_count == 0 {
            return self.cold_start_alpha;
        }

        let pool = self.clip_pool(total_candidates).max(1);
        let selection_rate = selected_count as f64 / pool as f64;

        let mut alpha = if selection_rate < self.pivot_rate {
            self.min_alpha + (self.pivot_alpha - self.min_alpha) * (selection_rate / self.pivot_rate)
        } else {
            self.pivot_alpha
                + (self.max_alpha - self.pivot_alpha)
                    * ((selection_rate - self.pivot_rate) / (1.0 - self.pivot_rate))
        };

        let places_per_day = selected_count as f64 / trip_days.max(1) as f64;
        if places_per_day >= self.engagement_places_per_day {
            alpha += self.engagement_bonus;
        }

        let alpha = alpha.clamp(self.min_alpha, self.max_alpha);
        debug!(
            selected_count,
            pool, selection_rate, places_per_day, alpha, "computed hybrid alpha"
        );
        alpha
    }
}

/// A place together with its blended relevance score.
#[derive(Debug)]
pub struct ScoredCandidate<'a, P> {
    pub place: &'a P,
    pub content_score: f64,
    pub collab_score: f64,
    /// In `0.0..=1.0`.
    pub score: f64,
}

impl<P> Clone for ScoredCandidate<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ScoredCandidate<'_, P> {}

/// Combines the two injected score providers.
pub struct HybridScorer<'s, P: Place> {
    content: &'s dyn ContentScorer<P>,
    collaborative: &'s dyn CollaborativeScorer<P>,
    policy: AlphaPolicy,
}

impl<'s, P: Place> HybridScorer<'s, P> {
    pub fn new(
        content: &'s dyn ContentScorer<P>,
        collaborative: &'s dyn CollaborativeScorer<P>,
        policy: AlphaPolicy,
    ) -> Self {
        Self {
            content,
            collaborative,
            policy,
        }
    }

    pub fn policy(&self) -> &AlphaPolicy {
        &self.policy
    }

    pub fn alpha(&self, selected_count: usize, total_candidates: usize, trip_days: u32) -> f64 {
        self.policy.alpha(selected_count, total_candidates, trip_days)
    }

    /// Score every candidate with a single `alpha`, best first.
    pub fn score<'a>(
        &self,
        alpha: f64,
        user_id: &str,
        selected: &[&P],
        candidates: &[&'a P],
    ) -> Vec<ScoredCandidate<'a, P>> {
        let fallback = sanitise(self.collaborative.fallback(), 0.5);

        let mut scored: Vec<ScoredCandidate<'a, P>> = candidates
            .iter()
            .map(|&place| {
                let content_score = sanitise(self.content.content_score(selected, place), 0.0);
                let collab_score = self
                    .collaborative
                    .collab_score(user_id, place)
                    .map_or(fallback, |score| sanitise(score, fallback));
                let score = (alpha * content_score + (1.0 - alpha) * collab_score).clamp(0.0, 1.0);
                ScoredCandidate {
                    place,
                    content_score,
                    collab_score,
                    score,
                }
            })
            .collect();

        sort_by_score(&mut scored);
        info!(candidates = scored.len(), alpha, "scored candidates");
        scored
    }
}

fn sanitise(score: f64, default: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        default
    }
}

/// Best score first; ties go to the higher rating, then input order.
pub fn sort_by_score<P: Place>(candidates: &mut [ScoredCandidate<'_, P>]) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.place.rating().total_cmp(&a.place.rating()))
    });
}

/// Share of a fixed-size shortlist reserved per category.
///
/// Hotels get whatever the activity and restaurant shares leave over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryQuotas {
    pub activity: f64,
    pub restaurant: f64,
}

impl Default for CategoryQuotas {
    fn default() -> Self {
        Self {
            activity: 0.6,
            restaurant: 0.3,
        }
    }
}

impl CategoryQuotas {
    /// Take the best candidates of each category up to its allocation of `k`,
    /// then merge and re-sort, so one crowded category cannot push out the
    /// ones an itinerary structurally needs.
    pub fn shortlist<'a, P: Place>(
        &self,
        candidates: &[ScoredCandidate<'a, P>],
        k: usize,
    ) -> Vec<ScoredCandidate<'a, P>> {
        let by_category = |category: PlaceCategory| -> Vec<ScoredCandidate<'a, P>> {
            let mut items: Vec<_> = candidates
                .iter()
                .filter(|c| c.place.category() == category)
                .copied()
                .collect();
            sort_by_score(&mut items);
            items
        };

        let activities = by_category(PlaceCategory::Activity);
        let restaurants = by_category(PlaceCategory::Restaurant);
        let hotels = by_category(PlaceCategory::Hotel);

        let k_activities = activities.len().min((k as f64 * self.activity).floor() as usize);
        let k_restaurants = restaurants
            .len()
            .min((k as f64 * self.restaurant).floor() as usize);
        let k_hotels = hotels
            .len()
            .min(k.saturating_sub(k_activities + k_restaurants));

        let mut merged: Vec<_> = activities
            .into_iter()
            .take(k_activities)
            .chain(restaurants.into_iter().take(k_restaurants))
            .chain(hotels.into_iter().take(k_hotels))
            .collect();
        sort_by_score(&mut merged);

        info!(
            activities = k_activities,
            restaurants = k_restaurants,
            hotels = k_hotels,
            "balanced shortlist"
        );
        merged
    }
}

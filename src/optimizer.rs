//! End-to-end optimizer pipeline.
//!
//! Runs the whole data flow for a raw catalogue:
//!
//! ```text
//! [items] → tier window → partition by slot → solve → recommend → [OptimizeReport]
//! ```

use crate::catalogue::partition_by_slot;
use crate::config::OptimizerConfig;
use crate::error::SolveError;
use crate::item::Item;
use crate::profile::StatWeightProfile;
use crate::result::SolveResult;
use crate::solver::{solve_with, NoopObserver, SolveObserver};
use crate::tier::{detect_tier, filter_window, ItemLevelRange};
use serde::{Deserialize, Serialize};

/// Outcome of one optimizer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeReport {
    /// Item-level window the catalogue was narrowed to.
    pub tier: ItemLevelRange,
    /// Items left after tier filtering.
    pub candidates: usize,
    pub result: SolveResult,
}

/// Runs the pipeline with a fixed, validated configuration.
///
/// # Examples
///
/// ```rust
/// use gearsolve::*;
///
/// let items = vec![
///     Item::new(1, "Raid Hat", 660, Slot::Head)
///         .with_stats(StatBundle::from_pairs([(Stat::CriticalHit, 230)])),
///     Item::new(2, "Old Hat", 560, Slot::Head)
///         .with_stats(StatBundle::from_pairs([(Stat::CriticalHit, 500)])),
/// ];
/// let config = OptimizerConfig {
///     required_slots: vec![Slot::Head],
///     ..OptimizerConfig::default()
/// };
///
/// let report = Optimizer::new(config)?.optimize(&items)?;
/// // The old hat falls outside the 30-level window.
/// assert_eq!(report.result.assignment.get(Slot::Head).map(|i| i.id), Some(1));
/// # Ok::<(), SolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: OptimizerConfig,
    profile: StatWeightProfile,
}

impl Optimizer {
    /// Validate `config` and resolve its profile.
    pub fn new(config: OptimizerConfig) -> Result<Self, SolveError> {
        config.validate()?;
        let profile = config.profile.resolve()?;
        Ok(Self { config, profile })
    }

    /// Replace the configured profile with an ad hoc one.
    pub fn with_profile(mut self, profile: StatWeightProfile) -> Result<Self, SolveError> {
        profile.validate()?;
        self.profile = profile;
        Ok(self)
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn profile(&self) -> &StatWeightProfile {
        &self.profile
    }

    /// Run the pipeline without progress reporting.
    pub fn optimize(&self, items: &[Item]) -> Result<OptimizeReport, SolveError> {
        self.optimize_with(items, &NoopObserver)
    }

    /// Run the pipeline, forwarding progress and cancellation to `observer`.
    pub fn optimize_with(
        &self,
        items: &[Item],
        observer: &dyn SolveObserver,
    ) -> Result<OptimizeReport, SolveError> {
        let tier = detect_tier(items, self.config.ilvl_window)?;
        let in_tier = filter_window(items, tier.max, self.config.ilvl_window)?;
        tracing::debug!(
            "tier {}..={}: {} of {} items kept",
            tier.min,
            tier.max,
            in_tier.len(),
            items.len()
        );

        let candidates = in_tier.len();
        let mut slots = partition_by_slot(in_tier);
        for &slot in &self.config.required_slots {
            slots.require(slot);
        }

        let result = solve_with(
            &slots,
            &self.profile,
            &self.config.base_stats,
            &self.config.solve_config(),
            observer,
        )?;

        let missing = result.missing_slots(self.config.required_slots.iter().copied());
        if !missing.is_empty() {
            tracing::warn!("assignment is missing required slots: {:?}", missing);
        }

        Ok(OptimizeReport {
            tier,
            candidates,
            result,
        })
    }
}

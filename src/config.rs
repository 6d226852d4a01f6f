//! Engine configuration.
//!
//! `OptimizerConfig` gathers every knob of a run (window width, scoring
//! mode, candidate cap, required slots, profile, formula constants) into
//! one value passed explicitly to the optimizer. Missing JSON fields fall
//! back to their defaults.

use crate::bundle::StatBundle;
use crate::error::SolveError;
use crate::item::Slot;
use crate::profile::ProfileSpec;
use crate::solver::{ScoringMode, SolveConfig, DEFAULT_CANDIDATES_PER_SLOT};
use crate::throughput::ThroughputModel;
use crate::tier::DEFAULT_ILVL_WINDOW;
use serde::{Deserialize, Serialize};

/// Configuration for a full optimizer run.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{OptimizerConfig, ScoringMode, Slot};
///
/// let config = OptimizerConfig::from_json(r#"{
///     "ilvl_window": 20,
///     "scoring_mode": "throughput-formula",
///     "required_slots": ["head", "body"],
///     "profile": "speed-focused"
/// }"#).unwrap();
///
/// assert_eq!(config.ilvl_window, 20);
/// assert_eq!(config.scoring_mode, ScoringMode::ThroughputFormula);
/// assert_eq!(config.required_slots, vec![Slot::Head, Slot::Body]);
/// assert_eq!(config.candidates_per_slot, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Width of the item-level window below the highest observed level.
    pub ilvl_window: i64,
    pub scoring_mode: ScoringMode,
    pub candidates_per_slot: usize,
    /// Slots the assignment should cover.
    pub required_slots: Vec<Slot>,
    pub profile: ProfileSpec,
    /// Stats the character has before any gear.
    pub base_stats: StatBundle,
    pub throughput: ThroughputModel,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            ilvl_window: DEFAULT_ILVL_WINDOW,
            scoring_mode: ScoringMode::default(),
            candidates_per_slot: DEFAULT_CANDIDATES_PER_SLOT,
            required_slots: Slot::ALL.to_vec(),
            profile: ProfileSpec::default(),
            base_stats: StatBundle::ZERO,
            throughput: ThroughputModel::default(),
        }
    }
}

impl OptimizerConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, SolveError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every value the engine can validate locally.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.ilvl_window < 0 {
            return Err(SolveError::invalid(format!(
                "ilvl_window must be non-negative, got {}",
                self.ilvl_window
            )));
        }
        if self.required_slots.is_empty() {
            return Err(SolveError::invalid("required_slots is empty"));
        }
        self.profile.resolve()?;
        self.solve_config().validate()
    }

    /// The subset of settings the solver consumes.
    pub fn solve_config(&self) -> SolveConfig {
        SolveConfig {
            scoring_mode: self.scoring_mode,
            candidates_per_slot: self.candidates_per_slot,
            throughput: self.throughput.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.ilvl_window, 30);
        assert_eq!(config.required_slots.len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(
            OptimizerConfig::from_json("{}").unwrap(),
            OptimizerConfig::default()
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = OptimizerConfig::from_json("{\"ilvl_window\": \"wide\"}").unwrap_err();
        assert!(matches!(err, SolveError::Config(_)));
    }

    #[test]
    fn test_negative_window_rejected() {
        let config = OptimizerConfig {
            ilvl_window: -5,
            ..OptimizerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_required_slots_rejected() {
        let config = OptimizerConfig::from_json(r#"{"required_slots": []}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_weights_and_base_stats() {
        let config = OptimizerConfig::from_json(
            r#"{
                "profile": {"critical-hit": 1.0, "direct-hit": 0.25},
                "base_stats": {"main-stat": 390, "speed": 400},
                "throughput": {"potency": 280}
            }"#,
        )
        .unwrap();
        let profile = config.profile.resolve().unwrap();
        assert_eq!(profile.nonzero_count(), 2);
        assert_eq!(config.base_stats.get(crate::Stat::MainStat), 390);
        assert_eq!(config.solve_config().throughput.potency, 280.0);
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let config = OptimizerConfig::from_json(r#"{"profile": "healer"}"#).unwrap();
        assert!(config.validate().is_err());
    }
}

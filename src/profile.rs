//! Stat-weight profiles.
//!
//! A `StatWeightProfile` values one point of each stat under a playstyle
//! priority. Profiles come from a small set of named presets or are built
//! ad hoc; either way exactly one profile is active per solve.

use crate::error::SolveError;
use crate::stat::Stat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Relative value of one point of each stat.
///
/// Weights for stats absent from the profile are zero.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{Stat, StatWeightProfile};
///
/// let profile = StatWeightProfile::new()
///     .with(Stat::CriticalHit, 1.0)
///     .with(Stat::Determination, 0.5);
///
/// assert_eq!(profile.weight(Stat::CriticalHit), 1.0);
/// assert_eq!(profile.weight(Stat::Speed), 0.0);
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatWeightProfile {
    weights: BTreeMap<Stat, f64>,
}

impl StatWeightProfile {
    /// Create an empty profile (every weight zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from `(stat, weight)` pairs.
    ///
    /// Later pairs overwrite earlier ones for the same stat.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Stat, f64)>) -> Self {
        Self {
            weights: pairs.into_iter().collect(),
        }
    }

    /// Return this profile with `stat` weighted at `weight`.
    pub fn with(mut self, stat: Stat, weight: f64) -> Self {
        self.weights.insert(stat, weight);
        self
    }

    /// Weight of a stat, zero when absent.
    pub fn weight(&self, stat: Stat) -> f64 {
        self.weights.get(&stat).copied().unwrap_or(0.0)
    }

    /// Weights in canonical stat order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ALL.iter().map(move |&stat| (stat, self.weight(stat)))
    }

    /// Number of stats with a weight strictly greater than zero.
    pub fn nonzero_count(&self) -> usize {
        self.weights.values().filter(|&&w| w > 0.0).count()
    }

    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> Result<(), SolveError> {
        for (stat, &weight) in &self.weights {
            if !weight.is_finite() {
                return Err(SolveError::invalid(format!(
                    "weight for {stat} is not finite"
                )));
            }
            if weight < 0.0 {
                return Err(SolveError::invalid(format!(
                    "weight for {stat} is negative ({weight})"
                )));
            }
        }
        Ok(())
    }
}

/// Named playstyle presets.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{ProfilePreset, Stat};
///
/// let preset: ProfilePreset = "Spell Speed Focus".parse().unwrap();
/// assert_eq!(preset, ProfilePreset::SpeedFocused);
///
/// let profile = preset.profile();
/// assert!(profile.weight(Stat::Speed) > profile.weight(Stat::CriticalHit));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfilePreset {
    #[default]
    CriticalFocused,
    SpeedFocused,
    Balanced,
}

impl ProfilePreset {
    pub const ALL: [ProfilePreset; 3] = [
        ProfilePreset::CriticalFocused,
        ProfilePreset::SpeedFocused,
        ProfilePreset::Balanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfilePreset::CriticalFocused => "critical-focused",
            ProfilePreset::SpeedFocused => "speed-focused",
            ProfilePreset::Balanced => "balanced",
        }
    }

    /// The weights this preset stands for.
    pub fn profile(self) -> StatWeightProfile {
        match self {
            ProfilePreset::CriticalFocused => StatWeightProfile::from_pairs([
                (Stat::CriticalHit, 1.0),
                (Stat::Determination, 0.7),
                (Stat::DirectHit, 0.6),
                (Stat::Speed, 0.3),
            ]),
            ProfilePreset::SpeedFocused => StatWeightProfile::from_pairs([
                (Stat::Speed, 1.0),
                (Stat::CriticalHit, 0.6),
                (Stat::Determination, 0.5),
                (Stat::DirectHit, 0.5),
            ]),
            ProfilePreset::Balanced => StatWeightProfile::from_pairs([
                (Stat::CriticalHit, 0.75),
                (Stat::DirectHit, 0.75),
                (Stat::Determination, 0.75),
                (Stat::Speed, 0.75),
            ]),
        }
    }
}

impl FromStr for ProfilePreset {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "critical-focused" | "crit-focus" | "crit" => Ok(ProfilePreset::CriticalFocused),
            "speed-focused" | "spell-speed-focus" | "speed-focus" | "speed" => {
                Ok(ProfilePreset::SpeedFocused)
            }
            "balanced" => Ok(ProfilePreset::Balanced),
            _ => Err(SolveError::invalid(format!("unknown profile preset: {s}"))),
        }
    }
}

impl fmt::Display for ProfilePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProfilePreset> for StatWeightProfile {
    fn from(preset: ProfilePreset) -> Self {
        preset.profile()
    }
}

/// A profile as written in configuration: a preset name or explicit weights.
///
/// ```rust
/// use gearsolve::profile::ProfileSpec;
///
/// let preset: ProfileSpec = serde_json::from_str(r#""balanced""#).unwrap();
/// let weights: ProfileSpec = serde_json::from_str(r#"{"critical-hit": 1.0}"#).unwrap();
/// assert!(preset.resolve().is_ok());
/// assert!(weights.resolve().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileSpec {
    Preset(String),
    Weights(StatWeightProfile),
}

impl ProfileSpec {
    /// Resolve to a validated profile.
    pub fn resolve(&self) -> Result<StatWeightProfile, SolveError> {
        let profile = match self {
            ProfileSpec::Preset(name) => name.parse::<ProfilePreset>()?.profile(),
            ProfileSpec::Weights(profile) => profile.clone(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl Default for ProfileSpec {
    fn default() -> Self {
        ProfileSpec::Preset(ProfilePreset::default().as_str().to_string())
    }
}

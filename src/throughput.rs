//! Throughput formula.
//!
//! Converts a total stat bundle into a scalar damage-per-second estimate
//! using closed-form game-balance math. Every constant lives on
//! `ThroughputModel` so a different balance patch is a configuration
//! change, not a code change.
//!
//! ```text
//! dps = base_potency_per_second
//!     × determination_multiplier
//!     × (1 + crit_rate × (crit_bonus − 1))
//!     × (1 + direct_hit_rate × direct_hit_bonus)
//!     × speed_multiplier
//! ```

use crate::bundle::StatBundle;
use crate::error::SolveError;
use crate::stat::Stat;
use serde::{Deserialize, Serialize};

/// Constants of the throughput formula.
///
/// Rate and bonus coefficients are in thousandths, as the game expresses
/// them. Defaults model a level-90 caster.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{Stat, StatBundle, ThroughputModel};
///
/// let model = ThroughputModel::default();
/// let baseline = StatBundle::from_pairs([
///     (Stat::CriticalHit, 400),
///     (Stat::DirectHit, 400),
///     (Stat::Determination, 400),
///     (Stat::Speed, 400),
/// ]);
/// // 310 potency every 2.5s, with the 5% base crit rate at +40% damage.
/// assert!((model.estimate(&baseline) - 126.48).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThroughputModel {
    /// Baseline value for secondary stats.
    pub base_substat: f64,
    pub level_divisor: f64,
    /// Baseline main attribute the attack multiplier scales against.
    pub base_main_stat: f64,
    pub base_gcd_ms: f64,
    /// Fastest modeled action cadence.
    pub min_gcd_ms: f64,
    /// Potency of one action.
    pub potency: f64,
    pub speed_coefficient: f64,
    pub speed_bonus_divisor: f64,
    pub crit_rate_coefficient: f64,
    pub crit_rate_base: f64,
    pub crit_bonus_coefficient: f64,
    pub crit_bonus_base: f64,
    pub direct_hit_coefficient: f64,
    /// Extra damage dealt by a direct hit.
    pub direct_hit_bonus: f64,
    pub determination_coefficient: f64,
    pub attack_coefficient: f64,
    pub weapon_damage_divisor: f64,
}

impl Default for ThroughputModel {
    fn default() -> Self {
        Self {
            base_substat: 400.0,
            level_divisor: 1900.0,
            base_main_stat: 390.0,
            base_gcd_ms: 2500.0,
            min_gcd_ms: 1500.0,
            potency: 310.0,
            speed_coefficient: 130.0,
            speed_bonus_divisor: 10_000.0,
            crit_rate_coefficient: 200.0,
            crit_rate_base: 50.0,
            crit_bonus_coefficient: 200.0,
            crit_bonus_base: 1400.0,
            direct_hit_coefficient: 550.0,
            direct_hit_bonus: 0.25,
            determination_coefficient: 140.0,
            attack_coefficient: 195.0,
            weapon_damage_divisor: 100.0,
        }
    }
}

/// Every intermediate of one throughput evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputBreakdown {
    pub gcd_ms: f64,
    pub speed_multiplier: f64,
    pub crit_rate: f64,
    pub crit_bonus: f64,
    pub direct_hit_rate: f64,
    pub determination_multiplier: f64,
    pub base_potency_per_second: f64,
    pub dps: f64,
}

impl ThroughputModel {
    /// Reject constants that would divide by zero or are not finite.
    pub fn validate(&self) -> Result<(), SolveError> {
        let fields = [
            ("base_substat", self.base_substat),
            ("level_divisor", self.level_divisor),
            ("base_main_stat", self.base_main_stat),
            ("base_gcd_ms", self.base_gcd_ms),
            ("min_gcd_ms", self.min_gcd_ms),
            ("potency", self.potency),
            ("speed_coefficient", self.speed_coefficient),
            ("speed_bonus_divisor", self.speed_bonus_divisor),
            ("crit_rate_coefficient", self.crit_rate_coefficient),
            ("crit_rate_base", self.crit_rate_base),
            ("crit_bonus_coefficient", self.crit_bonus_coefficient),
            ("crit_bonus_base", self.crit_bonus_base),
            ("direct_hit_coefficient", self.direct_hit_coefficient),
            ("direct_hit_bonus", self.direct_hit_bonus),
            ("determination_coefficient", self.determination_coefficient),
            ("attack_coefficient", self.attack_coefficient),
            ("weapon_damage_divisor", self.weapon_damage_divisor),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SolveError::invalid(format!("{name} is not finite")));
            }
        }
        let divisors = [
            ("level_divisor", self.level_divisor),
            ("base_gcd_ms", self.base_gcd_ms),
            ("min_gcd_ms", self.min_gcd_ms),
            ("speed_bonus_divisor", self.speed_bonus_divisor),
            ("weapon_damage_divisor", self.weapon_damage_divisor),
        ];
        for (name, value) in divisors {
            if value <= 0.0 {
                return Err(SolveError::invalid(format!("{name} must be positive")));
            }
        }
        if self.min_gcd_ms > self.base_gcd_ms {
            return Err(SolveError::invalid("min_gcd_ms exceeds base_gcd_ms"));
        }
        Ok(())
    }

    /// Estimated damage per second for a total stat bundle. Never negative.
    pub fn estimate(&self, stats: &StatBundle) -> f64 {
        self.breakdown(stats).dps
    }

    /// Evaluate the formula and keep every intermediate.
    pub fn breakdown(&self, stats: &StatBundle) -> ThroughputBreakdown {
        let delta = |stat: Stat| f64::from(stats.get(stat)) - self.base_substat;
        let scaled = |coefficient: f64, delta: f64| {
            if self.level_divisor > 0.0 {
                coefficient * delta / self.level_divisor
            } else {
                0.0
            }
        };

        let speed_delta = delta(Stat::Speed);
        let gcd_reduction = scaled(self.speed_coefficient, speed_delta).trunc();
        let gcd_ms = (self.base_gcd_ms - gcd_reduction)
            .max(self.min_gcd_ms)
            .min(self.base_gcd_ms * 2.0);
        let cadence = ratio(self.base_gcd_ms, gcd_ms);
        let speed_bonus = if self.speed_bonus_divisor > 0.0 {
            (1.0 + speed_delta / self.speed_bonus_divisor).max(0.0)
        } else {
            1.0
        };
        let speed_multiplier = cadence * speed_bonus;

        let crit_delta = delta(Stat::CriticalHit);
        let crit_rate =
            unit((scaled(self.crit_rate_coefficient, crit_delta) + self.crit_rate_base) / 1000.0);
        let crit_bonus = ((scaled(self.crit_bonus_coefficient, crit_delta) + self.crit_bonus_base)
            / 1000.0)
            .max(1.0);

        let direct_hit_rate =
            unit(scaled(self.direct_hit_coefficient, delta(Stat::DirectHit)) / 1000.0);

        let determination_multiplier =
            ((scaled(self.determination_coefficient, delta(Stat::Determination)) + 1000.0) / 1000.0)
                .max(0.0);

        let attack_multiplier = if self.base_main_stat > 0.0 {
            1.0 + self.attack_coefficient * f64::from(stats.get(Stat::MainStat))
                / (100.0 * self.base_main_stat)
        } else {
            1.0
        };
        let weapon_multiplier = if self.weapon_damage_divisor > 0.0 {
            1.0 + f64::from(stats.get(Stat::WeaponDamage)) / self.weapon_damage_divisor
        } else {
            1.0
        };
        let base_potency_per_second =
            ratio(self.potency, self.base_gcd_ms / 1000.0) * attack_multiplier * weapon_multiplier;

        let dps = base_potency_per_second
            * determination_multiplier
            * (1.0 + crit_rate * (crit_bonus - 1.0))
            * (1.0 + direct_hit_rate * self.direct_hit_bonus)
            * speed_multiplier;

        ThroughputBreakdown {
            gcd_ms,
            speed_multiplier,
            crit_rate,
            crit_bonus,
            direct_hit_rate,
            determination_multiplier,
            base_potency_per_second,
            dps: non_negative(dps),
        }
    }
}

/// Estimated DPS with the default model, overriding the level divisor and
/// baseline main attribute.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{estimate_dps, StatBundle};
///
/// assert!(estimate_dps(&StatBundle::ZERO, 1900, 390) >= 0.0);
/// ```
pub fn estimate_dps(stats: &StatBundle, level_divisor: u32, base_main_stat: u32) -> f64 {
    let model = ThroughputModel {
        level_divisor: f64::from(level_divisor),
        base_main_stat: f64::from(base_main_stat),
        ..ThroughputModel::default()
    };
    model.estimate(stats)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn unit(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

//! Stat identifier module.
//!
//! Provides the `Stat` enumeration. The declaration order of the variants
//! is the canonical stat order used for every deterministic tie-break in
//! the crate.

use crate::error::SolveError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A stat an item can grant.
///
/// # Examples
///
/// ```rust
/// use gearsolve::Stat;
///
/// let crit: Stat = "critical-hit".parse().unwrap();
/// assert_eq!(crit, Stat::CriticalHit);
///
/// // Catalogue services use display names.
/// let sps: Stat = "Spell Speed".parse().unwrap();
/// assert_eq!(sps, Stat::Speed);
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stat {
    /// Primary attribute (strength, intelligence, ...).
    MainStat,
    CriticalHit,
    DirectHit,
    Determination,
    /// Skill speed or spell speed.
    Speed,
    WeaponDamage,
}

impl Stat {
    /// Every stat, in canonical order.
    pub const ALL: [Stat; 6] = [
        Stat::MainStat,
        Stat::CriticalHit,
        Stat::DirectHit,
        Stat::Determination,
        Stat::Speed,
        Stat::WeaponDamage,
    ];

    /// Number of stats.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this stat in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kebab-case name of this stat.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gearsolve::Stat;
    ///
    /// assert_eq!(Stat::DirectHit.as_str(), "direct-hit");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Stat::MainStat => "main-stat",
            Stat::CriticalHit => "critical-hit",
            Stat::DirectHit => "direct-hit",
            Stat::Determination => "determination",
            Stat::Speed => "speed",
            Stat::WeaponDamage => "weapon-damage",
        }
    }
}

impl FromStr for Stat {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let stat = match normalized.as_str() {
            "main-stat" | "main" | "strength" | "dexterity" | "intelligence" | "mind" => {
                Stat::MainStat
            }
            "critical-hit" | "crit" => Stat::CriticalHit,
            "direct-hit" | "direct-hit-rate" | "directhit" | "dh" => Stat::DirectHit,
            "determination" | "det" => Stat::Determination,
            "speed" | "spell-speed" | "skill-speed" | "spellspeed" | "sps" | "sks" => Stat::Speed,
            "weapon-damage" | "physical-damage" | "magic-damage" | "wd" => Stat::WeaponDamage,
            _ => return Err(SolveError::invalid(format!("unknown stat: {s}"))),
        };
        Ok(stat)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Stat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Stat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        assert!(Stat::MainStat < Stat::CriticalHit);
        assert!(Stat::Speed < Stat::WeaponDamage);
        for (idx, stat) in Stat::ALL.iter().enumerate() {
            assert_eq!(stat.index(), idx);
        }
    }

    #[test]
    fn test_parse_display_names() {
        assert_eq!("Critical Hit".parse::<Stat>().unwrap(), Stat::CriticalHit);
        assert_eq!("Direct Hit Rate".parse::<Stat>().unwrap(), Stat::DirectHit);
        assert_eq!("Skill Speed".parse::<Stat>().unwrap(), Stat::Speed);
        assert_eq!("Intelligence".parse::<Stat>().unwrap(), Stat::MainStat);
        assert_eq!("DirectHit".parse::<Stat>().unwrap(), Stat::DirectHit);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Piety".parse::<Stat>().unwrap_err();
        assert!(matches!(err, SolveError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_display_round_trips() {
        for stat in Stat::ALL {
            assert_eq!(stat.to_string().parse::<Stat>().unwrap(), stat);
        }
    }
}

//! Equipment slots and items.
//!
//! Items are immutable and come wholesale from an external catalogue.
//! The engine never mutates or persists them.

use crate::bundle::StatBundle;
use crate::error::SolveError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Equipment category an item occupies.
///
/// Declaration order is the canonical slot order the solver walks.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    Weapon,
    Head,
    Body,
    Hands,
    Legs,
    Feet,
    Earrings,
    Necklace,
    Bracelets,
    /// A single ring slot; the best ring is chosen once.
    Ring,
}

impl Slot {
    /// Every slot, in canonical order.
    pub const ALL: [Slot; 10] = [
        Slot::Weapon,
        Slot::Head,
        Slot::Body,
        Slot::Hands,
        Slot::Legs,
        Slot::Feet,
        Slot::Earrings,
        Slot::Necklace,
        Slot::Bracelets,
        Slot::Ring,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Weapon => "weapon",
            Slot::Head => "head",
            Slot::Body => "body",
            Slot::Hands => "hands",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
            Slot::Earrings => "earrings",
            Slot::Necklace => "necklace",
            Slot::Bracelets => "bracelets",
            Slot::Ring => "ring",
        }
    }

    /// Whether this is an accessory slot.
    pub fn is_accessory(self) -> bool {
        matches!(
            self,
            Slot::Earrings | Slot::Necklace | Slot::Bracelets | Slot::Ring
        )
    }
}

impl FromStr for Slot {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let slot = match normalized.as_str() {
            "weapon" | "main-hand" | "one-handed" | "two-handed" => Slot::Weapon,
            "head" => Slot::Head,
            "body" => Slot::Body,
            "hands" => Slot::Hands,
            "legs" => Slot::Legs,
            "feet" => Slot::Feet,
            "earrings" | "ears" => Slot::Earrings,
            "necklace" | "neck" => Slot::Necklace,
            "bracelets" | "wrists" => Slot::Bracelets,
            "ring" | "finger" | "fingers" => Slot::Ring,
            _ => return Err(SolveError::invalid(format!("unknown slot: {s}"))),
        };
        Ok(slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A piece of equipment.
///
/// Deserializes from the normalized catalogue shape; the free materia slot
/// count defaults to zero when absent.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{Item, Slot, Stat, StatBundle};
///
/// let item = Item::new(1, "Augmented Circlet", 710, Slot::Head)
///     .with_stats(StatBundle::from_pairs([(Stat::CriticalHit, 50)]))
///     .with_materia_slots(2);
///
/// assert_eq!(item.stats[Stat::CriticalHit], 50);
/// assert_eq!(item.materia_slots, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    #[serde(alias = "ID")]
    pub id: u32,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "LevelItem", alias = "ilvl")]
    pub item_level: u32,
    #[serde(alias = "Slot")]
    pub slot: Slot,
    #[serde(default, alias = "Stats")]
    pub stats: StatBundle,
    #[serde(default, alias = "MateriaSlots")]
    pub materia_slots: u8,
}

impl Item {
    /// Create an item with no stats and no materia slots.
    pub fn new(id: u32, name: impl Into<String>, item_level: u32, slot: Slot) -> Self {
        Self {
            id,
            name: name.into(),
            item_level,
            slot,
            stats: StatBundle::ZERO,
            materia_slots: 0,
        }
    }

    pub fn with_stats(mut self, stats: StatBundle) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_materia_slots(mut self, materia_slots: u8) -> Self {
        self.materia_slots = materia_slots;
        self
    }
}

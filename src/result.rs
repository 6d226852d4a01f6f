//! Solve results.
//!
//! Contains `SlotAssignment`, the chosen item per slot, and `SolveResult`,
//! which a solve produces fresh on every call. Neither holds a reference
//! back to the catalogue.

use crate::bundle::StatBundle;
use crate::item::{Item, Slot};
use crate::solver::ScoringMode;
use crate::stat::Stat;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One chosen item per slot.
///
/// Items are keyed by their own `slot` field, so every value's slot
/// always equals its key.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{Item, Slot, SlotAssignment};
///
/// let mut assignment = SlotAssignment::new();
/// assignment.insert(Item::new(1, "Hat", 660, Slot::Head));
///
/// assert_eq!(assignment.get(Slot::Head).map(|i| i.id), Some(1));
/// assert_eq!(assignment.missing_slots([Slot::Head, Slot::Body]), vec![Slot::Body]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SlotAssignment {
    items: BTreeMap<Slot, Item>,
}

impl SlotAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an item in its slot, returning whatever it replaced.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.slot, item)
    }

    pub fn get(&self, slot: Slot) -> Option<&Item> {
        self.items.get(&slot)
    }

    /// `(slot, item)` pairs in canonical slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Item)> + '_ {
        self.items.iter().map(|(&slot, item)| (slot, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every chosen item's stats.
    pub fn item_stats(&self) -> StatBundle {
        self.items.values().map(|item| &item.stats).sum()
    }

    /// Slots from `required` that have no item, in the order given.
    pub fn missing_slots(&self, required: impl IntoIterator<Item = Slot>) -> Vec<Slot> {
        required
            .into_iter()
            .filter(|slot| !self.items.contains_key(slot))
            .collect()
    }
}

impl<'de> Deserialize<'de> for SlotAssignment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = BTreeMap::<Slot, Item>::deserialize(deserializer)?;
        if let Some((slot, item)) = items.iter().find(|(slot, item)| item.slot != **slot) {
            return Err(serde::de::Error::custom(format!(
                "item {} belongs to {} but is assigned to {}",
                item.id, item.slot, slot
            )));
        }
        Ok(Self { items })
    }
}

/// The best assignment found by a solve.
///
/// `assignment` may be incomplete when some slots had no candidates;
/// check it with `missing_slots` rather than assuming completeness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub assignment: SlotAssignment,

    /// Base stats plus every chosen item's stats.
    pub aggregate: StatBundle,

    /// Weighted dot product or DPS estimate, depending on `scoring_mode`.
    pub score: f64,

    pub scoring_mode: ScoringMode,

    /// Recommended materia stats per assigned slot, best first.
    pub enchantments: BTreeMap<Slot, Vec<Stat>>,

    /// Number of complete assignments scored.
    pub evaluated: u64,
}

impl SolveResult {
    /// Result of a solve over a catalogue with no candidates at all.
    pub fn empty(base_stats: StatBundle, scoring_mode: ScoringMode) -> Self {
        Self {
            assignment: SlotAssignment::new(),
            aggregate: base_stats,
            score: 0.0,
            scoring_mode,
            enchantments: BTreeMap::new(),
            evaluated: 0,
        }
    }

    /// Slots from `required` the assignment does not cover.
    pub fn missing_slots(&self, required: impl IntoIterator<Item = Slot>) -> Vec<Slot> {
        self.assignment.missing_slots(required)
    }

    /// Recommended materia for one slot, empty when none.
    pub fn enchantments_for(&self, slot: Slot) -> &[Stat] {
        self.enchantments
            .get(&slot)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

//! Catalogue partitioning.
//!
//! Groups a flat item list into per-slot candidate lists. Slots iterate in
//! canonical `Slot` order and each list keeps the input order of its items,
//! which together define the deterministic order the solver explores.

use crate::item::{Item, Slot};
use crate::tier::ItemLevelRange;
use std::collections::BTreeMap;

/// Per-slot candidate lists.
///
/// Every item stored under a slot has that slot. A slot may be present
/// with an empty list, meaning it is required but has no candidates.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{partition_by_slot, Item, Slot};
///
/// let items = vec![
///     Item::new(1, "Hat", 660, Slot::Head),
///     Item::new(2, "Robe", 660, Slot::Body),
///     Item::new(3, "Cap", 650, Slot::Head),
/// ];
/// let slots = partition_by_slot(items);
/// assert_eq!(slots.candidates(Slot::Head).len(), 2);
/// assert_eq!(slots.candidates(Slot::Feet).len(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotCandidates {
    slots: BTreeMap<Slot, Vec<Item>>,
}

impl SlotCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping with each of `slots` present and empty.
    pub fn with_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        let mut out = Self::new();
        for slot in slots {
            out.require(slot);
        }
        out
    }

    /// Make sure `slot` is present, even with no candidates.
    pub fn require(&mut self, slot: Slot) {
        self.slots.entry(slot).or_default();
    }

    /// Append an item to the list for its own slot.
    pub fn push(&mut self, item: Item) {
        self.slots.entry(item.slot).or_default().push(item);
    }

    /// Candidates for a slot, empty when the slot is absent.
    pub fn candidates(&self, slot: Slot) -> &[Item] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Present slots in canonical order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.keys().copied()
    }

    /// `(slot, candidates)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[Item])> + '_ {
        self.slots.iter().map(|(&slot, items)| (slot, items.as_slice()))
    }

    /// Number of present slots, empty ones included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Total number of candidate items.
    pub fn item_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Whether no slot has any candidate.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Present slots with no candidates.
    pub fn empty_slots(&self) -> Vec<Slot> {
        self.iter()
            .filter(|(_, items)| items.is_empty())
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Observed item-level range across every candidate.
    pub fn item_level_range(&self) -> Option<ItemLevelRange> {
        let mut levels = self.slots.values().flatten().map(|item| item.item_level);
        let first = levels.next()?;
        let (min, max) = levels.fold((first, first), |(lo, hi), lvl| (lo.min(lvl), hi.max(lvl)));
        Some(ItemLevelRange::new(min, max))
    }
}

impl FromIterator<Item> for SlotCandidates {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut out = Self::new();
        for item in iter {
            out.push(item);
        }
        out
    }
}

impl Extend<Item> for SlotCandidates {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Group items by slot, preserving per-slot input order.
pub fn partition_by_slot(items: impl IntoIterator<Item = Item>) -> SlotCandidates {
    items.into_iter().collect()
}

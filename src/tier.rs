//! Tier window filtering.
//!
//! Narrows a raw catalogue to the relevant power tier: items whose level
//! lies within `window` levels of the highest observed item level.

use crate::error::SolveError;
use crate::item::Item;
use serde::{Deserialize, Serialize};

/// Default width of the item-level window.
pub const DEFAULT_ILVL_WINDOW: i64 = 30;

/// Inclusive item-level range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemLevelRange {
    pub min: u32,
    pub max: u32,
}

impl ItemLevelRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, item_level: u32) -> bool {
        (self.min..=self.max).contains(&item_level)
    }
}

/// Highest item level in the sequence, or 0 when it is empty.
///
/// # Examples
///
/// ```rust
/// use gearsolve::tier::detect_max_item_level;
///
/// assert_eq!(detect_max_item_level(&[]), 0);
/// ```
pub fn detect_max_item_level(items: &[Item]) -> u32 {
    items.iter().map(|item| item.item_level).max().unwrap_or(0)
}

/// Keep items with level in `[max_level - window, max_level]`.
///
/// Relative order is preserved. A negative `window` is rejected.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{Item, Slot};
/// use gearsolve::tier::filter_window;
///
/// let items = vec![
///     Item::new(1, "Old", 600, Slot::Head),
///     Item::new(2, "Current", 660, Slot::Head),
///     Item::new(3, "Crafted", 640, Slot::Body),
/// ];
/// let kept = filter_window(&items, 660, 30).unwrap();
/// assert_eq!(kept.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 3]);
/// ```
pub fn filter_window(items: &[Item], max_level: u32, window: i64) -> Result<Vec<Item>, SolveError> {
    let range = window_range(max_level, window)?;
    Ok(items
        .iter()
        .filter(|item| range.contains(item.item_level))
        .cloned()
        .collect())
}

/// Detect the current tier: `[max - window, max]` over the catalogue.
///
/// The lower bound saturates at zero.
pub fn detect_tier(items: &[Item], window: i64) -> Result<ItemLevelRange, SolveError> {
    window_range(detect_max_item_level(items), window)
}

fn window_range(max_level: u32, window: i64) -> Result<ItemLevelRange, SolveError> {
    if window < 0 {
        return Err(SolveError::invalid(format!(
            "item level window must be non-negative, got {window}"
        )));
    }
    let min = i64::from(max_level).saturating_sub(window).max(0);
    // min <= max_level, which fits in u32
    let min = u32::try_from(min).unwrap_or(0);
    Ok(ItemLevelRange::new(min, max_level))
}

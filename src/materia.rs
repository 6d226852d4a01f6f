//! Enchantment (materia) recommendations.
//!
//! Ranks stats by descending profile weight and fills each free materia
//! slot with the next best stat. Ties fall back to canonical stat order.

use crate::item::Slot;
use crate::profile::StatWeightProfile;
use crate::result::SlotAssignment;
use crate::stat::Stat;
use std::collections::BTreeMap;

/// Top `free_slots` stats by weight.
///
/// The result has `min(free_slots, nonzero weights)` entries; zero free
/// slots yields an empty list.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{recommend, Stat, StatWeightProfile};
///
/// let profile = StatWeightProfile::from_pairs([
///     (Stat::Speed, 0.4),
///     (Stat::CriticalHit, 1.0),
///     (Stat::Determination, 0.4),
/// ]);
/// assert_eq!(
///     recommend(2, &profile),
///     vec![Stat::CriticalHit, Stat::Determination]
/// );
/// assert!(recommend(0, &profile).is_empty());
/// ```
pub fn recommend(free_slots: usize, profile: &StatWeightProfile) -> Vec<Stat> {
    if free_slots == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(Stat, f64)> = profile.iter().filter(|&(_, w)| w > 0.0).collect();
    // stable: equal weights keep canonical order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(free_slots)
        .map(|(stat, _)| stat)
        .collect()
}

/// Recommendations for every item in an assignment.
///
/// Slots whose item has no free materia slots map to an empty list.
pub fn recommend_for(
    assignment: &SlotAssignment,
    profile: &StatWeightProfile,
) -> BTreeMap<Slot, Vec<Stat>> {
    assignment
        .iter()
        .map(|(slot, item)| (slot, recommend(usize::from(item.materia_slots), profile)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::profile::ProfilePreset;

    #[test]
    fn test_recommend_zero_slots() {
        for preset in ProfilePreset::ALL {
            assert!(recommend(0, &preset.profile()).is_empty());
        }
    }

    #[test]
    fn test_recommend_length_law() {
        let profile = StatWeightProfile::from_pairs([
            (Stat::CriticalHit, 1.0),
            (Stat::DirectHit, 0.0),
            (Stat::Speed, 0.2),
        ]);
        for free in 0..6 {
            assert_eq!(recommend(free, &profile).len(), free.min(2));
        }
    }

    #[test]
    fn test_recommend_tie_break_canonical() {
        let profile = StatWeightProfile::from_pairs([
            (Stat::Speed, 0.5),
            (Stat::DirectHit, 0.5),
            (Stat::Determination, 0.5),
        ]);
        assert_eq!(
            recommend(3, &profile),
            vec![Stat::DirectHit, Stat::Determination, Stat::Speed]
        );
    }

    #[test]
    fn test_recommend_empty_profile() {
        assert!(recommend(5, &StatWeightProfile::new()).is_empty());
    }

    #[test]
    fn test_recommend_for_assignment() {
        let mut assignment = SlotAssignment::new();
        assignment.insert(Item::new(1, "Hat", 660, Slot::Head).with_materia_slots(2));
        assignment.insert(Item::new(2, "Robe", 660, Slot::Body));
        let profile = ProfilePreset::CriticalFocused.profile();

        let recs = recommend_for(&assignment, &profile);
        assert_eq!(recs[&Slot::Head], vec![Stat::CriticalHit, Stat::Determination]);
        assert!(recs[&Slot::Body].is_empty());
    }
}

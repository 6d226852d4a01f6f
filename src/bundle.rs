//! Stat bundle module.
//!
//! A `StatBundle` holds one non-negative integer magnitude per `Stat`.
//! Bundles are immutable values; they combine by component-wise addition
//! and score against a profile with a weighted dot product.

use crate::profile::StatWeightProfile;
use crate::stat::Stat;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Index};

/// A bundle of stat magnitudes, one entry per `Stat`.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{Stat, StatBundle};
///
/// let head = StatBundle::from_pairs([(Stat::CriticalHit, 50), (Stat::Determination, 10)]);
/// let body = StatBundle::from_pairs([(Stat::CriticalHit, 80)]);
///
/// let total = head + body;
/// assert_eq!(total[Stat::CriticalHit], 130);
/// assert_eq!(total[Stat::Speed], 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatBundle([u32; Stat::COUNT]);

impl StatBundle {
    /// The bundle with every stat at zero.
    pub const ZERO: StatBundle = StatBundle([0; Stat::COUNT]);

    /// Create an all-zero bundle.
    pub fn new() -> Self {
        Self::ZERO
    }

    /// Build a bundle from `(stat, value)` pairs.
    ///
    /// Repeated stats are summed.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Stat, u32)>) -> Self {
        pairs.into_iter().collect()
    }

    /// Return a copy of this bundle with `stat` set to `value`.
    pub fn with(mut self, stat: Stat, value: u32) -> Self {
        self.0[stat.index()] = value;
        self
    }

    /// Magnitude of a single stat.
    pub fn get(&self, stat: Stat) -> u32 {
        self.0[stat.index()]
    }

    /// Iterate over every stat in canonical order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::ALL.iter().map(move |&stat| (stat, self.get(stat)))
    }

    /// Sum of all magnitudes.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&v| u64::from(v)).sum()
    }

    /// Whether every stat is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// Component-wise sum of two bundles.
    ///
    /// Saturates at `u32::MAX` rather than wrapping.
    pub fn saturating_sum(&self, other: &StatBundle) -> StatBundle {
        let mut out = [0; Stat::COUNT];
        for (idx, slot) in out.iter_mut().enumerate() {
            *slot = self.0[idx].saturating_add(other.0[idx]);
        }
        StatBundle(out)
    }

    /// Weighted dot product against a profile.
    ///
    /// Stats without a weight in the profile contribute nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gearsolve::{Stat, StatBundle, StatWeightProfile};
    ///
    /// let bundle = StatBundle::from_pairs([(Stat::CriticalHit, 130), (Stat::Determination, 10)]);
    /// let profile = StatWeightProfile::from_pairs([(Stat::CriticalHit, 1.0), (Stat::Determination, 0.5)]);
    /// assert_eq!(bundle.dot(&profile), 135.0);
    /// ```
    pub fn dot(&self, profile: &StatWeightProfile) -> f64 {
        self.iter()
            .map(|(stat, value)| f64::from(value) * profile.weight(stat))
            .sum()
    }
}

/// Component-wise sum of two bundles.
pub fn add(a: &StatBundle, b: &StatBundle) -> StatBundle {
    a.saturating_sum(b)
}

/// Weighted dot product of a bundle against a profile.
pub fn dot(bundle: &StatBundle, profile: &StatWeightProfile) -> f64 {
    bundle.dot(profile)
}

impl Add for StatBundle {
    type Output = StatBundle;

    fn add(self, other: StatBundle) -> StatBundle {
        self.saturating_sum(&other)
    }
}

impl<'a> Add<&'a StatBundle> for StatBundle {
    type Output = StatBundle;

    fn add(self, other: &'a StatBundle) -> StatBundle {
        self.saturating_sum(other)
    }
}

impl Sum for StatBundle {
    fn sum<I: Iterator<Item = StatBundle>>(iter: I) -> Self {
        iter.fold(StatBundle::ZERO, |acc, b| acc + b)
    }
}

impl<'a> Sum<&'a StatBundle> for StatBundle {
    fn sum<I: Iterator<Item = &'a StatBundle>>(iter: I) -> Self {
        iter.fold(StatBundle::ZERO, |acc, b| acc + b)
    }
}

impl Index<Stat> for StatBundle {
    type Output = u32;

    fn index(&self, stat: Stat) -> &u32 {
        &self.0[stat.index()]
    }
}

impl FromIterator<(Stat, u32)> for StatBundle {
    fn from_iter<I: IntoIterator<Item = (Stat, u32)>>(iter: I) -> Self {
        let mut out = [0u32; Stat::COUNT];
        for (stat, value) in iter {
            out[stat.index()] = out[stat.index()].saturating_add(value);
        }
        StatBundle(out)
    }
}

// Serialized as a map keyed by stat name; zero entries are omitted.
impl Serialize for StatBundle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let map: BTreeMap<Stat, u32> = self.iter().filter(|&(_, v)| v > 0).collect();
        map.serialize(serializer)
    }
}

// Aliases of one stat ("Critical Hit", "crit") are summed, like `from_pairs`.
impl<'de> Deserialize<'de> for StatBundle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StatBundleVisitor)
    }
}

struct StatBundleVisitor;

impl<'de> Visitor<'de> for StatBundleVisitor {
    type Value = StatBundle;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of stat names to non-negative integers")
    }

    fn visit_map<A>(self, mut access: A) -> Result<StatBundle, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<Stat, u32>()? {
            pairs.push(entry);
        }
        Ok(pairs.into_iter().collect())
    }
}

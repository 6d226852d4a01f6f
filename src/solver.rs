//! Combinatorial solver.
//!
//! Finds the slot assignment with the greatest score. The search is the
//! Cartesian product of per-slot candidates, bounded by a top-K
//! pre-filter: each slot keeps only its `candidates_per_slot` best items
//! by a cheap single-item proxy score before the product is formed.
//!
//! Exploration order is canonical (slots by `Slot` order, candidates by
//! catalogue order) and only strictly greater scores replace the current
//! best, so ties always resolve to the first assignment in that order.
//!
//! Under `ScoringMode::WeightedSum` the score is linear, so the pre-filter
//! never discards the optimum for any K >= 1.

use crate::bundle::StatBundle;
use crate::catalogue::SlotCandidates;
use crate::error::SolveError;
use crate::item::{Item, Slot};
use crate::materia::recommend_for;
use crate::profile::StatWeightProfile;
use crate::result::{SlotAssignment, SolveResult};
use crate::throughput::ThroughputModel;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Default top-K cap per slot.
pub const DEFAULT_CANDIDATES_PER_SLOT: usize = 3;

/// What the solver maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// `dot(aggregate, profile)`.
    #[default]
    WeightedSum,
    /// `ThroughputModel::estimate(aggregate)`.
    ThroughputFormula,
}

/// Solver settings.
///
/// # Examples
///
/// ```rust
/// use gearsolve::{ScoringMode, SolveConfig};
///
/// let config = SolveConfig {
///     scoring_mode: ScoringMode::ThroughputFormula,
///     candidates_per_slot: 5,
///     ..SolveConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    pub scoring_mode: ScoringMode,
    /// Top-K cap applied to every slot before the product is formed.
    pub candidates_per_slot: usize,
    pub throughput: ThroughputModel,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            scoring_mode: ScoringMode::default(),
            candidates_per_slot: DEFAULT_CANDIDATES_PER_SLOT,
            throughput: ThroughputModel::default(),
        }
    }
}

impl SolveConfig {
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.candidates_per_slot == 0 {
            return Err(SolveError::invalid("candidates_per_slot must be at least 1"));
        }
        self.throughput.validate()
    }
}

/// Progress markers reported during a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolvePhase {
    /// Capping per-slot candidate lists.
    Filtering,
    /// Walking the candidate product.
    Scoring,
    /// Picking materia for the winning assignment.
    Recommending,
    Done,
}

/// Receives progress and is polled for cancellation.
///
/// `is_cancelled` is checked between iterations of the outer search loop.
pub trait SolveObserver {
    fn on_phase(&self, _phase: SolvePhase) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// A bare flag doubles as a cancellation source.
impl SolveObserver for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Forwards phases over a channel and reads a shared cancel flag.
///
/// # Examples
///
/// ```rust
/// use gearsolve::solver::{ChannelObserver, SolvePhase, SolveObserver};
/// use std::sync::atomic::AtomicBool;
/// use std::sync::mpsc;
/// use std::sync::Arc;
///
/// let (tx, rx) = mpsc::channel();
/// let cancel = Arc::new(AtomicBool::new(false));
/// let observer = ChannelObserver::new(tx, cancel.clone());
///
/// observer.on_phase(SolvePhase::Scoring);
/// assert_eq!(rx.recv().unwrap(), SolvePhase::Scoring);
/// assert!(!observer.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<SolvePhase>,
    cancel: Arc<AtomicBool>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<SolvePhase>, cancel: Arc<AtomicBool>) -> Self {
        Self { sender, cancel }
    }

    /// Request cancellation of the solve this observer is attached to.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

impl SolveObserver for ChannelObserver {
    fn on_phase(&self, phase: SolvePhase) {
        // A dropped receiver only means nobody is watching.
        let _ = self.sender.send(phase);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Find the best assignment without progress reporting or cancellation.
///
/// # Examples
///
/// ```rust
/// use gearsolve::*;
///
/// let items = vec![
///     Item::new(1, "H1", 660, Slot::Head)
///         .with_stats(StatBundle::from_pairs([(Stat::CriticalHit, 50), (Stat::Determination, 10)])),
///     Item::new(2, "B1", 660, Slot::Body)
///         .with_stats(StatBundle::from_pairs([(Stat::Determination, 100)])),
///     Item::new(3, "B2", 660, Slot::Body)
///         .with_stats(StatBundle::from_pairs([(Stat::CriticalHit, 80)])),
/// ];
/// let profile = StatWeightProfile::from_pairs([(Stat::CriticalHit, 1.0), (Stat::Determination, 0.5)]);
///
/// let result = solve(&partition_by_slot(items), &profile, &StatBundle::ZERO, &SolveConfig::default())?;
/// assert_eq!(result.assignment.get(Slot::Body).map(|i| i.id), Some(3));
/// assert_eq!(result.score, 135.0);
/// # Ok::<(), SolveError>(())
/// ```
pub fn solve(
    slots: &SlotCandidates,
    profile: &StatWeightProfile,
    base_stats: &StatBundle,
    config: &SolveConfig,
) -> Result<SolveResult, SolveError> {
    solve_with(slots, profile, base_stats, config, &NoopObserver)
}

/// Find the best assignment, reporting phases to `observer` and stopping
/// with `SolveError::Cancelled` once it asks to.
pub fn solve_with(
    slots: &SlotCandidates,
    profile: &StatWeightProfile,
    base_stats: &StatBundle,
    config: &SolveConfig,
    observer: &dyn SolveObserver,
) -> Result<SolveResult, SolveError> {
    config.validate()?;
    profile.validate()?;

    let scorer = match config.scoring_mode {
        ScoringMode::WeightedSum => Scorer::Weighted(profile),
        ScoringMode::ThroughputFormula => Scorer::Throughput(&config.throughput),
    };

    observer.on_phase(SolvePhase::Filtering);
    let mut lists: Vec<(Slot, Vec<&Item>)> = Vec::with_capacity(slots.slot_count());
    for (slot, items) in slots.iter() {
        if items.is_empty() {
            tracing::warn!("no candidates for slot {}, leaving it unassigned", slot);
            continue;
        }
        let kept = top_candidates(items, config.candidates_per_slot, &scorer, base_stats);
        tracing::debug!(
            "slot {}: keeping {} of {} candidates",
            slot,
            kept.len(),
            items.len()
        );
        lists.push((slot, kept));
    }

    if lists.is_empty() {
        tracing::info!("catalogue has no candidates, returning an empty assignment");
        observer.on_phase(SolvePhase::Done);
        return Ok(SolveResult::empty(*base_stats, config.scoring_mode));
    }

    observer.on_phase(SolvePhase::Scoring);
    let mut search = Search {
        lists: &lists,
        scorer: &scorer,
        current: vec![0; lists.len()],
        best: None,
        evaluated: 0,
    };
    search.run(*base_stats, observer)?;

    let (indices, score) = search
        .best
        .clone()
        .ok_or_else(|| SolveError::invalid("no assignment was scored"))?;

    let mut assignment = SlotAssignment::new();
    for ((_, candidates), &idx) in lists.iter().zip(&indices) {
        assignment.insert(candidates[idx].clone());
    }
    let aggregate = base_stats.saturating_sum(&assignment.item_stats());

    observer.on_phase(SolvePhase::Recommending);
    let enchantments = recommend_for(&assignment, profile);

    tracing::info!(
        "best of {} assignments: score {:.3} over {} slots",
        search.evaluated,
        score,
        assignment.len()
    );
    observer.on_phase(SolvePhase::Done);

    Ok(SolveResult {
        assignment,
        aggregate,
        score,
        scoring_mode: config.scoring_mode,
        enchantments,
        evaluated: search.evaluated,
    })
}

enum Scorer<'a> {
    Weighted(&'a StatWeightProfile),
    Throughput(&'a ThroughputModel),
}

impl Scorer<'_> {
    fn score(&self, stats: &StatBundle) -> f64 {
        match self {
            Scorer::Weighted(profile) => stats.dot(profile),
            Scorer::Throughput(model) => model.estimate(stats),
        }
    }
}

/// Keep the `k` best items by the score of `base_stats + item`, in their
/// input order. Equal proxy scores favor earlier items.
fn top_candidates<'a>(
    items: &'a [Item],
    k: usize,
    scorer: &Scorer<'_>,
    base_stats: &StatBundle,
) -> Vec<&'a Item> {
    if items.len() <= k {
        return items.iter().collect();
    }
    let mut ranked: Vec<(usize, f64)> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (idx, scorer.score(&base_stats.saturating_sum(&item.stats))))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let mut kept: Vec<usize> = ranked.into_iter().take(k).map(|(idx, _)| idx).collect();
    kept.sort_unstable();
    kept.into_iter().map(|idx| &items[idx]).collect()
}

struct Search<'s, 'a> {
    lists: &'s [(Slot, Vec<&'a Item>)],
    scorer: &'s Scorer<'s>,
    current: Vec<usize>,
    best: Option<(Vec<usize>, f64)>,
    evaluated: u64,
}

impl Search<'_, '_> {
    fn run(&mut self, base: StatBundle, observer: &dyn SolveObserver) -> Result<(), SolveError> {
        let lists = self.lists;
        let first = &lists[0].1;
        for idx in 0..first.len() {
            if observer.is_cancelled() {
                tracing::debug!("solve cancelled after {} assignments", self.evaluated);
                return Err(SolveError::Cancelled);
            }
            self.current[0] = idx;
            let partial = base.saturating_sum(&first[idx].stats);
            self.descend(1, partial);
        }
        Ok(())
    }

    fn descend(&mut self, depth: usize, partial: StatBundle) {
        if depth == self.lists.len() {
            self.evaluated += 1;
            let score = self.scorer.score(&partial);
            let improved = match &self.best {
                Some((_, best)) => score > *best,
                None => true,
            };
            if improved {
                self.best = Some((self.current.clone(), score));
            }
            return;
        }
        let lists = self.lists;
        for (idx, item) in lists[depth].1.iter().enumerate() {
            self.current[depth] = idx;
            self.descend(depth + 1, partial.saturating_sum(&item.stats));
        }
    }
}

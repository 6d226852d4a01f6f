//! # gearsolve - Deterministic Best-in-Slot Gear Optimizer
//!
//! A gear optimization engine for stat-driven RPGs that provides:
//! - **Deterministic** solving (same catalogue + profile + configuration → same result)
//! - **Bounded** search (top-K candidates per slot before the Cartesian product)
//! - **Two scoring modes** (weighted stat sum or a closed-form DPS formula)
//! - **Materia recommendations** for every chosen item
//!
//! ## Core Concepts
//!
//! ### Pipeline
//!
//! ```text
//! [Item list] → [Tier window] → [Partition by slot] → [Solve] → [Recommend] → [SolveResult]
//! ```
//!
//! 1. **Tier window** keeps items within `ilvl_window` levels of the highest item level
//! 2. **Partition** groups items into per-slot candidate lists
//! 3. **Solve** searches slot assignments for the best score
//! 4. **Recommend** ranks stats by profile weight for each free materia slot
//!
//! The engine is pure: it performs no I/O and keeps no state between solves.
//! Fetching and caching catalogues is the caller's job.
//!
//! ## Example
//!
//! ```rust
//! use gearsolve::*;
//!
//! let items = vec![
//!     Item::new(1, "H1", 660, Slot::Head)
//!         .with_stats(StatBundle::from_pairs([(Stat::CriticalHit, 50), (Stat::Determination, 10)])),
//!     Item::new(2, "B1", 660, Slot::Body)
//!         .with_stats(StatBundle::from_pairs([(Stat::Determination, 100)])),
//!     Item::new(3, "B2", 660, Slot::Body)
//!         .with_stats(StatBundle::from_pairs([(Stat::CriticalHit, 80)]))
//!         .with_materia_slots(2),
//! ];
//! let profile = StatWeightProfile::from_pairs([
//!     (Stat::CriticalHit, 1.0),
//!     (Stat::Determination, 0.5),
//! ]);
//!
//! let slots = partition_by_slot(items);
//! let result = solve(&slots, &profile, &StatBundle::ZERO, &SolveConfig::default()).unwrap();
//!
//! assert_eq!(result.assignment.get(Slot::Body).unwrap().name, "B2");
//! assert_eq!(result.score, 135.0); // 130 crit × 1.0 + 10 det × 0.5
//! assert_eq!(result.enchantments_for(Slot::Body), &[Stat::CriticalHit, Stat::Determination]);
//! ```
//!
//! ## Modules
//!
//! - [`stat`] - Stat enumeration
//! - [`bundle`] - Stat bundles and the weighted dot product
//! - [`profile`] - Stat-weight profiles and presets
//! - [`item`] - Slots and items
//! - [`tier`] - Item-level window filtering
//! - [`catalogue`] - Per-slot partitioning
//! - [`throughput`] - Closed-form DPS estimate
//! - [`solver`] - Bounded combinatorial search
//! - [`materia`] - Materia recommendations
//! - [`result`] - Solve results
//! - [`config`] - Engine configuration
//! - [`optimizer`] - End-to-end pipeline
//! - [`error`] - Error types

pub mod bundle;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod item;
pub mod materia;
pub mod optimizer;
pub mod profile;
pub mod result;
pub mod solver;
pub mod stat;
pub mod throughput;
pub mod tier;

// Re-export main types for convenience
pub use bundle::StatBundle;
pub use catalogue::{partition_by_slot, SlotCandidates};
pub use config::OptimizerConfig;
pub use error::SolveError;
pub use item::{Item, Slot};
pub use materia::{recommend, recommend_for};
pub use optimizer::{OptimizeReport, Optimizer};
pub use profile::{ProfilePreset, StatWeightProfile};
pub use result::{SlotAssignment, SolveResult};
pub use solver::{solve, solve_with, ScoringMode, SolveConfig, SolveObserver, SolvePhase};
pub use stat::Stat;
pub use throughput::{estimate_dps, ThroughputModel};
pub use tier::{detect_max_item_level, filter_window, ItemLevelRange};

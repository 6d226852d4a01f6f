use gearsolve::solver::ChannelObserver;
use gearsolve::*;
use serde_json::json;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::Arc;

fn item(id: u32, name: &str, ilvl: u32, slot: Slot, stats: &[(Stat, u32)]) -> Item {
    Item::new(id, name, ilvl, slot).with_stats(StatBundle::from_pairs(stats.iter().copied()))
}

fn crit_det() -> StatWeightProfile {
    StatWeightProfile::from_pairs([(Stat::CriticalHit, 1.0), (Stat::Determination, 0.5)])
}

fn head_body_catalogue() -> Vec<Item> {
    vec![
        item(
            1,
            "H1",
            660,
            Slot::Head,
            &[(Stat::CriticalHit, 50), (Stat::Determination, 10)],
        ),
        item(2, "B1", 660, Slot::Body, &[(Stat::Determination, 100)]),
        item(3, "B2", 660, Slot::Body, &[(Stat::CriticalHit, 80)]).with_materia_slots(2),
    ]
}

/// Test the canonical head/body scenario end to end.
#[test]
fn test_head_body_scenario() {
    let slots = partition_by_slot(head_body_catalogue());
    let result = solve(&slots, &crit_det(), &StatBundle::ZERO, &SolveConfig::default()).unwrap();

    assert_eq!(result.assignment.get(Slot::Head).unwrap().name, "H1");
    assert_eq!(result.assignment.get(Slot::Body).unwrap().name, "B2");
    assert_eq!(result.score, 135.0);
    assert_eq!(
        result.aggregate,
        StatBundle::from_pairs([(Stat::CriticalHit, 130), (Stat::Determination, 10)])
    );
    assert_eq!(result.evaluated, 2);
    assert_eq!(
        result.enchantments_for(Slot::Body),
        &[Stat::CriticalHit, Stat::Determination]
    );
    assert!(result.enchantments_for(Slot::Head).is_empty());
}

/// Test that the dot product is linear over bundle addition.
#[test]
fn test_dot_linearity() {
    let profile = ProfilePreset::Balanced.profile();
    let a = StatBundle::from_pairs([(Stat::CriticalHit, 120), (Stat::Speed, 40)]);
    let b = StatBundle::from_pairs([(Stat::DirectHit, 75), (Stat::Speed, 12)]);

    let combined = (a + b).dot(&profile);
    assert!((combined - (a.dot(&profile) + b.dot(&profile))).abs() < 1e-9);
}

/// Test that a one-slot catalogue scores exactly the item plus base stats.
#[test]
fn test_single_item_solve() {
    let base = StatBundle::from_pairs([(Stat::CriticalHit, 400), (Stat::Determination, 390)]);
    let hat = item(7, "Hat", 660, Slot::Head, &[(Stat::CriticalHit, 33)]);
    let profile = crit_det();

    let result = solve(
        &partition_by_slot(vec![hat.clone()]),
        &profile,
        &base,
        &SolveConfig::default(),
    )
    .unwrap();

    assert_eq!(result.score, (hat.stats + base).dot(&profile));
    assert_eq!(result.aggregate, hat.stats + base);
}

/// Test that repeated solves produce identical results.
#[test]
fn test_solve_is_deterministic() {
    let mut items = Vec::new();
    for (offset, slot) in Slot::ALL.iter().enumerate() {
        for n in 0..4u32 {
            let id = offset as u32 * 10 + n;
            items.push(item(
                id,
                &format!("{slot}-{n}"),
                660,
                *slot,
                &[(Stat::CriticalHit, 10 + n % 2), (Stat::Speed, 3 * n)],
            ));
        }
    }
    let slots = partition_by_slot(items);
    let profile = ProfilePreset::CriticalFocused.profile();
    let config = SolveConfig::default();

    let first = solve(&slots, &profile, &StatBundle::ZERO, &config).unwrap();
    for _ in 0..3 {
        assert_eq!(solve(&slots, &profile, &StatBundle::ZERO, &config).unwrap(), first);
    }
    assert_eq!(first.assignment.len(), Slot::ALL.len());
}

/// Test that a larger candidate cap never lowers a weighted score.
#[test]
fn test_candidate_cap_does_not_hurt_weighted_sum() {
    let items: Vec<Item> = (0..8)
        .flat_map(|n| {
            [
                item(n, "h", 660, Slot::Head, &[(Stat::CriticalHit, n * 7 % 11)]),
                item(100 + n, "b", 660, Slot::Body, &[(Stat::Determination, n * 5 % 13)]),
            ]
        })
        .collect();
    let slots = partition_by_slot(items);

    let narrow = SolveConfig {
        candidates_per_slot: 1,
        ..SolveConfig::default()
    };
    let wide = SolveConfig {
        candidates_per_slot: 8,
        ..SolveConfig::default()
    };
    let a = solve(&slots, &crit_det(), &StatBundle::ZERO, &narrow).unwrap();
    let b = solve(&slots, &crit_det(), &StatBundle::ZERO, &wide).unwrap();
    assert_eq!(a.score, b.score);
    assert_eq!(a.evaluated, 1);
    assert_eq!(b.evaluated, 64);
}

/// Test that the throughput estimate is never negative.
#[test]
fn test_throughput_non_negative() {
    let model = ThroughputModel::default();
    let bundles = [
        StatBundle::ZERO,
        StatBundle::from_pairs([(Stat::Speed, u32::MAX)]),
        StatBundle::from_pairs([(Stat::CriticalHit, 50_000), (Stat::DirectHit, 50_000)]),
        StatBundle::from_pairs([(Stat::MainStat, 3000), (Stat::WeaponDamage, 132)]),
    ];
    for bundle in &bundles {
        assert!(model.estimate(bundle) >= 0.0);
        assert!(estimate_dps(bundle, 0, 0) >= 0.0);
    }
}

/// Test tier filtering edge cases and idempotence.
#[test]
fn test_tier_filtering() {
    assert_eq!(detect_max_item_level(&[]), 0);
    assert!(filter_window(&[], 0, 30).unwrap().is_empty());

    let items = vec![
        item(1, "new", 660, Slot::Head, &[]),
        item(2, "edge", 630, Slot::Body, &[]),
        item(3, "old", 629, Slot::Legs, &[]),
    ];
    let max = detect_max_item_level(&items);
    assert_eq!(max, 660);

    let once = filter_window(&items, max, 30).unwrap();
    let ids: Vec<u32> = once.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(filter_window(&once, max, 30).unwrap(), once);

    assert!(filter_window(&items, max, -1).is_err());
}

/// Test materia recommendation length and ordering laws.
#[test]
fn test_materia_recommendations() {
    for preset in ProfilePreset::ALL {
        let profile = preset.profile();
        assert!(recommend(0, &profile).is_empty());
        for free in 1..8 {
            let recs = recommend(free, &profile);
            assert_eq!(recs.len(), free.min(profile.nonzero_count()));
            for pair in recs.windows(2) {
                assert!(profile.weight(pair[0]) >= profile.weight(pair[1]));
            }
        }
    }
    assert_eq!(
        recommend(1, &ProfilePreset::SpeedFocused.profile()),
        vec![Stat::Speed]
    );
}

/// Test ingesting a JSON catalogue and running the full optimizer.
#[test]
fn test_json_catalogue_pipeline() {
    let catalogue = json!([
        {"ID": 1, "Name": "Raid Hat", "LevelItem": 660, "Slot": "Head",
         "Stats": {"critical-hit": 230, "speed": 160}, "MateriaSlots": 2},
        {"id": 2, "name": "Tome Hat", "item_level": 650, "slot": "head",
         "stats": {"direct-hit": 230, "determination": 160}},
        {"id": 3, "name": "Raid Ring", "item_level": 660, "slot": "ring",
         "stats": {"critical-hit": 120}, "materia_slots": 1},
        {"id": 4, "name": "Relic Ring", "item_level": 500, "slot": "finger",
         "stats": {"critical-hit": 999}}
    ]);
    let items: Vec<Item> = serde_json::from_value(catalogue).unwrap();
    assert_eq!(items[3].slot, Slot::Ring);

    let config = OptimizerConfig::from_json(r#"{"required_slots": ["head", "ring"]}"#).unwrap();
    let report = Optimizer::new(config).unwrap().optimize(&items).unwrap();

    assert_eq!(report.tier, ItemLevelRange::new(630, 660));
    assert_eq!(report.candidates, 3);
    assert_eq!(report.result.assignment.get(Slot::Head).map(|i| i.id), Some(1));
    assert_eq!(report.result.assignment.get(Slot::Ring).map(|i| i.id), Some(3));
    assert_eq!(report.result.enchantments_for(Slot::Ring), &[Stat::CriticalHit]);

    // Reports serialize for callers that ship them elsewhere.
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["result"]["assignment"]["head"]["name"], "Raid Hat");
    assert_eq!(value["result"]["scoring_mode"], "weighted-sum");
}

/// Test that an all-empty catalogue yields an empty result.
#[test]
fn test_empty_catalogue() {
    let base = StatBundle::from_pairs([(Stat::Speed, 400)]);
    let slots = SlotCandidates::with_slots(Slot::ALL);
    let result = solve(&slots, &crit_det(), &base, &SolveConfig::default()).unwrap();

    assert!(result.assignment.is_empty());
    assert_eq!(result.score, 0.0);
    assert_eq!(result.aggregate, base);
    assert_eq!(result.missing_slots(Slot::ALL).len(), Slot::ALL.len());
}

/// Test that an empty item list flows through filter, partition and solve.
#[test]
fn test_empty_item_list_pipeline() {
    let max = detect_max_item_level(&[]);
    let kept = filter_window(&[], max, 30).unwrap();
    let slots = partition_by_slot(kept);
    assert_eq!(slots.slot_count(), 0);

    let result = solve(&slots, &crit_det(), &StatBundle::ZERO, &SolveConfig::default()).unwrap();
    assert!(result.assignment.is_empty());
    assert_eq!(result.score, 0.0);
    assert!(result.enchantments.is_empty());
}

/// Test cancellation through a shared flag and a channel observer.
#[test]
fn test_cancellation() {
    let slots = partition_by_slot(head_body_catalogue());

    let flag = AtomicBool::new(true);
    let err = solve_with(
        &slots,
        &crit_det(),
        &StatBundle::ZERO,
        &SolveConfig::default(),
        &flag,
    )
    .unwrap_err();
    assert_eq!(err, SolveError::Cancelled);

    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let observer = ChannelObserver::new(tx, cancel.clone());
    let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
    let report = optimizer.optimize_with(&head_body_catalogue(), &observer);
    assert!(report.is_ok());
    assert_eq!(rx.try_iter().last(), Some(SolvePhase::Done));

    observer.cancel();
    let err = optimizer
        .optimize_with(&head_body_catalogue(), &observer)
        .unwrap_err();
    assert_eq!(err, SolveError::Cancelled);
}

/// Test that invalid profiles are rejected before searching.
#[test]
fn test_invalid_profile() {
    let slots = partition_by_slot(head_body_catalogue());
    for weight in [-0.5, f64::NAN, f64::INFINITY] {
        let profile = StatWeightProfile::new().with(Stat::CriticalHit, weight);
        let err = solve(&slots, &profile, &StatBundle::ZERO, &SolveConfig::default()).unwrap_err();
        assert!(matches!(err, SolveError::InvalidConfiguration(_)));
    }
}

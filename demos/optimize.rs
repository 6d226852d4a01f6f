//! Optimize a small caster catalogue and print the report as JSON.
//!
//! Run with `RUST_LOG=gearsolve=debug cargo run --example optimize` to see
//! per-slot filtering.

use gearsolve::*;

const CATALOGUE: &str = r#"[
    {"id": 1, "name": "Augmented Circlet", "item_level": 660, "slot": "head",
     "stats": {"main-stat": 248, "critical-hit": 231, "speed": 162}, "materia_slots": 2},
    {"id": 2, "name": "Tome Circlet", "item_level": 650, "slot": "head",
     "stats": {"main-stat": 240, "direct-hit": 225, "determination": 158}, "materia_slots": 2},
    {"id": 3, "name": "Raid Robe", "item_level": 660, "slot": "body",
     "stats": {"main-stat": 394, "critical-hit": 367, "determination": 257}, "materia_slots": 2},
    {"id": 4, "name": "Crafted Robe", "item_level": 640, "slot": "body",
     "stats": {"main-stat": 370, "speed": 350, "direct-hit": 245}, "materia_slots": 5},
    {"id": 5, "name": "Raid Rod", "item_level": 665, "slot": "weapon",
     "stats": {"main-stat": 416, "weapon-damage": 132, "determination": 306, "speed": 214}},
    {"id": 6, "name": "Leveling Rod", "item_level": 560, "slot": "weapon",
     "stats": {"main-stat": 250, "weapon-damage": 100}},
    {"id": 7, "name": "Raid Ring", "item_level": 660, "slot": "ring",
     "stats": {"main-stat": 145, "critical-hit": 128, "direct-hit": 90}, "materia_slots": 2}
]"#;

const CONFIG: &str = r#"{
    "scoring_mode": "throughput-formula",
    "required_slots": ["weapon", "head", "body", "ring"],
    "profile": "critical-focused",
    "base_stats": {
        "main-stat": 390,
        "critical-hit": 400,
        "direct-hit": 400,
        "determination": 390,
        "speed": 400
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let items: Vec<Item> = serde_json::from_str(CATALOGUE)?;
    let optimizer = Optimizer::new(OptimizerConfig::from_json(CONFIG)?)?;
    let report = optimizer.optimize(&items)?;

    let breakdown = optimizer
        .config()
        .throughput
        .breakdown(&report.result.aggregate);
    eprintln!(
        "tier {}..={}, gcd {:.0}ms, crit {:.1}%, dps {:.2}",
        report.tier.min,
        report.tier.max,
        breakdown.gcd_ms,
        breakdown.crit_rate * 100.0,
        breakdown.dps
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use design_patterns::creational::prototype::MolecularSimulation;
use design_patterns::logging;
use serde_json::{json, Value};

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Prototype: molecular simulation ===".bold());

    let Value::Object(params) = json!({"temperature": 298.15, "pressure": 1.0, "duration": 1000}) else {
        anyhow::bail!("base parameters must be an object");
    };

    let start = Instant::now();
    let prototype = MolecularSimulation::new("Water (H2O)", params, 1_000_000);
    println!("Initial setup took {:.2?}", start.elapsed());

    let start = Instant::now();
    let mut high_temp = prototype.clone();
    high_temp.set_parameter("temperature", 350.0);
    let mut long_run = prototype.clone();
    long_run.set_parameter("duration", 5000);
    let mut high_pressure = prototype.clone();
    high_pressure.set_parameter("pressure", 5.0);
    high_pressure.set_parameter("temperature", 310.0);
    println!("Cloning 3 simulations took {:.2?}", start.elapsed());
    println!("Clones share precomputed states: {}", high_temp.shares_states_with(&prototype));

    for (label, sim) in [
        ("base", &prototype),
        ("high temperature", &high_temp),
        ("long duration", &long_run),
        ("high pressure", &high_pressure),
    ] {
        let metric = sim.run()?;
        println!(
            "  {:<17} {} result metric {:.2} ({} states)",
            label.cyan(),
            serde_json::Value::Object(sim.parameters().clone()),
            metric,
            sim.state_count()
        );
    }
    Ok(())
}

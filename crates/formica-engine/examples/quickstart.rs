//! Minimal end-to-end run: the classic two-color ant for 50,000 steps.
//!
//! ```bash
//! cargo run --example quickstart -p formica-engine
//! ```

use formica_core::{ColorId, RuleTable, Turn};
use formica_engine::{Simulation, SimulationConfig};

fn main() {
    let def = ColorId::new(0).expect("background color in range");
    let mut rules = RuleTable::new(def);
    rules.push(ColorId::new(1).expect("color in range"), Turn::Right);
    rules.push(ColorId::new(2).expect("color in range"), Turn::Left);

    let mut sim = Simulation::new(rules, &SimulationConfig::default())
        .expect("default configuration is valid");
    sim.run();

    let mut full_redraws = 0u64;
    for _ in 0..50_000 {
        let report = sim.step().expect("classic table steps cleanly");
        if !report.is_incremental() {
            full_redraws += 1;
        }
    }

    let grid = sim.grid();
    let bounds = grid.bounding_box();
    println!("steps:        {}", sim.steps());
    println!("grid size:    {}x{}", grid.size(), grid.size());
    println!("sparse:       {}", grid.is_sparse());
    println!("colored:      {}", grid.colored());
    println!(
        "bounding box: {}x{}",
        bounds.max().col - bounds.min().col + 1,
        bounds.max().row - bounds.min().row + 1
    );
    println!("ant:          {} facing {}", sim.ant().position(), sim.ant().heading());
    println!("expansions:   {}", sim.metrics().expansions);
    println!("conversions:  {}", sim.metrics().conversions);
    println!("full redraws: {full_redraws}");
}

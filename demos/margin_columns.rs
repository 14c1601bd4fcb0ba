//! Margin Column Arrangement Demo
//!
//! This example demonstrates:
//! - Cycle-safe dependency edges on a raw `Dag`
//! - Gravity plus before/after constraints arranged into one column order
//! - Conflict reporting for constraints that cannot be honored
//! - Graphviz DOT export for debugging the dependency structure
//!
//! ## Scenario
//! A text editor assembles its vertical ruler from margin columns contributed
//! by independent plugins: annotations, diff markers, line numbers, folding
//! controls. Each contribution only states where it wants to sit relative to
//! the others; nobody owns the full picture. One contribution references a
//! column that was never installed and another contradicts an earlier
//! declaration, and the ruler must still come up.
//!
//! ## Key Takeaways
//! - add_edge refuses cycle-closing edges with `false`, not a panic
//! - Constraints bind hardest, then gravity, then registration order
//! - Bad declarations are skipped and reported; every column gets placed
//! - to_dot() renders the accepted dependencies for inspection
//!
//! ## Run with
//! ```bash
//! cargo run --example margin_columns
//! ```

use taxis::{Arranger, Dag, Placement};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("\nMargin Column Arrangement");
    println!("=========================\n");

    // Part 1: the raw graph refuses contradictory dependencies.
    let mut dag = Dag::new();
    dag.add_edge("annotations", "diff");
    dag.add_edge("diff", "line-numbers");

    // This edge would make the three columns mutually dependent.
    let accepted = dag.add_edge("line-numbers", "annotations");
    info!(
        "back edge line-numbers -> annotations accepted: {}",
        accepted
    );

    println!("Accepted dependencies as Graphviz DOT:\n{}", dag.to_dot());

    // Part 2: arranging contributed columns into one ruler order.
    let mut arranger = Arranger::new();
    arranger.insert("annotations", Placement::new().with_gravity(0.0))?;
    arranger.insert(
        "diff",
        Placement::new()
            .with_gravity(0.5)
            .after("annotations")
            .before("line-numbers"),
    )?;
    arranger.insert("line-numbers", Placement::new().with_gravity(0.5))?;
    arranger.insert("folding", Placement::new().after("line-numbers"))?;
    // References a column nobody installed, and contradicts the diff
    // column's declaration; watch the warnings as both get skipped.
    arranger.insert(
        "breakpoints",
        Placement::new()
            .with_gravity(0.0)
            .after("bookmarks")
            .after("diff")
            .before("annotations"),
    )?;

    let arrangement = arranger.arrange();
    info!("arranged {} columns", arrangement.order.len());

    println!("Final column order, left to right:");
    for (position, column) in arrangement.order.iter().enumerate() {
        println!("  {}. {}", position + 1, column);
    }

    if !arrangement.is_clean() {
        println!("\nSkipped constraints:");
        for conflict in &arrangement.conflicts {
            println!("  - {}", conflict);
        }
    }

    Ok(())
}

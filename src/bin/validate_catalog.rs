//! Check the embedded food catalog and RDA profiles for unusable data
//! Usage: cargo run --bin validate-catalog
//!
//! Exits 1 when any problem is found.

use std::process::ExitCode;

use rda_tracker::catalog;
use rda_tracker::models::FoodUnit;

fn main() -> ExitCode {
    let foods = catalog::foods();
    let problems = catalog::validate_catalog();

    let pieces = foods.iter().filter(|f| f.unit == FoodUnit::Piece).count();
    let liquids = foods.iter().filter(|f| f.unit == FoodUnit::Milliliter).count();
    println!(
        "Catalog: {} foods in {} categories ({} piece, {} ml)",
        foods.len(),
        catalog::categories().len(),
        pieces,
        liquids
    );

    for profile in catalog::profiles() {
        println!("Profile {}: {} targets", profile.id, profile.tracked_count());
    }

    if problems.is_empty() {
        println!("No problems found.");
        return ExitCode::SUCCESS;
    }

    println!("\n{} problem(s):", problems.len());
    for problem in &problems {
        println!("  - {}: {}", problem.food, problem.issue);
    }
    ExitCode::FAILURE
}

// File: crates/harvest-examples/src/bin/stalks.rs
// Summary: Minimal example that builds a stalk scene from in-memory rows and writes SVG.

use harvest_core::{render_to_svg, ChartBuilder, DataRow, Dataset, InteractionEvent, Theme, UiState};

fn main() {
    // Two crops over a handful of years
    let exports = Dataset::new(
        "exports",
        vec![
            DataRow::new("Wheat", "2016", 4_200.0),
            DataRow::new("Corn", "2016", 2_900.0),
            DataRow::new("Wheat", "2019", 6_100.0),
            DataRow::new("Corn", "2019", 5_300.0),
            DataRow::new("Wheat", "2023", 7_800.0),
        ],
    );
    let yields = Dataset::new(
        "yield",
        vec![
            DataRow::new("Wheat", "2016", 3.2),
            DataRow::new("Corn", "2016", 2.1),
            DataRow::new("Wheat", "2019", 4.8),
            DataRow::new("Corn", "2019", 3.9),
            DataRow::new("Wheat", "2023", 6.0),
        ],
    );

    let scene = ChartBuilder::new(&exports, &yields).build();

    // Click a crop the way a host page would, then print the hover tooltip.
    let mut ui = UiState::new();
    ui.dispatch(&InteractionEvent::Click { crop: "Corn".into() }, &scene);
    if let harvest_core::Effect::ShowTooltip(tip) =
        ui.dispatch(&InteractionEvent::Hover { year: 2019, crop: Some("Corn".into()) }, &scene)
    {
        println!("{}", tip.text());
    }

    let out = std::path::PathBuf::from("target/out/example_stalks.svg");
    render_to_svg(&scene, &Theme::default(), &ui, &out).expect("render to svg");
    println!("Wrote {}", out.display());
}

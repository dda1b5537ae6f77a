// File: crates/harvest-render-skia/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use harvest_core::{ChartBuilder, DataRow, Dataset, UiState};
use harvest_render_skia::{RenderOptions, SkiaRenderer};

#[test]
fn render_smoke_png() {
    let e = Dataset::new("exports", vec![DataRow::new("Wheat", "2020", 5000.0), DataRow::new("Corn", "2020", 3000.0)]);
    let y = Dataset::new("yield", vec![DataRow::new("Wheat", "2020", 12.4)]);
    let scene = ChartBuilder::new(&e, &y).build();

    let renderer = SkiaRenderer::new();
    let opts = RenderOptions::default();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/smoke.png");

    renderer.render_to_png(&scene, &UiState::new(), &opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = renderer.render_to_png_bytes(&scene, &UiState::new(), &opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn directory_target_is_rejected() {
    let e = Dataset::default();
    let scene = ChartBuilder::new(&e, &e).build();
    let dir = tempfile::tempdir().unwrap();
    let err = SkiaRenderer::new()
        .render_to_png(&scene, &UiState::new(), &RenderOptions::default(), dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("render target"));
}

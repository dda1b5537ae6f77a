// File: crates/harvest-render-skia/tests/rgba.rs
// Purpose: Validate RGBA buffer shape and a few pixels of a rendered scene.

use harvest_core::{ChartBuilder, DataRow, Dataset, Theme, UiState};
use harvest_render_skia::{RenderOptions, SkiaRenderer};

fn opts() -> RenderOptions {
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    opts.draw_legend = false;
    opts
}

#[test]
fn render_rgba8_buffer() {
    let e = Dataset::new("exports", vec![DataRow::new("Wheat", "2015", 10_000.0)]);
    let scene = ChartBuilder::new(&e, &Dataset::default()).build();

    let (px, w, h, stride) = SkiaRenderer::new().render_to_rgba8(&scene, &UiState::new(), &opts()).expect("rgba render");
    assert_eq!((w, h), (980, 600));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left is white background (RGBA)
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);

    // The 2015 stalk spans the full chart height at x = 50 + 40.
    let at = |x: usize, y: usize| &px[y * stride + x * 4..y * stride + x * 4 + 4];
    assert_eq!(at(90, 300), &[0xFF, 0xD7, 0x00, 255]);
}

#[test]
fn scale_multiplies_surface() {
    let e = Dataset::default();
    let scene = ChartBuilder::new(&e, &e).build();
    let mut o = opts();
    o.scale = 2.0;
    o.theme = Theme::dark();
    let (px, w, h, _) = SkiaRenderer::new().render_to_rgba8(&scene, &UiState::new(), &o).unwrap();
    assert_eq!((w, h), (1960, 1200));
    assert_eq!(&px[0..4], &[18, 18, 20, 255]);
}

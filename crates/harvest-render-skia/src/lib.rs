// File: crates/harvest-render-skia/src/lib.rs
// Summary: Skia renderer for harvest scenes: stalks, leaves, year labels and legend to PNG/RGBA.

pub mod text;

use std::path::Path;

use anyhow::Result;
use harvest_core::geometry::{stalk_rect, QuadLeaf};
use harvest_core::interaction::{LEGEND_HEADER, LEGEND_ROW};
use harvest_core::{Color, RenderTarget, Scene, StalkScene, Theme, UiState};
use skia_safe as skia;
use tracing::debug;

pub use text::TextShaper;

const YEAR_LABEL_GAP: f32 = 25.0;
const YEAR_LABEL_SIZE: f32 = 14.0;
const LEGEND_TEXT_SIZE: f32 = 12.0;

pub struct RenderOptions {
    pub theme: Theme,
    /// Device pixels per scene pixel.
    pub scale: f32,
    pub draw_labels: bool,
    pub draw_legend: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::default(), scale: 1.0, draw_labels: true, draw_legend: true }
    }
}

#[inline]
fn sk(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn fill(color: Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(sk(color));
    p
}

fn stroke(color: Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(sk(color));
    p
}

pub struct SkiaRenderer {
    shaper: TextShaper,
}

impl SkiaRenderer {
    pub fn new() -> Self { Self { shaper: TextShaper::new() } }

    fn surface_size(scene: &Scene, opts: &RenderOptions) -> (i32, i32) {
        let s = opts.scale.max(0.1);
        (
            (scene.layout.width as f32 * s).round() as i32,
            (scene.layout.height as f32 * s).round() as i32,
        )
    }

    fn draw(&self, canvas: &skia::Canvas, scene: &Scene, ui: &UiState, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(sk(theme.background));
        canvas.save();
        canvas.scale((opts.scale, opts.scale));

        let l = &scene.layout;
        canvas.save();
        canvas.translate((l.insets.left as f32, l.insets.top as f32));
        for s in &scene.stalks {
            self.draw_stalk(canvas, scene, s, ui, theme);
            if opts.draw_labels {
                self.shaper.draw_centered(
                    canvas,
                    &s.year.to_string(),
                    s.x as f32,
                    (l.chart_height as f32) + YEAR_LABEL_GAP,
                    YEAR_LABEL_SIZE,
                    sk(theme.year_label),
                );
            }
        }
        canvas.restore();

        if opts.draw_legend {
            self.draw_legend(canvas, scene, ui, opts);
        }
        canvas.restore();
    }

    fn draw_stalk(&self, canvas: &skia::Canvas, scene: &Scene, s: &StalkScene, ui: &UiState, theme: &Theme) {
        canvas.save();
        canvas.translate((s.x as f32, s.top as f32));

        let body = stalk_rect(s.height);
        let rect = skia::Rect::from_ltrb(body.left as f32, body.top as f32, body.right as f32, body.bottom as f32);
        canvas.draw_rect(rect, &fill(theme.stalk));

        let highlight = stroke(theme.highlight, 2.0);
        for glyph in &s.leaves {
            let leaf = QuadLeaf::new(glyph.side, glyph.vertical_offset);
            let p = |(x, y): (f64, f64)| skia::Point::new(x as f32, y as f32);

            let mut path = skia::Path::new();
            path.move_to(p(leaf.anchor));
            path.quad_to(p(leaf.ctrl_out), p(leaf.tip));
            path.quad_to(p(leaf.ctrl_back), p(leaf.anchor));
            path.close();

            canvas.save();
            canvas.rotate(leaf.rotation_deg as f32, Some(p(leaf.anchor)));
            canvas.draw_path(&path, &fill(scene.legend.color_for(&glyph.crop)));
            if ui.is_selected(&glyph.crop) {
                canvas.draw_path(&path, &highlight);
            }
            canvas.restore();
        }
        canvas.restore();
    }

    fn draw_legend(&self, canvas: &skia::Canvas, scene: &Scene, ui: &UiState, opts: &RenderOptions) {
        let theme = &opts.theme;
        let panel = ui.legend.rect(scene.legend.entries.len());
        let rect = skia::Rect::from_ltrb(panel.left as f32, panel.top as f32, panel.right as f32, panel.bottom as f32);
        canvas.draw_round_rect(rect, 4.0, 4.0, &fill(theme.panel_fill));
        canvas.draw_round_rect(rect, 4.0, 4.0, &stroke(theme.panel_stroke, 1.0));

        let (x0, y0) = (panel.left as f32, panel.top as f32);
        if opts.draw_labels {
            self.shaper.draw_left(canvas, "Crops", x0 + 8.0, y0 + 15.0, LEGEND_TEXT_SIZE, sk(theme.panel_text), true);
            let toggle = if ui.legend.minimized { "+" } else { "-" };
            self.shaper.draw_left(canvas, toggle, x0 + panel.width() as f32 - 16.0, y0 + 15.0, LEGEND_TEXT_SIZE, sk(theme.panel_text), false);
        }
        if ui.legend.minimized {
            return;
        }
        for (i, entry) in scene.legend.entries.iter().enumerate() {
            let y = y0 + (LEGEND_HEADER + i as f64 * LEGEND_ROW) as f32;
            let swatch = skia::Rect::from_xywh(x0 + 8.0, y, 12.0, 12.0);
            canvas.draw_rect(swatch, &fill(entry.color));
            canvas.draw_rect(swatch, &stroke(theme.panel_stroke, 1.0));
            if opts.draw_labels {
                self.shaper.draw_left(
                    canvas,
                    &entry.crop,
                    x0 + 26.0,
                    y + 10.0,
                    LEGEND_TEXT_SIZE,
                    sk(theme.panel_text),
                    ui.is_selected(&entry.crop),
                );
            }
        }
    }

    fn render_surface(&self, scene: &Scene, ui: &UiState, opts: &RenderOptions) -> Result<skia::Surface> {
        let (w, h) = Self::surface_size(scene, opts);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), scene, ui, opts);
        Ok(surface)
    }

    /// Render the scene and return encoded PNG bytes.
    pub fn render_to_png_bytes(&self, scene: &Scene, ui: &UiState, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(scene, ui, opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        scene: &Scene,
        ui: &UiState,
        opts: &RenderOptions,
        output_png_path: impl AsRef<Path>,
    ) -> Result<()> {
        let target = RenderTarget::prepare(output_png_path)?;
        let bytes = self.render_to_png_bytes(scene, ui, opts)?;
        target.write(&bytes)?;
        debug!(path = %target.path().display(), bytes = bytes.len(), "wrote PNG");
        Ok(())
    }

    /// Render to unpremultiplied RGBA8: (pixels, width, height, row stride in bytes).
    pub fn render_to_rgba8(&self, scene: &Scene, ui: &UiState, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.render_surface(scene, ui, opts)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            anyhow::bail!("reading pixels from raster surface failed");
        }
        Ok((px, w, h, stride))
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new() }
}

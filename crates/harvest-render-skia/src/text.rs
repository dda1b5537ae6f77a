// File: crates/harvest-render-skia/src/text.rs
// Summary: Label shaping with Skia textlayout (year labels, legend rows).

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT, false).longest_line()
    }

    /// Draw with the baseline at `y`, starting at `x`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, bold: bool) {
        let mut p = self.layout(text, size, color, bold);
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }

    /// Draw with the baseline at `y`, horizontally centred on `cx`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, y: f32, size: f32, color: skia::Color) {
        let w = self.measure_width(text, size);
        self.draw_left(canvas, text, cx - w * 0.5, y, size, color, false);
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

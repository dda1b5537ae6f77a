// File: crates/harvest-core/src/svg.rs
// Summary: SVG rendering adapter; serializes a Scene plus UI state into a standalone document.
// Notes:
// - Pure string building, no I/O except `render_to_svg`.
// - Leaves are grouped per crop run with a `data-crop` attribute so a host page can
//   bind hover/click handlers and feed them back through `UiState::dispatch`.

use std::fmt::Write;
use std::path::Path;

use crate::error::Result;
use crate::geometry::{stalk_rect, QuadLeaf};
use crate::interaction::{tooltip_for, UiState, LEGEND_HEADER, LEGEND_ROW};
use crate::layout::LeafGlyph;
use crate::scene::{Scene, StalkScene};
use crate::target::RenderTarget;
use crate::theme::Theme;

const YEAR_LABEL_GAP: f64 = 25.0;
const YEAR_LABEL_SIZE: u32 = 14;
const HIGHLIGHT_WIDTH: f64 = 2.0;

/// Escape the five XML special characters for text content and attribute values.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Compact number for attributes: at most three decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() { "0".to_string() } else { s.to_string() }
}

fn leaf_path(leaf: &QuadLeaf) -> String {
    let (ax, ay) = leaf.anchor;
    let (ox, oy) = leaf.ctrl_out;
    let (tx, ty) = leaf.tip;
    let (bx, by) = leaf.ctrl_back;
    format!(
        "M{},{} Q{},{} {},{} Q{},{} {},{}",
        num(ax), num(ay), num(ox), num(oy), num(tx), num(ty), num(bx), num(by), num(ax), num(ay)
    )
}

/// Render the whole chart as an SVG document string.
pub fn render_svg(scene: &Scene, theme: &Theme, ui: &UiState) -> String {
    let l = &scene.layout;
    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = l.width,
        h = l.height
    );
    let _ = writeln!(out, "<title>Grain exports and yields by year</title>");
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        l.width,
        l.height,
        theme.background.to_hex()
    );
    let _ = writeln!(out, r#"<g class="chart" transform="translate({},{})">"#, l.insets.left, l.insets.top);

    for stalk in &scene.stalks {
        write_stalk(&mut out, scene, stalk, theme, ui);
        let _ = writeln!(
            out,
            r#"<text class="year" x="{}" y="{}" text-anchor="middle" font-size="{}" fill="{}">{}</text>"#,
            num(stalk.x),
            num(l.chart_height + YEAR_LABEL_GAP),
            YEAR_LABEL_SIZE,
            theme.year_label.to_hex(),
            stalk.year
        );
    }
    let _ = writeln!(out, "</g>");

    write_legend(&mut out, scene, theme, ui);
    let _ = writeln!(out, "</svg>");
    out
}

fn write_stalk(out: &mut String, scene: &Scene, stalk: &StalkScene, theme: &Theme, ui: &UiState) {
    let _ = writeln!(
        out,
        r#"<g class="stalk" data-year="{}" transform="translate({},{})">"#,
        stalk.year,
        num(stalk.x),
        num(stalk.top)
    );
    let body = stalk_rect(stalk.height);
    let year_tip = tooltip_for(scene, stalk.year, None).map(|t| t.text()).unwrap_or_default();
    let _ = writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}</title></rect>"#,
        num(body.left),
        num(body.top),
        num(body.width()),
        num(body.height()),
        theme.stalk.to_hex(),
        xml_escape(&year_tip)
    );

    for run in crop_runs(&stalk.leaves) {
        let crop = run[0].crop.as_str();
        let color = scene.legend.color_for(crop).to_hex();
        let tip = tooltip_for(scene, stalk.year, Some(crop)).map(|t| t.text()).unwrap_or_default();
        let tip = xml_escape(&tip);
        let highlight = if ui.is_selected(crop) {
            format!(
                r#" stroke="{}" stroke-width="{}""#,
                theme.highlight.to_hex(),
                num(HIGHLIGHT_WIDTH)
            )
        } else {
            String::new()
        };
        let _ = writeln!(out, r#"<g class="crop" data-crop="{}"{}>"#, xml_escape(crop), highlight);
        for glyph in run {
            let leaf = QuadLeaf::new(glyph.side, glyph.vertical_offset);
            let _ = writeln!(
                out,
                r#"<path d="{}" fill="{}" transform="rotate({}, {}, {})"><title>{}</title></path>"#,
                leaf_path(&leaf),
                color,
                num(leaf.rotation_deg),
                num(leaf.anchor.0),
                num(leaf.anchor.1),
                tip
            );
        }
        let _ = writeln!(out, "</g>");
    }
    let _ = writeln!(out, "</g>");
}

/// Split a crop-sorted leaf sequence into runs of the same crop.
fn crop_runs(leaves: &[LeafGlyph]) -> Vec<&[LeafGlyph]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=leaves.len() {
        if i == leaves.len() || leaves[i].crop != leaves[start].crop {
            runs.push(&leaves[start..i]);
            start = i;
        }
    }
    runs
}

fn write_legend(out: &mut String, scene: &Scene, theme: &Theme, ui: &UiState) {
    let panel = ui.legend.rect(scene.legend.entries.len());
    let _ = writeln!(
        out,
        r#"<g class="legend" transform="translate({},{})">"#,
        num(panel.left),
        num(panel.top)
    );
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" rx="4" fill="{}" stroke="{}"/>"#,
        num(panel.width()),
        num(panel.height()),
        theme.panel_fill.to_hex(),
        theme.panel_stroke.to_hex()
    );
    let _ = writeln!(
        out,
        r#"<text x="8" y="15" font-size="12" font-weight="bold" fill="{}">Crops</text>"#,
        theme.panel_text.to_hex()
    );
    let _ = writeln!(
        out,
        r#"<text class="legend-toggle" x="{}" y="15" font-size="12" text-anchor="end" fill="{}">{}</text>"#,
        num(panel.width() - 8.0),
        theme.panel_text.to_hex(),
        if ui.legend.minimized { "+" } else { "-" }
    );
    if !ui.legend.minimized {
        for (i, entry) in scene.legend.entries.iter().enumerate() {
            let y = LEGEND_HEADER + i as f64 * LEGEND_ROW;
            let weight = if ui.is_selected(&entry.crop) { "bold" } else { "normal" };
            let _ = writeln!(
                out,
                r#"<g class="legend-item" data-crop="{}"><rect x="8" y="{}" width="12" height="12" fill="{}" stroke="{}"/><text x="26" y="{}" font-size="12" font-weight="{}" fill="{}">{}</text></g>"#,
                xml_escape(&entry.crop),
                num(y),
                entry.color.to_hex(),
                theme.panel_stroke.to_hex(),
                num(y + 10.0),
                weight,
                theme.panel_text.to_hex(),
                xml_escape(&entry.crop)
            );
        }
    }
    let _ = writeln!(out, "</g>");
}

/// Render and write the SVG to `path` (parent directories are created).
pub fn render_to_svg(scene: &Scene, theme: &Theme, ui: &UiState, path: impl AsRef<Path>) -> Result<()> {
    let target = RenderTarget::prepare(path)?;
    target.write(render_svg(scene, theme, ui))
}

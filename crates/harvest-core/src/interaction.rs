// File: crates/harvest-core/src/interaction.rs
// Summary: Adapter-owned UI state (crop selection, legend panel) and tooltip content.
// Notes:
// - Adapters translate pointer input into `InteractionEvent`s and apply the
//   returned `Effect`; nothing here touches a drawing surface.

use serde::Serialize;

use crate::geometry::{clamp, RectF};
use crate::scene::Scene;

pub const LEGEND_WIDTH: f64 = 150.0;
pub const LEGEND_HEADER: f64 = 22.0;
pub const LEGEND_ROW: f64 = 18.0;

/// Position and collapsed state of the legend panel, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LegendPanel {
    pub x: f64,
    pub y: f64,
    pub minimized: bool,
}

impl LegendPanel {
    /// Panel bounds for a legend with `entries` rows.
    pub fn rect(&self, entries: usize) -> RectF {
        let body = if self.minimized { 0.0 } else { entries as f64 * LEGEND_ROW + 6.0 };
        RectF::from_ltwh(self.x, self.y, LEGEND_WIDTH, LEGEND_HEADER + body)
    }
}

impl Default for LegendPanel {
    fn default() -> Self {
        Self { x: 60.0, y: 10.0, minimized: false }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UiState {
    pub selected_crop: Option<String>,
    pub legend: LegendPanel,
}

/// Pointer input in chart terms (which year/crop is under the cursor).
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    /// Pointer over a stalk (`crop: None`) or one of its leaves.
    Hover { year: i32, crop: Option<String> },
    Leave,
    Click { crop: String },
    DragLegend { dx: f64, dy: f64 },
    ToggleLegend,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ShowTooltip(Tooltip),
    HideTooltip,
    /// New highlighted crop; `None` clears every highlight.
    Highlight(Option<String>),
    LegendMoved { x: f64, y: f64 },
    LegendToggled { minimized: bool },
}

impl UiState {
    pub fn new() -> Self { Self::default() }

    pub fn is_selected(&self, crop: &str) -> bool {
        self.selected_crop.as_deref() == Some(crop)
    }

    /// Select `crop`, or clear the selection when it is already selected.
    pub fn toggle_crop(&mut self, crop: &str) -> Option<&str> {
        if self.is_selected(crop) {
            self.selected_crop = None;
        } else {
            self.selected_crop = Some(crop.to_string());
        }
        self.selected_crop.as_deref()
    }

    pub fn dispatch(&mut self, event: &InteractionEvent, scene: &Scene) -> Effect {
        match event {
            InteractionEvent::Hover { year, crop } => match tooltip_for(scene, *year, crop.as_deref()) {
                Some(t) => Effect::ShowTooltip(t),
                None => Effect::HideTooltip,
            },
            InteractionEvent::Leave => Effect::HideTooltip,
            InteractionEvent::Click { crop } => {
                Effect::Highlight(self.toggle_crop(crop).map(str::to_string))
            }
            InteractionEvent::DragLegend { dx, dy } => {
                let panel = self.legend.rect(scene.legend.entries.len());
                let max_x = (scene.layout.width as f64 - panel.width()).max(0.0);
                let max_y = (scene.layout.height as f64 - panel.height()).max(0.0);
                self.legend.x = clamp(self.legend.x + dx, 0.0, max_x);
                self.legend.y = clamp(self.legend.y + dy, 0.0, max_y);
                Effect::LegendMoved { x: self.legend.x, y: self.legend.y }
            }
            InteractionEvent::ToggleLegend => {
                self.legend.minimized = !self.legend.minimized;
                Effect::LegendToggled { minimized: self.legend.minimized }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub year: i32,
    pub crop: Option<String>,
    pub lines: Vec<String>,
}

impl Tooltip {
    pub fn text(&self) -> String { self.lines.join("\n") }
}

/// Tooltip for a stalk (`crop: None`) or a crop's leaves in `year`.
/// `None` when the year is not part of the scene.
pub fn tooltip_for(scene: &Scene, year: i32, crop: Option<&str>) -> Option<Tooltip> {
    let stalk = scene.stalk(year)?;
    let agg = &stalk.aggregate;
    let unit = scene.unit.label();
    let mut lines = vec![format!("Year: {year}")];
    match crop {
        Some(c) => {
            lines.push(format!("Crop: {c}"));
            lines.push(format!("Yield: {} ({unit})", format_fixed2(agg.crop_yield(c))));
            lines.push(format!("Exports: {} (1000 MT)", format_thousands(agg.crop_export(c))));
            lines.push(format!("Leaves: {}", stalk.leaves_for(c)));
        }
        None => {
            lines.push(format!("Total exports: {} (1000 MT)", format_thousands(agg.total_exports)));
            lines.push(format!("Total yield: {} ({unit})", format_fixed2(agg.total_yield)));
        }
    }
    Some(Tooltip { year, crop: crop.map(str::to_string), lines })
}

/// `1234567.5` -> `"1,234,567.5"`; at most two decimals, trailing zeros dropped.
pub fn format_thousands(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.2}", v.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let frac = frac.trim_end_matches('0');
    let sign = if v < 0.0 && (int != "0" || !frac.is_empty()) { "-" } else { "" };
    if frac.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}.{frac}") }
}

/// Two fixed decimals, e.g. `12.4` -> `"12.40"`.
pub fn format_fixed2(v: f64) -> String {
    format!("{:.2}", if v.is_finite() { v } else { 0.0 })
}

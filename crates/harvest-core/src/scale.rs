// File: crates/harvest-core/src/scale.rs
// Summary: Export scale mapping yearly export totals to stalk heights.

use crate::geometry::clamp;
use crate::types::{MIN_MAX_EXPORTS, MIN_STALK_HEIGHT};

/// Vertical scale shared by every stalk of a chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportScale {
    pub chart_height: f64,
    /// Largest yearly export total, never below `MIN_MAX_EXPORTS`.
    pub max_exports: f64,
}

impl ExportScale {
    pub fn new(chart_height: f64, max_exports: f64) -> Self {
        let max_exports = if max_exports.is_finite() { max_exports.max(MIN_MAX_EXPORTS) } else { MIN_MAX_EXPORTS };
        Self { chart_height: chart_height.max(MIN_STALK_HEIGHT), max_exports }
    }

    /// Build from the export totals of every displayed year.
    pub fn from_totals(chart_height: f64, totals: impl IntoIterator<Item = f64>) -> Self {
        let max = totals.into_iter().fold(0.0f64, f64::max);
        Self::new(chart_height, max)
    }

    /// Stalk height for a year's export total, clamped to `[40, chart_height]`.
    #[inline]
    pub fn height(&self, total_exports: f64) -> f64 {
        let raw = self.chart_height * (total_exports / self.max_exports);
        let raw = if raw.is_nan() { MIN_STALK_HEIGHT } else { raw };
        clamp(raw, MIN_STALK_HEIGHT, self.chart_height)
    }

    /// Y of the stalk's top edge inside the plot (plot origin at the top).
    #[inline]
    pub fn top_px(&self, total_exports: f64) -> f64 {
        self.chart_height - self.height(total_exports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_on_max_exports() {
        let s = ExportScale::from_totals(540.0, [0.0, 20.0, 5.0]);
        assert_eq!(s.max_exports, 10_000.0);
        assert_eq!(s.height(0.0), 40.0);
        assert_eq!(s.height(10_000.0), 540.0);
    }

    #[test]
    fn proportional_between_bounds() {
        let s = ExportScale::from_totals(540.0, [8_000.0, 20_000.0]);
        assert!((s.height(10_000.0) - 270.0).abs() < 1e-9);
        assert!((s.top_px(10_000.0) - 270.0).abs() < 1e-9);
        assert_eq!(s.height(1e12), 540.0);
    }
}

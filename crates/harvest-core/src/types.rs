// File: crates/harvest-core/src/types.rs
// Summary: Shared layout constants (year range, sizes, paddings) and chart options.

use serde::Serialize;

use crate::aggregate::YieldAggregation;
use crate::layout::LeafUnit;

/// First year drawn as a stalk.
pub const YEAR_START: i32 = 2015;
/// Last year drawn as a stalk (inclusive).
pub const YEAR_END: i32 = 2025;

/// Default surface height in pixels.
pub const HEIGHT: u32 = 600;
/// Horizontal distance between neighbouring stalks.
pub const STALK_SPACING: f64 = 80.0;
/// X of the first stalk inside the plot area.
pub const FIRST_STALK_X: f64 = 40.0;
/// Extra width added to `STALK_SPACING * years`.
pub const WIDTH_PADDING: u32 = 100;

/// Stalks never get shorter than this, even for years without exports.
pub const MIN_STALK_HEIGHT: f64 = 40.0;
/// Lower bound on the export maximum used for scaling.
pub const MIN_MAX_EXPORTS: f64 = 10_000.0;
/// Leaves are spaced over `1 / LEAF_SPREAD` of the stalk.
pub const LEAF_SPREAD: f64 = 1.3;
/// Most leaves drawn on one stalk. Past this the spacing drops below half a
/// pixel; crops later in name order lose their surplus leaves first.
pub const MAX_LEAVES: usize = 1_000;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(50, 30, 20, 40)
    }
}

/// Builder configuration: which years to draw, how big, and how yields are counted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartOptions {
    pub year_start: i32,
    pub year_end: i32,
    pub height: u32,
    pub insets: Insets,
    pub aggregation: YieldAggregation,
    pub unit: LeafUnit,
}

impl ChartOptions {
    /// Years drawn, in order.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.year_start..=self.year_end
    }

    pub fn year_count(&self) -> u32 {
        (self.year_end - self.year_start + 1).max(0) as u32
    }

    /// Full surface width: one stalk slot per year plus padding.
    pub fn width(&self) -> u32 {
        (STALK_SPACING as u32) * self.year_count() + WIDTH_PADDING
    }

    /// Drawable height inside the vertical margins.
    pub fn chart_height(&self) -> f64 {
        self.height.saturating_sub(self.insets.vsum()) as f64
    }

    /// Drawable width inside the horizontal margins.
    pub fn chart_width(&self) -> f64 {
        self.width().saturating_sub(self.insets.hsum()) as f64
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            year_start: YEAR_START,
            year_end: YEAR_END,
            height: HEIGHT,
            insets: Insets::default(),
            aggregation: YieldAggregation::default(),
            unit: LeafUnit::default(),
        }
    }
}

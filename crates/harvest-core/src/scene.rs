// File: crates/harvest-core/src/scene.rs
// Summary: ChartBuilder turns the two datasets into a declarative stalk scene.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{aggregate_year, YearAggregate, YieldAggregation};
use crate::data::Dataset;
use crate::error::{HarvestError, Result};
use crate::geometry::stalk_x;
use crate::layout::{layout_leaves, LeafGlyph, LeafUnit};
use crate::scale::ExportScale;
use crate::theme::Legend;
use crate::types::{ChartOptions, Insets};

/// One year's stalk, ready to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StalkScene {
    pub year: i32,
    /// Plot-space X of the stalk centre.
    pub x: f64,
    /// Plot-space Y of the stalk top (`chart_height - height`).
    pub top: f64,
    pub height: f64,
    /// Sorted by crop name; sides alternate by position.
    pub leaves: Vec<LeafGlyph>,
    /// Figures shown in the year and crop tooltips.
    pub aggregate: YearAggregate,
}

impl StalkScene {
    pub fn leaf_count(&self) -> usize { self.leaves.len() }

    pub fn leaves_for(&self, crop: &str) -> usize {
        self.leaves.iter().filter(|l| l.crop == crop).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SceneLayout {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    pub chart_width: f64,
    pub chart_height: f64,
}

impl From<&ChartOptions> for SceneLayout {
    fn from(opts: &ChartOptions) -> Self {
        Self {
            width: opts.width(),
            height: opts.height,
            insets: opts.insets,
            chart_width: opts.chart_width(),
            chart_height: opts.chart_height(),
        }
    }
}

/// Everything a rendering adapter needs; holds no behaviour of its own.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub stalks: Vec<StalkScene>,
    pub legend: Legend,
    pub layout: SceneLayout,
    pub max_exports: f64,
    pub aggregation: YieldAggregation,
    pub unit: LeafUnit,
}

impl Scene {
    pub fn stalk(&self, year: i32) -> Option<&StalkScene> {
        self.stalks.iter().find(|s| s.year == year)
    }

    /// Every crop that appears in any year, sorted.
    pub fn crops(&self) -> BTreeSet<&str> {
        self.stalks.iter().flat_map(|s| s.aggregate.crops()).collect()
    }

    pub fn total_leaves(&self) -> usize {
        self.stalks.iter().map(StalkScene::leaf_count).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the scene as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let io_err = |source| HarvestError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, json).map_err(io_err)
    }
}

/// Builds a [`Scene`] from already-loaded export and yield tables.
///
/// The leaf unit is, in order: the one passed to [`ChartBuilder::unit`], the
/// unit named by the yield file's `Unit_Description`, then `ChartOptions::unit`.
pub struct ChartBuilder<'a> {
    exports: &'a Dataset,
    yields: &'a Dataset,
    options: ChartOptions,
    unit: Option<LeafUnit>,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(exports: &'a Dataset, yields: &'a Dataset) -> Self {
        Self { exports, yields, options: ChartOptions::default(), unit: None }
    }

    pub fn options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn aggregation(mut self, aggregation: YieldAggregation) -> Self {
        self.options.aggregation = aggregation;
        self
    }

    pub fn unit(mut self, unit: LeafUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn leaf_unit(&self) -> LeafUnit {
        self.unit
            .or_else(|| self.yields.unit.as_deref().and_then(LeafUnit::from_description))
            .unwrap_or(self.options.unit)
    }

    /// Per-year totals for the configured range, in year order.
    pub fn aggregate(&self) -> Vec<YearAggregate> {
        self.options
            .years()
            .map(|y| aggregate_year(self.exports, self.yields, y, self.options.aggregation))
            .collect()
    }

    pub fn build(&self) -> Scene {
        let aggregates = self.aggregate();
        let layout = SceneLayout::from(&self.options);
        let scale = ExportScale::from_totals(layout.chart_height, aggregates.iter().map(|a| a.total_exports));

        let stalks: Vec<StalkScene> = aggregates
            .into_iter()
            .enumerate()
            .map(|(idx, aggregate)| {
                let height = scale.height(aggregate.total_exports);
                let leaves = layout_leaves(&aggregate.crop_yields, height);
                StalkScene {
                    year: aggregate.year,
                    x: stalk_x(idx),
                    top: scale.top_px(aggregate.total_exports),
                    height,
                    leaves,
                    aggregate,
                }
            })
            .collect();

        let observed: BTreeSet<&str> = stalks.iter().flat_map(|s| s.aggregate.crops()).collect();
        let legend = Legend::standard().with_observed(observed);

        debug!(
            stalks = stalks.len(),
            max_exports = scale.max_exports,
            leaves = stalks.iter().map(StalkScene::leaf_count).sum::<usize>(),
            "built scene"
        );

        Scene {
            stalks,
            legend,
            layout,
            max_exports: scale.max_exports,
            aggregation: self.options.aggregation,
            unit: self.leaf_unit(),
        }
    }
}

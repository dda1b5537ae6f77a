// File: crates/harvest-core/src/aggregate.rs
// Summary: Per-year grouping of export and yield rows by commodity.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::Dataset;

/// How the yield rows of one crop (and of the whole year) are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldAggregation {
    /// Add all rows up (absolute production, e.g. 1000 MT).
    #[default]
    Sum,
    /// Average the rows (rates, e.g. MT/HA).
    Mean,
}

impl YieldAggregation {
    pub fn name(&self) -> &'static str {
        match self {
            YieldAggregation::Sum => "sum",
            YieldAggregation::Mean => "mean",
        }
    }
}

impl fmt::Display for YieldAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for YieldAggregation {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" | "total" => Ok(YieldAggregation::Sum),
            "mean" | "avg" | "average" => Ok(YieldAggregation::Mean),
            other => Err(format!("unknown yield aggregation '{other}' (expected sum or mean)")),
        }
    }
}

/// Totals for one calendar year.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct YearAggregate {
    pub year: i32,
    pub total_exports: f64,
    /// Sum or mean of all yield rows, per the configured aggregation.
    pub total_yield: f64,
    pub crop_yields: BTreeMap<String, f64>,
    pub crop_exports: BTreeMap<String, f64>,
}

impl YearAggregate {
    /// True when neither dataset had rows for this year.
    pub fn is_empty(&self) -> bool {
        self.crop_yields.is_empty() && self.crop_exports.is_empty()
    }

    /// Every crop seen in either dataset, sorted.
    pub fn crops(&self) -> BTreeSet<&str> {
        self.crop_yields
            .keys()
            .chain(self.crop_exports.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn crop_yield(&self, crop: &str) -> f64 {
        self.crop_yields.get(crop).copied().unwrap_or(0.0)
    }

    pub fn crop_export(&self, crop: &str) -> f64 {
        self.crop_exports.get(crop).copied().unwrap_or(0.0)
    }
}

/// Group both datasets for a single year.
pub fn aggregate_year(
    exports: &Dataset,
    yields: &Dataset,
    year: i32,
    aggregation: YieldAggregation,
) -> YearAggregate {
    let key = year.to_string();

    let mut crop_exports: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_exports = 0.0;
    for r in exports.rows_in_year(&key) {
        *crop_exports.entry(r.commodity.clone()).or_insert(0.0) += r.value;
        total_exports += r.value;
    }

    // (sum, count) per crop
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let mut yield_sum = 0.0;
    let mut yield_rows = 0usize;
    for r in yields.rows_in_year(&key) {
        let e = acc.entry(r.commodity.clone()).or_insert((0.0, 0));
        e.0 += r.value;
        e.1 += 1;
        yield_sum += r.value;
        yield_rows += 1;
    }

    let combine = |sum: f64, count: usize| match aggregation {
        YieldAggregation::Sum => sum,
        YieldAggregation::Mean if count == 0 => 0.0,
        YieldAggregation::Mean => sum / count as f64,
    };

    let crop_yields = acc
        .into_iter()
        .map(|(crop, (sum, count))| (crop, combine(sum, count)))
        .collect();

    YearAggregate {
        year,
        total_exports,
        total_yield: combine(yield_sum, yield_rows),
        crop_yields,
        crop_exports,
    }
}

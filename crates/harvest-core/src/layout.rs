// File: crates/harvest-core/src/layout.rs
// Summary: Leaf layout along a stalk: one glyph per whole unit of crop yield.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{LEAF_SPREAD, MAX_LEAVES};

/// Unit that one leaf stands for. Only affects labels; the count is always
/// `floor(value)` of the aggregated yield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafUnit {
    #[default]
    ThousandMetricTons,
    TonsPerHectare,
}

impl LeafUnit {
    pub fn label(&self) -> &'static str {
        match self {
            LeafUnit::ThousandMetricTons => "1000 MT",
            LeafUnit::TonsPerHectare => "MT/HA",
        }
    }

    /// Read a CSV `Unit_Description` such as `(MT/HA)` or `(1000 MT)`.
    pub fn from_description(desc: &str) -> Option<Self> {
        desc.trim().trim_start_matches('(').trim_end_matches(')').parse().ok()
    }
}

impl fmt::Display for LeafUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for LeafUnit {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(' ', "").as_str() {
            "kmt" | "1000mt" | "thousand-mt" => Ok(LeafUnit::ThousandMetricTons),
            "tha" | "mt/ha" | "t/ha" => Ok(LeafUnit::TonsPerHectare),
            other => Err(format!("unknown leaf unit '{other}' (expected kmt or tha)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Even positions go left, odd positions go right.
    #[inline]
    pub fn for_index(i: usize) -> Self {
        if i % 2 == 0 { Side::Left } else { Side::Right }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeafGlyph {
    pub crop: String,
    pub side: Side,
    /// Distance from the top of the stalk, in pixels.
    pub vertical_offset: f64,
}

/// Whole leaves for a yield value; never negative.
#[inline]
pub fn leaf_count(value: f64) -> usize {
    if value.is_finite() && value > 0.0 { value.floor() as usize } else { 0 }
}

/// Vertical gap between consecutive leaves. An empty stalk counts as one leaf.
#[inline]
pub fn leaf_spacing(stalk_height: f64, leaves: usize) -> f64 {
    stalk_height / (leaves.max(1) as f64 * LEAF_SPREAD)
}

/// Expand crop yields into the ordered leaf sequence of one stalk, at most
/// [`MAX_LEAVES`] long.
pub fn layout_leaves(crop_yields: &BTreeMap<String, f64>, stalk_height: f64) -> Vec<LeafGlyph> {
    // BTreeMap iterates by crop name, so the concatenation is already sorted.
    let requested = crop_yields
        .values()
        .map(|v| leaf_count(*v))
        .fold(0usize, usize::saturating_add);
    if requested > MAX_LEAVES {
        warn!(requested, cap = MAX_LEAVES, "too many leaves for one stalk; capping");
    }

    let mut room = MAX_LEAVES;
    let crops: Vec<(&str, usize)> = crop_yields
        .iter()
        .map(|(crop, v)| {
            let n = leaf_count(*v).min(room);
            room -= n;
            (crop.as_str(), n)
        })
        .collect();
    let total = requested.min(MAX_LEAVES);
    let spacing = leaf_spacing(stalk_height, total);

    let mut out = Vec::with_capacity(total);
    for (crop, n) in crops {
        for _ in 0..n {
            let i = out.len();
            out.push(LeafGlyph {
                crop: crop.to_string(),
                side: Side::for_index(i),
                vertical_offset: i as f64 * spacing,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_count_floors_and_clamps() {
        assert_eq!(leaf_count(12.4), 12);
        assert_eq!(leaf_count(0.99), 0);
        assert_eq!(leaf_count(-4.0), 0);
        assert_eq!(leaf_count(f64::NAN), 0);
    }

    #[test]
    fn sides_alternate_across_crops() {
        let mut y = BTreeMap::new();
        y.insert("Wheat".to_string(), 2.0);
        y.insert("Corn".to_string(), 1.0);
        let leaves = layout_leaves(&y, 130.0);
        let got: Vec<(&str, Side)> = leaves.iter().map(|l| (l.crop.as_str(), l.side)).collect();
        assert_eq!(got, vec![("Corn", Side::Left), ("Wheat", Side::Right), ("Wheat", Side::Left)]);
        // spacing = 130 / (3 * 1.3) = 33.33..
        assert!((leaves[2].vertical_offset - 2.0 * 130.0 / 3.9).abs() < 1e-9);
    }

    #[test]
    fn unit_parsing() {
        assert_eq!("tha".parse::<LeafUnit>(), Ok(LeafUnit::TonsPerHectare));
        assert_eq!("1000 MT".parse::<LeafUnit>(), Ok(LeafUnit::ThousandMetricTons));
    }

    #[test]
    fn unit_from_csv_description() {
        assert_eq!(LeafUnit::from_description("(MT/HA)"), Some(LeafUnit::TonsPerHectare));
        assert_eq!(LeafUnit::from_description(" (1000 MT) "), Some(LeafUnit::ThousandMetricTons));
        assert_eq!(LeafUnit::from_description("(HA)"), None);
    }

    #[test]
    fn huge_yields_are_capped() {
        let mut y = BTreeMap::new();
        y.insert("Corn".to_string(), 3.0);
        y.insert("Oats".to_string(), 1e20);
        y.insert("Wheat".to_string(), f64::MAX);
        let leaves = layout_leaves(&y, 540.0);
        assert_eq!(leaves.len(), MAX_LEAVES);
        assert_eq!(leaves.iter().filter(|l| l.crop == "Corn").count(), 3);
        assert_eq!(leaves.iter().filter(|l| l.crop == "Wheat").count(), 0);
        let last = leaves.last().unwrap();
        assert!(last.vertical_offset < 540.0);
    }
}

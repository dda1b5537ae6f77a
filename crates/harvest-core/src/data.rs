// File: crates/harvest-core/src/data.rs
// Summary: CSV row model and loaders for the exports and yield datasets.
// Notes:
// - `Commodity_Description`, `Calendar_Year` and `Value` are required. The
//   optional `Unit_Description` column names the unit of the values; other
//   columns are ignored.
// - Values that do not parse as a finite decimal number count as 0.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{HarvestError, Result};

pub const COMMODITY_COLUMN: &str = "Commodity_Description";
pub const YEAR_COLUMN: &str = "Calendar_Year";
pub const VALUE_COLUMN: &str = "Value";

/// One parsed CSV row. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataRow {
    pub commodity: String,
    /// Kept as text: rows are matched to a year by exact string equality.
    pub year: String,
    pub value: f64,
}

impl DataRow {
    pub fn new(commodity: impl Into<String>, year: impl Into<String>, value: f64) -> Self {
        Self { commodity: commodity.into(), year: year.into(), value }
    }

    /// True when the row has a commodity and belongs to `year`.
    #[inline]
    pub fn in_year(&self, year: &str) -> bool {
        !self.commodity.is_empty() && self.year == year
    }
}

/// Lenient numeric parse: surrounding whitespace is ignored, anything else that is
/// not a finite decimal number becomes 0. `inf`/`Infinity`, hex (`0x10`) and other
/// non-decimal spellings are rejected on purpose, so one odd cell can never produce
/// an unbounded stalk or leaf count.
pub fn parse_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[derive(Deserialize)]
struct RawRow {
    #[serde(rename = "Commodity_Description", default)]
    commodity: String,
    #[serde(rename = "Calendar_Year", default)]
    year: String,
    #[serde(rename = "Value", default)]
    value: String,
    #[serde(rename = "Unit_Description", default)]
    unit: String,
}

impl RawRow {
    fn into_parts(self) -> (DataRow, String) {
        let row = DataRow { value: parse_value(&self.value), commodity: self.commodity, year: self.year };
        (row, self.unit)
    }
}

/// A named table of rows (e.g. "exports" or "yield").
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub name: String,
    pub rows: Vec<DataRow>,
    /// First non-empty `Unit_Description`, e.g. `(MT/HA)`.
    pub unit: Option<String>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, rows: Vec<DataRow>) -> Self {
        Self { name: name.into(), rows, unit: None }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Parse CSV text from any reader. The header row must name the three columns.
    pub fn from_reader<R: io::Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let name = name.into();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in [COMMODITY_COLUMN, YEAR_COLUMN, VALUE_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(HarvestError::MissingColumn { source_name: name, column });
            }
        }

        let mut rows = Vec::new();
        let mut unnamed = 0usize;
        let mut unit: Option<String> = None;
        let mut mixed_units = false;
        for rec in rdr.deserialize::<RawRow>() {
            let (row, row_unit) = rec?.into_parts();
            if row.commodity.is_empty() {
                unnamed += 1;
            }
            let row_unit = row_unit.trim();
            if !row_unit.is_empty() {
                if let Some(u) = unit.as_deref() {
                    mixed_units |= u != row_unit;
                } else {
                    unit = Some(row_unit.to_string());
                }
            }
            rows.push(row);
        }
        if unnamed > 0 {
            warn!(dataset = %name, rows = unnamed, "rows without a commodity name will be ignored");
        }
        if mixed_units {
            warn!(dataset = %name, unit = ?unit, "rows use more than one unit; labelling with the first");
        }
        debug!(dataset = %name, rows = rows.len(), unit = ?unit, "loaded CSV");
        Ok(Self { name, rows, unit })
    }

    /// Open and parse a CSV file; the dataset is named after the file stem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|source| HarvestError::Io { path: path.to_path_buf(), source })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("data")
            .to_string();
        Self::from_reader(name, io::BufReader::new(file))
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Rows with a commodity name belonging to `year`.
    pub fn rows_in_year<'a>(&'a self, year: &'a str) -> impl Iterator<Item = &'a DataRow> + 'a {
        self.rows.iter().filter(move |r| r.in_year(year))
    }
}

/// Load the exports and yield tables side by side. Both loads run to completion;
/// the first failure (exports checked first) is returned.
pub fn load_pair(exports: &Path, yields: &Path) -> Result<(Dataset, Dataset)> {
    let (e, y) = std::thread::scope(|s| {
        let he = s.spawn(|| Dataset::from_path(exports));
        let hy = s.spawn(|| Dataset::from_path(yields));
        (join(he), join(hy))
    });
    Ok((e?, y?))
}

fn join<T>(handle: std::thread::ScopedJoinHandle<'_, T>) -> T {
    handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

// File: crates/harvest-core/src/lib.rs
// Summary: Core library entry point; exports the data, scene-building and SVG API.

pub mod aggregate;
pub mod data;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod target;
pub mod theme;
pub mod types;

pub use aggregate::{aggregate_year, YearAggregate, YieldAggregation};
pub use data::{load_pair, DataRow, Dataset};
pub use error::{HarvestError, Result};
pub use interaction::{Effect, InteractionEvent, Tooltip, UiState};
pub use layout::{layout_leaves, LeafGlyph, LeafUnit, Side};
pub use scale::ExportScale;
pub use scene::{ChartBuilder, Scene, SceneLayout, StalkScene};
pub use svg::{render_svg, render_to_svg};
pub use target::RenderTarget;
pub use theme::{Color, Legend, Theme};
pub use types::{ChartOptions, Insets};

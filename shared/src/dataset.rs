use serde::Serialize;

use crate::projection::{GeoBounds, GeoProjector, ProjectionMode};
use crate::registry::locale_cmp;
use crate::table::{Row, parse_table};

/// Parsed volcano table plus what is derived from it once at load time.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    bounds: Option<GeoBounds>,
    categories: Vec<String>,
}

impl Dataset {
    pub fn from_text(text: &str) -> Self {
        Self::from_rows(parse_table(text))
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        let bounds = GeoBounds::from_rows(&rows);
        let categories = discover_categories(&rows);
        Self {
            rows,
            bounds,
            categories,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        self.bounds
    }

    /// Distinct non-empty types in collation order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Projector for the whole session: data-fit when bounds exist, else the
    /// fixed equirectangular fallback.
    pub fn projector(&self) -> GeoProjector {
        GeoProjector::new(self.bounds)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rows: self.rows.len(),
            categories: self.categories.len(),
            projection: self.projector().mode(),
            bounds: self.bounds,
        }
    }
}

/// Distinct non-empty `Type` values, sorted like the dropdown shows them.
pub fn discover_categories(rows: &[Row]) -> Vec<String> {
    let mut categories: Vec<String> = rows
        .iter()
        .map(|row| row.text("Type"))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    categories.sort_by(|a, b| locale_cmp(a, b));
    categories.dedup();
    categories
}

/// Load-time facts about a dataset, for logs and the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub categories: usize,
    pub projection: ProjectionMode,
    pub bounds: Option<GeoBounds>,
}

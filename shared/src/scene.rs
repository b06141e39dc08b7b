//! One render pass: rows in, projected and encoded markers out.

use crate::colors::Rgba;
use crate::encoding::{marker_color, marker_size};
use crate::glyph::{GlyphKind, GlyphRenderer};
use crate::projection::{GeoProjector, MapRect};
use crate::registry::GlyphRegistry;
use crate::table::Row;

/// Placeholder for empty display fields on the map.
pub const UNKNOWN: &str = "Unknown";
/// Dropdown label and value for "no filter".
pub const ALL_LABEL: &str = "All";

/// Which categories the composer visits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelection {
    #[default]
    All,
    Category(String),
}

impl FilterSelection {
    /// Filter from a URL parameter. Only known categories select anything.
    pub fn from_param(param: Option<&str>, categories: &[String]) -> Self {
        match param {
            Some(value) if categories.iter().any(|c| c == value) => {
                Self::Category(value.to_string())
            }
            _ => Self::All,
        }
    }

    /// Filter from a dropdown value; empty and "All" clear the filter.
    pub fn from_choice(value: &str) -> Self {
        if value.is_empty() || value == ALL_LABEL {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    /// Value to show as selected in the dropdown.
    pub fn choice(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Category(c) => c,
        }
    }

    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }
}

/// A marker drawn during the last pass, kept for hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPoint {
    pub x: f64,
    pub y: f64,
    pub lat: f64,
    pub lon: f64,
    pub size: f64,
    pub name: String,
    pub country: String,
    pub location: String,
    /// Meters; 0 when the row has none.
    pub elevation: f64,
    pub category: String,
    pub status: String,
    pub eruption: String,
    pub glyph: GlyphKind,
    pub color: Rgba,
}

fn display(row: &Row, field: &str) -> String {
    let value = row.text(field);
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Project, filter, encode and draw every row, returning the points drawn in
/// order. The filter is read once up front; the registry only grows when a
/// category has no glyph yet.
pub fn compose_scene<R: GlyphRenderer + ?Sized>(
    rows: &[Row],
    projector: &GeoProjector,
    rect: &MapRect,
    filter: &FilterSelection,
    registry: &mut GlyphRegistry,
    renderer: &mut R,
) -> Vec<PlacedPoint> {
    let filter = filter.clone();
    let mut points = Vec::new();

    for row in rows {
        let lat = row.number("Latitude");
        let lon = row.number("Longitude");
        if lat.is_nan() || lon.is_nan() {
            continue;
        }

        let category = display(row, "Type");
        if !filter.admits(&category) {
            continue;
        }

        let (x, y) = projector.project(lat, lon, rect);
        if !rect.contains(x, y) {
            continue;
        }

        let elevation = row.number("Elevation (m)");
        let status = display(row, "Status");
        let eruption = display(row, "Last Known Eruption");
        let size = marker_size(elevation);
        let color = marker_color(&status, &eruption);
        let glyph = registry.glyph_for(&category);
        renderer.draw_glyph((x, y), size, glyph, color);

        points.push(PlacedPoint {
            x,
            y,
            lat,
            lon,
            size,
            name: display(row, "Volcano Name"),
            country: display(row, "Country"),
            location: display(row, "Location"),
            elevation: if elevation.is_nan() { 0.0 } else { elevation },
            category,
            status,
            eruption,
            glyph,
            color,
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{Paint, Point};
    use crate::projection::GeoBounds;

    #[derive(Default)]
    struct Tally {
        shapes: usize,
    }

    impl GlyphRenderer for Tally {
        fn ellipse(&mut self, _c: Point, _rx: f64, _ry: f64, _p: Paint, _color: Rgba) {
            self.shapes += 1;
        }
        fn polygon(&mut self, _pts: &[Point], _p: Paint, _color: Rgba) {
            self.shapes += 1;
        }
        fn polyline(&mut self, _pts: &[Point], _w: f64, _color: Rgba) {
            self.shapes += 1;
        }
        fn pie(&mut self, _c: Point, _r: f64, _s: f64, _e: f64, _p: Paint, _color: Rgba) {
            self.shapes += 1;
        }
        fn rounded_rect(&mut self, _c: Point, _w: f64, _h: f64, _k: f64, _p: Paint, _color: Rgba) {
            self.shapes += 1;
        }
    }

    fn row(name: &str, lat: &str, lon: &str, kind: &str) -> Row {
        Row::from_pairs([
            ("Volcano Name", name),
            ("Latitude", lat),
            ("Longitude", lon),
            ("Type", kind),
            ("Elevation (m)", "3000"),
            ("Status", "Historical"),
            ("Last Known Eruption", "D1"),
        ])
    }

    fn fixture() -> (Vec<Row>, GeoProjector, MapRect) {
        let rows = vec![
            row("Etna", "10", "-20", "Stratovolcano"),
            row("Kilauea", "-10", "20", "Shield volcano"),
            row("Bad", "north", "5", "Caldera"),
            row("Mid", "0", "0", ""),
        ];
        let bounds = GeoBounds::from_rows(&rows);
        let projector = GeoProjector::with_calibration(bounds, 0.0, 0.0);
        (rows, projector, MapRect::new(0.0, 0.0, 100.0, 50.0))
    }

    #[test]
    fn skips_rows_without_coordinates() {
        let (rows, projector, rect) = fixture();
        let mut registry = GlyphRegistry::from_categories(["Stratovolcano", "Shield volcano"]);
        let mut tally = Tally::default();
        let points = compose_scene(
            &rows,
            &projector,
            &rect,
            &FilterSelection::All,
            &mut registry,
            &mut tally,
        );
        let names: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Etna", "Kilauea", "Mid"]);
        assert!(tally.shapes >= 3);
    }

    #[test]
    fn empty_fields_read_unknown_and_get_lazy_glyph() {
        let (rows, projector, rect) = fixture();
        let mut registry = GlyphRegistry::from_categories(["Stratovolcano", "Shield volcano"]);
        let points = compose_scene(
            &rows,
            &projector,
            &rect,
            &FilterSelection::All,
            &mut registry,
            &mut Tally::default(),
        );
        let mid = &points[2];
        assert_eq!(mid.category, UNKNOWN);
        assert_eq!(mid.country, UNKNOWN);
        assert_eq!(mid.glyph, GlyphKind::nth(2));
        assert_eq!(registry.get(UNKNOWN), Some(GlyphKind::nth(2)));
    }

    #[test]
    fn filter_limits_visited_rows() {
        let (rows, projector, rect) = fixture();
        let mut registry = GlyphRegistry::from_categories(["Stratovolcano", "Shield volcano"]);
        let filter = FilterSelection::Category("Shield volcano".into());
        let points = compose_scene(
            &rows,
            &projector,
            &rect,
            &filter,
            &mut registry,
            &mut Tally::default(),
        );
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "Kilauea");
        assert_eq!((points[0].x, points[0].y), (100.0, 50.0));
        assert_eq!(points[0].color, Rgba::rgba(230, 40, 20, 255));
    }

    #[test]
    fn points_outside_rect_are_dropped() {
        let (rows, _, rect) = fixture();
        let projector = GeoProjector::with_calibration(GeoBounds::from_rows(&rows), 0.5, 0.0);
        let mut registry = GlyphRegistry::new();
        let points = compose_scene(
            &rows,
            &projector,
            &rect,
            &FilterSelection::All,
            &mut registry,
            &mut Tally::default(),
        );
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| rect.contains(p.x, p.y)));
    }

    #[test]
    fn repeated_passes_are_identical() {
        let (rows, projector, rect) = fixture();
        let mut registry = GlyphRegistry::from_categories(["Stratovolcano", "Shield volcano"]);
        let first = compose_scene(
            &rows,
            &projector,
            &rect,
            &FilterSelection::All,
            &mut registry,
            &mut Tally::default(),
        );
        let second = compose_scene(
            &rows,
            &projector,
            &rect,
            &FilterSelection::All,
            &mut registry,
            &mut Tally::default(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn missing_elevation_stored_as_zero() {
        let rows = vec![Row::from_pairs([("Latitude", "0"), ("Longitude", "0")])];
        let projector = GeoProjector::with_calibration(None, 0.0, 0.0);
        let rect = MapRect::new(0.0, 0.0, 360.0, 180.0);
        let points = compose_scene(
            &rows,
            &projector,
            &rect,
            &FilterSelection::All,
            &mut GlyphRegistry::new(),
            &mut Tally::default(),
        );
        assert_eq!(points[0].elevation, 0.0);
        assert_eq!(points[0].size, 4.0);
        assert_eq!(points[0].color.a, 220);
    }

    #[test]
    fn filter_param_must_name_known_category() {
        let categories = vec!["Caldera".to_string(), "Maar".to_string()];
        assert_eq!(
            FilterSelection::from_param(Some("Maar"), &categories),
            FilterSelection::Category("Maar".into())
        );
        assert_eq!(
            FilterSelection::from_param(Some("Lava dome"), &categories),
            FilterSelection::All
        );
        assert_eq!(FilterSelection::from_param(None, &categories), FilterSelection::All);
        assert_eq!(FilterSelection::from_choice(""), FilterSelection::All);
        assert_eq!(FilterSelection::from_choice("All"), FilterSelection::All);
        assert_eq!(FilterSelection::from_choice("Maar").choice(), "Maar");
    }
}

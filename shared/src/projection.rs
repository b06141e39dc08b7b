use serde::Serialize;

use crate::table::Row;

/// Fraction of the map width added to every projected x (negative shifts left).
pub const CAL_X: f64 = -0.03;
/// Fraction of the map height added to every projected y (positive shifts down).
pub const CAL_Y: f64 = 0.12;

pub const GRID_STEP_DEG: i32 = 30;

/// Screen-space rectangle the world map is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl MapRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Edges count as inside; anything past them does not.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Observed latitude/longitude extent of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Bounds over every finite latitude and longitude. Latitudes and longitudes are
    /// collected independently; `None` unless both sets are non-empty.
    pub fn from_rows(rows: &[Row]) -> Option<Self> {
        let mut lat = Extent::default();
        let mut lon = Extent::default();
        for row in rows {
            lat.push(row.number("Latitude"));
            lon.push(row.number("Longitude"));
        }
        let (min_lat, max_lat) = lat.finish()?;
        let (min_lon, max_lon) = lon.finish()?;
        Some(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }
}

#[derive(Default)]
struct Extent {
    range: Option<(f64, f64)>,
}

impl Extent {
    fn push(&mut self, v: f64) {
        if !v.is_finite() {
            return;
        }
        self.range = Some(match self.range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }

    fn finish(self) -> Option<(f64, f64)> {
        self.range
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Stretch the observed lat/lon range to fill the map rectangle.
    DataFit,
    /// Plain equirectangular over the whole globe.
    Equirectangular,
}

/// Latitude/longitude to screen mapping with a fixed post-projection calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoProjector {
    bounds: Option<GeoBounds>,
    cal_x: f64,
    cal_y: f64,
}

impl Default for GeoProjector {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GeoProjector {
    pub fn new(bounds: Option<GeoBounds>) -> Self {
        Self::with_calibration(bounds, CAL_X, CAL_Y)
    }

    pub fn with_calibration(bounds: Option<GeoBounds>, cal_x: f64, cal_y: f64) -> Self {
        Self {
            bounds,
            cal_x,
            cal_y,
        }
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        self.bounds
    }

    pub fn mode(&self) -> ProjectionMode {
        if self.bounds.is_some() {
            ProjectionMode::DataFit
        } else {
            ProjectionMode::Equirectangular
        }
    }

    /// Project `(lat, lon)` into `rect`. Results are not clamped to the rectangle.
    ///
    /// An axis whose observed range has zero width (a single volcano, or all on
    /// one parallel or meridian) is projected equirectangularly instead.
    pub fn project(&self, lat: f64, lon: f64, rect: &MapRect) -> (f64, f64) {
        let globe_x = rect.x + ((lon + 180.0) / 360.0) * rect.w;
        let globe_y = rect.y + ((90.0 - lat) / 180.0) * rect.h;
        let (x, y) = match self.bounds {
            Some(b) => (
                lerp_range(lon, b.min_lon, b.max_lon, rect.x, rect.right()).unwrap_or(globe_x),
                lerp_range(lat, b.max_lat, b.min_lat, rect.y, rect.bottom()).unwrap_or(globe_y),
            ),
            None => (globe_x, globe_y),
        };
        (x + rect.w * self.cal_x, y + rect.h * self.cal_y)
    }
}

/// Map `v` from `[a, b]` onto `[lo, hi]`; `None` for a zero-width source range.
fn lerp_range(v: f64, a: f64, b: f64, lo: f64, hi: f64) -> Option<f64> {
    let span = b - a;
    if span == 0.0 || !span.is_finite() {
        return None;
    }
    Some(lo + (v - a) / span * (hi - lo))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLineKind {
    Meridian,
    Parallel,
    Equator,
}

/// One projected graticule line with its label anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub kind: GridLineKind,
    pub degrees: i32,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub label: String,
    pub label_at: (f64, f64),
}

/// Meridians and parallels every 30 degrees over the whole globe, followed by the
/// highlighted equator. Uses the same projection as the data points.
pub fn grid_lines(projector: &GeoProjector, rect: &MapRect) -> Vec<GridLine> {
    let mut lines = Vec::new();

    for lon in (-180..=180).step_by(GRID_STEP_DEG as usize) {
        let from = projector.project(90.0, lon as f64, rect);
        let to = projector.project(-90.0, lon as f64, rect);
        lines.push(GridLine {
            kind: GridLineKind::Meridian,
            degrees: lon,
            from,
            to,
            label: format!("{lon}°"),
            label_at: (from.0, rect.bottom() + 8.0),
        });
    }

    for lat in (-90..=90).step_by(GRID_STEP_DEG as usize) {
        let from = projector.project(lat as f64, -180.0, rect);
        let to = projector.project(lat as f64, 180.0, rect);
        lines.push(GridLine {
            kind: GridLineKind::Parallel,
            degrees: lat,
            from,
            to,
            label: format!("{lat}°"),
            label_at: (rect.x - 10.0, from.1),
        });
    }

    let from = projector.project(0.0, -180.0, rect);
    let to = projector.project(0.0, 180.0, rect);
    lines.push(GridLine {
        kind: GridLineKind::Equator,
        degrees: 0,
        from,
        to,
        label: String::new(),
        label_at: from,
    });

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    fn test_bounds() -> GeoBounds {
        GeoBounds {
            min_lat: -10.0,
            max_lat: 10.0,
            min_lon: -20.0,
            max_lon: 20.0,
        }
    }

    #[test]
    fn data_fit_corners_land_on_calibrated_rect_corners() {
        let rect = MapRect::new(0.0, 0.0, 100.0, 50.0);
        let p = GeoProjector::new(Some(test_bounds()));
        let (x, y) = p.project(10.0, -20.0, &rect);
        assert_close(x, 100.0 * CAL_X);
        assert_close(y, 50.0 * CAL_Y);
        let (x, y) = p.project(-10.0, 20.0, &rect);
        assert_close(x, 100.0 + 100.0 * CAL_X);
        assert_close(y, 50.0 + 50.0 * CAL_Y);
    }

    #[test]
    fn equirectangular_fallback_without_bounds() {
        let rect = MapRect::new(10.0, 20.0, 360.0, 180.0);
        let p = GeoProjector::with_calibration(None, 0.0, 0.0);
        assert_eq!(p.mode(), ProjectionMode::Equirectangular);
        let (x, y) = p.project(0.0, 0.0, &rect);
        assert_close(x, 190.0);
        assert_close(y, 110.0);
        let (x, y) = p.project(90.0, -180.0, &rect);
        assert_close(x, 10.0);
        assert_close(y, 20.0);
    }

    #[test]
    fn calibration_is_fraction_of_rect() {
        let rect = MapRect::new(0.0, 0.0, 200.0, 100.0);
        let p = GeoProjector::with_calibration(None, 0.1, -0.2);
        let (x, y) = p.project(0.0, 0.0, &rect);
        assert_close(x, 100.0 + 20.0);
        assert_close(y, 50.0 - 20.0);
    }

    #[test]
    fn projection_is_not_clamped() {
        let rect = MapRect::new(0.0, 0.0, 100.0, 50.0);
        let p = GeoProjector::with_calibration(Some(test_bounds()), 0.0, 0.0);
        let (x, y) = p.project(20.0, 40.0, &rect);
        assert_close(x, 150.0);
        assert_close(y, -25.0);
        assert!(!rect.contains(x, y));
    }

    #[test]
    fn rect_edges_count_as_inside() {
        let rect = MapRect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(110.0, 70.0));
        assert!(rect.contains(60.0, 70.0));
        assert!(!rect.contains(110.001, 40.0));
        assert!(!rect.contains(50.0, 19.999));
        assert!(!rect.contains(f64::NAN, 40.0));
    }

    #[test]
    fn zero_width_axis_projects_equirectangularly() {
        let rect = MapRect::new(0.0, 0.0, 360.0, 180.0);
        let single = GeoBounds {
            min_lat: 37.7,
            max_lat: 37.7,
            min_lon: 15.0,
            max_lon: 15.0,
        };
        let p = GeoProjector::with_calibration(Some(single), 0.0, 0.0);
        let (x, y) = p.project(37.7, 15.0, &rect);
        assert_close(x, 195.0);
        assert_close(y, 52.3);
        assert!(rect.contains(x, y));

        // Only the degenerate axis falls back.
        let one_parallel = GeoBounds {
            min_lat: 10.0,
            max_lat: 10.0,
            min_lon: -20.0,
            max_lon: 20.0,
        };
        let p = GeoProjector::with_calibration(Some(one_parallel), 0.0, 0.0);
        let (x, y) = p.project(10.0, 20.0, &rect);
        assert_close(x, 360.0);
        assert_close(y, 80.0);
    }

    #[test]
    fn single_volcano_grid_is_finite() {
        let rows = vec![Row::from_pairs([("Latitude", "37.7"), ("Longitude", "15")])];
        let p = GeoProjector::new(GeoBounds::from_rows(&rows));
        let rect = MapRect::new(10.0, 10.0, 400.0, 200.0);
        for line in grid_lines(&p, &rect) {
            assert!(line.from.0.is_finite() && line.from.1.is_finite(), "{}", line.label);
            assert!(line.to.0.is_finite() && line.to.1.is_finite(), "{}", line.label);
        }
    }

    #[test]
    fn bounds_skip_non_finite_values() {
        let rows = vec![
            Row::from_pairs([("Latitude", "10,5"), ("Longitude", "-20")]),
            Row::from_pairs([("Latitude", "abc"), ("Longitude", "30")]),
            Row::from_pairs([("Latitude", "-4"), ("Longitude", "")]),
        ];
        let b = GeoBounds::from_rows(&rows).expect("bounds");
        assert_close(b.min_lat, -4.0);
        assert_close(b.max_lat, 10.5);
        assert_close(b.min_lon, -20.0);
        assert_close(b.max_lon, 30.0);
    }

    #[test]
    fn bounds_absent_without_coordinates() {
        let rows = vec![Row::from_pairs([("Latitude", "1"), ("Longitude", "x")])];
        assert_eq!(GeoBounds::from_rows(&rows), None);
        assert_eq!(GeoBounds::from_rows(&[]), None);
    }

    #[test]
    fn grid_covers_globe_and_tracks_projection() {
        let rect = MapRect::new(0.0, 0.0, 360.0, 180.0);
        let p = GeoProjector::new(None);
        let lines = grid_lines(&p, &rect);
        let meridians: Vec<_> = lines
            .iter()
            .filter(|l| l.kind == GridLineKind::Meridian)
            .collect();
        let parallels: Vec<_> = lines
            .iter()
            .filter(|l| l.kind == GridLineKind::Parallel)
            .collect();
        assert_eq!(meridians.len(), 13);
        assert_eq!(parallels.len(), 7);
        assert_eq!(lines.last().map(|l| l.kind), Some(GridLineKind::Equator));
        assert_eq!(meridians[0].label, "-180°");
        assert_eq!(parallels[6].label, "90°");

        let equator = lines.last().expect("equator");
        let point = p.project(0.0, 45.0, &rect);
        assert_close(equator.from.1, point.1);
        assert_close(meridians[0].label_at.1, rect.bottom() + 8.0);
        assert_close(parallels[0].label_at.0, rect.x - 10.0);
    }
}

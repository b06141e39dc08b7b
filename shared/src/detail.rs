//! Single-volcano detail page model, read from URL query pairs.

use crate::encoding::elevation_fraction;
use crate::scene::PlacedPoint;

/// Shown for absent or empty fields.
pub const PLACEHOLDER: &str = "—";

/// Query keys the detail page understands, in display order.
pub const QUERY_KEYS: [&str; 9] = [
    "id", "name", "country", "type", "status", "eruption", "elev", "lat", "lon",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolcanoDetail {
    pub id: String,
    pub name: String,
    pub country: String,
    pub category: String,
    pub status: String,
    pub eruption: String,
    pub elev: String,
    pub lat: String,
    pub lon: String,
}

impl Default for VolcanoDetail {
    fn default() -> Self {
        let p = || PLACEHOLDER.to_string();
        Self {
            id: p(),
            name: p(),
            country: p(),
            category: p(),
            status: p(),
            eruption: p(),
            elev: p(),
            lat: p(),
            lon: p(),
        }
    }
}

impl VolcanoDetail {
    /// Build from decoded `key=value` pairs. Unknown keys are ignored; for repeated
    /// keys the first occurrence wins.
    pub fn from_query<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut detail = Self::default();
        let mut seen: Vec<&str> = Vec::new();
        for (key, value) in pairs {
            if seen.contains(&key) {
                continue;
            }
            let slot = match key {
                "id" => &mut detail.id,
                "name" => &mut detail.name,
                "country" => &mut detail.country,
                "type" => &mut detail.category,
                "status" => &mut detail.status,
                "eruption" => &mut detail.eruption,
                "elev" => &mut detail.elev,
                "lat" => &mut detail.lat,
                "lon" => &mut detail.lon,
                _ => continue,
            };
            seen.push(key);
            if !value.is_empty() {
                *slot = value.to_string();
            }
        }
        detail
    }

    /// `"12.35°, -4.10°"`, or the placeholder unless both coordinates are numbers.
    pub fn coordinates(&self) -> String {
        match (parse_query_number(&self.lat), parse_query_number(&self.lon)) {
            (Some(lat), Some(lon)) => format!("{lat:.2}°, {lon:.2}°"),
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// Elevation bar width in whole percent, on the map's 0..6000 m scale.
    pub fn elevation_percent(&self) -> u32 {
        parse_query_number(&self.elev)
            .map(|e| (elevation_fraction(e) * 100.0).round() as u32)
            .unwrap_or(0)
    }

    pub fn elevation_label(&self) -> String {
        match parse_query_number(&self.elev) {
            Some(e) => format!("Elevation: {} m", format_number(e)),
            None => format!("Elevation: {PLACEHOLDER} m"),
        }
    }
}

/// Query pairs describing a placed marker, for linking to its detail page.
/// Values are raw; the caller URL-encodes them.
pub fn query_pairs(point: &PlacedPoint) -> Vec<(&'static str, String)> {
    vec![
        ("name", point.name.clone()),
        ("country", point.country.clone()),
        ("type", point.category.clone()),
        ("status", point.status.clone()),
        ("eruption", point.eruption.clone()),
        ("elev", format_number(point.elevation)),
        ("lat", format_number(point.lat)),
        ("lon", format_number(point.lon)),
    ]
}

/// Finite number from a query value; surrounding whitespace is allowed.
fn parse_query_number(raw: &str) -> Option<f64> {
    if raw == PLACEHOLDER {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Shortest plain rendering of a number: `3350`, `12.5`, never `-0`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

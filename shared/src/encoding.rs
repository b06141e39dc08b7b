//! Attribute to visual-property rules for volcano markers.

use crate::colors::{Rgba, lerp_rgb};

pub const MIN_MARKER_SIZE: f64 = 3.0;
pub const MAX_MARKER_SIZE: f64 = 12.0;
/// Size used when a row has no usable elevation.
pub const FALLBACK_MARKER_SIZE: f64 = 4.0;
/// Elevation (meters, absolute value) mapped to the largest marker and the full detail bar.
pub const ELEVATION_SCALE_M: f64 = 6000.0;

pub const STATUS_YOUNG: Rgba = Rgba::rgb(255, 210, 0);
pub const STATUS_OLD: Rgba = Rgba::rgb(230, 40, 20);

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`, unclamped.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Marker size from elevation in meters: `|elev|` over 0..6000 m onto 3..12 px.
pub fn marker_size(elevation: f64) -> f64 {
    if elevation.is_nan() {
        return FALLBACK_MARKER_SIZE;
    }
    remap(
        elevation.abs(),
        0.0,
        ELEVATION_SCALE_M,
        MIN_MARKER_SIZE,
        MAX_MARKER_SIZE,
    )
    .clamp(MIN_MARKER_SIZE, MAX_MARKER_SIZE)
}

/// Fraction of the elevation scale, clamped to `[0, 1]`. `NaN` reads as 0.
pub fn elevation_fraction(elevation: f64) -> f64 {
    if !elevation.is_finite() {
        return 0.0;
    }
    (elevation.abs() / ELEVATION_SCALE_M).clamp(0.0, 1.0)
}

/// Position on the yellow to red ramp for a status text. First match wins.
pub fn status_ramp_position(status: &str) -> f64 {
    let s = status.to_lowercase();
    let t = if s.contains("pleistocene") {
        0.10
    } else if s.contains("holocene") {
        0.55
    } else if s.contains("historical") {
        1.00
    } else {
        0.35
    };
    f64::clamp(t, 0.0, 1.0)
}

pub fn status_color(status: &str) -> Rgba {
    lerp_rgb(STATUS_YOUNG, STATUS_OLD, status_ramp_position(status))
}

/// Opacity from the eruption-recency code. Case-sensitive, first match wins.
pub fn eruption_alpha(eruption: &str) -> u8 {
    if eruption.contains("D1") {
        255
    } else if eruption.contains("D2") {
        240
    } else if eruption.contains('U') {
        220
    } else {
        200
    }
}

/// Final marker color: status hue with eruption-recency alpha.
pub fn marker_color(status: &str, eruption: &str) -> Rgba {
    status_color(status).with_alpha(eruption_alpha(eruption))
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

    #[test]
    fn size_follows_absolute_elevation() {
        assert_close(marker_size(0.0), 3.0);
        assert_close(marker_size(3000.0), 7.5);
        assert_close(marker_size(-3000.0), 7.5);
        assert_close(marker_size(6000.0), 12.0);
        assert_close(marker_size(8848.0), 12.0);
    }

    #[test]
    fn size_without_elevation_is_fixed() {
        assert_close(marker_size(f64::NAN), 4.0);
    }

    #[test]
    fn status_priority_order() {
        assert_close(status_ramp_position("Pleistocene"), 0.10);
        assert_close(status_ramp_position("HOLOCENE"), 0.55);
        assert_close(status_ramp_position("Historical"), 1.00);
        assert_close(status_ramp_position("Radiocarbon"), 0.35);
        assert_close(status_ramp_position("Holocene?, Historical"), 0.55);
        assert_close(status_ramp_position("Pleistocene-Fumarolic, Holocene"), 0.10);
    }

    #[test]
    fn status_colors_hit_ramp_ends() {
        assert_eq!(status_color("Historical"), STATUS_OLD);
        assert_eq!(status_color("pleistocene"), Rgba::rgb(253, 193, 2));
    }

    #[test]
    fn alpha_prefers_d1_over_d2() {
        assert_eq!(eruption_alpha("D1 D2"), 255);
        assert_eq!(eruption_alpha("D2"), 240);
        assert_eq!(eruption_alpha("U"), 220);
        assert_eq!(eruption_alpha("Unknown"), 220);
        assert_eq!(eruption_alpha("D7"), 200);
        assert_eq!(eruption_alpha("d1"), 200);
    }

    #[test]
    fn marker_color_combines_hue_and_alpha() {
        let c = marker_color("Historical", "D2");
        assert_eq!(c, Rgba::rgba(230, 40, 20, 240));
    }

    #[test]
    fn elevation_fraction_clamps() {
        assert_close(elevation_fraction(3000.0), 0.5);
        assert_close(elevation_fraction(-9000.0), 1.0);
        assert_close(elevation_fraction(f64::NAN), 0.0);
    }
}

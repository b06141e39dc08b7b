use crate::projection::MapRect;

/// Width reserved for the sidebar, including its margin.
pub const SIDEBAR_W: f64 = 320.0 + 32.0;
pub const HEADER_H: f64 = 56.0;
pub const MIN_CANVAS_SIDE: f64 = 320.0;
/// Share of the canvas the map image may occupy along either axis.
const MAP_FILL: f64 = 0.9;

/// Canvas size left over next to the sidebar and below the header.
pub fn canvas_size(window_w: f64, window_h: f64) -> (f64, f64) {
    (
        (window_w - SIDEBAR_W - 32.0).max(MIN_CANVAS_SIDE),
        (window_h - HEADER_H - 24.0).max(MIN_CANVAS_SIDE),
    )
}

/// Largest rectangle with the image's aspect ratio that fits in 90% of the
/// canvas, centered. Unknown image sizes are treated as 2:1.
pub fn fit_map_rect(canvas_w: f64, canvas_h: f64, image_w: f64, image_h: f64) -> MapRect {
    let aspect = if image_w > 0.0 && image_h > 0.0 {
        image_h / image_w
    } else {
        0.5
    };

    let mut map_w = canvas_w * MAP_FILL;
    let mut map_h = aspect * map_w;
    if map_h > canvas_h * MAP_FILL {
        map_h = canvas_h * MAP_FILL;
        map_w = map_h / aspect;
    }

    MapRect::new(
        (canvas_w - map_w) / 2.0,
        (canvas_h - map_h) / 2.0,
        map_w,
        map_h,
    )
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
    fn canvas_size_subtracts_chrome_with_floor() {
        assert_eq!(canvas_size(1600.0, 900.0), (1216.0, 820.0));
        assert_eq!(canvas_size(500.0, 300.0), (320.0, 320.0));
    }

    #[test]
    fn wide_canvas_is_height_limited() {
        let rect = fit_map_rect(2000.0, 500.0, 2000.0, 1000.0);
        assert_close(rect.h, 450.0);
        assert_close(rect.w, 900.0);
        assert_close(rect.x, 550.0);
        assert_close(rect.y, 25.0);
    }

    #[test]
    fn tall_canvas_is_width_limited() {
        let rect = fit_map_rect(1000.0, 1000.0, 2000.0, 1000.0);
        assert_close(rect.w, 900.0);
        assert_close(rect.h, 450.0);
        assert_close(rect.x, 50.0);
        assert_close(rect.y, 275.0);
    }

    #[test]
    fn missing_image_size_uses_two_to_one() {
        let rect = fit_map_rect(1000.0, 1000.0, 0.0, 0.0);
        assert_close(rect.h, rect.w / 2.0);
    }
}

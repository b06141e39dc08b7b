use crate::scene::PlacedPoint;

/// Extra pick radius around a marker, in pixels.
pub const HOVER_SLACK: f64 = 4.0;
pub const TOOLTIP_OFFSET: f64 = 16.0;
const TOOLTIP_PAD: f64 = 5.0;
/// Assumed tooltip side before the element has been measured.
pub const TOOLTIP_FALLBACK_SIZE: f64 = 50.0;

/// First point (in drawing order) within `size + 4` px of the cursor.
pub fn find_hover(cursor: (f64, f64), points: &[PlacedPoint]) -> Option<&PlacedPoint> {
    points.iter().find(|p| {
        let dx = p.x - cursor.0;
        let dy = p.y - cursor.1;
        (dx * dx + dy * dy).sqrt() <= p.size + HOVER_SLACK
    })
}

/// Top-left corner for a `tip_w` x `tip_h` tooltip next to the cursor, moved to
/// the other side of the cursor on any axis where it would leave the viewport.
/// Zero sizes mean "not measured yet".
pub fn tooltip_position(
    cursor: (f64, f64),
    tip_w: f64,
    tip_h: f64,
    viewport_w: f64,
    viewport_h: f64,
) -> (f64, f64) {
    let w = if tip_w > 0.0 { tip_w } else { TOOLTIP_FALLBACK_SIZE };
    let h = if tip_h > 0.0 { tip_h } else { TOOLTIP_FALLBACK_SIZE };

    let mut x = cursor.0 + TOOLTIP_OFFSET;
    let mut y = cursor.1 + TOOLTIP_OFFSET;
    if x + w + TOOLTIP_PAD > viewport_w {
        x = cursor.0 - w - TOOLTIP_PAD;
    }
    if y + h + TOOLTIP_PAD > viewport_h {
        y = cursor.1 - h - TOOLTIP_PAD;
    }
    (x, y)
}

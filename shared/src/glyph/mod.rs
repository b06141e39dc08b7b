//! Marker shapes. Every glyph is described once, as unit-radius primitives in a
//! y-down frame, and any [`GlyphRenderer`] backend draws from that description.

pub mod svg;

use std::f64::consts::{FRAC_PI_2, FRAC_PI_8, PI, TAU};

use crate::colors::Rgba;

pub type Point = (f64, f64);

/// Glyph radius relative to marker size.
pub const GLYPH_RADIUS_FACTOR: f64 = 0.9;
/// Outline weight of filled shapes.
pub const OUTLINE_WEIGHT: f64 = 1.2;

const CRESCENT_SHIFT: f64 = 0.6;
const ARC_SEGMENTS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GlyphKind {
    Circle,
    Ring,
    Target,
    Bullseye,
    PieN,
    PieE,
    PieS,
    PieW,
    Halo,
    Dot,
    Triangle,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Square,
    RoundedSquare,
    Diamond,
    Rect,
    RectTall,
    Oval,
    Capsule,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
    Cross,
    X,
    Plus,
    Asterisk,
    Star5,
    Star6,
    Star8,
    ChevronUp,
    ChevronDown,
    ChevronLeft,
    ChevronRight,
    CaretUp,
    CaretDown,
    CaretLeft,
    CaretRight,
    Parallelogram,
    TrapezoidUp,
    TrapezoidDown,
    CrescentL,
    CrescentR,
    WedgeNE,
    WedgeNW,
    Hourglass,
    Bowtie,
    Star4,
}

pub const GLYPH_COUNT: usize = 50;

/// Assignment order for categories: the i-th category gets `GLYPH_SET[i % 50]`.
pub const GLYPH_SET: [GlyphKind; GLYPH_COUNT] = {
    use GlyphKind::*;
    [
        Circle,
        Ring,
        Target,
        Bullseye,
        PieN,
        PieE,
        PieS,
        PieW,
        Halo,
        Dot,
        Triangle,
        TriangleDown,
        TriangleLeft,
        TriangleRight,
        Square,
        RoundedSquare,
        Diamond,
        Rect,
        RectTall,
        Oval,
        Capsule,
        Pentagon,
        Hexagon,
        Heptagon,
        Octagon,
        Cross,
        X,
        Plus,
        Asterisk,
        Star5,
        Star6,
        Star8,
        ChevronUp,
        ChevronDown,
        ChevronLeft,
        ChevronRight,
        CaretUp,
        CaretDown,
        CaretLeft,
        CaretRight,
        Parallelogram,
        TrapezoidUp,
        TrapezoidDown,
        CrescentL,
        CrescentR,
        WedgeNE,
        WedgeNW,
        Hourglass,
        Bowtie,
        Star4,
    ]
};

impl GlyphKind {
    /// Glyph for the n-th slot, wrapping around the set.
    pub fn nth(index: usize) -> Self {
        GLYPH_SET[index % GLYPH_COUNT]
    }

    pub fn tag(self) -> &'static str {
        use GlyphKind::*;
        match self {
            Circle => "circle",
            Ring => "ring",
            Target => "target",
            Bullseye => "bullseye",
            PieN => "pieN",
            PieE => "pieE",
            PieS => "pieS",
            PieW => "pieW",
            Halo => "halo",
            Dot => "dot",
            Triangle => "triangle",
            TriangleDown => "triangleDown",
            TriangleLeft => "triangleLeft",
            TriangleRight => "triangleRight",
            Square => "square",
            RoundedSquare => "roundedSquare",
            Diamond => "diamond",
            Rect => "rect",
            RectTall => "rectTall",
            Oval => "oval",
            Capsule => "capsule",
            Pentagon => "pentagon",
            Hexagon => "hexagon",
            Heptagon => "heptagon",
            Octagon => "octagon",
            Cross => "cross",
            X => "x",
            Plus => "plus",
            Asterisk => "asterisk",
            Star5 => "star5",
            Star6 => "star6",
            Star8 => "star8",
            ChevronUp => "chevronUp",
            ChevronDown => "chevronDown",
            ChevronLeft => "chevronLeft",
            ChevronRight => "chevronRight",
            CaretUp => "caretUp",
            CaretDown => "caretDown",
            CaretLeft => "caretLeft",
            CaretRight => "caretRight",
            Parallelogram => "parallelogram",
            TrapezoidUp => "trapezoidUp",
            TrapezoidDown => "trapezoidDown",
            CrescentL => "crescentL",
            CrescentR => "crescentR",
            WedgeNE => "wedgeNE",
            WedgeNW => "wedgeNW",
            Hourglass => "hourglass",
            Bowtie => "bowtie",
            Star4 => "star4",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        GLYPH_SET.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Like [`GlyphKind::from_tag`], but unknown tags draw as a plain circle.
    pub fn resolve(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or(GlyphKind::Circle)
    }

    /// Unit-radius construction of this glyph, centered on the origin.
    pub fn shape(self) -> Vec<Primitive> {
        use GlyphKind::*;
        use Paint::{FillOnly, Outline, Solid};

        let thin = Outline(OUTLINE_WEIGHT);
        match self {
            Circle => vec![circle(1.0, Solid)],
            Ring => vec![circle(1.0, thin)],
            Target => vec![circle(1.0, thin), circle(0.6, thin)],
            Bullseye => vec![circle(1.0, thin), circle(0.66, thin), circle(0.33, thin)],
            PieN => vec![pie(-PI, 0.0)],
            PieE => vec![pie(-FRAC_PI_2, FRAC_PI_2)],
            PieS => vec![pie(0.0, PI)],
            PieW => vec![pie(FRAC_PI_2, PI + FRAC_PI_2)],
            Halo => vec![circle(1.2, thin), circle(0.5, FillOnly)],
            Dot => vec![circle(0.7, Solid)],
            Triangle => vec![polygon(&[(0.0, -1.0), (-0.866, 0.5), (0.866, 0.5)])],
            TriangleDown => vec![polygon(&[(0.0, 1.0), (-0.866, -0.5), (0.866, -0.5)])],
            TriangleLeft => vec![polygon(&[(-1.0, 0.0), (0.5, -0.866), (0.5, 0.866)])],
            TriangleRight => vec![polygon(&[(1.0, 0.0), (-0.5, -0.866), (-0.5, 0.866)])],
            Square => vec![rect(1.9, 1.9, 0.0)],
            RoundedSquare => vec![rect(1.9, 1.9, 0.35)],
            Diamond => {
                let k = 0.9 * std::f64::consts::SQRT_2;
                vec![polygon(&[(0.0, -k), (k, 0.0), (0.0, k), (-k, 0.0)])]
            }
            Rect => vec![rect(2.8, 1.2, 0.2)],
            RectTall => vec![rect(1.4, 2.8, 0.2)],
            Oval => vec![Primitive::Ellipse {
                center: (0.0, 0.0),
                rx: 1.6,
                ry: 1.1,
                paint: Solid,
            }],
            Capsule => vec![rect(2.8, 1.4, 0.7)],
            Pentagon => vec![regular_polygon(5)],
            Hexagon => vec![regular_polygon(6)],
            Heptagon => vec![regular_polygon(7)],
            Octagon => vec![regular_polygon(8)],
            Cross => plus_strokes(1.7),
            X => diagonal_strokes(1.7),
            Plus => plus_strokes(2.2),
            Asterisk => {
                let mut strokes = plus_strokes(1.6);
                strokes.extend(diagonal_strokes(1.6));
                strokes
            }
            Star5 => vec![star(0.5, 5)],
            Star6 => vec![star(0.55, 6)],
            Star8 => vec![star(0.55, 8)],
            Star4 => vec![star(0.4, 4)],
            ChevronUp => vec![chevron(0.0)],
            ChevronDown => vec![chevron(PI)],
            ChevronLeft => vec![chevron(-FRAC_PI_2)],
            ChevronRight => vec![chevron(FRAC_PI_2)],
            CaretUp => vec![caret(0.0)],
            CaretDown => vec![caret(PI)],
            CaretLeft => vec![caret(-FRAC_PI_2)],
            CaretRight => vec![caret(FRAC_PI_2)],
            Parallelogram => {
                let shear = FRAC_PI_8.tan();
                let corners = [(-1.3, -0.8), (1.3, -0.8), (1.3, 0.8), (-1.3, 0.8)];
                let points: Vec<Point> = corners.iter().map(|&(x, y)| (x + shear * y, y)).collect();
                vec![polygon(&points)]
            }
            TrapezoidUp => vec![polygon(&[(-1.1, 0.6), (1.1, 0.6), (0.6, -0.6), (-0.6, -0.6)])],
            TrapezoidDown => vec![polygon(&[(-0.6, 0.6), (0.6, 0.6), (1.1, -0.6), (-1.1, -0.6)])],
            CrescentL => vec![crescent(false)],
            CrescentR => vec![crescent(true)],
            WedgeNE => vec![pie(-FRAC_PI_2, 0.0)],
            WedgeNW => vec![pie(-PI, -FRAC_PI_2)],
            Hourglass => vec![polygon(&[(-1.0, -1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, 1.0)])],
            Bowtie => vec![
                Primitive::Polyline {
                    points: vec![(-0.83, -0.83), (0.17, 0.0), (-0.83, 0.83)],
                    weight: 1.7,
                },
                Primitive::Polyline {
                    points: vec![(0.83, -0.83), (-0.17, 0.0), (0.83, 0.83)],
                    weight: 1.7,
                },
            ],
        }
    }

    /// Largest absolute coordinate reached by the unit-radius shape.
    pub fn extent(self) -> f64 {
        self.shape()
            .iter()
            .map(Primitive::extent)
            .fold(0.0, f64::max)
    }
}

/// How a closed primitive is painted. Colors come from the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Filled, with a thin outline in the same color.
    Solid,
    /// Filled, no outline.
    FillOnly,
    /// Outline only, at the given line weight in pixels.
    Outline(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        paint: Paint,
    },
    /// Closed polygon; self-intersections fill with the nonzero rule.
    Polygon { points: Vec<Point>, paint: Paint },
    /// Open stroke path.
    Polyline { points: Vec<Point>, weight: f64 },
    /// Circular sector of radius 1 between two screen angles (clockwise from +x).
    Pie { start: f64, end: f64, paint: Paint },
    /// Axis-aligned rectangle centered on the origin.
    RoundedRect {
        w: f64,
        h: f64,
        corner: f64,
        paint: Paint,
    },
}

impl Primitive {
    pub fn extent(&self) -> f64 {
        let max_abs = |points: &[Point]| {
            points
                .iter()
                .map(|&(x, y)| x.abs().max(y.abs()))
                .fold(0.0, f64::max)
        };
        match self {
            Primitive::Ellipse { center, rx, ry, .. } => {
                (center.0.abs() + rx).max(center.1.abs() + ry)
            }
            Primitive::Polygon { points, .. } | Primitive::Polyline { points, .. } => {
                max_abs(points)
            }
            Primitive::Pie { .. } => 1.0,
            Primitive::RoundedRect { w, h, .. } => (w / 2.0).max(h / 2.0),
        }
    }
}

fn circle(r: f64, paint: Paint) -> Primitive {
    Primitive::Ellipse {
        center: (0.0, 0.0),
        rx: r,
        ry: r,
        paint,
    }
}

fn pie(start: f64, end: f64) -> Primitive {
    Primitive::Pie {
        start,
        end,
        paint: Paint::Solid,
    }
}

fn polygon(points: &[Point]) -> Primitive {
    Primitive::Polygon {
        points: points.to_vec(),
        paint: Paint::Solid,
    }
}

fn rect(w: f64, h: f64, corner: f64) -> Primitive {
    Primitive::RoundedRect {
        w,
        h,
        corner,
        paint: Paint::Solid,
    }
}

fn regular_polygon(sides: usize) -> Primitive {
    let points = (0..sides)
        .map(|i| {
            let a = -FRAC_PI_2 + TAU * i as f64 / sides as f64;
            (a.cos(), a.sin())
        })
        .collect();
    Primitive::Polygon {
        points,
        paint: Paint::Solid,
    }
}

fn star(inner: f64, tips: usize) -> Primitive {
    let steps = tips * 2;
    let points = (0..steps)
        .map(|i| {
            let r = if i % 2 == 0 { 1.0 } else { inner };
            let a = -FRAC_PI_2 + TAU * i as f64 / steps as f64;
            (a.cos() * r, a.sin() * r)
        })
        .collect();
    Primitive::Polygon {
        points,
        paint: Paint::Solid,
    }
}

fn segment(a: Point, b: Point, weight: f64) -> Primitive {
    Primitive::Polyline {
        points: vec![a, b],
        weight,
    }
}

fn plus_strokes(weight: f64) -> Vec<Primitive> {
    vec![
        segment((-1.0, 0.0), (1.0, 0.0), weight),
        segment((0.0, -1.0), (0.0, 1.0), weight),
    ]
}

fn diagonal_strokes(weight: f64) -> Vec<Primitive> {
    vec![
        segment((-0.9, -0.9), (0.9, 0.9), weight),
        segment((-0.9, 0.9), (0.9, -0.9), weight),
    ]
}

/// Rotate about the origin; positive angles turn clockwise on screen.
fn rotate(points: &[Point], angle: f64) -> Vec<Point> {
    let (s, c) = angle.sin_cos();
    points
        .iter()
        .map(|&(x, y)| (x * c - y * s, x * s + y * c))
        .collect()
}

fn chevron(angle: f64) -> Primitive {
    Primitive::Polyline {
        points: rotate(&[(-1.0, 0.2), (0.0, -0.8), (1.0, 0.2)], angle),
        weight: 2.0,
    }
}

fn caret(angle: f64) -> Primitive {
    Primitive::Polygon {
        points: rotate(&[(-0.8, -0.2), (0.0, -0.8), (0.8, -0.2)], angle),
        paint: Paint::Solid,
    }
}

/// Unit disc minus the same disc shifted sideways. `lit_right` keeps the right-hand
/// sliver; otherwise the left.
fn crescent(lit_right: bool) -> Primitive {
    let s = CRESCENT_SHIFT;
    let h = (1.0 - s * s / 4.0).sqrt();

    // Outer rim of the unit disc, from the upper intersection round the far side.
    let a_upper = (-h).atan2(s / 2.0);
    let a_lower = h.atan2(s / 2.0) - TAU;
    // Inner rim along the cut disc (centered on (s, 0)), from lower back to upper.
    let b_lower = h.atan2(-s / 2.0);
    let b_upper = (-h).atan2(-s / 2.0) + TAU;

    let mut points = Vec::with_capacity(2 * ARC_SEGMENTS + 2);
    for i in 0..=ARC_SEGMENTS {
        let a = a_upper + (a_lower - a_upper) * i as f64 / ARC_SEGMENTS as f64;
        points.push((a.cos(), a.sin()));
    }
    for i in 1..ARC_SEGMENTS {
        let b = b_lower + (b_upper - b_lower) * i as f64 / ARC_SEGMENTS as f64;
        points.push((s + b.cos(), b.sin()));
    }

    if lit_right {
        for p in &mut points {
            p.0 = -p.0;
        }
    }
    Primitive::Polygon {
        points,
        paint: Paint::FillOnly,
    }
}

/// Drawing backend for glyphs. Coordinates handed to the primitive methods are
/// already in the backend's pixel space.
pub trait GlyphRenderer {
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint, color: Rgba);
    fn polygon(&mut self, points: &[Point], paint: Paint, color: Rgba);
    fn polyline(&mut self, points: &[Point], weight: f64, color: Rgba);
    fn pie(&mut self, center: Point, radius: f64, start: f64, end: f64, paint: Paint, color: Rgba);
    fn rounded_rect(
        &mut self,
        center: Point,
        w: f64,
        h: f64,
        corner: f64,
        paint: Paint,
        color: Rgba,
    );

    /// Draw `kind` for a marker of `size`, centered on `center`.
    fn draw_glyph(&mut self, center: Point, size: f64, kind: GlyphKind, color: Rgba) {
        draw_scaled(self, kind, center, size * GLYPH_RADIUS_FACTOR, color);
    }

    /// Draw by tag name. Unrecognized tags draw a filled circle.
    fn draw_tagged(&mut self, center: Point, size: f64, tag: &str, color: Rgba) {
        self.draw_glyph(center, size, GlyphKind::resolve(tag), color);
    }
}

/// Walk the unit shape of `kind`, scaled to `radius` and moved to `center`.
pub fn draw_scaled<R: GlyphRenderer + ?Sized>(
    renderer: &mut R,
    kind: GlyphKind,
    center: Point,
    radius: f64,
    color: Rgba,
) {
    let (cx, cy) = center;
    let place = |points: &[Point]| -> Vec<Point> {
        points
            .iter()
            .map(|&(x, y)| (cx + x * radius, cy + y * radius))
            .collect()
    };

    for primitive in kind.shape() {
        match primitive {
            Primitive::Ellipse {
                center: (ox, oy),
                rx,
                ry,
                paint,
            } => renderer.ellipse(
                (cx + ox * radius, cy + oy * radius),
                rx * radius,
                ry * radius,
                paint,
                color,
            ),
            Primitive::Polygon { points, paint } => renderer.polygon(&place(&points), paint, color),
            Primitive::Polyline { points, weight } => {
                renderer.polyline(&place(&points), weight, color)
            }
            Primitive::Pie { start, end, paint } => {
                renderer.pie(center, radius, start, end, paint, color)
            }
            Primitive::RoundedRect {
                w,
                h,
                corner,
                paint,
            } => renderer.rounded_rect(
                center,
                w * radius,
                h * radius,
                corner * radius,
                paint,
                color,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        ellipses: Vec<(Point, f64, f64, Paint)>,
    }

    impl GlyphRenderer for Recorder {
        fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint, _color: Rgba) {
            self.calls.push("ellipse".into());
            self.ellipses.push((center, rx, ry, paint));
        }
        fn polygon(&mut self, _points: &[Point], _paint: Paint, _color: Rgba) {
            self.calls.push("polygon".into());
        }
        fn polyline(&mut self, _points: &[Point], _weight: f64, _color: Rgba) {
            self.calls.push("polyline".into());
        }
        fn pie(&mut self, _c: Point, _r: f64, _s: f64, _e: f64, _p: Paint, _color: Rgba) {
            self.calls.push("pie".into());
        }
        fn rounded_rect(&mut self, _c: Point, _w: f64, _h: f64, _k: f64, _p: Paint, _color: Rgba) {
            self.calls.push("rect".into());
        }
    }

    #[test]
    fn glyph_set_has_fifty_distinct_kinds() {
        let unique: HashSet<_> = GLYPH_SET.iter().collect();
        assert_eq!(unique.len(), GLYPH_COUNT);
        let tags: HashSet<_> = GLYPH_SET.iter().map(|k| k.tag()).collect();
        assert_eq!(tags.len(), GLYPH_COUNT);
    }

    #[test]
    fn tags_resolve_back_to_kinds() {
        for kind in GLYPH_SET {
            assert_eq!(GlyphKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(GlyphKind::from_tag("spiral"), None);
        assert_eq!(GlyphKind::resolve("spiral"), GlyphKind::Circle);
    }

    #[test]
    fn nth_wraps_at_fifty() {
        assert_eq!(GlyphKind::nth(0), GlyphKind::Circle);
        assert_eq!(GlyphKind::nth(49), GlyphKind::Star4);
        assert_eq!(GlyphKind::nth(50), GlyphKind::Circle);
        assert_eq!(GlyphKind::nth(53), GlyphKind::Bullseye);
    }

    #[test]
    fn every_glyph_has_geometry() {
        for kind in GLYPH_SET {
            assert!(!kind.shape().is_empty(), "{} has no primitives", kind.tag());
            let extent = kind.extent();
            assert!(extent > 0.3 && extent <= 1.65, "{} extent {extent}", kind.tag());
        }
    }

    #[test]
    fn marker_radius_is_ninety_percent_of_size() {
        let mut rec = Recorder::default();
        rec.draw_glyph((50.0, 40.0), 10.0, GlyphKind::Circle, Rgba::rgb(1, 2, 3));
        assert_eq!(rec.calls, vec!["ellipse"]);
        let (center, rx, ry, paint) = rec.ellipses[0];
        assert_eq!(center, (50.0, 40.0));
        assert_close(rx, 9.0);
        assert_close(ry, 9.0);
        assert_eq!(paint, Paint::Solid);
    }

    #[test]
    fn unknown_tag_draws_filled_circle() {
        let mut unknown = Recorder::default();
        unknown.draw_tagged((0.0, 0.0), 5.0, "not-a-glyph", Rgba::rgb(0, 0, 0));
        let mut circle = Recorder::default();
        circle.draw_glyph((0.0, 0.0), 5.0, GlyphKind::Circle, Rgba::rgb(0, 0, 0));
        assert_eq!(unknown.calls, circle.calls);
        assert_eq!(unknown.ellipses, circle.ellipses);
    }

    #[test]
    fn chevron_right_points_right() {
        let Primitive::Polyline { points, .. } = &GlyphKind::ChevronRight.shape()[0] else {
            panic!("chevron should be a polyline");
        };
        assert_close(points[1].0, 0.8);
        assert_close(points[1].1, 0.0);
    }

    #[test]
    fn crescents_are_mirror_images() {
        let Primitive::Polygon { points: left, .. } = &GlyphKind::CrescentL.shape()[0] else {
            panic!("crescent should be a polygon");
        };
        let Primitive::Polygon { points: right, .. } = &GlyphKind::CrescentR.shape()[0] else {
            panic!("crescent should be a polygon");
        };
        let mean_x = |pts: &[Point]| pts.iter().map(|p| p.0).sum::<f64>() / pts.len() as f64;
        assert!(mean_x(left) < 0.0);
        assert!(mean_x(right) > 0.0);
        for (l, r) in left.iter().zip(right) {
            assert_close(l.0, -r.0);
            assert_close(l.1, r.1);
        }
        // Every outline point stays on or inside the unit disc.
        for &(x, y) in left {
            assert!(x * x + y * y <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn crescent_rim_passes_through_far_side() {
        let Primitive::Polygon { points, .. } = &GlyphKind::CrescentL.shape()[0] else {
            panic!("crescent should be a polygon");
        };
        let leftmost = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        assert_close(leftmost, -1.0);
    }
}

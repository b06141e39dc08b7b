//! 16x16 SVG rendition of glyphs for the legend.

use std::f64::consts::PI;
use std::fmt::Write as FmtWrite;

use super::{GlyphKind, GlyphRenderer, OUTLINE_WEIGHT, Paint, Point, draw_scaled};
use crate::colors::Rgba;

pub const ICON_SIZE: f64 = 16.0;
const ICON_MAX_RADIUS: f64 = 6.0;
/// Half the icon side minus a half-pixel margin.
const ICON_REACH: f64 = 7.5;

/// Accumulates SVG elements for one icon.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    body: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16">{}</svg>"#,
            self.body
        )
    }

    fn element(&mut self, open: std::fmt::Arguments<'_>, paint: Paint, color: Rgba) {
        let _ = write!(self.body, "<{open} {}/>", paint_attrs(paint, color));
    }
}

fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn paint_attrs(paint: Paint, color: Rgba) -> String {
    let hex = color.hex();
    let opacity = num(color.opacity());
    match paint {
        Paint::Solid => format!(
            r#"fill="{hex}" fill-opacity="{opacity}" stroke="{hex}" stroke-opacity="{opacity}" stroke-width="{}""#,
            num(OUTLINE_WEIGHT)
        ),
        Paint::FillOnly => format!(r#"fill="{hex}" fill-opacity="{opacity}" stroke="none""#),
        Paint::Outline(weight) => format!(
            r#"fill="none" stroke="{hex}" stroke-opacity="{opacity}" stroke-width="{}""#,
            num(weight)
        ),
    }
}

fn path_data(points: &[Point], close: bool) -> String {
    let mut d = String::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{} {}", num(x), num(y));
    }
    if close {
        d.push('Z');
    }
    d
}

impl GlyphRenderer for SvgRenderer {
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint, color: Rgba) {
        let (cx, cy) = (num(center.0), num(center.1));
        if rx == ry {
            self.element(
                format_args!(r#"circle cx="{cx}" cy="{cy}" r="{}""#, num(rx)),
                paint,
                color,
            );
        } else {
            self.element(
                format_args!(
                    r#"ellipse cx="{cx}" cy="{cy}" rx="{}" ry="{}""#,
                    num(rx),
                    num(ry)
                ),
                paint,
                color,
            );
        }
    }

    fn polygon(&mut self, points: &[Point], paint: Paint, color: Rgba) {
        let d = path_data(points, true);
        self.element(format_args!(r#"path d="{d}""#), paint, color);
    }

    fn polyline(&mut self, points: &[Point], weight: f64, color: Rgba) {
        let d = path_data(points, false);
        let _ = write!(
            self.body,
            r#"<path d="{d}" {} stroke-linecap="round" stroke-linejoin="round"/>"#,
            paint_attrs(Paint::Outline(weight), color)
        );
    }

    fn pie(&mut self, center: Point, radius: f64, start: f64, end: f64, paint: Paint, color: Rgba) {
        let (cx, cy) = center;
        let (x0, y0) = (cx + radius * start.cos(), cy + radius * start.sin());
        let (x1, y1) = (cx + radius * end.cos(), cy + radius * end.sin());
        let large = if end - start > PI { 1 } else { 0 };
        let r = num(radius);
        let d = format!(
            "M{} {}L{} {}A{r} {r} 0 {large} 1 {} {}Z",
            num(cx),
            num(cy),
            num(x0),
            num(y0),
            num(x1),
            num(y1)
        );
        self.element(format_args!(r#"path d="{d}""#), paint, color);
    }

    fn rounded_rect(
        &mut self,
        center: Point,
        w: f64,
        h: f64,
        corner: f64,
        paint: Paint,
        color: Rgba,
    ) {
        let (x, y) = (center.0 - w / 2.0, center.1 - h / 2.0);
        let corner_attr = if corner > 0.0 {
            format!(r#" rx="{}""#, num(corner))
        } else {
            String::new()
        };
        self.element(
            format_args!(
                r#"rect x="{}" y="{}" width="{}" height="{}"{corner_attr}"#,
                num(x),
                num(y),
                num(w),
                num(h)
            ),
            paint,
            color,
        );
    }
}

/// Radius that keeps the whole glyph inside the 16x16 icon.
pub fn icon_radius(kind: GlyphKind) -> f64 {
    let extent = kind.extent();
    if extent <= 0.0 {
        return ICON_MAX_RADIUS;
    }
    ICON_MAX_RADIUS.min(ICON_REACH / extent)
}

/// Standalone SVG markup for a legend swatch.
pub fn glyph_svg(kind: GlyphKind, color: Rgba) -> String {
    let mut svg = SvgRenderer::new();
    let mid = ICON_SIZE / 2.0;
    draw_scaled(&mut svg, kind, (mid, mid), icon_radius(kind), color);
    svg.finish()
}

/// Like [`glyph_svg`], by tag name; unknown tags render as a circle.
pub fn tagged_svg(tag: &str, color: Rgba) -> String {
    glyph_svg(GlyphKind::resolve(tag), color)
}

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use volcano_shared::Rgba;
use volcano_shared::glyph::{GlyphRenderer, OUTLINE_WEIGHT, Paint, Point};
use volcano_shared::projection::{GeoProjector, GridLineKind, MapRect, grid_lines};

const GRID_STROKE: Rgba = Rgba::rgba(100, 100, 100, 140);
const GRID_LABEL: Rgba = Rgba::gray(200);
const EQUATOR_STROKE: Rgba = Rgba::rgba(180, 180, 180, 200);
const GRID_FONT: &str = "11px Arial";

/// Immediate-mode glyph backend drawing straight into a 2D canvas context.
pub struct CanvasGlyphs<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasGlyphs<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn trace(&self, points: &[Point]) {
        let ctx = self.ctx;
        ctx.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
    }

    fn paint(&self, paint: Paint, color: Rgba) {
        let ctx = self.ctx;
        let css = color.css();
        match paint {
            Paint::Solid => {
                ctx.set_fill_style_str(&css);
                ctx.fill();
                ctx.set_stroke_style_str(&css);
                ctx.set_line_width(OUTLINE_WEIGHT);
                ctx.stroke();
            }
            Paint::FillOnly => {
                ctx.set_fill_style_str(&css);
                ctx.fill();
            }
            Paint::Outline(weight) => {
                ctx.set_stroke_style_str(&css);
                ctx.set_line_width(weight);
                ctx.stroke();
            }
        }
    }
}

impl GlyphRenderer for CanvasGlyphs<'_> {
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint, color: Rgba) {
        self.ctx.begin_path();
        if self
            .ctx
            .ellipse(center.0, center.1, rx, ry, 0.0, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.paint(paint, color);
    }

    fn polygon(&mut self, points: &[Point], paint: Paint, color: Rgba) {
        if points.is_empty() {
            return;
        }
        self.trace(points);
        self.ctx.close_path();
        self.paint(paint, color);
    }

    fn polyline(&mut self, points: &[Point], weight: f64, color: Rgba) {
        if points.is_empty() {
            return;
        }
        self.trace(points);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.paint(Paint::Outline(weight), color);
        self.ctx.set_line_cap("butt");
        self.ctx.set_line_join("miter");
    }

    fn pie(&mut self, center: Point, radius: f64, start: f64, end: f64, paint: Paint, color: Rgba) {
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.move_to(center.0, center.1);
        if ctx.arc(center.0, center.1, radius, start, end).is_err() {
            return;
        }
        ctx.close_path();
        self.paint(paint, color);
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
        let ctx = self.ctx;
        let (x, y) = (center.0 - w / 2.0, center.1 - h / 2.0);
        let r = corner.min(w / 2.0).min(h / 2.0).max(0.0);
        ctx.begin_path();
        if r == 0.0 {
            ctx.rect(x, y, w, h);
        } else {
            ctx.move_to(x + r, y);
            let corners = [
                (x + w, y, x + w, y + h),
                (x + w, y + h, x, y + h),
                (x, y + h, x, y),
                (x, y, x + w, y),
            ];
            for (x1, y1, x2, y2) in corners {
                if ctx.arc_to(x1, y1, x2, y2, r).is_err() {
                    return;
                }
            }
            ctx.close_path();
        }
        self.paint(paint, color);
    }
}

/// Graticule over the map: 30-degree meridians and parallels with labels, then
/// the equator on top.
pub fn draw_grid(ctx: &CanvasRenderingContext2d, projector: &GeoProjector, rect: &MapRect) {
    ctx.set_font(GRID_FONT);
    for line in grid_lines(projector, rect) {
        let (stroke, width) = match line.kind {
            GridLineKind::Equator => (EQUATOR_STROKE, 2.0),
            _ => (GRID_STROKE, 1.0),
        };
        ctx.set_stroke_style_str(&stroke.css());
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(line.from.0, line.from.1);
        ctx.line_to(line.to.0, line.to.1);
        ctx.stroke();

        let (align, baseline) = match line.kind {
            GridLineKind::Meridian => ("center", "top"),
            GridLineKind::Parallel => ("right", "middle"),
            GridLineKind::Equator => continue,
        };
        ctx.set_text_align(align);
        ctx.set_text_baseline(baseline);
        ctx.set_fill_style_str(&GRID_LABEL.css());
        let _ = ctx.fill_text(&line.label, line.label_at.0, line.label_at.1);
    }
}

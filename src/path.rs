//! SigilPath - Vector Path Data Model
//!
//! A sigil is pure data: an ordered list of path segments in a local
//! coordinate space of `size x size` logical units. The external display
//! layer decides how to stroke it; the texture compositor rasterizes it.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One path segment. Angles are radians; arcs are center-parameterized
/// and swept counter-clockwise from `start` to `end` when `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Segment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    Arc { cx: f64, cy: f64, r: f64, start: f64, end: f64 },
    Close,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// A generated sigil: a sequence of segments in local coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SigilPath {
    pub segments: Vec<Segment>,
}

impl SigilPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.segments.push(Segment::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.segments.push(Segment::LineTo { x, y });
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.segments.push(Segment::QuadTo { cx, cy, x, y });
    }

    pub fn arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64) {
        self.segments.push(Segment::Arc { cx, cy, r, start, end });
    }

    pub fn close(&mut self) {
        self.segments.push(Segment::Close);
    }

    /// Full circle, drawn as two half arcs to mirror the `A .. A ..` idiom
    /// of SVG path data.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.move_to(cx + r, cy);
        self.arc(cx, cy, r, 0.0, PI);
        self.arc(cx, cy, r, PI, 2.0 * PI);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Conservative bounding box: quad control points and full arc circles
    /// are included wholesale, so the result always contains the drawn ink.
    pub fn bounds(&self) -> Rect {
        let mut r = Rect::empty();
        for seg in &self.segments {
            match *seg {
                Segment::MoveTo { x, y } | Segment::LineTo { x, y } => r.include(x, y),
                Segment::QuadTo { cx, cy, x, y } => {
                    r.include(cx, cy);
                    r.include(x, y);
                }
                Segment::Arc { cx, cy, r: rad, .. } => {
                    r.include(cx - rad, cy - rad);
                    r.include(cx + rad, cy + rad);
                }
                Segment::Close => {}
            }
        }
        r
    }

    /// SVG path `d` attribute for the external display layer.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for seg in &self.segments {
            match *seg {
                Segment::MoveTo { x, y } => push_cmd(&mut d, "M", &[x, y]),
                Segment::LineTo { x, y } => push_cmd(&mut d, "L", &[x, y]),
                Segment::QuadTo { cx, cy, x, y } => push_cmd(&mut d, "Q", &[cx, cy, x, y]),
                Segment::Arc { cx, cy, r, start, end } => {
                    let (sx, sy) = (cx + r * start.cos(), cy + r * start.sin());
                    let (ex, ey) = (cx + r * end.cos(), cy + r * end.sin());
                    let large = if (end - start).abs() > PI { 1.0 } else { 0.0 };
                    push_cmd(&mut d, "M", &[sx, sy]);
                    push_cmd(&mut d, "A", &[r, r, 0.0, large, 1.0, ex, ey]);
                }
                Segment::Close => d.push_str("Z "),
            }
        }
        d.trim_end().to_string()
    }

    /// Flatten into polylines for the rasterizer. Quads and arcs become
    /// short line runs; `tolerance` is the approximate max chord length in
    /// local units.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<(f64, f64)>> {
        let mut polylines: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        let mut subpath_start = (0.0, 0.0);

        let flush = |current: &mut Vec<(f64, f64)>, out: &mut Vec<Vec<(f64, f64)>>| {
            if current.len() > 1 {
                out.push(std::mem::take(current));
            } else {
                current.clear();
            }
        };

        for seg in &self.segments {
            match *seg {
                Segment::MoveTo { x, y } => {
                    flush(&mut current, &mut polylines);
                    current.push((x, y));
                    subpath_start = (x, y);
                }
                Segment::LineTo { x, y } => {
                    if current.is_empty() {
                        current.push(subpath_start);
                    }
                    current.push((x, y));
                }
                Segment::QuadTo { cx, cy, x, y } => {
                    let (x0, y0) = *current.last().unwrap_or(&subpath_start);
                    if current.is_empty() {
                        current.push((x0, y0));
                    }
                    let span = (x - x0).hypot(y - y0) + (cx - x0).hypot(cy - y0);
                    let steps = ((span / tolerance).ceil() as usize).clamp(8, 128);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        let u = 1.0 - t;
                        let px = u * u * x0 + 2.0 * u * t * cx + t * t * x;
                        let py = u * u * y0 + 2.0 * u * t * cy + t * t * y;
                        current.push((px, py));
                    }
                }
                Segment::Arc { cx, cy, r, start, end } => {
                    flush(&mut current, &mut polylines);
                    let arc_len = r * (end - start).abs();
                    let steps = ((arc_len / tolerance).ceil() as usize).clamp(8, 256);
                    for i in 0..=steps {
                        let t = start + (end - start) * (i as f64 / steps as f64);
                        current.push((cx + r * t.cos(), cy + r * t.sin()));
                    }
                }
                Segment::Close => {
                    if !current.is_empty() {
                        current.push(subpath_start);
                        flush(&mut current, &mut polylines);
                    }
                }
            }
        }
        flush(&mut current, &mut polylines);
        polylines
    }
}

fn push_cmd(d: &mut String, cmd: &str, args: &[f64]) {
    d.push_str(cmd);
    d.push(' ');
    for a in args {
        // Two decimals keeps the string compact and stable across platforms.
        d.push_str(&format!("{a:.2} "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_track_all_segment_kinds() {
        let mut p = SigilPath::new();
        p.move_to(10.0, 10.0);
        p.line_to(50.0, 80.0);
        p.circle(100.0, 100.0, 30.0);
        let b = p.bounds();
        assert_eq!(b.min_x, 10.0);
        assert_eq!(b.min_y, 10.0);
        assert_eq!(b.max_x, 130.0);
        assert_eq!(b.max_y, 130.0);
    }

    #[test]
    fn svg_d_round_numbers() {
        let mut p = SigilPath::new();
        p.move_to(1.0, 2.0);
        p.line_to(3.5, 4.25);
        p.close();
        assert_eq!(p.to_svg_d(), "M 1.00 2.00 L 3.50 4.25 Z");
    }

    #[test]
    fn flatten_closes_subpaths() {
        let mut p = SigilPath::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0);
        p.line_to(10.0, 10.0);
        p.close();
        let polys = p.flatten(1.0);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].first(), polys[0].last());
    }

    #[test]
    fn flatten_circle_stays_on_radius() {
        let mut p = SigilPath::new();
        p.circle(50.0, 50.0, 20.0);
        for poly in p.flatten(0.5) {
            for (x, y) in poly {
                let d = (x - 50.0).hypot(y - 50.0);
                assert!((d - 20.0).abs() < 0.75, "off-radius point: {d}");
            }
        }
    }
}

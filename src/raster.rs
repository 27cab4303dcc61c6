//! Software Raster Surface
//!
//! Straight-alpha RGBA8 pixel surface with the drawing operations the two
//! compositors need: distance-coverage strokes, gradient paints, box-chain
//! blur for glow, and over/additive layer composition. Everything is pure
//! CPU arithmetic; identical inputs produce pixel-identical output on every
//! platform.

use crate::path::SigilPath;

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb`. Anything else comes back opaque white.
    pub fn from_hex(hex: &str) -> Self {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 {
            return Self::WHITE;
        }
        let parse = |s: &str| u8::from_str_radix(s, 16).unwrap_or(255);
        Self::rgb(parse(&h[0..2]), parse(&h[2..4]), parse(&h[4..6]))
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// A gradient color stop at a normalized offset in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct Stop {
    pub offset: f64,
    pub color: Color,
}

impl Stop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

fn sample_stops(stops: &[Stop], t: f64) -> Color {
    match stops {
        [] => Color::TRANSPARENT,
        [only] => only.color,
        _ => {
            if t <= stops[0].offset {
                return stops[0].color;
            }
            for pair in stops.windows(2) {
                if t <= pair[1].offset {
                    let span = (pair[1].offset - pair[0].offset).max(1e-9);
                    return pair[0].color.lerp(pair[1].color, (t - pair[0].offset) / span);
                }
            }
            stops[stops.len() - 1].color
        }
    }
}

/// Per-pixel paint for strokes and fills.
#[derive(Debug, Clone)]
pub enum Paint {
    Solid(Color),
    /// Radial gradient from inner radius `r0` to outer `r1` around a center.
    Radial { cx: f64, cy: f64, r0: f64, r1: f64, stops: Vec<Stop> },
    /// Vertical gradient between two scanlines.
    Vertical { y0: f64, y1: f64, stops: Vec<Stop> },
}

impl Paint {
    pub fn sample(&self, x: f64, y: f64) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Radial { cx, cy, r0, r1, stops } => {
                let d = (x - cx).hypot(y - cy);
                let t = ((d - r0) / (r1 - r0).max(1e-9)).clamp(0.0, 1.0);
                sample_stops(stops, t)
            }
            Paint::Vertical { y0, y1, stops } => {
                let t = ((y - y0) / (y1 - y0).max(1e-9)).clamp(0.0, 1.0);
                sample_stops(stops, t)
            }
        }
    }
}

/// Scale + translate applied when stroking a path onto a surface.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { scale: 1.0, tx: 0.0, ty: 0.0 };

    pub fn apply(&self, p: (f64, f64)) -> (f64, f64) {
        (p.0 * self.scale + self.tx, p.1 * self.scale + self.ty)
    }
}

/// Owned RGBA8 surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    /// Wrap an existing RGBA8 buffer; `data` must be `width * height * 4`
    /// bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() == (width * height * 4) as usize {
            Some(Self { width, height, data })
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        let i = self.idx(x, y);
        Color::rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    pub fn put(&mut self, x: u32, y: u32, c: Color) {
        let i = self.idx(x, y);
        self.data[i] = c.r;
        self.data[i + 1] = c.g;
        self.data[i + 2] = c.b;
        self.data[i + 3] = c.a;
    }

    pub fn fill(&mut self, c: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = c.r;
            px[1] = c.g;
            px[2] = c.b;
            px[3] = c.a;
        }
    }

    /// Source-over blend of `c` at fractional coverage.
    pub fn blend(&mut self, x: u32, y: u32, c: Color, coverage: f64) {
        let sa = f64::from(c.a) / 255.0 * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.get(x, y);
        let da = f64::from(dst.a) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        let ch = |s: u8, d: u8| {
            let v = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        self.put(
            x,
            y,
            Color::rgba(ch(c.r, dst.r), ch(c.g, dst.g), ch(c.b, dst.b), (out_a * 255.0).round() as u8),
        );
    }

    /// Additive blend of `c` at fractional coverage (glow layers).
    pub fn add(&mut self, x: u32, y: u32, c: Color, coverage: f64) {
        let w = f64::from(c.a) / 255.0 * coverage.clamp(0.0, 1.0);
        if w <= 0.0 {
            return;
        }
        let dst = self.get(x, y);
        let ch = |s: u8, d: u8| (f64::from(d) + f64::from(s) * w).min(255.0).round() as u8;
        let a = (f64::from(dst.a) + w * 255.0).min(255.0).round() as u8;
        self.put(x, y, Color::rgba(ch(c.r, dst.r), ch(c.g, dst.g), ch(c.b, dst.b), a));
    }

    /// Fill the whole surface with a radial gradient (poster background).
    pub fn fill_radial(&mut self, cx: f64, cy: f64, r0: f64, r1: f64, stops: &[Stop]) {
        for y in 0..self.height {
            for x in 0..self.width {
                let d = (f64::from(x) + 0.5 - cx).hypot(f64::from(y) + 0.5 - cy);
                let t = ((d - r0) / (r1 - r0).max(1e-9)).clamp(0.0, 1.0);
                self.put(x, y, sample_stops(stops, t));
            }
        }
    }

    /// Antialiased filled disc.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, paint: &Paint, alpha: f64) {
        let (x0, x1, y0, y1) = self.clip_box(cx - r, cy - r, cx + r, cy + r, 1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
                let coverage = (r - (px - cx).hypot(py - cy) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, paint.sample(px, py), coverage * alpha);
                }
            }
        }
    }

    /// Antialiased stroked segment with round caps (distance coverage).
    pub fn stroke_segment(
        &mut self,
        a: (f64, f64),
        b: (f64, f64),
        width: f64,
        paint: &Paint,
        alpha: f64,
    ) {
        let half = width / 2.0;
        let (x0, x1, y0, y1) = self.clip_box(
            a.0.min(b.0) - half,
            a.1.min(b.1) - half,
            a.0.max(b.0) + half,
            a.1.max(b.1) + half,
            1.0,
        );
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len_sq = dx * dx + dy * dy;
        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
                let t = if len_sq > 0.0 {
                    (((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (qx, qy) = (a.0 + t * dx, a.1 + t * dy);
                let coverage = (half - (px - qx).hypot(py - qy) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, paint.sample(px, py), coverage * alpha);
                }
            }
        }
    }

    pub fn stroke_polyline(&mut self, pts: &[(f64, f64)], width: f64, paint: &Paint, alpha: f64) {
        for pair in pts.windows(2) {
            self.stroke_segment(pair[0], pair[1], width, paint, alpha);
        }
    }

    /// Flatten and stroke a sigil path under a transform.
    pub fn stroke_path(
        &mut self,
        path: &SigilPath,
        transform: Transform,
        width: f64,
        paint: &Paint,
        alpha: f64,
    ) {
        // Flatten in device space resolution: one unit tolerance pre-scale.
        let tolerance = (1.5 / transform.scale).max(0.05);
        for poly in path.flatten(tolerance) {
            let pts: Vec<(f64, f64)> = poly.into_iter().map(|p| transform.apply(p)).collect();
            self.stroke_polyline(&pts, width, paint, alpha);
        }
    }

    /// Rounded-rectangle fill via signed distance.
    pub fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, c: Color) {
        self.round_rect_op(x, y, w, h, radius, |d| (0.5 - d).clamp(0.0, 1.0), c);
    }

    /// Rounded-rectangle border stroke via signed distance.
    pub fn stroke_round_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        line_width: f64,
        c: Color,
    ) {
        let half = line_width / 2.0;
        self.round_rect_op(x, y, w, h, radius, move |d| (half - d.abs() + 0.5).clamp(0.0, 1.0), c);
    }

    fn round_rect_op(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        coverage: impl Fn(f64) -> f64,
        c: Color,
    ) {
        let (cx, cy) = (x + w / 2.0, y + h / 2.0);
        let (ex, ey) = (w / 2.0 - radius, h / 2.0 - radius);
        let (x0, x1, y0, y1) = self.clip_box(x, y, x + w, y + h, 2.0);
        for py in y0..y1 {
            for px in x0..x1 {
                let (fx, fy) = (f64::from(px) + 0.5, f64::from(py) + 0.5);
                let qx = ((fx - cx).abs() - ex).max(0.0);
                let qy = ((fy - cy).abs() - ey).max(0.0);
                let d = qx.hypot(qy) - radius;
                let cov = coverage(d);
                if cov > 0.0 {
                    self.blend(px, py, c, cov);
                }
            }
        }
    }

    /// Draw `src` scaled into the destination rectangle with bilinear
    /// sampling (card image) or nearest (QR modules, smoothing disabled).
    pub fn draw_image(
        &mut self,
        src: &Surface,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
        smooth: bool,
    ) {
        if dw <= 0.0 || dh <= 0.0 || src.width == 0 || src.height == 0 {
            return;
        }
        let (x0, x1, y0, y1) = self.clip_box(dx, dy, dx + dw, dy + dh, 0.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let u = (f64::from(x) + 0.5 - dx) / dw * f64::from(src.width) - 0.5;
                let v = (f64::from(y) + 0.5 - dy) / dh * f64::from(src.height) - 0.5;
                let c = if smooth {
                    src.sample_bilinear(u, v)
                } else {
                    let sx = (u.round().max(0.0) as u32).min(src.width - 1);
                    let sy = (v.round().max(0.0) as u32).min(src.height - 1);
                    src.get(sx, sy)
                };
                self.blend(x, y, c, 1.0);
            }
        }
    }

    fn sample_bilinear(&self, u: f64, v: f64) -> Color {
        let fu = u.clamp(0.0, f64::from(self.width - 1));
        let fv = v.clamp(0.0, f64::from(self.height - 1));
        let x0 = fu.floor() as u32;
        let y0 = fv.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fu - f64::from(x0);
        let ty = fv - f64::from(y0);
        let top = self.get(x0, y0).lerp(self.get(x1, y0), tx);
        let bottom = self.get(x0, y1).lerp(self.get(x1, y1), tx);
        top.lerp(bottom, ty)
    }

    /// Composite another surface over this one (source-over).
    pub fn composite_over(&mut self, src: &Surface, opacity: f64) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        for y in 0..self.height.min(src.height) {
            for x in 0..self.width.min(src.width) {
                self.blend(x, y, src.get(x, y), opacity);
            }
        }
    }

    /// Composite another surface additively (glow layers).
    pub fn composite_add(&mut self, src: &Surface, opacity: f64) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        for y in 0..self.height.min(src.height) {
            for x in 0..self.width.min(src.width) {
                self.add(x, y, src.get(x, y), opacity);
            }
        }
    }

    /// Gaussian-like blur: three chained box blurs over premultiplied
    /// channels, then unpremultiplied back. `radius` approximates sigma.
    pub fn blur(&mut self, radius: u32) {
        if radius == 0 {
            return;
        }
        let box_r = (radius / 2).max(1);
        let mut pre = self.premultiplied();
        for _ in 0..3 {
            pre = box_blur_pass(&pre, self.width, self.height, box_r, true);
            pre = box_blur_pass(&pre, self.width, self.height, box_r, false);
        }
        self.unpremultiply_from(&pre);
    }

    fn premultiplied(&self) -> Vec<[f32; 4]> {
        self.data
            .chunks_exact(4)
            .map(|px| {
                let a = f32::from(px[3]) / 255.0;
                [f32::from(px[0]) * a, f32::from(px[1]) * a, f32::from(px[2]) * a, a * 255.0]
            })
            .collect()
    }

    fn unpremultiply_from(&mut self, pre: &[[f32; 4]]) {
        for (px, p) in self.data.chunks_exact_mut(4).zip(pre) {
            let a = p[3] / 255.0;
            if a > 0.0 {
                px[0] = (p[0] / a).round().clamp(0.0, 255.0) as u8;
                px[1] = (p[1] / a).round().clamp(0.0, 255.0) as u8;
                px[2] = (p[2] / a).round().clamp(0.0, 255.0) as u8;
            } else {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
            }
            px[3] = p[3].round().clamp(0.0, 255.0) as u8;
        }
    }

    fn clip_box(&self, x0: f64, y0: f64, x1: f64, y1: f64, pad: f64) -> (u32, u32, u32, u32) {
        let cx0 = ((x0 - pad).floor().max(0.0)) as u32;
        let cy0 = ((y0 - pad).floor().max(0.0)) as u32;
        let cx1 = ((x1 + pad).ceil().min(f64::from(self.width))).max(0.0) as u32;
        let cy1 = ((y1 + pad).ceil().min(f64::from(self.height))).max(0.0) as u32;
        (cx0, cx1, cy0, cy1)
    }
}

fn box_blur_pass(
    src: &[[f32; 4]],
    width: u32,
    height: u32,
    radius: u32,
    horizontal: bool,
) -> Vec<[f32; 4]> {
    let (w, h) = (width as usize, height as usize);
    let r = radius as usize;
    let mut out = vec![[0.0f32; 4]; src.len()];
    let (lines, line_len) = if horizontal { (h, w) } else { (w, h) };
    let at = |line: usize, i: usize| if horizontal { line * w + i } else { i * w + line };

    for line in 0..lines {
        let mut sum = [0.0f32; 4];
        let window = (2 * r + 1) as f32;
        for i in 0..=(r.min(line_len - 1)) {
            for c in 0..4 {
                sum[c] += src[at(line, i)][c];
            }
        }
        // Clamp-to-edge: missing left neighbors count as the first sample.
        let first = src[at(line, 0)];
        for c in 0..4 {
            sum[c] += first[c] * r as f32;
        }
        for i in 0..line_len {
            for c in 0..4 {
                out[at(line, i)][c] = sum[c] / window;
            }
            let enter = src[at(line, (i + r + 1).min(line_len - 1))];
            let leave = src[at(line, i.saturating_sub(r))];
            for c in 0..4 {
                sum[c] += enter[c] - leave[c];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = Color::from_hex("#d4af37");
        assert_eq!((c.r, c.g, c.b, c.a), (0xd4, 0xaf, 0x37, 255));
        assert_eq!(Color::from_hex("bogus"), Color::WHITE);
    }

    #[test]
    fn blend_over_opaque_keeps_alpha() {
        let mut s = Surface::new(2, 2);
        s.fill(Color::BLACK);
        s.blend(0, 0, Color::WHITE.with_alpha(128), 1.0);
        let c = s.get(0, 0);
        assert_eq!(c.a, 255);
        assert!(c.r > 100 && c.r < 160);
    }

    #[test]
    fn additive_saturates() {
        let mut s = Surface::new(1, 1);
        s.fill(Color::rgb(200, 200, 200));
        s.add(0, 0, Color::WHITE, 1.0);
        assert_eq!(s.get(0, 0), Color::WHITE);
    }

    #[test]
    fn circle_ink_stays_in_bbox() {
        let mut s = Surface::new(64, 64);
        s.fill_circle(32.0, 32.0, 10.0, &Paint::Solid(Color::WHITE), 1.0);
        for y in 0..64u32 {
            for x in 0..64u32 {
                let d = (f64::from(x) + 0.5 - 32.0).hypot(f64::from(y) + 0.5 - 32.0);
                if d > 11.5 {
                    assert_eq!(s.get(x, y).a, 0, "ink outside radius at {x},{y}");
                }
            }
        }
    }

    #[test]
    fn gradient_endpoint_samples() {
        let paint = Paint::Vertical {
            y0: 0.0,
            y1: 10.0,
            stops: vec![Stop::new(0.0, Color::BLACK), Stop::new(1.0, Color::WHITE)],
        };
        assert_eq!(paint.sample(0.0, 0.0), Color::BLACK);
        assert_eq!(paint.sample(0.0, 10.0), Color::WHITE);
        let mid = paint.sample(0.0, 5.0);
        assert!(mid.r > 100 && mid.r < 155);
    }

    #[test]
    fn blur_preserves_flat_fill() {
        let mut s = Surface::new(16, 16);
        s.fill(Color::rgb(80, 120, 160));
        s.blur(4);
        let c = s.get(8, 8);
        assert!((i32::from(c.r) - 80).abs() <= 2);
        assert!((i32::from(c.g) - 120).abs() <= 2);
        assert!((i32::from(c.b) - 160).abs() <= 2);
    }

    #[test]
    fn nearest_draw_keeps_hard_edges() {
        let mut src = Surface::new(2, 1);
        src.put(0, 0, Color::BLACK);
        src.put(1, 0, Color::WHITE);
        let mut dst = Surface::new(8, 4);
        dst.draw_image(&src, 0.0, 0.0, 8.0, 4.0, false);
        assert_eq!(dst.get(1, 1), Color::BLACK);
        assert_eq!(dst.get(6, 1), Color::WHITE);
    }
}

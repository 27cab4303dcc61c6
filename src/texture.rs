//! Overlay Texture Compositor
//!
//! Rasterizes a sigil path plus its decorative framing into a square
//! texture consumed as an alpha/emissive mask by the external 3D layer.
//! All geometry is authored against the 2048 reference resolution and
//! scaled uniformly, so smaller render targets stay proportionate.
//! Identical inputs produce pixel-identical output.

use std::f64::consts::PI;

use crate::category::Category;
use crate::path::SigilPath;
use crate::raster::{Color, Paint, Stop, Surface, Transform};

/// Reference resolution the layer geometry is authored at.
pub const REFERENCE_RESOLUTION: u32 = 2048;

#[derive(Debug, Clone)]
pub struct TextureOptions {
    /// Output square edge in pixels.
    pub resolution: u32,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            resolution: REFERENCE_RESOLUTION,
        }
    }
}

/// Render the overlay texture for a sigil.
///
/// The category tag travels with the call for interface parity with the
/// dispatcher; the current layer stack paints every category with the same
/// laser-gold scheme.
pub fn create_overlay_texture(
    sigil: &SigilPath,
    category: Category,
    options: &TextureOptions,
) -> Surface {
    let res = options.resolution.max(64);
    let k = f64::from(res) / f64::from(REFERENCE_RESOLUTION);
    let c = f64::from(res) / 2.0;
    tracing::debug!(%category, resolution = res, "rendering overlay texture");

    let mut surface = Surface::new(res, res);

    // Laser beam gradient: white core through gold to a fading orange edge.
    // Used as the stroke paint for every layer.
    let beam = Paint::Radial {
        cx: c,
        cy: c,
        r0: 100.0 * k,
        r1: 900.0 * k,
        stops: vec![
            Stop::new(0.0, Color::WHITE),
            Stop::new(0.3, Color::from_hex("#ffd700")),
            Stop::new(1.0, Color::rgba(255, 140, 0, 26)),
        ],
    };

    // 1. Boundary rings: outer near-opaque, inner fainter.
    stroke_circle(&mut surface, c, 800.0 * k, 4.0 * k, &beam, 0.9);
    stroke_circle(&mut surface, c, 780.0 * k, 2.0 * k, &beam, 0.6);

    // 2. Hairline spirograph backdrop.
    let spiro = spirograph(c, 760.0 * k, 160.0 * k, 300.0 * k);
    surface.stroke_polyline(&spiro, (1.0 * k).max(0.75), &beam, 0.4);

    // 3. Hexagram core: two equilateral triangles, half a turn apart.
    stroke_polygon(&mut surface, c, 500.0 * k, 3, 0.0, 5.0 * k, &beam, 1.0);
    stroke_polygon(&mut surface, c, 500.0 * k, 3, PI, 5.0 * k, &beam, 1.0);

    // 4. 24 radial tick rays between the core and the rings.
    for i in 0..24 {
        let angle = f64::from(i) * PI * 2.0 / 24.0;
        let (inner, outer) = (560.0 * k, 720.0 * k);
        surface.stroke_segment(
            (c + angle.cos() * inner, c + angle.sin() * inner),
            (c + angle.cos() * outer, c + angle.sin() * outer),
            (1.0 * k).max(0.75),
            &beam,
            0.5,
        );
    }

    // 5. The sigil itself: scaled 2.4x (at reference) to center, stroked
    //    heavy with a strong glow pass underneath.
    let sigil_scale = 2.4 * k;
    let sigil_span = 200.0 * sigil_scale;
    let transform = Transform {
        scale: sigil_scale,
        tx: c - sigil_span / 2.0,
        ty: c - sigil_span / 2.0,
    };
    // Stroke width 6 is authored inside the 2.4x sigil space.
    let sigil_width = 6.0 * sigil_scale;
    let glow_color = Paint::Solid(Color::from_hex("#ffeb3b"));
    let mut glow = Surface::new(res, res);
    glow.stroke_path(sigil, transform, sigil_width, &glow_color, 1.0);
    glow.blur((50.0 * k) as u32);
    surface.composite_add(&glow, 0.9);
    surface.stroke_path(sigil, transform, sigil_width, &beam, 1.0);

    // 6. Center hotspot: small white disc with maximum glow.
    let mut hotspot = Surface::new(res, res);
    hotspot.fill_circle(c, c, 10.0 * k, &Paint::Solid(Color::WHITE), 1.0);
    let mut hotspot_glow = hotspot.clone();
    hotspot_glow.blur((80.0 * k) as u32);
    surface.composite_add(&hotspot_glow, 1.0);
    surface.composite_over(&hotspot, 1.0);

    surface
}

fn stroke_circle(surface: &mut Surface, center: f64, r: f64, width: f64, paint: &Paint, alpha: f64) {
    let steps = ((2.0 * PI * r) as usize).clamp(64, 4096);
    let pts: Vec<(f64, f64)> = (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64 * 2.0 * PI;
            (center + r * t.cos(), center + r * t.sin())
        })
        .collect();
    surface.stroke_polyline(&pts, width, paint, alpha);
}

fn stroke_polygon(
    surface: &mut Surface,
    center: f64,
    radius: f64,
    sides: usize,
    rotation: f64,
    width: f64,
    paint: &Paint,
    alpha: f64,
) {
    let pts: Vec<(f64, f64)> = (0..=sides)
        .map(|i| {
            let angle = i as f64 * 2.0 * PI / sides as f64 - PI / 2.0 + rotation;
            (center + angle.cos() * radius, center + angle.sin() * radius)
        })
        .collect();
    surface.stroke_polyline(&pts, width, paint, alpha);
}

/// Hypotrochoid trace: ten turns at a 0.05 radian step, the classic dense
/// mandala curve.
fn spirograph(center: f64, big_r: f64, small_r: f64, rho: f64) -> Vec<(f64, f64)> {
    let mut pts = Vec::new();
    let ratio = (big_r - small_r) / small_r;
    let mut t = 0.0;
    while t <= PI * 2.0 * 10.0 {
        pts.push((
            center + (big_r - small_r) * t.cos() + rho * (ratio * t).cos(),
            center + (big_r - small_r) * t.sin() - rho * (ratio * t).sin(),
        ));
        t += 0.05;
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate_sigil_path, DEFAULT_SIZE};

    fn small_options() -> TextureOptions {
        TextureOptions { resolution: 256 }
    }

    #[test]
    fn texture_is_pixel_deterministic() {
        let sigil = generate_sigil_path("Morning Star", Category::Career, DEFAULT_SIZE);
        let a = create_overlay_texture(&sigil, Category::Career, &small_options());
        let b = create_overlay_texture(&sigil, Category::Career, &small_options());
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn texture_honors_resolution() {
        let sigil = generate_sigil_path("s", Category::Love, DEFAULT_SIZE);
        let t = create_overlay_texture(&sigil, Category::Love, &small_options());
        assert_eq!((t.width(), t.height()), (256, 256));
    }

    #[test]
    fn texture_has_bright_center_and_dark_corner() {
        let sigil = generate_sigil_path("glow", Category::Family, DEFAULT_SIZE);
        let t = create_overlay_texture(&sigil, Category::Family, &small_options());
        let center = t.get(128, 128);
        assert!(center.a > 200, "hotspot missing: {center:?}");
        assert_eq!(t.get(2, 2).a, 0, "corner should stay empty");
    }
}

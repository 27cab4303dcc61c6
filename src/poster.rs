//! Poster Compositor
//!
//! Produces the final shareable 1080x1920 image: nebula background, the
//! captured 3D card in the top band, typography below, and the scannable
//! code card bottom-right. Layout is computed as pure data first so the
//! band invariants are testable without rendering.

use thiserror::Error;

use crate::blessing::BlessingData;
use crate::raster::{Color, Paint, Stop, Surface};
use crate::seed::RandomStream;
use crate::text::{self, Align};

pub const POSTER_WIDTH: u32 = 1080;
pub const POSTER_HEIGHT: u32 = 1920;

/// Share of the poster height reserved for the captured card image.
pub const CARD_BAND_RATIO: f64 = 0.65;

/// Destination the scannable code encodes.
pub const QR_DESTINATION: &str = "https://celestialforge.app";

const SIGNATURE_SUFFIX: &str = "| The Celestial Forge";

#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Captured card image could not be decoded: {0}")]
    CardDecode(String),

    #[error("Card image payload is not a data URL")]
    BadDataUrl,

    #[error("Scannable code construction failed: {0}")]
    Qr(String),

    #[error("Poster encoding failed: {0}")]
    Encode(String),
}

/// The computed poster geometry. Pure data; every invariant test runs
/// against this rather than against pixels.
#[derive(Debug, Clone)]
pub struct PosterLayout {
    /// Card image rectangle (x, y, w, h), aspect-fit inside the top band.
    pub card_rect: (f64, f64, f64, f64),
    /// Bottom boundary of the card band.
    pub card_band_bottom: f64,
    pub title_y: f64,
    pub title_px: u32,
    pub divider_y: f64,
    pub incantation_y: f64,
    pub incantation_px: u32,
    pub incantation_lines: Vec<String>,
    pub signature_y: f64,
    pub signature_px: u32,
    pub signature: String,
    /// Scannable-code rectangle (x, y, w, h).
    pub qr_rect: (f64, f64, f64, f64),
}

impl PosterLayout {
    /// Compute the full layout for a captured card of the given pixel size.
    pub fn compute(card_w: u32, card_h: u32, incantation: &str, username: &str) -> Self {
        let width = f64::from(POSTER_WIDTH);
        let height = f64::from(POSTER_HEIGHT);

        // Card band: top 65%, with a 100px top margin and 80px side padding.
        let band = height * CARD_BAND_RATIO;
        let padding = 80.0;
        let avail_w = width - padding * 2.0;
        let avail_h = band - 150.0;

        let img_ratio = f64::from(card_w.max(1)) / f64::from(card_h.max(1));
        let container_ratio = avail_w / avail_h;
        let (draw_w, draw_h) = if img_ratio > container_ratio {
            (avail_w, avail_w / img_ratio)
        } else {
            (avail_h * img_ratio, avail_h)
        };
        let draw_x = (width - draw_w) / 2.0;
        let draw_y = 100.0 + (avail_h - draw_h) / 2.0;

        let title_y = band + 50.0;
        let title_px = 72;
        let divider_y = title_y + 100.0;
        let incantation_y = divider_y + 60.0;

        let signature_y = height - 280.0;
        let signature = format!("Forged by {username} {SIGNATURE_SUFFIX}");
        let signature_px = text::shrink_to_fit(&signature, 32, POSTER_WIDTH - 100);

        // Wrap the quoted incantation, stepping the font down until the
        // block clears the signature line.
        let quoted = format!("\"{incantation}\"");
        let max_w = POSTER_WIDTH - 200;
        let mut incantation_px = 42;
        let mut incantation_lines = text::wrap_greedy(&quoted, incantation_px, max_w);
        while incantation_px > 16 {
            let line_height = f64::from(incantation_px) * 60.0 / 42.0;
            let bottom = incantation_y
                + line_height * (incantation_lines.len().saturating_sub(1)) as f64
                + f64::from(incantation_px);
            if bottom <= signature_y - 20.0 {
                break;
            }
            incantation_px -= 2;
            incantation_lines = text::wrap_greedy(&quoted, incantation_px, max_w);
        }

        let qr_size = 180.0;
        let qr_rect = (width - qr_size - 60.0, height - qr_size - 60.0, qr_size, qr_size);

        Self {
            card_rect: (draw_x, draw_y, draw_w, draw_h),
            card_band_bottom: band,
            title_y,
            title_px,
            divider_y,
            incantation_y,
            incantation_px,
            incantation_lines,
            signature_y,
            signature_px,
            signature,
            qr_rect,
        }
    }

    pub fn line_height(&self) -> f64 {
        f64::from(self.incantation_px) * 60.0 / 42.0
    }
}

/// Compose the poster from an already-decoded card capture.
pub fn compose_poster(
    card: &Surface,
    blessing: &BlessingData,
    recipient_label: &str,
    username: &str,
) -> Result<Surface, PosterError> {
    let width = f64::from(POSTER_WIDTH);
    let height = f64::from(POSTER_HEIGHT);
    let layout = PosterLayout::compute(card.width(), card.height(), &blessing.incantation, username);
    tracing::debug!(
        title = %blessing.title,
        lines = layout.incantation_lines.len(),
        "composing poster"
    );

    let mut poster = Surface::new(POSTER_WIDTH, POSTER_HEIGHT);

    // 1. Dark nebula background.
    poster.fill_radial(
        width / 2.0,
        height / 3.0,
        100.0,
        height,
        &[
            Stop::new(0.0, Color::from_hex("#1a103c")),
            Stop::new(0.4, Color::from_hex("#0f0520")),
            Stop::new(1.0, Color::BLACK),
        ],
    );

    // Star noise, seeded from the blessing identity so reruns match.
    let mut rand = RandomStream::from_str(&format!("{}:{recipient_label}:stars", blessing.title));
    for _ in 0..300 {
        let x = rand.next() * width;
        let y = rand.next() * height;
        let r = rand.next() * 1.5;
        let alpha = rand.next() * 0.8;
        poster.fill_circle(x, y, r, &Paint::Solid(Color::WHITE), alpha);
    }

    // 2. Card capture with a glow backdrop in the blessing's primary color.
    let (cx, cy, cw, ch) = layout.card_rect;
    let glow_tint = Color::from_hex(&blessing.gradient.0);
    let mut glow = Surface::new(POSTER_WIDTH, POSTER_HEIGHT);
    glow.draw_image(card, cx, cy, cw, ch, true);
    tint_preserving_alpha(&mut glow, glow_tint);
    glow.blur(50);
    poster.composite_add(&glow, 0.8);
    poster.draw_image(card, cx, cy, cw, ch, true);

    // 3. Title in the gold text gradient, uppercased.
    let title = blessing.title.to_uppercase();
    let title_px = text::shrink_to_fit(&title, layout.title_px, POSTER_WIDTH - 80);
    let title_paint = Paint::Vertical {
        y0: layout.title_y,
        y1: layout.title_y + 80.0,
        stops: vec![
            Stop::new(0.0, Color::from_hex("#fcd34d")),
            Stop::new(0.5, Color::from_hex("#fffbeb")),
            Stop::new(1.0, Color::from_hex("#d4af37")),
        ],
    };
    text::draw_text(
        &mut poster,
        &title,
        width / 2.0,
        layout.title_y,
        title_px,
        &title_paint,
        Align::Center,
        0.0,
    );

    // Divider.
    poster.stroke_segment(
        (width / 2.0 - 100.0, layout.divider_y),
        (width / 2.0 + 100.0, layout.divider_y),
        1.5,
        &Paint::Solid(Color::WHITE),
        0.3,
    );

    // Incantation, slanted.
    text::draw_lines(
        &mut poster,
        &layout.incantation_lines,
        width / 2.0,
        layout.incantation_y,
        layout.incantation_px,
        layout.line_height(),
        &Paint::Solid(Color::from_hex("#e2e8f0")),
        0.2,
    );

    // Signature, pre-shrunk by the layout.
    text::draw_text(
        &mut poster,
        &layout.signature,
        width / 2.0,
        layout.signature_y,
        layout.signature_px,
        &Paint::Solid(Color::from_hex("#94a3b8")),
        Align::Center,
        0.0,
    );

    // 4. Scannable code in a rounded white card with a gold border.
    draw_qr_card(&mut poster, &layout)?;

    Ok(poster)
}

fn tint_preserving_alpha(surface: &mut Surface, tint: Color) {
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let a = surface.get(x, y).a;
            if a > 0 {
                surface.put(x, y, tint.with_alpha(a));
            }
        }
    }
}

fn draw_qr_card(poster: &mut Surface, layout: &PosterLayout) -> Result<(), PosterError> {
    let (qx, qy, qw, qh) = layout.qr_rect;

    poster.fill_round_rect(qx - 10.0, qy - 10.0, qw + 20.0, qh + 20.0, 10.0, Color::WHITE);
    poster.stroke_round_rect(
        qx - 10.0,
        qy - 10.0,
        qw + 20.0,
        qh + 20.0,
        10.0,
        4.0,
        Color::from_hex("#d4af37"),
    );

    let code = qrcode::QrCode::new(QR_DESTINATION.as_bytes())
        .map_err(|e| PosterError::Qr(e.to_string()))?;
    let modules = code.width();
    let margin = 1usize;
    let cells = (modules + margin * 2) as u32;

    let mut qr_img = Surface::new(cells, cells);
    qr_img.fill(Color::WHITE);
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color == qrcode::Color::Dark {
            let mx = (i % modules + margin) as u32;
            let my = (i / modules + margin) as u32;
            qr_img.put(mx, my, Color::BLACK);
        }
    }

    // Smoothing disabled: nearest sampling keeps module edges sharp.
    poster.draw_image(&qr_img, qx, qy, qw, qh, false);

    text::draw_text(
        poster,
        "Scan to forge your own destiny",
        qx - 20.0,
        qy + qh / 2.0,
        24,
        &Paint::Solid(Color::from_hex("#cbd5e1")),
        Align::Right,
        0.0,
    );

    Ok(())
}

/// Encode a composed poster to JPEG bytes. Quality 95 balances gradient
/// banding against share-friendly file size.
pub fn encode_poster_jpeg(poster: &Surface, quality: u8) -> Result<Vec<u8>, PosterError> {
    // Flatten onto opaque RGB; the poster background is already opaque.
    let mut rgb = Vec::with_capacity((poster.width() * poster.height() * 3) as usize);
    for px in poster.data().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut out = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(
            &rgb,
            poster.width(),
            poster.height(),
            image::ColorType::Rgb8,
        )
        .map_err(|e| PosterError::Encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_INCANTATION: &str =
        "I command my destiny. My will is iron, my vision is clear, and success is the \
         inevitable result of my focus.";

    #[test]
    fn card_stays_in_top_band() {
        for (w, h) in [(512u32, 768u32), (1024, 512), (300, 300), (2048, 4096)] {
            let l = PosterLayout::compute(w, h, SAMPLE_INCANTATION, "Seeker");
            let (x, y, cw, ch) = l.card_rect;
            assert!(y >= 100.0, "{w}x{h}: card above top margin");
            assert!(y + ch <= l.card_band_bottom, "{w}x{h}: card exits band");
            assert!(x >= 0.0 && x + cw <= f64::from(POSTER_WIDTH));
            assert!(l.card_band_bottom == f64::from(POSTER_HEIGHT) * CARD_BAND_RATIO);
        }
    }

    #[test]
    fn card_aspect_ratio_is_preserved() {
        let l = PosterLayout::compute(400, 600, SAMPLE_INCANTATION, "Seeker");
        let (_, _, cw, ch) = l.card_rect;
        assert!((cw / ch - 400.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn text_block_never_reaches_signature() {
        let long = "An exceptionally verbose incantation that rambles on and on about \
                    destiny, fortune, the movement of the heavens, the alignment of every \
                    star, and the unwavering certainty of triumph in all mortal endeavors \
                    forever and ever without pause.";
        let l = PosterLayout::compute(512, 768, long, "Seeker");
        let bottom = l.incantation_y
            + l.line_height() * (l.incantation_lines.len() - 1) as f64
            + f64::from(l.incantation_px);
        assert!(l.incantation_y > l.divider_y);
        assert!(bottom <= l.signature_y - 20.0);
    }

    #[test]
    fn signature_shrinks_below_limit() {
        let long_name = "Maximilian Bartholomew Constantine Wellington the Third";
        let l = PosterLayout::compute(512, 768, SAMPLE_INCANTATION, long_name);
        assert!(crate::text::measure(&l.signature, l.signature_px) <= POSTER_WIDTH - 100);
    }

    #[test]
    fn qr_sits_inside_bottom_right_corner() {
        let l = PosterLayout::compute(512, 768, SAMPLE_INCANTATION, "Seeker");
        let (x, y, w, h) = l.qr_rect;
        assert_eq!((w, h), (180.0, 180.0));
        assert!(x + w + 60.0 == f64::from(POSTER_WIDTH));
        assert!(y + h + 60.0 == f64::from(POSTER_HEIGHT));
    }
}

//! Bitmap Typography
//!
//! Deterministic text metrics and rendering over the 8x8 bitmap glyph set.
//! Glyph cells are square; the advance is 3/4 of the cell because the
//! glyphs ink only the leftmost six columns. All measurement is integer
//! arithmetic so the greedy wrap and shrink logic are exactly reproducible.

use crate::raster::{Paint, Surface};
use font8x8::legacy::BASIC_LEGACY;

/// Horizontal anchoring of a drawn string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Advance of one character cell at a given font size.
fn advance(px: u32) -> u32 {
    (px * 3 / 4).max(1)
}

/// Measured width of a string at a given font size.
pub fn measure(text: &str, px: u32) -> u32 {
    text.chars().count() as u32 * advance(px)
}

/// Map a char to its glyph bitmap. Curly quotes fold to their ASCII
/// siblings; anything else unprintable renders as a blank cell.
fn glyph(ch: char) -> [u8; 8] {
    let folded = match ch {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201c}' | '\u{201d}' => '"',
        '\u{2013}' | '\u{2014}' => '-',
        c => c,
    };
    let code = folded as usize;
    if code < 128 {
        BASIC_LEGACY[code]
    } else {
        [0; 8]
    }
}

/// Draw a single line of text. `slant` shears the glyphs rightward at the
/// top (0.0 for upright, ~0.2 for the incantation italics). Returns the
/// measured line width.
pub fn draw_text(
    surface: &mut Surface,
    text: &str,
    x: f64,
    y: f64,
    px: u32,
    paint: &Paint,
    align: Align,
    slant: f64,
) -> u32 {
    let width = measure(text, px);
    let origin_x = match align {
        Align::Left => x,
        Align::Center => x - f64::from(width) / 2.0,
        Align::Right => x - f64::from(width),
    };

    let cell = px as i64;
    let mut pen_x = origin_x;
    for ch in text.chars() {
        let bitmap = glyph(ch);
        for ty in 0..cell {
            // Shear: rows nearer the top shift further right.
            let shear = slant * (f64::from((cell - 1 - ty) as u32));
            let sy = (ty * 8 / cell) as usize;
            let row = bitmap[sy];
            if row == 0 {
                continue;
            }
            for tx in 0..cell {
                let sx = (tx * 8 / cell) as usize;
                if (row >> sx) & 1 == 1 {
                    let dx = pen_x + tx as f64 + shear;
                    let dy = y + ty as f64;
                    if dx >= 0.0 && dy >= 0.0 {
                        let (ux, uy) = (dx as u32, dy as u32);
                        if ux < surface.width() && uy < surface.height() {
                            let c = paint.sample(dx, dy);
                            surface.blend(ux, uy, c, 1.0);
                        }
                    }
                }
            }
        }
        pen_x += f64::from(advance(px));
    }
    width
}

/// Draw several lines centered on `x`, stacked at `line_height`.
pub fn draw_lines(
    surface: &mut Surface,
    lines: &[String],
    x: f64,
    y: f64,
    px: u32,
    line_height: f64,
    paint: &Paint,
    slant: f64,
) {
    for (i, line) in lines.iter().enumerate() {
        draw_text(
            surface,
            line,
            x,
            y + line_height * i as f64,
            px,
            paint,
            Align::Center,
            slant,
        );
    }
}

/// Greedy word wrap: words are appended to the current line until the next
/// word would push the measured width past `max_width`, then the line is
/// flushed. A single word wider than `max_width` is emitted alone,
/// unbroken.
pub fn wrap_greedy(text: &str, px: u32, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measure(&candidate, px) > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Shrink a font size until `text` fits `max_width`. Mirrors the signature
/// scaling of the poster: proportional, floored, never below 8px.
pub fn shrink_to_fit(text: &str, px: u32, max_width: u32) -> u32 {
    let w = measure(text, px);
    if w <= max_width {
        px
    } else {
        ((px * max_width) / w).max(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Color;

    #[test]
    fn measure_scales_linearly() {
        assert_eq!(measure("abcd", 32), 4 * 24);
        assert_eq!(measure("", 32), 0);
    }

    #[test]
    fn wrap_never_exceeds_max_width() {
        let text = "I command my destiny. My will is iron, my vision is clear, \
                    and success is the inevitable result of my focus.";
        let px = 42;
        let max = 880;
        for line in wrap_greedy(text, px, max) {
            let words = line.split(' ').count();
            assert!(
                measure(&line, px) <= max || words == 1,
                "line too wide: {line:?}"
            );
        }
    }

    #[test]
    fn overwide_word_emitted_alone() {
        let lines = wrap_greedy("tiny Supercalifragilisticexpialidocious end", 42, 300);
        assert!(lines.contains(&"Supercalifragilisticexpialidocious".to_string()));
        for line in &lines {
            if line.split(' ').count() > 1 {
                assert!(measure(line, 42) <= 300);
            }
        }
    }

    #[test]
    fn wrap_preserves_every_word() {
        let text = "one two three four five six seven";
        let rejoined = wrap_greedy(text, 32, 200).join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn shrink_reaches_target() {
        let long = "Forged by Maximilian Bartholomew Constantine III | The Celestial Forge";
        let shrunk = shrink_to_fit(long, 32, 980);
        assert!(measure(long, shrunk) <= 980);
        assert!(shrunk < 32);
    }

    #[test]
    fn draw_text_inks_pixels() {
        let mut s = Surface::new(64, 16);
        let w = draw_text(
            &mut s,
            "HI",
            2.0,
            2.0,
            8,
            &Paint::Solid(Color::WHITE),
            Align::Left,
            0.0,
        );
        assert_eq!(w, measure("HI", 8));
        let inked = (0..16u32)
            .flat_map(|y| (0..64u32).map(move |x| (x, y)))
            .filter(|&(x, y)| s.get(x, y).a > 0)
            .count();
        assert!(inked > 8, "expected glyph coverage, got {inked}");
    }
}

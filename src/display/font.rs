//! Bitmap glyphs for the intensity ramp
//!
//! 5x7 cells, one byte per row, bit 4 is the leftmost column.

use super::PixelBuffer;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

type Glyph = [u8; GLYPH_HEIGHT as usize];

/// Glyph bitmap for a character, or None if the font has no such glyph
pub fn get_glyph(c: char) -> Option<Glyph> {
    let glyph = match c {
        ' ' => [0; 7],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '~' => [0, 0, 0b01000, 0b10101, 0b00010, 0, 0],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        ';' => [0, 0b01100, 0b01100, 0, 0b01100, 0b00100, 0b01000],
        '=' => [0, 0, 0b11111, 0, 0b11111, 0, 0],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '*' => [0, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '$' => [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100],
        '@' => [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110],
        _ => return None,
    };
    Some(glyph)
}

/// Draw a character with its top-left corner at (x, y), each font pixel
/// blown up to a `scale` x `scale` block
pub fn draw_char_scaled(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    c: char,
    scale: u32,
    r: u8,
    g: u8,
    b: u8,
) {
    let Some(glyph) = get_glyph(c) else {
        return;
    };
    let step = scale as i32;

    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + col as i32 * step;
                let py = y + row as i32 * step;
                buffer.fill_rect(px, py, scale, scale, r, g, b);
            }
        }
    }
}

/// Draw a character centered on (cx, cy)
pub fn draw_char_centered(
    buffer: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    c: char,
    scale: u32,
    r: u8,
    g: u8,
    b: u8,
) {
    let x = cx - (GLYPH_WIDTH * scale / 2) as i32;
    let y = cy - (GLYPH_HEIGHT * scale / 2) as i32;
    draw_char_scaled(buffer, x, y, c, scale, r, g, b);
}

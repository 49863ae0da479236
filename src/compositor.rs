//! Compositor / Frame Driver
//!
//! Turns a sampled frame into pixels: one glyph per cell, all in the
//! frame's single hue, then steps the render state for the next frame.

use crate::display::{draw_char_centered, PixelBuffer};
use crate::torus::{FrameBuffers, RenderState, BLANK};
use crate::util::hsv_to_rgb;

/// Font pixels per glyph pixel
const GLYPH_SCALE: u32 = 2;

pub struct Compositor {
    cell_width: u32,
    cell_height: u32,
    background: (u8, u8, u8),
}

impl Compositor {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            background: (0, 0, 0),
        }
    }

    /// Glyph color for a hue in turns, at full saturation and value
    pub fn frame_color(hue: f32) -> (u8, u8, u8) {
        hsv_to_rgb(hue * 360.0, 1.0, 1.0)
    }

    /// Pixel center of a cell
    #[inline]
    pub fn cell_center(&self, col: usize, row: usize) -> (i32, i32) {
        (
            (col as u32 * self.cell_width + self.cell_width / 2) as i32,
            (row as u32 * self.cell_height + self.cell_height / 2) as i32,
        )
    }

    /// Draw every cell of `frame` into `buffer`, row by row
    pub fn draw(&self, frame: &FrameBuffers, hue: f32, buffer: &mut PixelBuffer) {
        let (r, g, b) = Self::frame_color(hue);
        let (bg_r, bg_g, bg_b) = self.background;
        buffer.clear(bg_r, bg_g, bg_b);

        for (row, glyphs) in frame.rows().enumerate() {
            for (col, &glyph) in glyphs.iter().enumerate() {
                if glyph == BLANK {
                    continue;
                }
                let (cx, cy) = self.cell_center(col, row);
                draw_char_centered(buffer, cx, cy, glyph, GLYPH_SCALE, r, g, b);
            }
        }
    }

    /// Draw the frame with the current hue, then advance rotation and hue
    pub fn compose(
        &self,
        frame: &FrameBuffers,
        state: &mut RenderState,
        buffer: &mut PixelBuffer,
    ) {
        self.draw(frame, state.hue, buffer);
        state.advance();
    }
}

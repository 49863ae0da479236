//! Luminance to glyph mapping

/// Luminance is scaled by this before truncating to a palette index
pub const LUMINANCE_SCALE: f32 = 8.0;

/// Ordered dim-to-bright glyph ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    glyphs: &'static [char],
}

impl Palette {
    /// Classic donut ramp
    pub const DEFAULT: Self = Self::new(&[
        '.', ',', '-', '~', ':', ';', '=', '!', '*', '#', '$', '@',
    ]);

    pub const fn new(glyphs: &'static [char]) -> Self {
        Self { glyphs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Palette slot for a luminance value, clamped to both ends of the ramp.
    /// NaN maps to the dimmest slot.
    #[inline]
    pub fn index_for(&self, luminance: f32) -> usize {
        let last = self.glyphs.len().saturating_sub(1) as i32;
        ((luminance * LUMINANCE_SCALE) as i32).clamp(0, last) as usize
    }

    /// Glyph for a luminance value; an empty palette draws nothing
    #[inline]
    pub fn glyph_for(&self, luminance: f32) -> char {
        if self.is_empty() {
            return super::BLANK;
        }
        self.glyphs[self.index_for(luminance)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

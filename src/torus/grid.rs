//! Per-frame cell buffers
//!
//! Depth and glyph planes addressed by (column, row). Every write goes
//! through a bounds check, so a projected cell that lands off-grid is
//! discarded instead of indexing past the end.

/// Glyph stored in a cell nothing has been drawn to
pub const BLANK: char = ' ';

/// Result of offering one sample to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plot {
    /// Sample was nearer than anything in the cell and replaced it
    Drawn,
    /// Cell already holds an equal or nearer sample
    Occluded,
    /// Cell lies outside the grid
    Clipped,
}

/// Depth + glyph buffers for one frame
///
/// Depth holds the largest `1/z` written so far; 0.0 means empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffers {
    width: usize,
    height: usize,
    depth: Vec<f32>,
    glyphs: Vec<char>,
}

impl FrameBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            depth: vec![0.0; cells],
            glyphs: vec![BLANK; cells],
        }
    }

    /// Linear index for (col, row), or None if off-grid
    #[inline]
    pub fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(col + self.width * row)
    }

    /// Forget everything drawn last frame
    pub fn reset(&mut self) {
        self.depth.fill(0.0);
        self.glyphs.fill(BLANK);
    }

    /// Nearest-wins write. Ties keep the first writer.
    #[inline]
    pub fn plot(&mut self, col: i32, row: i32, ooz: f32, glyph: char) -> Plot {
        let Some(idx) = self.index(col, row) else {
            return Plot::Clipped;
        };
        if ooz > self.depth[idx] {
            self.depth[idx] = ooz;
            self.glyphs[idx] = glyph;
            Plot::Drawn
        } else {
            Plot::Occluded
        }
    }

    #[cfg(test)]
    pub fn depth_at(&self, col: i32, row: i32) -> Option<f32> {
        self.index(col, row).map(|idx| self.depth[idx])
    }

    #[cfg(test)]
    pub fn glyph_at(&self, col: i32, row: i32) -> Option<char> {
        self.index(col, row).map(|idx| self.glyphs[idx])
    }

    #[cfg(test)]
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    #[cfg(test)]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Glyph rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.glyphs.chunks_exact(self.width.max(1))
    }

    /// Count of cells holding a sample
    pub fn filled(&self) -> usize {
        self.depth.iter().filter(|&&d| d > 0.0).count()
    }
}

//! Torus Surface Sampler & Projector
//!
//! Walks the torus's two angles, rotates every surface point into the
//! frame's orientation, projects it onto the cell grid and keeps the
//! nearest sample per cell. The glyph for a sample comes from how
//! directly its normal faces the light.

mod grid;
mod palette;

pub use grid::{FrameBuffers, Plot, BLANK};
pub use palette::Palette;

use std::f32::consts::TAU;

use crate::math3d::{project, Orientation, Vec3};

/// Tube (cross-section) radius, R1
pub const TUBE_RADIUS: f32 = 10.0;
/// Distance from torus center to tube center, R2
pub const RING_RADIUS: f32 = 20.0;
/// Distance from viewer to torus center, K2
pub const CAMERA_DISTANCE: f32 = 200.0;
/// Angular step around the tube (theta)
pub const THETA_STEP: f32 = 0.10;
/// Angular step around the ring (phi)
pub const PHI_STEP: f32 = 0.03;

/// Per-frame rotation increments
pub const A_STEP: f32 = 0.15;
pub const B_STEP: f32 = 0.035;
/// Per-frame hue increment, in turns
pub const HUE_STEP: f32 = 0.005;

/// Light direction; `normal · LIGHT` is the luminance
const LIGHT: Vec3 = Vec3::new(0.0, 1.0, -1.0);

// ============================================================================
// Geometry
// ============================================================================

/// Torus dimensions and sampling density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusShape {
    pub tube_radius: f32,
    pub ring_radius: f32,
    pub camera_distance: f32,
    pub theta_step: f32,
    pub phi_step: f32,
}

impl Default for TorusShape {
    fn default() -> Self {
        Self {
            tube_radius: TUBE_RADIUS,
            ring_radius: RING_RADIUS,
            camera_distance: CAMERA_DISTANCE,
            theta_step: THETA_STEP,
            phi_step: PHI_STEP,
        }
    }
}

/// One projected surface point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub col: i32,
    pub row: i32,
    /// One over z; larger is nearer
    pub ooz: f32,
    /// Roughly in [-sqrt(2), sqrt(2)]
    pub luminance: f32,
}

/// Torus shape bound to a grid, with the projection scale and the
/// angle tables computed once
#[derive(Debug, Clone)]
pub struct TorusGeometry {
    shape: TorusShape,
    scale: f32,
    half_width: f32,
    half_height: f32,
    tube_angles: Vec<(f32, f32)>,
    ring_angles: Vec<(f32, f32)>,
}

/// (sin, cos) for `0, step, 2*step, ...` up to one full turn
fn angle_table(step: f32) -> Vec<(f32, f32)> {
    debug_assert!(step > 0.0, "angle step must be positive");
    let count = (TAU / step).ceil() as usize;
    (0..count).map(|i| (i as f32 * step).sin_cos()).collect()
}

impl TorusGeometry {
    pub fn new(shape: TorusShape, grid_width: usize, grid_height: usize) -> Self {
        // Fit the torus to 3/8 of the grid height at its widest
        let scale = grid_height as f32 * shape.camera_distance * 3.0
            / (8.0 * (shape.tube_radius + shape.ring_radius));
        Self {
            shape,
            scale,
            half_width: grid_width as f32 / 2.0,
            half_height: grid_height as f32 / 2.0,
            tube_angles: angle_table(shape.theta_step),
            ring_angles: angle_table(shape.phi_step),
        }
    }

    /// Default torus fitted to a grid
    pub fn for_grid(grid_width: usize, grid_height: usize) -> Self {
        Self::new(TorusShape::default(), grid_width, grid_height)
    }

    pub fn shape(&self) -> &TorusShape {
        &self.shape
    }

    /// Projection scale, K1
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Samples taken per frame
    pub fn sample_count(&self) -> usize {
        self.tube_angles.len() * self.ring_angles.len()
    }

    #[inline]
    fn sample_at(
        &self,
        orientation: &Orientation,
        (sin_theta, cos_theta): (f32, f32),
        (sin_phi, cos_phi): (f32, f32),
    ) -> Option<Sample> {
        let cx = self.shape.ring_radius + self.shape.tube_radius * cos_theta;
        let cy = self.shape.tube_radius * sin_theta;

        let point = orientation.sweep(cx, cy, sin_phi, cos_phi)
            + Vec3::new(0.0, 0.0, self.shape.camera_distance);
        let (sx, sy, ooz) = project(point, self.scale, self.half_width, self.half_height)?;

        let normal = orientation.sweep(cos_theta, sin_theta, sin_phi, cos_phi);

        Some(Sample {
            col: sx as i32,
            row: sy as i32,
            ooz,
            luminance: normal.dot(&LIGHT),
        })
    }

    /// Project the surface point at (theta, phi) for the given state.
    /// None if the point falls behind the viewer.
    #[cfg(test)]
    pub fn sample(&self, state: &RenderState, theta: f32, phi: f32) -> Option<Sample> {
        self.sample_at(&state.orientation(), theta.sin_cos(), phi.sin_cos())
    }

    /// Every visible sample of one frame, theta-major
    pub fn samples(&self, state: &RenderState) -> impl Iterator<Item = Sample> + '_ {
        let orientation = state.orientation();
        self.tube_angles.iter().flat_map(move |&theta| {
            self.ring_angles
                .iter()
                .filter_map(move |&phi| self.sample_at(&orientation, theta, phi))
        })
    }
}

// ============================================================================
// Render state
// ============================================================================

/// Rotation and hue carried from one frame to the next
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderState {
    /// Tilt around X, radians in [0, 2pi)
    pub a: f32,
    /// Spin around Z, radians in [0, 2pi)
    pub b: f32,
    /// Hue in turns, [0, 1)
    pub hue: f32,
    /// Completed frames
    pub frame: u64,
}

impl RenderState {
    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.a, self.b)
    }

    /// Step rotation and hue by one frame.
    /// Angles wrap at a full turn so f32 precision does not decay over long runs.
    pub fn advance(&mut self) {
        self.a = (self.a + A_STEP).rem_euclid(TAU);
        self.b = (self.b + B_STEP).rem_euclid(TAU);
        self.hue = (self.hue + HUE_STEP).rem_euclid(1.0);
        self.frame += 1;
    }
}

// ============================================================================
// Sampler
// ============================================================================

/// Sample tallies for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub samples: usize,
    pub drawn: usize,
    pub occluded: usize,
    /// Off-grid or behind the viewer
    pub clipped: usize,
}

/// Fills a frame's depth and glyph buffers from the torus
pub struct Sampler {
    geometry: TorusGeometry,
    palette: Palette,
}

impl Sampler {
    pub fn new(geometry: TorusGeometry, palette: Palette) -> Self {
        Self { geometry, palette }
    }

    pub fn geometry(&self) -> &TorusGeometry {
        &self.geometry
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Reset `frame` and draw the torus as seen from `state` into it
    pub fn render(&self, state: &RenderState, frame: &mut FrameBuffers) -> FrameStats {
        frame.reset();

        let mut stats = FrameStats {
            samples: self.geometry.sample_count(),
            ..FrameStats::default()
        };

        for sample in self.geometry.samples(state) {
            let glyph = self.palette.glyph_for(sample.luminance);
            match frame.plot(sample.col, sample.row, sample.ooz, glyph) {
                Plot::Drawn => stats.drawn += 1,
                Plot::Occluded => stats.occluded += 1,
                Plot::Clipped => {},
            }
        }

        // Off-grid plus behind-the-viewer samples, which never reach the grid
        stats.clipped = stats.samples - stats.drawn - stats.occluded;
        stats
    }
}

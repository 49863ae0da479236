//! 3D Math Utilities for the Torus Pipeline
//!
//! Provides a minimal 3D vector, the per-frame torus orientation, and
//! perspective projection.

use std::ops::Add;

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Approximate equality check for floating point comparison
    #[cfg(test)]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Rotate around X axis
    #[cfg(test)]
    pub fn rotate_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around Y axis
    #[cfg(test)]
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Rotate around Z axis
    #[cfg(test)]
    pub fn rotate_z(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// Torus orientation for one frame: tilt `a` around X, spin `b` around Z.
///
/// The sines and cosines are taken once per frame; [`Orientation::sweep`]
/// then rotates a point of the tube's cross-section around the main ring
/// (by `-phi` around Y) and applies the frame rotation in a single
/// closed-form step. Equivalent to
/// `v.rotate_y(-phi).rotate_x(a).rotate_z(b)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    sin_a: f32,
    cos_a: f32,
    sin_b: f32,
    cos_b: f32,
}

impl Orientation {
    pub fn new(a: f32, b: f32) -> Self {
        let (sin_a, cos_a) = a.sin_cos();
        let (sin_b, cos_b) = b.sin_cos();
        Self {
            sin_a,
            cos_a,
            sin_b,
            cos_b,
        }
    }

    /// Sweep a point `(cx, cy, 0)` of the cross-section circle around the
    /// ring to angle `phi` (given as its sine and cosine), then rotate it
    /// into the frame's orientation.
    #[inline]
    pub fn sweep(&self, cx: f32, cy: f32, sin_phi: f32, cos_phi: f32) -> Vec3 {
        let Self {
            sin_a,
            cos_a,
            sin_b,
            cos_b,
        } = *self;
        Vec3 {
            x: cx * (cos_b * cos_phi + sin_a * sin_b * sin_phi) - cy * cos_a * sin_b,
            y: cx * (sin_b * cos_phi - sin_a * cos_b * sin_phi) + cy * cos_a * cos_b,
            z: cos_a * cx * sin_phi + cy * sin_a,
        }
    }
}

/// Project a 3D point to 2D screen coordinates
///
/// - `point`: The 3D point to project (already offset from the viewer)
/// - `scale`: Projection scale (distance from eye to projection plane)
/// - `cx`, `cy`: Screen center coordinates
///
/// Screen Y grows downward, so world Y is flipped.
/// Returns (screen_x, screen_y, one_over_z) or None if point is behind camera
#[inline]
pub fn project(point: Vec3, scale: f32, cx: f32, cy: f32) -> Option<(f32, f32, f32)> {
    if point.z <= 0.0 {
        return None;
    }
    let ooz = 1.0 / point.z;
    Some((cx + scale * ooz * point.x, cy - scale * ooz * point.y, ooz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-3;

    #[test]
    fn test_sweep_matches_axis_rotations() {
        for &(a, b) in &[(0.0, 0.0), (0.3, 1.2), (2.5, -0.7), (FRAC_PI_2, PI)] {
            let orientation = Orientation::new(a, b);
            for i in 0..16 {
                let phi = i as f32 * 0.4;
                let (sin_phi, cos_phi) = phi.sin_cos();
                let (cx, cy) = (27.0, -4.5);
                let expected = Vec3::new(cx, cy, 0.0)
                    .rotate_y(-phi)
                    .rotate_x(a)
                    .rotate_z(b);
                let got = orientation.sweep(cx, cy, sin_phi, cos_phi);
                assert!(
                    got.approx_eq(&expected, EPS),
                    "a={} b={} phi={}: {:?} != {:?}",
                    a,
                    b,
                    phi,
                    got,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_sweep_identity_at_rest() {
        let p = Orientation::new(0.0, 0.0).sweep(30.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vec3::new(30.0, 0.0, 0.0));
    }

    #[test]
    fn test_project_center() {
        let (x, y, ooz) = project(Vec3::new(0.0, 0.0, 200.0), 100.0, 20.0, 20.0).unwrap();
        assert_eq!((x, y), (20.0, 20.0));
        assert!((ooz - 0.005).abs() < 1e-7);
    }

    #[test]
    fn test_project_flips_y() {
        let (x, y, _) = project(Vec3::new(10.0, 10.0, 100.0), 100.0, 0.0, 0.0).unwrap();
        assert!((x - 10.0).abs() < EPS);
        assert!((y + 10.0).abs() < EPS);
    }

    #[test]
    fn test_project_behind_camera() {
        assert!(project(Vec3::new(1.0, 1.0, 0.0), 100.0, 0.0, 0.0).is_none());
        assert!(project(Vec3::new(1.0, 1.0, -5.0), 100.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_dot_and_add() {
        let v = Vec3::new(1.0, 2.0, 3.0) + Vec3::new(1.0, 0.0, -1.0);
        assert_eq!(v, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(v.dot(&Vec3::new(0.0, 1.0, -1.0)), 0.0);
        assert_eq!(v.dot(&Vec3::new(1.0, 1.0, 1.0)), 6.0);
    }
}

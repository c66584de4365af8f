// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal 3-D math: vectors, unit quaternions, rigid poses, and a
//! column-major 4×4 transform.
//!
//! This module covers the subset of 3-D math that vitrine actually needs
//! (ray/plane intersection, rigid poses with per-axis scale, world-space
//! composition and inversion) without pulling in a full linear-algebra crate.

use core::ops::{Add, Mul, Sub};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A 3-component `f64` vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a vector from components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product.
    #[inline]
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Squared Euclidean length.
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, rhs: Self) -> f64 {
        (self - rhs).length()
    }

    /// Returns a unit-length copy, or `None` if the length is (near) zero.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len < 1e-12 {
            return None;
        }
        Some(self * (1.0 / len))
    }

    /// Are all components [finite](f64::is_finite)?
    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A quaternion in (x, y, z, w) component order.
///
/// Orientation math assumes unit length; use [`normalize`](Self::normalize)
/// after accumulating products.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    /// X (i) component.
    pub x: f64,
    /// Y (j) component.
    pub y: f64,
    /// Z (k) component.
    pub z: f64,
    /// Scalar component.
    pub w: f64,
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a quaternion from components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a rotation of `radians` around the X axis.
    #[must_use]
    pub fn from_rotation_x(radians: f64) -> Self {
        let half = radians * 0.5;
        Self::new(half.sin(), 0.0, 0.0, half.cos())
    }

    /// Creates a rotation of `radians` around the Y axis.
    #[must_use]
    pub fn from_rotation_y(radians: f64) -> Self {
        let half = radians * 0.5;
        Self::new(0.0, half.sin(), 0.0, half.cos())
    }

    /// Creates a rotation of `radians` around the Z axis.
    #[must_use]
    pub fn from_rotation_z(radians: f64) -> Self {
        let half = radians * 0.5;
        Self::new(0.0, 0.0, half.sin(), half.cos())
    }

    /// Quaternion length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Returns a unit-length copy, or the identity if the length is (near)
    /// zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len < 1e-12 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Rotates a vector by this quaternion (assumed unit length).
    #[must_use]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + 2 * u × (u × v + w v), with u the vector part.
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }
}

impl Default for Quat {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product: `a * b` applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

/// A rigid pose: position plus orientation.
///
/// This is the transform type carried by compositor layers and controller
/// inputs. Scale lives in [`Transform3d`], not here.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Translation.
    pub position: Vec3,
    /// Rotation (unit quaternion).
    pub orientation: Quat,
}

impl Pose {
    /// The identity pose at the origin.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Creates a pose from position and orientation.
    #[inline]
    #[must_use]
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates a pure translation pose.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            orientation: Quat::IDENTITY,
        }
    }

    /// Converts this pose to a rotation-then-translation matrix.
    #[must_use]
    pub fn to_transform(self) -> Transform3d {
        let q = self.orientation;
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x * x2, y * y2, z * z2);
        let (xy, xz, yz) = (x * y2, x * z2, y * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        Transform3d::from_cols(
            [1.0 - (yy + zz), xy + wz, xz - wy, 0.0],
            [xy - wz, 1.0 - (xx + zz), yz + wx, 0.0],
            [xz + wy, yz - wx, 1.0 - (xx + yy), 0.0],
            [self.position.x, self.position.y, self.position.z, 1.0],
        )
    }

    /// Extracts the rigid pose from a transform, normalizing out any
    /// (positive) per-axis scale in the basis columns.
    #[must_use]
    pub fn from_transform(t: &Transform3d) -> Self {
        let c = &t.cols;
        let bx = Vec3::new(c[0][0], c[0][1], c[0][2])
            .normalize()
            .unwrap_or(Vec3::new(1.0, 0.0, 0.0));
        let by = Vec3::new(c[1][0], c[1][1], c[1][2])
            .normalize()
            .unwrap_or(Vec3::new(0.0, 1.0, 0.0));
        let bz = Vec3::new(c[2][0], c[2][1], c[2][2])
            .normalize()
            .unwrap_or(Vec3::new(0.0, 0.0, 1.0));

        // Shepperd's method over the scale-free rotation basis.
        let (r00, r10, r20) = (bx.x, bx.y, bx.z);
        let (r01, r11, r21) = (by.x, by.y, by.z);
        let (r02, r12, r22) = (bz.x, bz.y, bz.z);
        let trace = r00 + r11 + r22;

        let orientation = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quat::new((r21 - r12) / s, (r02 - r20) / s, (r10 - r01) / s, s * 0.25)
        } else if r00 > r11 && r00 > r22 {
            let s = (1.0 + r00 - r11 - r22).sqrt() * 2.0;
            Quat::new(s * 0.25, (r01 + r10) / s, (r02 + r20) / s, (r21 - r12) / s)
        } else if r11 > r22 {
            let s = (1.0 + r11 - r00 - r22).sqrt() * 2.0;
            Quat::new((r01 + r10) / s, s * 0.25, (r12 + r21) / s, (r02 - r20) / s)
        } else {
            let s = (1.0 + r22 - r00 - r11).sqrt() * 2.0;
            Quat::new((r02 + r20) / s, (r12 + r21) / s, s * 0.25, (r10 - r01) / s)
        };

        Self {
            position: Vec3::new(c[3][0], c[3][1], c[3][2]),
            orientation: orientation.normalize(),
        }
    }
}

/// A column-major 4×4 affine transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the memory layout
/// used by GPU APIs. The bottom row is always `[0, 0, 0, 1]` for the
/// constructors in this module.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a transform from four column arrays.
    #[inline]
    #[must_use]
    pub const fn from_cols(col0: [f64; 4], col1: [f64; 4], col2: [f64; 4], col3: [f64; 4]) -> Self {
        Self {
            cols: [col0, col1, col2, col3],
        }
    }

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 4] {
        self.cols[i]
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the X axis (radians).
    #[must_use]
    pub fn from_rotation_x(radians: f64) -> Self {
        #[cfg(feature = "std")]
        let (s, c) = radians.sin_cos();
        #[cfg(not(feature = "std"))]
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the Z axis (radians).
    #[must_use]
    pub fn from_rotation_z(radians: f64) -> Self {
        #[cfg(feature = "std")]
        let (s, c) = radians.sin_cos();
        #[cfg(not(feature = "std"))]
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Returns the translation column as a point.
    #[inline]
    #[must_use]
    pub const fn translation(&self) -> Vec3 {
        Vec3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    /// Transforms a point (applies rotation, scale, and translation).
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let c = &self.cols;
        Vec3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// Transforms a direction (rotation and scale only, no translation).
    #[must_use]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let c = &self.cols;
        Vec3::new(
            c[0][0] * v.x + c[1][0] * v.y + c[2][0] * v.z,
            c[0][1] * v.x + c[1][1] * v.y + c[2][1] * v.z,
            c[0][2] * v.x + c[1][2] * v.y + c[2][2] * v.z,
        )
    }

    /// Inverts this affine transform.
    ///
    /// Returns `None` if the upper-left 3×3 block is singular (e.g. a zero
    /// scale axis). The bottom row is assumed to be `[0, 0, 0, 1]`.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let c = &self.cols;
        let (a00, a01, a02) = (c[0][0], c[1][0], c[2][0]);
        let (a10, a11, a12) = (c[0][1], c[1][1], c[2][1]);
        let (a20, a21, a22) = (c[0][2], c[1][2], c[2][2]);

        let det = a00 * (a11 * a22 - a12 * a21) - a01 * (a10 * a22 - a12 * a20)
            + a02 * (a10 * a21 - a11 * a20);
        if det.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / det;

        let b00 = (a11 * a22 - a12 * a21) * inv;
        let b01 = (a02 * a21 - a01 * a22) * inv;
        let b02 = (a01 * a12 - a02 * a11) * inv;
        let b10 = (a12 * a20 - a10 * a22) * inv;
        let b11 = (a00 * a22 - a02 * a20) * inv;
        let b12 = (a02 * a10 - a00 * a12) * inv;
        let b20 = (a10 * a21 - a11 * a20) * inv;
        let b21 = (a01 * a20 - a00 * a21) * inv;
        let b22 = (a00 * a11 - a01 * a10) * inv;

        let t = self.translation();
        let tx = -(b00 * t.x + b01 * t.y + b02 * t.z);
        let ty = -(b10 * t.x + b11 * t.y + b12 * t.z);
        let tz = -(b20 * t.x + b21 * t.y + b22 * t.z);

        Some(Self::from_cols(
            [b00, b10, b20, 0.0],
            [b01, b11, b21, 0.0],
            [b02, b12, b22, 0.0],
            [tx, ty, tz, 1.0],
        ))
    }

    /// Is this transform [finite](f64::is_finite)?
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols
            .iter()
            .all(|col| col.iter().all(|v| v.is_finite()))
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn vec_approx(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform3d::default(), Transform3d::IDENTITY);
        assert_eq!(Pose::default().orientation, Quat::IDENTITY);
    }

    #[test]
    fn identity_multiply() {
        let t = Transform3d::from_translation(1.0, 2.0, 3.0);
        assert_eq!(Transform3d::IDENTITY * t, t);
        assert_eq!(t * Transform3d::IDENTITY, t);
    }

    #[test]
    fn translation_composition() {
        let a = Transform3d::from_translation(1.0, 0.0, 0.0);
        let b = Transform3d::from_translation(0.0, 2.0, 0.0);
        let c = a * b;
        assert_eq!(c.col(3), [1.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 8.0);
        assert_eq!(b - a, Vec3::new(3.0, 4.0, 5.0));
        assert!(approx((b - a).length(), 50.0_f64.sqrt()));
        assert!(approx(a.distance(b), (b - a).length()));
        assert_eq!(
            Vec3::new(1.0, 0.0, 0.0).cross(Vec3::new(0.0, 1.0, 0.0)),
            Vec3::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn vec3_normalize_zero_is_none() {
        assert!(Vec3::ZERO.normalize().is_none());
        let unit = Vec3::new(3.0, 0.0, 4.0).normalize().expect("nonzero");
        assert!(approx(unit.length(), 1.0));
    }

    #[test]
    fn quat_rotation_z_rotates_x_to_y() {
        let q = Quat::from_rotation_z(core::f64::consts::FRAC_PI_2);
        let v = q.rotate(Vec3::new(1.0, 0.0, 0.0));
        assert!(vec_approx(v, Vec3::new(0.0, 1.0, 0.0)), "got {v:?}");
    }

    #[test]
    fn quat_product_composes_angles() {
        let a = Quat::from_rotation_z(0.3);
        let b = Quat::from_rotation_z(0.5);
        let c = a * b;
        let d = Quat::from_rotation_z(0.8);
        assert!(approx(c.x, d.x) && approx(c.y, d.y) && approx(c.z, d.z) && approx(c.w, d.w));
    }

    #[test]
    fn pose_to_transform_matches_matrix_rotation() {
        let angle = 0.7;
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_z(angle));
        let t = pose.to_transform();
        let reference = Transform3d::from_translation(1.0, 2.0, 3.0)
            * Transform3d::from_rotation_z(angle);
        for j in 0..4 {
            for i in 0..4 {
                assert!(
                    approx(t.cols[j][i], reference.cols[j][i]),
                    "col {j} row {i}: {} vs {}",
                    t.cols[j][i],
                    reference.cols[j][i]
                );
            }
        }
    }

    #[test]
    fn pose_round_trips_through_transform() {
        let pose = Pose::new(
            Vec3::new(-0.4, 1.3, -2.75),
            (Quat::from_rotation_y(0.4) * Quat::from_rotation_z(1.1)).normalize(),
        );
        let back = Pose::from_transform(&pose.to_transform());
        assert!(vec_approx(back.position, pose.position));
        // q and -q encode the same rotation; compare via rotated basis vector.
        let v = Vec3::new(0.3, -0.2, 0.9);
        assert!(vec_approx(back.orientation.rotate(v), pose.orientation.rotate(v)));
    }

    #[test]
    fn from_transform_strips_scale() {
        let pose = Pose::new(Vec3::new(2.0, 0.5, -1.0), Quat::from_rotation_z(0.25));
        let scaled = pose.to_transform() * Transform3d::from_scale(3.0, 2.0, 1.0);
        let back = Pose::from_transform(&scaled);
        assert!(vec_approx(back.position, pose.position));
        let v = Vec3::new(1.0, 1.0, 1.0);
        assert!(vec_approx(back.orientation.rotate(v), pose.orientation.rotate(v)));
    }

    #[test]
    fn transform_point_applies_translation() {
        let t = Transform3d::from_translation(1.0, 2.0, 3.0);
        assert_eq!(
            t.transform_point(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(2.0, 3.0, 4.0)
        );
        assert_eq!(
            t.transform_vector(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn inverse_of_composite_undoes_it() {
        let t = Transform3d::from_translation(1.0, -2.0, 0.5)
            * Transform3d::from_rotation_z(0.6)
            * Transform3d::from_scale(2.0, 3.0, 1.5);
        let inv = t.inverse().expect("invertible");
        let p = Vec3::new(0.3, 0.7, -1.2);
        let round = inv.transform_point(t.transform_point(p));
        assert!(vec_approx(round, p), "got {round:?}");
    }

    #[test]
    fn inverse_of_singular_is_none() {
        let t = Transform3d::from_scale(1.0, 0.0, 1.0);
        assert!(t.inverse().is_none());
    }

    #[test]
    fn non_finite_detected() {
        let mut t = Transform3d::IDENTITY;
        assert!(t.is_finite());
        t.cols[2][1] = f64::NAN;
        assert!(!t.is_finite());
    }
}

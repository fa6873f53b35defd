//! # Math Foundation
//!
//! Double-precision vectors, homogeneous transforms and quaternions, backed
//! by `glam`, plus the plane and axis-pair frame helpers the builders share.
//!
//! Rotation follows the right-hand convention. Normalizing a near-zero
//! vector yields the zero vector instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use meshgen_kernel::math::{axis_angle, rotate, Vector3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let q = axis_angle(Vector3::Z, FRAC_PI_2);
//! let v = rotate(Vector3::X, q);
//! assert!((v - Vector3::Y).length() < 1e-12);
//! ```

mod axes;
mod plane;

pub use axes::{basis_matrix, AxisPair};
pub use plane::Plane;

use config::constants::NORMALIZE_EPSILON;
use glam::{DMat4, DQuat, DVec3};

/// Ordered triple of 64-bit floats.
pub type Vector3 = DVec3;

/// 4×4 homogeneous transform (column-major, column vectors).
pub type Matrix4 = DMat4;

/// Unit quaternion rotation.
pub type Quaternion = DQuat;

/// Unit vector in the direction of `v`, or zero when `v` is (nearly) zero.
#[inline]
pub fn normalize_or_zero(v: Vector3) -> Vector3 {
    let length = v.length();
    if length.is_finite() && length > NORMALIZE_EPSILON {
        v / length
    } else {
        Vector3::ZERO
    }
}

/// Quaternion rotating by `angle` radians about `axis`.
///
/// A zero axis yields the identity rotation.
pub fn axis_angle(axis: Vector3, angle: f64) -> Quaternion {
    let axis = normalize_or_zero(axis);
    if axis == Vector3::ZERO {
        return Quaternion::IDENTITY;
    }
    Quaternion::from_axis_angle(axis, angle)
}

/// Rotates `v` by `q`.
#[inline]
pub fn rotate(v: Vector3, q: Quaternion) -> Vector3 {
    q * v
}

/// Rotation by `angle` radians about `axis`, as a homogeneous matrix.
pub fn rotation_matrix(axis: Vector3, angle: f64) -> Matrix4 {
    Matrix4::from_quat(axis_angle(axis, angle))
}

/// Translation by `offset`.
#[inline]
pub fn translation_matrix(offset: Vector3) -> Matrix4 {
    Matrix4::from_translation(offset)
}

/// Point on the XY-plane circle of `radius` at `angle`, lifted to `z`.
#[inline]
pub(crate) fn polar(radius: f64, angle: f64, z: f64) -> Vector3 {
    Vector3::new(radius * angle.cos(), radius * angle.sin(), z)
}

//! # Math Primitives
//!
//! Vector, quaternion and matrix value types used by the editor, backed by
//! `glam`, plus the handful of geometric helpers the mesh engine needs.

pub use glam::{Mat4, Quat, Vec3};

/// A 3-D point or direction.
pub type Vector3D = Vec3;

/// A rotation.
pub type Quaternion = Quat;

/// A 4x4 affine transform.
pub type Matrix4x4 = Mat4;

/// Unnormalized normal of the triangle `a, b, c` (length is twice the area).
#[inline]
pub fn triangle_cross(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Unit normal of the triangle `a, b, c`, or zero for a collapsed triangle.
#[inline]
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    triangle_cross(a, b, c).normalize_or_zero()
}

/// Area of the triangle `a, b, c`.
#[inline]
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    triangle_cross(a, b, c).length() * 0.5
}

/// Average of a set of points; zero for an empty set.
pub fn centroid(points: impl IntoIterator<Item = Vec3>) -> Vec3 {
    let (sum, count) = points
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(sum, count), p| (sum + p, count + 1));
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

/// Componentwise linear interpolation.
#[inline]
pub fn lerp_vector(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from.lerp(to, t)
}

/// Spherical interpolation between two rotations.
#[inline]
pub fn slerp_rotation(from: Quat, to: Quat, t: f32) -> Quat {
    from.slerp(to, t)
}

/// Rotation as a 4x4 matrix.
#[inline]
pub fn rotation_matrix(rotation: Quat) -> Mat4 {
    Mat4::from_quat(rotation)
}

/// Rigid placement of an object: translation followed by rotation.
///
/// Scale is absent: items apply their scale only inside the
/// mesh draw call, so it never leaks into child coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a transform from its parts.
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// `translate(translation) * rotate(rotation)`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * rotation_matrix(self.rotation)
    }

    /// Composes this local transform under `parent`.
    pub fn under(&self, parent: Mat4) -> Mat4 {
        parent * self.to_matrix()
    }
}

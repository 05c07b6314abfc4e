/// Rotation state and the per-frame model transform
use nalgebra::{Matrix4, Rotation3, Vector3};

use crate::geometry::{Mesh, Vertex};

/// Rotation state around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub about_x: f32,
    pub about_y: f32,
    pub about_z: f32,
}

impl RotationState {
    pub fn new(about_x: f32, about_y: f32, about_z: f32) -> Self {
        Self {
            about_x,
            about_y,
            about_z,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in degrees). No wrapping is applied.
    #[must_use]
    pub fn rotated(self, dx: f32, dy: f32, dz: f32) -> Self {
        Self {
            about_x: self.about_x + dx,
            about_y: self.about_y + dy,
            about_z: self.about_z + dz,
        }
    }
}

/// Output surface dimensions in surface units (pixels for a canvas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Transform builder for the frame's model matrix
pub struct Transform;

impl Transform {
    /// Rotation about a principal axis, in degrees.
    fn axis_rotation(axis: Vector3<f32>, degrees: f32) -> Matrix4<f32> {
        Rotation3::new(axis * degrees.to_radians()).to_homogeneous()
    }

    /// Create a rotation matrix from a rotation state.
    ///
    /// Applied as X, then Y, then Z in the already-rotated frame:
    /// `Rx * Ry * Rz` acting on column vectors.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Self::axis_rotation(Vector3::x(), rotation.about_x);
        let ry = Self::axis_rotation(Vector3::y(), rotation.about_y);
        let rz = Self::axis_rotation(Vector3::z(), rotation.about_z);

        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Combined frame transform `T(center) * Rx * Ry * Rz`.
    pub fn frame_matrix(rotation: &RotationState, viewport: &Viewport) -> Matrix4<f32> {
        let (cx, cy) = viewport.center();
        Self::translation_matrix(cx, cy, 0.0) * Self::rotation_matrix(rotation)
    }
}

/// Apply the frame transform to every vertex of `mesh`.
///
/// The result has the same length and order as `mesh.vertices()`; the mesh
/// itself is left untouched.
pub fn transform_vertices(
    mesh: &Mesh,
    rotation: &RotationState,
    viewport: &Viewport,
) -> Vec<Vertex> {
    let matrix = Transform::frame_matrix(rotation, viewport);
    mesh.vertices()
        .iter()
        .map(|v| matrix.transform_point(v))
        .collect()
}

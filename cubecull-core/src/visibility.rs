/// Per-face visibility scoring
///
/// A face's score is the cosine between its outward normal and the direction
/// from its centroid to the view point: +1 faces the viewer, -1 faces away.
use nalgebra::{Point3, Vector3};

use crate::geometry::{Mesh, Vertex};

/// Score for one face, produced and discarded within a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceVisibility {
    pub score: f32,
    pub face_index: usize,
}

/// Unit normal of a quad from its first three corners.
///
/// The quad is assumed planar; the fourth corner is ignored. A degenerate
/// quad yields a NaN normal.
pub fn face_normal(corners: &[Vertex; 4]) -> Vector3<f32> {
    let edge1 = corners[1] - corners[0];
    let edge2 = corners[2] - corners[0];

    edge1.cross(&edge2).normalize()
}

/// Arithmetic mean of the four corners.
pub fn face_centroid(corners: &[Vertex; 4]) -> Point3<f32> {
    let sum = corners
        .iter()
        .fold(Vector3::zeros(), |acc, corner| acc + corner.coords);
    Point3::from(sum / corners.len() as f32)
}

/// Signed visibility of a transformed quad as seen from `view_point`.
///
/// Lies in `[-1, 1]` for non-degenerate quads. Zero-length normals or a
/// view point sitting on the centroid propagate as NaN.
pub fn visibility_score(corners: &[Vertex; 4], view_point: &Point3<f32>) -> f32 {
    let normal = face_normal(corners);
    let view = (view_point - face_centroid(corners)).normalize();

    normal.dot(&view)
}

/// Strict front-facing test: the face points at least partly toward the viewer.
pub fn is_face_visible(score: f32) -> bool {
    score > 0.0
}

/// Score every face of `mesh` against its transformed vertices.
///
/// Output is in face order; sorting is the compositor's job.
pub fn score_faces(
    mesh: &Mesh,
    transformed: &[Vertex],
    view_point: &Point3<f32>,
) -> Vec<FaceVisibility> {
    mesh.faces()
        .iter()
        .enumerate()
        .map(|(face_index, face)| FaceVisibility {
            score: visibility_score(&face.corners(transformed), view_point),
            face_index,
        })
        .collect()
}

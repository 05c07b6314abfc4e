/// Geometry primitives: vertices, quad faces, and the cube mesh
use nalgebra::Point3;

use crate::error::{CubeCullError, CubeCullResult};
use crate::params::DEFAULT_HALF_EXTENT;

/// A vertex is a bare position. Transformed copies are produced per frame.
pub type Vertex = Point3<f32>;

/// A planar quad given as four indices into the mesh's vertex list.
///
/// Winding is fixed at authoring time so that `(v1 - v0) x (v2 - v0)`
/// points along the outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 4],
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self {
            indices: [a, b, c, d],
        }
    }

    /// Gather this face's corners out of a (transformed) vertex buffer.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside `vertices`; meshes built through
    /// [`Mesh::try_new`] or [`Mesh::cube`] never trigger this.
    pub fn corners(&self, vertices: &[Vertex]) -> [Vertex; 4] {
        self.indices.map(|index| {
            assert!(
                index < vertices.len(),
                "face index {index} out of range for {} vertices",
                vertices.len()
            );
            vertices[index]
        })
    }
}

/// A fixed polyhedral solid. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, checking every face index against the vertex list.
    pub fn try_new(vertices: Vec<Vertex>, faces: Vec<Face>) -> CubeCullResult<Self> {
        if vertices.is_empty() {
            return Err(CubeCullError::EmptyMesh);
        }
        let vertex_count = vertices.len();
        for (face, quad) in faces.iter().enumerate() {
            if let Some(&index) = quad.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(CubeCullError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Create a cube centred on the origin with corners at `(±s, ±s, ±s)`.
    ///
    /// Face order: back (-z), front (+z), left (-x), right (+x),
    /// bottom (-y), top (+y). The compositor keys colours off this order.
    pub fn cube(half_extent: f32) -> Self {
        let s = half_extent;
        let vertices = vec![
            Point3::new(-s, -s, -s), // 0: left  bottom back
            Point3::new(s, -s, -s),  // 1: right bottom back
            Point3::new(s, s, -s),   // 2: right top    back
            Point3::new(-s, s, -s),  // 3: left  top    back
            Point3::new(-s, -s, s),  // 4: left  bottom front
            Point3::new(s, -s, s),   // 5: right bottom front
            Point3::new(s, s, s),    // 6: right top    front
            Point3::new(-s, s, s),   // 7: left  top    front
        ];

        let faces = vec![
            Face::new(0, 3, 2, 1), // back   (-z)
            Face::new(4, 5, 6, 7), // front  (+z)
            Face::new(0, 4, 7, 3), // left   (-x)
            Face::new(1, 2, 6, 5), // right  (+x)
            Face::new(0, 1, 5, 4), // bottom (-y)
            Face::new(3, 7, 6, 2), // top    (+y)
        ];

        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

impl Default for Mesh {
    fn default() -> Self {
        initialize()
    }
}

/// Build the solid the renderer starts with: the default-size cube.
pub fn initialize() -> Mesh {
    Mesh::cube(DEFAULT_HALF_EXTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube(100.0);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 6);
        for v in cube.vertices() {
            assert_relative_eq!(v.x.abs(), 100.0);
            assert_relative_eq!(v.y.abs(), 100.0);
            assert_relative_eq!(v.z.abs(), 100.0);
        }
    }

    #[test]
    fn test_cube_is_centred() {
        let cube = initialize();
        let sum = cube
            .vertices()
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.coords);
        assert_relative_eq!(sum.norm(), 0.0);
    }

    #[test]
    fn test_cube_winding_points_outward() {
        let cube = Mesh::cube(1.0);
        for face in cube.faces() {
            let [v0, v1, v2, v3] = face.corners(cube.vertices());
            let normal = (v1 - v0).cross(&(v2 - v0));
            let centre = (v0.coords + v1.coords + v2.coords + v3.coords) / 4.0;
            assert!(normal.dot(&centre) > 0.0, "face {face:?} winds inward");
        }
    }

    #[test]
    fn test_try_new_rejects_bad_index() {
        let vertices = vec![Point3::origin(); 3];
        let result = Mesh::try_new(vertices, vec![Face::new(0, 1, 2, 3)]);
        assert_eq!(
            result,
            Err(CubeCullError::FaceIndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn test_try_new_rejects_empty() {
        assert_eq!(
            Mesh::try_new(Vec::new(), Vec::new()),
            Err(CubeCullError::EmptyMesh)
        );
    }

    #[test]
    fn test_try_new_allows_faceless_mesh() {
        let mesh = Mesh::try_new(vec![Point3::origin()], Vec::new()).unwrap();
        assert!(mesh.faces().is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_corners_fail_fast() {
        let face = Face::new(0, 1, 2, 7);
        face.corners(&[Point3::origin(); 4]);
    }
}

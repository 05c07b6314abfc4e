/// Error types for mesh construction and configuration
use thiserror::Error;

/// Result type alias for fallible core operations.
pub type CubeCullResult<T> = Result<T, CubeCullError>;

/// Errors raised while building a mesh or validating parameters.
///
/// Per-frame work (transform, scoring, compositing) never returns these;
/// only construction and configuration are fallible.
#[derive(Debug, Error, PartialEq)]
pub enum CubeCullError {
    /// Mesh has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// A face refers to a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// Render or animation parameters are unusable.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl CubeCullError {
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CubeCullError::FaceIndexOutOfRange {
            face: 2,
            index: 9,
            vertex_count: 8,
        };
        let message = format!("{err}");
        assert!(message.contains("face 2"));
        assert!(message.contains("vertex 9"));

        let err = CubeCullError::invalid_params("thresholds reversed");
        assert!(format!("{err}").contains("thresholds reversed"));
    }
}

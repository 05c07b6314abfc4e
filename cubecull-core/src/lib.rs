/// CubeCull Core Library - per-frame hidden-surface pipeline
///
/// Transforms a fixed convex solid, scores each face by how directly it
/// faces a fixed view point, and composites faces back-to-front with
/// score-derived translucency. Hosts supply a `Surface` and drive
/// `render_frame`, `AnimationState::tick` and `apply_command`.

pub mod animation;
pub mod compositor;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod params;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use animation::{apply_command, apply_key, AnimationState, Command};
pub use compositor::{alpha, face_color, opacity, DrawCommand, Rgba, Surface};
pub use error::{CubeCullError, CubeCullResult};
pub use frame::{frame_commands, render_frame};
pub use geometry::{initialize, Face, Mesh, Vertex};
pub use params::{AnimationParams, RenderParams, VIEW_POINT};
pub use transform::{transform_vertices, RotationState, Transform, Viewport};
pub use visibility::{score_faces, visibility_score, FaceVisibility};

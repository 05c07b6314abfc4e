/// Render entry point: one call per redraw
use tracing::debug;

use crate::compositor::{compose, DrawCommand, Surface};
use crate::geometry::Mesh;
use crate::params::RenderParams;
use crate::transform::{transform_vertices, RotationState, Viewport};
use crate::visibility::score_faces;

/// Build the complete draw list for one frame: background, then faces
/// back-to-front.
pub fn frame_commands(
    mesh: &Mesh,
    rotation: &RotationState,
    viewport: &Viewport,
    params: &RenderParams,
) -> Vec<DrawCommand> {
    let transformed = transform_vertices(mesh, rotation, viewport);
    let scores = score_faces(mesh, &transformed, &params.view_point);

    let mut commands = vec![DrawCommand::Background(params.background)];
    commands.extend(compose(mesh, &transformed, &scores, params));

    debug!(
        faces = mesh.faces().len(),
        drawn = commands.len() - 1,
        about_x = rotation.about_x,
        about_y = rotation.about_y,
        about_z = rotation.about_z,
        "frame composed"
    );

    commands
}

/// Transform, score and composite `mesh` onto `surface`.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    mesh: &Mesh,
    rotation: &RotationState,
    viewport: &Viewport,
    params: &RenderParams,
) {
    for command in frame_commands(mesh, rotation, viewport, params) {
        surface.execute(&command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_comes_first() {
        let mesh = Mesh::cube(100.0);
        let commands = frame_commands(
            &mesh,
            &RotationState::zero(),
            &Viewport::default(),
            &RenderParams::default(),
        );
        assert!(matches!(commands[0], DrawCommand::Background(_)));
        assert!(commands[1..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Polygon { .. })));
    }
}

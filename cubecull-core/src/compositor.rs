/// Painter's-algorithm face compositor
///
/// Faces are drawn from least to most visible so translucent faces blend in
/// the right order without a depth buffer. Opacity ramps linearly between the
/// hidden and opaque thresholds of [`RenderParams`].
use nalgebra::Point2;
use tracing::{trace, warn};

use crate::geometry::{Mesh, Vertex};
use crate::params::RenderParams;
use crate::visibility::FaceVisibility;

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const GRAY: Rgba = Rgba::opaque(128, 128, 128);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

const FACE_PALETTE: [Rgba; 6] = [
    Rgba::opaque(255, 0, 0),   // red
    Rgba::opaque(0, 255, 0),   // green
    Rgba::opaque(0, 0, 255),   // blue
    Rgba::opaque(255, 255, 0), // yellow
    Rgba::opaque(0, 255, 255), // cyan
    Rgba::opaque(255, 0, 255), // magenta
];

/// Base colour for a face. Indices past the palette fall back to gray.
pub fn face_color(face_index: usize) -> Rgba {
    FACE_PALETTE
        .get(face_index)
        .copied()
        .unwrap_or(Rgba::GRAY)
}

/// Opacity in `[0, 1]` for a visibility score.
pub fn opacity(score: f32, params: &RenderParams) -> f32 {
    let (lo, hi) = (params.hidden_threshold, params.opaque_threshold);
    if score <= lo {
        0.0
    } else if score >= hi {
        1.0
    } else {
        ((score - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

/// Opacity as an 8-bit alpha channel. Truncates toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn alpha(score: f32, params: &RenderParams) -> u8 {
    (opacity(score, params) * 255.0) as u8
}

/// One step of a frame's draw list.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Background(Rgba),
    /// Fill a closed polygon, then stroke its outline.
    Polygon {
        face_index: usize,
        score: f32,
        points: Vec<Point2<f32>>,
        fill: Rgba,
        outline: Rgba,
    },
}

/// 2D vector-graphics target that a host adapter provides.
pub trait Surface {
    /// Fill the whole surface with `color`.
    fn fill_background(&mut self, color: Rgba);

    /// Fill the closed path through `points` with `fill` and stroke it with
    /// `outline`. Points are in path order; the path closes back to the first.
    fn draw_polygon(&mut self, points: &[Point2<f32>], fill: Rgba, outline: Rgba);

    /// Forward a draw command to the primitive methods.
    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Background(color) => self.fill_background(*color),
            DrawCommand::Polygon {
                points,
                fill,
                outline,
                ..
            } => self.draw_polygon(points, *fill, *outline),
        }
    }
}

/// Order faces back-to-front and build the polygon draw list.
///
/// Faces scoring at or below the hidden threshold, and faces with a
/// non-finite score, produce no command.
pub fn compose(
    mesh: &Mesh,
    transformed: &[Vertex],
    scores: &[FaceVisibility],
    params: &RenderParams,
) -> Vec<DrawCommand> {
    let mut ordered = scores.to_vec();
    ordered.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut commands = Vec::with_capacity(ordered.len());
    for FaceVisibility { score, face_index } in ordered {
        if !score.is_finite() {
            warn!(face_index, "skipping face with non-finite visibility score");
            continue;
        }
        if score <= params.hidden_threshold {
            trace!(face_index, score, "face culled");
            continue;
        }

        let corners = mesh.faces()[face_index].corners(transformed);
        let points = corners.iter().map(|v| Point2::new(v.x, v.y)).collect();

        commands.push(DrawCommand::Polygon {
            face_index,
            score,
            points,
            fill: face_color(face_index).with_alpha(alpha(score, params)),
            outline: params.outline,
        });
    }

    commands
}

/// Draw `scores` onto `surface` in painter's order.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    mesh: &Mesh,
    transformed: &[Vertex],
    scores: &[FaceVisibility],
    params: &RenderParams,
) {
    for command in compose(mesh, transformed, scores, params) {
        surface.execute(&command);
    }
}

//! Property-based tests for the per-frame pipeline.
//!
//! Run with: cargo test -p cubecull-core -- proptest

use cubecull_core::compositor::compose;
use cubecull_core::{
    opacity, score_faces, transform_vertices, visibility_score, DrawCommand, Mesh, RenderParams,
    RotationState, Vertex, Viewport, VIEW_POINT,
};
use nalgebra::{Point3, Rotation3, UnitQuaternion, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_angle() -> impl Strategy<Value = f32> {
    -720.0..720.0f32
}

fn arb_rotation() -> impl Strategy<Value = RotationState> {
    (arb_angle(), arb_angle(), arb_angle()).prop_map(|(x, y, z)| RotationState::new(x, y, z))
}

fn arb_offset() -> impl Strategy<Value = Vector3<f32>> {
    prop::array::uniform3(-200.0..200.0f32).prop_map(Vector3::from)
}

/// A planar, non-degenerate rectangle with arbitrary orientation and size,
/// centred near the origin.
fn arb_quad() -> impl Strategy<Value = [Vertex; 4]> {
    (
        prop::array::uniform3(-3.0..3.0f32),
        5.0..150.0f32,
        5.0..150.0f32,
        arb_offset(),
    )
        .prop_map(|(axis_angle, w, h, centre)| {
            let rotation = Rotation3::new(Vector3::from(axis_angle));
            [(-w, -h), (w, -h), (w, h), (-w, h)].map(|(x, y)| {
                Point3::from(rotation * Vector3::new(x, y, 0.0) + centre)
            })
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_transform_preserves_vertex_count(rotation in arb_rotation()) {
        let mesh = Mesh::cube(100.0);
        let transformed = transform_vertices(&mesh, &rotation, &Viewport::default());
        prop_assert_eq!(transformed.len(), mesh.vertices().len());
    }

    #[test]
    fn proptest_transform_is_rigid_and_ordered(rotation in arb_rotation()) {
        // Pairwise distances survive only if both shape and order do.
        let mesh = Mesh::cube(100.0);
        let original = mesh.vertices();
        let transformed = transform_vertices(&mesh, &rotation, &Viewport::default());
        for i in 0..original.len() {
            for j in (i + 1)..original.len() {
                let before = (original[i] - original[j]).norm();
                let after = (transformed[i] - transformed[j]).norm();
                prop_assert!((before - after).abs() < 1e-2, "pair ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn proptest_transform_matches_quaternion_composition(rotation in arb_rotation()) {
        let mesh = Mesh::cube(100.0);
        let viewport = Viewport::default();
        let (cx, cy) = viewport.center();
        let expected_rotation =
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), rotation.about_x.to_radians())
                * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), rotation.about_y.to_radians())
                * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), rotation.about_z.to_radians());

        let transformed = transform_vertices(&mesh, &rotation, &viewport);
        for (index, (original, moved)) in mesh.vertices().iter().zip(&transformed).enumerate() {
            let expected = expected_rotation * original + Vector3::new(cx, cy, 0.0);
            prop_assert!((moved - expected).norm() < 1e-2, "vertex {} moved to {:?}", index, moved);
        }
    }

    #[test]
    fn proptest_score_in_unit_range(quad in arb_quad()) {
        let score = visibility_score(&quad, &VIEW_POINT);
        prop_assert!((-1.0 - 1e-5..=1.0 + 1e-5).contains(&score), "score {}", score);
    }

    #[test]
    fn proptest_score_translation_invariant(quad in arb_quad(), offset in arb_offset()) {
        // Shift the quad and the view point together.
        let shifted = quad.map(|v| v + offset);
        let view_point = VIEW_POINT + offset;
        let a = visibility_score(&quad, &VIEW_POINT);
        let b = visibility_score(&shifted, &view_point);
        prop_assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
    }

    #[test]
    fn proptest_opacity_monotonic(a in -2.0..2.0f32, b in -2.0..2.0f32) {
        let params = RenderParams::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(opacity(lo, &params) <= opacity(hi, &params));
    }

    #[test]
    fn proptest_opacity_saturates(score in -2.0..2.0f32) {
        let params = RenderParams::default();
        let value = opacity(score, &params);
        prop_assert!((0.0..=1.0).contains(&value));
        if score < -0.3 {
            prop_assert_eq!(value, 0.0);
        }
        if score > 0.3 {
            prop_assert_eq!(value, 1.0);
        }
    }

    #[test]
    fn proptest_draw_order_back_to_front(rotation in arb_rotation()) {
        let mesh = Mesh::cube(100.0);
        let params = RenderParams::default();
        let transformed = transform_vertices(&mesh, &rotation, &Viewport::default());
        let scores = score_faces(&mesh, &transformed, &params.view_point);

        let drawn: Vec<f32> = compose(&mesh, &transformed, &scores, &params)
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::Polygon { score, .. } => Some(score),
                DrawCommand::Background(_) => None,
            })
            .collect();

        prop_assert!(drawn.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert!(drawn.iter().all(|&score| score > params.hidden_threshold));

        let expected = scores.iter().filter(|s| s.score > params.hidden_threshold).count();
        prop_assert_eq!(drawn.len(), expected);
    }
}

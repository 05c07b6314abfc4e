/// Rendering and animation parameters
use std::time::Duration;

use nalgebra::Point3;

use crate::compositor::Rgba;
use crate::error::{CubeCullError, CubeCullResult};

/// Fixed viewer location in screen-relative space. Never rotated.
pub const VIEW_POINT: Point3<f32> = Point3::new(0.0, 0.0, 1000.0);

/// Half-extent of the default cube.
pub const DEFAULT_HALF_EXTENT: f32 = 100.0;

/// Parameters consumed by the per-frame pipeline.
///
/// ```
/// use cubecull_core::RenderParams;
///
/// let params = RenderParams::default().thresholds(-0.5, 0.5);
/// assert!(params.validate().is_ok());
///
/// let reversed = RenderParams::default().thresholds(0.5, -0.5);
/// assert!(reversed.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Point the visibility score looks toward.
    pub view_point: Point3<f32>,
    /// Scores at or below this are not drawn; opacity is 0 here.
    pub hidden_threshold: f32,
    /// Scores at or above this are fully opaque.
    pub opaque_threshold: f32,
    pub background: Rgba,
    pub outline: Rgba,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            view_point: VIEW_POINT,
            hidden_threshold: -0.3,
            opaque_threshold: 0.3,
            background: Rgba::WHITE,
            outline: Rgba::BLACK,
        }
    }
}

impl RenderParams {
    /// Set the hidden/opaque thresholds of the opacity ramp.
    #[must_use]
    pub const fn thresholds(mut self, hidden: f32, opaque: f32) -> Self {
        self.hidden_threshold = hidden;
        self.opaque_threshold = opaque;
        self
    }

    /// Move the view point.
    #[must_use]
    pub const fn view_point(mut self, view_point: Point3<f32>) -> Self {
        self.view_point = view_point;
        self
    }

    pub fn validate(&self) -> CubeCullResult<()> {
        if !self.hidden_threshold.is_finite() || !self.opaque_threshold.is_finite() {
            return Err(CubeCullError::invalid_params("thresholds must be finite"));
        }
        if self.hidden_threshold >= self.opaque_threshold {
            return Err(CubeCullError::invalid_params(format!(
                "hidden threshold {} must be below opaque threshold {}",
                self.hidden_threshold, self.opaque_threshold
            )));
        }
        if !self.view_point.coords.iter().all(|c| c.is_finite()) {
            return Err(CubeCullError::invalid_params("view point must be finite"));
        }
        Ok(())
    }
}

/// Parameters for the animation driver and the mesh it spins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    /// Period between automatic ticks.
    pub tick_interval: Duration,
    /// Degrees added to `about_y` per tick.
    pub auto_step: f32,
    /// Degrees applied per manual key press.
    pub manual_step: f32,
    /// Half-extent of the cube built at startup.
    pub half_extent: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(30),
            auto_step: 1.0,
            manual_step: 5.0,
            half_extent: DEFAULT_HALF_EXTENT,
        }
    }
}

impl AnimationParams {
    #[must_use]
    pub const fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    #[must_use]
    pub const fn half_extent(mut self, half_extent: f32) -> Self {
        self.half_extent = half_extent;
        self
    }

    pub fn validate(&self) -> CubeCullResult<()> {
        if self.tick_interval.is_zero() {
            return Err(CubeCullError::invalid_params("tick interval must be non-zero"));
        }
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(CubeCullError::invalid_params(format!(
                "half extent must be positive, got {}",
                self.half_extent
            )));
        }
        if !(self.auto_step.is_finite() && self.manual_step.is_finite()) {
            return Err(CubeCullError::invalid_params("rotation steps must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = RenderParams::default();
        assert!((params.hidden_threshold + 0.3).abs() < f32::EPSILON);
        assert!((params.opaque_threshold - 0.3).abs() < f32::EPSILON);
        assert_eq!(params.view_point, Point3::new(0.0, 0.0, 1000.0));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_thresholds() {
        assert!(RenderParams::default().thresholds(0.2, 0.2).validate().is_err());
        assert!(RenderParams::default()
            .thresholds(f32::NAN, 0.3)
            .validate()
            .is_err());
    }

    #[test]
    fn test_animation_defaults() {
        let params = AnimationParams::default();
        assert_eq!(params.tick_interval, Duration::from_millis(30));
        assert!((params.auto_step - 1.0).abs() < f32::EPSILON);
        assert!((params.manual_step - 5.0).abs() < f32::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_animation_validation() {
        let zero_tick = AnimationParams::default().tick_interval(Duration::ZERO);
        assert!(zero_tick.validate().is_err());

        let flat = AnimationParams::default().half_extent(0.0);
        assert!(matches!(
            flat.validate(),
            Err(CubeCullError::InvalidParams(_))
        ));
    }
}

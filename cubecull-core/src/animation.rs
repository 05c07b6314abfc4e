/// Animation driver policy: timer ticks and the key table
///
/// Hosts own the timer and the input devices. They forward ticks and key
/// presses here and redraw with whatever state comes back.
use tracing::info;

use crate::params::AnimationParams;
use crate::transform::RotationState;

/// Everything the host needs to carry between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub rotation: RotationState,
    /// Whether automatic ticks advance the rotation.
    pub running: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            rotation: RotationState::zero(),
            running: true,
        }
    }
}

impl AnimationState {
    /// Advance one timer tick. A paused state is returned unchanged.
    #[must_use]
    pub fn tick(self, params: &AnimationParams) -> Self {
        if !self.running {
            return self;
        }
        Self {
            rotation: advance_y(self.rotation, params.auto_step),
            ..self
        }
    }
}

/// Spin about Y by `step` degrees, snapping back to 0 once past a full turn.
pub fn advance_y(rotation: RotationState, step: f32) -> RotationState {
    let mut about_y = rotation.about_y + step;
    if about_y >= 360.0 {
        about_y = 0.0;
    }
    RotationState {
        about_y,
        ..rotation
    }
}

/// A discrete user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// W: about X, negative.
    PitchUp,
    /// S: about X, positive.
    PitchDown,
    /// A: about Y, negative.
    YawLeft,
    /// D: about Y, positive.
    YawRight,
    /// Q: about Z, negative.
    RollLeft,
    /// E: about Z, positive.
    RollRight,
    /// Space: pause or resume automatic ticks.
    ToggleAnimation,
    /// R: zero all three angles.
    Reset,
}

impl Command {
    /// Look up the command bound to `key`. Case-insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key.to_ascii_lowercase() {
            'w' => Self::PitchUp,
            's' => Self::PitchDown,
            'a' => Self::YawLeft,
            'd' => Self::YawRight,
            'q' => Self::RollLeft,
            'e' => Self::RollRight,
            ' ' => Self::ToggleAnimation,
            'r' => Self::Reset,
            _ => return None,
        };
        Some(command)
    }

    /// Look up a command by a host key name such as `"KeyW"`, `"w"` or `"Space"`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Space" | "Spacebar" | " " => Some(Self::ToggleAnimation),
            _ => {
                let name = name.strip_prefix("Key").unwrap_or(name);
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_key(c),
                    _ => None,
                }
            }
        }
    }

    /// Rotation after this command; `ToggleAnimation` leaves it as is.
    pub fn apply_to_rotation(self, rotation: RotationState, step: f32) -> RotationState {
        match self {
            Self::PitchUp => rotation.rotated(-step, 0.0, 0.0),
            Self::PitchDown => rotation.rotated(step, 0.0, 0.0),
            Self::YawLeft => rotation.rotated(0.0, -step, 0.0),
            Self::YawRight => rotation.rotated(0.0, step, 0.0),
            Self::RollLeft => rotation.rotated(0.0, 0.0, -step),
            Self::RollRight => rotation.rotated(0.0, 0.0, step),
            Self::ToggleAnimation => rotation,
            Self::Reset => RotationState::zero(),
        }
    }
}

/// Pure key policy: the rotation that results from pressing `key`.
///
/// Unbound keys return the rotation unchanged.
pub fn apply_key(key: char, rotation: RotationState, params: &AnimationParams) -> RotationState {
    match Command::from_key(key) {
        Some(command) => command.apply_to_rotation(rotation, params.manual_step),
        None => rotation,
    }
}

/// Full command policy, including the timer toggle.
#[must_use]
pub fn apply_command(
    command: Command,
    state: AnimationState,
    params: &AnimationParams,
) -> AnimationState {
    match command {
        Command::ToggleAnimation => {
            let running = !state.running;
            info!(running, "animation toggled");
            AnimationState { running, ..state }
        }
        _ => AnimationState {
            rotation: command.apply_to_rotation(state.rotation, params.manual_step),
            ..state
        },
    }
}

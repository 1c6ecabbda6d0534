//! Per-frame input snapshot.

use glam::Vec2;
use voxcraft_core::BlockType;

/// Held movement flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MovementState {
    /// Flag-wise OR of two movement states.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            forward: self.forward || other.forward,
            backward: self.backward || other.backward,
            left: self.left || other.left,
            right: self.right || other.right,
            jump: self.jump || other.jump,
        }
    }

    /// Returns `true` if any horizontal direction is held.
    #[must_use]
    pub const fn is_moving(self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Everything the game reads from input in one frame.
///
/// Produced by [`InputManager::snapshot`](crate::InputManager::snapshot) and
/// consumed by value, so nothing downstream holds on to input state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Held movement flags from keys, joystick and jump button.
    pub movement: MovementState,
    /// Block type picked this frame, if any.
    pub select: Option<BlockType>,
    /// View toggle requested this frame.
    pub toggle_view: bool,
    /// Accumulated raw mouse motion in pixels.
    pub look_delta: Vec2,
}

impl InputSnapshot {
    /// Snapshot with only movement flags set.
    #[must_use]
    pub fn with_movement(movement: MovementState) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }
}

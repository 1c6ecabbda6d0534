//! On-screen joystick for touch devices.

use glam::Vec2;

use crate::snapshot::MovementState;

/// Offset (in pixels) past which a joystick axis counts as held.
pub const AXIS_THRESHOLD: f32 = 15.0;

/// Default pad radius in pixels.
pub const DEFAULT_RADIUS: f32 = 50.0;

/// A touch pad that drives the same movement flags as the keyboard.
///
/// Screen coordinates grow downward, so dragging up moves forward.
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    radius: f32,
    center: Option<Vec2>,
    knob: Vec2,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl VirtualJoystick {
    /// Create a joystick with the given pad radius.
    #[must_use]
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(AXIS_THRESHOLD),
            center: None,
            knob: Vec2::ZERO,
        }
    }

    /// Start a drag with the pad centered at `center`.
    pub fn begin(&mut self, center: Vec2) {
        self.center = Some(center);
        self.knob = Vec2::ZERO;
    }

    /// Move the active touch to `touch`. Ignored if no drag is active.
    pub fn drag(&mut self, touch: Vec2) {
        if let Some(center) = self.center {
            self.knob = (touch - center).clamp_length_max(self.radius);
        }
    }

    /// End the drag. All movement flags read as released afterwards.
    pub fn release(&mut self) {
        self.center = None;
        self.knob = Vec2::ZERO;
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.center.is_some()
    }

    /// Knob offset from the pad center, clamped to the radius.
    #[must_use]
    pub const fn knob(&self) -> Vec2 {
        self.knob
    }

    /// Movement flags implied by the knob position. Never sets `jump`.
    #[must_use]
    pub fn movement(&self) -> MovementState {
        MovementState {
            forward: self.knob.y < -AXIS_THRESHOLD,
            backward: self.knob.y > AXIS_THRESHOLD,
            left: self.knob.x < -AXIS_THRESHOLD,
            right: self.knob.x > AXIS_THRESHOLD,
            jump: false,
        }
    }
}

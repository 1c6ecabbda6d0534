//! First/third-person camera rig.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::Deserialize;

/// Pitch stays this far short of straight up/down.
const PITCH_MARGIN: f32 = 0.01;

/// Camera perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    FirstPerson,
    ThirdPerson,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::FirstPerson => Self::ThirdPerson,
            Self::ThirdPerson => Self::FirstPerson,
        }
    }
}

/// Camera tunables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Eye offset above the body center in first person.
    pub eye_height: f32,
    /// Camera offset from the body in third person, before rotation.
    pub third_person_offset: Vec3,
    /// Fraction of the remaining distance covered per frame in third person.
    pub follow_lerp: f32,
    /// Height above the body center the third-person camera aims at.
    pub look_at_height: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye_height: 0.7,
            third_person_offset: Vec3::new(0.0, 2.0, 5.0),
            follow_lerp: 0.1,
            look_at_height: 0.5,
            mouse_sensitivity: 0.002,
        }
    }
}

/// Camera placement handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    /// Unit view direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

/// Camera that follows the player.
///
/// Yaw and pitch come from mouse look and define the orientation used for
/// movement in both view modes. The pose is what the renderer draws from.
#[derive(Debug, Clone)]
pub struct CameraRig {
    settings: CameraSettings,
    mode: ViewMode,
    yaw: f32,
    pitch: f32,
    pose: CameraPose,
}

impl CameraRig {
    #[must_use]
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            settings,
            mode: ViewMode::default(),
            yaw: 0.0,
            pitch: 0.0,
            pose: CameraPose {
                position: Vec3::ZERO,
                target: Vec3::NEG_Z,
            },
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch between first and third person.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the orientation directly. Pitch is clamped.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-FRAC_PI_2 + PITCH_MARGIN, FRAC_PI_2 - PITCH_MARGIN);
    }

    /// Apply mouse motion in pixels. Moving right turns right, moving down
    /// looks down.
    pub fn look(&mut self, delta: Vec2) {
        if !delta.is_finite() || delta == Vec2::ZERO {
            return;
        }
        let s = self.settings.mouse_sensitivity;
        self.set_orientation(self.yaw - delta.x * s, self.pitch - delta.y * s);
    }

    /// Orientation quaternion (yaw about Y, then pitch about X).
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit look direction from yaw and pitch.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Current pose.
    #[must_use]
    pub const fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Move the camera for this frame given the player's position.
    pub fn follow(&mut self, player: Vec3) -> CameraPose {
        match self.mode {
            ViewMode::FirstPerson => self.pose = self.first_person(player),
            ViewMode::ThirdPerson => {
                let desired = self.third_person(player);
                self.pose = CameraPose {
                    position: self
                        .pose
                        .position
                        .lerp(desired.position, self.settings.follow_lerp),
                    target: desired.target,
                };
            }
        }
        self.pose
    }

    /// Place the camera at its resting spot with no smoothing.
    pub fn snap(&mut self, player: Vec3) -> CameraPose {
        self.pose = match self.mode {
            ViewMode::FirstPerson => self.first_person(player),
            ViewMode::ThirdPerson => self.third_person(player),
        };
        self.pose
    }

    fn first_person(&self, player: Vec3) -> CameraPose {
        let position = player + Vec3::Y * self.settings.eye_height;
        CameraPose {
            position,
            target: position + self.direction(),
        }
    }

    fn third_person(&self, player: Vec3) -> CameraPose {
        CameraPose {
            position: player + self.rotation() * self.settings.third_person_offset,
            target: player + Vec3::Y * self.settings.look_at_height,
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_person_sits_at_eye_height() {
        let mut rig = CameraRig::default();
        let pose = rig.follow(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(pose.position.y, 2.7, epsilon = 1e-5);
        assert_relative_eq!(pose.direction().z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn third_person_lerps_toward_offset() {
        let mut rig = CameraRig::default();
        assert_eq!(rig.toggle_view(), ViewMode::ThirdPerson);

        rig.snap(Vec3::ZERO);
        assert_relative_eq!(rig.pose().position.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(rig.pose().position.z, 5.0, epsilon = 1e-5);

        // Player moves 10 units along +X; the camera covers a tenth of it.
        let pose = rig.follow(Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(pose.position.x, 1.0, epsilon = 1e-5);
        assert_eq!(pose.target, Vec3::new(10.0, 0.5, 0.0));

        assert_eq!(rig.toggle_view(), ViewMode::FirstPerson);
    }

    #[test]
    fn offset_rotates_with_yaw() {
        let mut rig = CameraRig::default();
        rig.toggle_view();
        rig.set_orientation(FRAC_PI_2, 0.0);
        let pose = rig.snap(Vec3::ZERO);
        // Looking down -X, so "behind" is +X.
        assert_relative_eq!(pose.position.x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(pose.position.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn mouse_look_turns_and_clamps() {
        let mut rig = CameraRig::default();
        rig.look(Vec2::new(100.0, 0.0));
        assert_relative_eq!(rig.yaw(), -0.2, epsilon = 1e-6);
        // Turning right from -Z heads toward +X.
        assert!(rig.direction().x > 0.0);

        rig.look(Vec2::new(0.0, 1.0e6));
        assert_relative_eq!(rig.pitch(), -FRAC_PI_2 + PITCH_MARGIN);
        assert!(rig.direction().y < -0.99);

        rig.look(Vec2::new(f32::NAN, 0.0));
        assert_relative_eq!(rig.yaw(), -0.2, epsilon = 1e-6);
    }
}

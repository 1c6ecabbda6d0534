//! Movement steering and jump gating.

use glam::{Quat, Vec3};
use serde::Deserialize;
use voxcraft_input::MovementState;
use voxcraft_physics::BodySample;

use crate::fall::FallDamageDetector;

/// Player tunables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Horizontal speed in units per second.
    pub speed: f32,
    /// Upward velocity set by a jump.
    pub jump_impulse: f32,
    /// |vy| below which the player counts as standing.
    pub grounded_threshold: f32,
    /// Vertical velocity below which a fall becomes dangerous.
    pub fall_damage_threshold: f32,
    /// Vertical velocity above which a dangerous fall has landed.
    pub landing_threshold: f32,
    /// Downward speed per point of damage.
    pub damage_divisor: f32,
    /// Where the body spawns and respawns.
    pub spawn_point: Vec3,
    /// Body radius.
    pub radius: f32,
    /// Body mass.
    pub mass: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump_impulse: 4.0,
            grounded_threshold: 0.01,
            fall_damage_threshold: -10.0,
            landing_threshold: -3.0,
            damage_divisor: 5.0,
            spawn_point: Vec3::new(0.0, 2.0, 0.0),
            radius: 0.4,
            mass: 1.0,
        }
    }
}

/// Physics-free player logic.
///
/// Feed it every [`BodySample`] with [`observe`](Self::observe), then ask it
/// for the frame's velocity with [`steer`](Self::steer). Without samples it
/// keeps using the last known values.
#[derive(Debug, Clone)]
pub struct PlayerController {
    settings: PlayerSettings,
    position: Vec3,
    velocity: Vec3,
    fall: FallDamageDetector,
}

impl PlayerController {
    #[must_use]
    pub fn new(settings: PlayerSettings) -> Self {
        let fall = FallDamageDetector::new(
            settings.fall_damage_threshold,
            settings.landing_threshold,
            settings.damage_divisor,
        );
        Self {
            position: settings.spawn_point,
            velocity: Vec3::ZERO,
            settings,
            fall,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Last reported body position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Last reported body velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Returns `true` if the last vertical velocity is close to zero.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.velocity.y.abs() < self.settings.grounded_threshold
    }

    /// Record a physics sample. Returns fall damage if this sample completes
    /// a hard landing.
    pub fn observe(&mut self, sample: BodySample) -> Option<u32> {
        if sample.position.is_finite() {
            self.position = sample.position;
        }
        if sample.velocity.is_finite() {
            self.velocity = sample.velocity;
        }
        self.fall.observe(sample.velocity.y)
    }

    /// Velocity to command this frame.
    ///
    /// Movement is relative to `orientation` (the camera rotation, looking
    /// down -Z). The vertical component is left at the last reported value,
    /// except when a jump is allowed.
    #[must_use]
    pub fn steer(&self, movement: MovementState, orientation: Quat) -> Vec3 {
        let axis = |positive: bool, negative: bool| {
            f32::from(u8::from(positive)) - f32::from(u8::from(negative))
        };
        let local = Vec3::new(
            axis(movement.right, movement.left),
            0.0,
            axis(movement.backward, movement.forward),
        );
        let world = orientation * (local.normalize_or_zero() * self.settings.speed);

        if movement.jump && self.is_grounded() {
            Vec3::new(self.velocity.x, self.settings.jump_impulse, self.velocity.z)
        } else {
            Vec3::new(world.x, self.velocity.y, world.z)
        }
    }

    /// Put the controller back in its spawn state.
    pub fn reset(&mut self) {
        self.position = self.settings.spawn_point;
        self.velocity = Vec3::ZERO;
        self.fall.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn sample(velocity: Vec3) -> BodySample {
        BodySample {
            position: Vec3::ZERO,
            velocity,
        }
    }

    fn moving(f: impl FnOnce(&mut MovementState)) -> MovementState {
        let mut movement = MovementState::default();
        f(&mut movement);
        movement
    }

    #[test]
    fn forward_follows_view() {
        let controller = PlayerController::new(PlayerSettings::default());
        let forward = moving(|m| m.forward = true);

        let v = controller.steer(forward, Quat::IDENTITY);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(v.z, -5.0, epsilon = 1e-5);

        // Turned 90 degrees to the left, forward is -X.
        let v = controller.steer(forward, Quat::from_rotation_y(FRAC_PI_2));
        assert_relative_eq!(v.x, -5.0, epsilon = 1e-5);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn diagonal_is_normalized() {
        let controller = PlayerController::new(PlayerSettings::default());
        let v = controller.steer(
            moving(|m| {
                m.forward = true;
                m.right = true;
            }),
            Quat::IDENTITY,
        );
        assert_relative_eq!(Vec3::new(v.x, 0.0, v.z).length(), 5.0, epsilon = 1e-5);
        assert!(v.x > 0.0 && v.z < 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let controller = PlayerController::new(PlayerSettings::default());
        let v = controller.steer(
            moving(|m| {
                m.left = true;
                m.right = true;
            }),
            Quat::IDENTITY,
        );
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn vertical_velocity_is_preserved() {
        let mut controller = PlayerController::new(PlayerSettings::default());
        controller.observe(sample(Vec3::new(0.0, -3.5, 0.0)));
        let v = controller.steer(moving(|m| m.backward = true), Quat::IDENTITY);
        assert_relative_eq!(v.y, -3.5);
        assert_relative_eq!(v.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn jump_only_when_grounded() {
        let mut controller = PlayerController::new(PlayerSettings::default());
        controller.observe(sample(Vec3::new(1.0, 0.0, 2.0)));
        let jump = moving(|m| m.jump = true);
        assert_eq!(controller.steer(jump, Quat::IDENTITY), Vec3::new(1.0, 4.0, 2.0));

        controller.observe(sample(Vec3::new(1.0, 2.5, 2.0)));
        let v = controller.steer(jump, Quat::IDENTITY);
        assert_relative_eq!(v.y, 2.5);
    }

    #[test]
    fn stale_values_are_kept() {
        let mut controller = PlayerController::new(PlayerSettings::default());
        assert_eq!(controller.position(), Vec3::new(0.0, 2.0, 0.0));
        controller.observe(BodySample {
            position: Vec3::new(f32::NAN, 0.0, 0.0),
            velocity: Vec3::new(0.0, -1.0, 0.0),
        });
        assert_eq!(controller.position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(controller.velocity(), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn landing_reports_damage() {
        let mut controller = PlayerController::new(PlayerSettings::default());
        let damage: Vec<u32> = [0.0, -12.0, -14.0, -2.0]
            .into_iter()
            .filter_map(|vy| controller.observe(sample(Vec3::new(0.0, vy, 0.0))))
            .collect();
        assert_eq!(damage, vec![2]);

        controller.observe(sample(Vec3::new(0.0, -20.0, 0.0)));
        controller.reset();
        assert_eq!(controller.observe(sample(Vec3::ZERO)), None);
        assert_eq!(controller.velocity(), Vec3::ZERO);
    }
}

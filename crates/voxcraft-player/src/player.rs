//! The player body and its feedback subscription.

use glam::{Quat, Vec3};
use tracing::{debug, info};
use voxcraft_input::MovementState;
use voxcraft_physics::{BodyFeedback, BodyHandle, PhysicsWorld};

use crate::controller::{PlayerController, PlayerSettings};

/// What happened to the player during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerFrame {
    /// Fall damage from landings observed this frame.
    pub damage: u32,
    /// Velocity commanded to the physics body.
    pub velocity: Vec3,
}

/// A [`PlayerController`] bound to a physics body.
///
/// The feedback subscription lives exactly as long as the player; call
/// [`despawn`](Self::despawn) to remove the body along with it.
#[derive(Debug)]
pub struct Player {
    body: BodyHandle,
    feedback: BodyFeedback,
    controller: PlayerController,
}

impl Player {
    /// Spawn the player body at the configured spawn point and subscribe to it.
    pub fn spawn(physics: &mut PhysicsWorld, settings: PlayerSettings) -> Self {
        let body = physics.spawn_ball(settings.spawn_point, settings.radius, settings.mass);
        let feedback = physics.subscribe(body);
        info!(spawn = ?settings.spawn_point, "player spawned");
        Self {
            body,
            feedback,
            controller: PlayerController::new(settings),
        }
    }

    #[must_use]
    pub const fn body(&self) -> BodyHandle {
        self.body
    }

    #[must_use]
    pub const fn controller(&self) -> &PlayerController {
        &self.controller
    }

    /// Last reported position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.controller.position()
    }

    /// Last reported velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec3 {
        self.controller.velocity()
    }

    /// Consume pending feedback, then steer the body for this frame.
    pub fn update(
        &mut self,
        physics: &mut PhysicsWorld,
        movement: MovementState,
        orientation: Quat,
    ) -> PlayerFrame {
        let mut damage = 0u32;
        for sample in self.feedback.drain() {
            if let Some(hit) = self.controller.observe(sample) {
                debug!(damage = hit, velocity = sample.velocity.y, "hard landing");
                damage = damage.saturating_add(hit);
            }
        }

        let velocity = self.controller.steer(movement, orientation);
        physics.set_velocity(self.body, velocity);
        PlayerFrame { damage, velocity }
    }

    /// Move the body back to the spawn point and forget any fall in progress.
    pub fn respawn(&mut self, physics: &mut PhysicsWorld) {
        let spawn = self.controller.settings().spawn_point;
        physics.teleport(self.body, spawn);
        // Samples from before the teleport must not finish a fall.
        self.feedback.drain().for_each(drop);
        self.controller.reset();
        info!(?spawn, "player respawned");
    }

    /// Remove the body. The feedback subscription ends with it.
    pub fn despawn(self, physics: &mut PhysicsWorld) {
        physics.remove_body(self.body);
        debug!("player despawned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxcraft_physics::PhysicsSettings;

    #[test]
    fn walking_moves_the_body() {
        let mut physics = PhysicsWorld::new(PhysicsSettings::default());
        let mut player = Player::spawn(&mut physics, PlayerSettings::default());
        let forward = MovementState {
            forward: true,
            ..MovementState::default()
        };

        for _ in 0..120 {
            player.update(&mut physics, forward, Quat::IDENTITY);
            physics.step();
        }
        player.update(&mut physics, MovementState::default(), Quat::IDENTITY);
        assert!(player.position().z < -5.0, "{:?}", player.position());
        assert!(player.position().x.abs() < 0.1);
    }

    #[test]
    fn high_drop_deals_damage_once() {
        let mut physics = PhysicsWorld::new(PhysicsSettings::default());
        let settings = PlayerSettings {
            spawn_point: Vec3::new(0.0, 20.0, 0.0),
            ..PlayerSettings::default()
        };
        let mut player = Player::spawn(&mut physics, settings);

        let mut total = 0;
        let mut events = 0;
        for _ in 0..300 {
            let frame = player.update(&mut physics, MovementState::default(), Quat::IDENTITY);
            if frame.damage > 0 {
                events += 1;
                total += frame.damage;
            }
            physics.step();
        }
        // About 20 m/s at impact.
        assert_eq!(events, 1);
        assert!((3..=4).contains(&total), "{total}");
    }

    #[test]
    fn respawn_and_despawn() {
        let mut physics = PhysicsWorld::new(PhysicsSettings::default());
        let mut player = Player::spawn(&mut physics, PlayerSettings::default());
        for _ in 0..30 {
            physics.step();
        }
        player.update(&mut physics, MovementState::default(), Quat::IDENTITY);
        assert!(player.position().y < 2.0);

        player.respawn(&mut physics);
        assert_eq!(player.position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(
            physics.sample(player.body()).map(|s| s.position),
            Some(Vec3::new(0.0, 2.0, 0.0))
        );

        assert_eq!(physics.subscriber_count(), 1);
        player.despawn(&mut physics);
        assert_eq!(physics.subscriber_count(), 0);
    }
}

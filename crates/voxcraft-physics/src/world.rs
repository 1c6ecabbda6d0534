//! The physics world.

use glam::Vec3;
use hashbrown::HashMap;
use rapier3d::dynamics::{
    CCDSolver, ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet,
    RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
};
use rapier3d::geometry::{
    ColliderBuilder, ColliderHandle, ColliderSet, DefaultBroadPhase, NarrowPhase, Ray as PhysicsRay,
};
use rapier3d::math::Vector;
use rapier3d::pipeline::{PhysicsPipeline, QueryFilter, QueryPipeline};
use tracing::{debug, trace};
use voxcraft_core::constants::{BLOCK_SIZE, GROUND_HEIGHT};
use voxcraft_core::math::Ray;
use voxcraft_core::{BlockFace, SurfaceHit, VoxelCell};

use crate::convert::{from_point, from_vector, to_point, to_vector};
use crate::feedback::{subscription, BodyFeedback, BodySample, Subscriber};

/// Handle to a dynamic body in a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettings {
    /// Downward acceleration (negative is down).
    pub gravity: f32,
    /// Fixed simulation step in seconds.
    pub timestep: f32,
    /// Upper bound on fixed steps run by one [`PhysicsWorld::advance`].
    pub max_substeps: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            timestep: 1.0 / 60.0,
            max_substeps: 5,
        }
    }
}

/// Rigid-body simulation of the player, the ground and the placed blocks.
///
/// The player body is the only dynamic object and collides with the ground
/// and every block. Pointer raycasts ignore dynamic bodies.
pub struct PhysicsWorld {
    settings: PhysicsSettings,
    gravity: Vector<f32>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
    queries_dirty: bool,
    ground: ColliderHandle,
    blocks: HashMap<VoxelCell, ColliderHandle>,
    block_cells: HashMap<ColliderHandle, VoxelCell>,
    subscribers: Vec<Subscriber>,
    accumulator: f32,
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("settings", &self.settings)
            .field("bodies", &self.bodies.len())
            .field("blocks", &self.blocks.len())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsSettings::default())
    }
}

impl PhysicsWorld {
    /// Create a world containing only the ground plane.
    #[must_use]
    pub fn new(settings: PhysicsSettings) -> Self {
        let mut colliders = ColliderSet::new();
        let ground = colliders.insert(
            ColliderBuilder::halfspace(Vector::y_axis())
                .translation(Vector::new(0.0, GROUND_HEIGHT, 0.0))
                .build(),
        );

        let params = IntegrationParameters {
            dt: settings.timestep,
            ..IntegrationParameters::default()
        };

        Self {
            settings,
            gravity: Vector::new(0.0, settings.gravity, 0.0),
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
            queries_dirty: true,
            ground,
            blocks: HashMap::new(),
            block_cells: HashMap::new(),
            subscribers: Vec::new(),
            accumulator: 0.0,
        }
    }

    /// Simulation parameters.
    #[must_use]
    pub const fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    // --- Dynamic bodies ---

    /// Add a dynamic ball that does not rotate.
    pub fn spawn_ball(&mut self, position: Vec3, radius: f32, mass: f32) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(position))
            .lock_rotations()
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(radius).mass(mass).friction(0.0).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.queries_dirty = true;
        debug!(?position, radius, "spawned ball");
        BodyHandle(handle)
    }

    /// Remove a dynamic body and its colliders.
    pub fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(
            body.0,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.subscribers.retain(|sub| sub.body != body);
        self.queries_dirty = true;
    }

    /// Current position and velocity of a body.
    #[must_use]
    pub fn sample(&self, body: BodyHandle) -> Option<BodySample> {
        self.bodies.get(body.0).map(|rb| BodySample {
            position: from_vector(rb.translation()),
            velocity: from_vector(rb.linvel()),
        })
    }

    /// Set a body's linear velocity.
    pub fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.set_linvel(to_vector(velocity), true);
        }
    }

    /// Move a body to `position` and stop it.
    pub fn teleport(&mut self, body: BodyHandle, position: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.set_translation(to_vector(position), true);
            rb.set_linvel(Vector::zeros(), true);
            rb.set_angvel(Vector::zeros(), true);
        }
    }

    /// Receive a [`BodySample`] for `body` after every step.
    pub fn subscribe(&mut self, body: BodyHandle) -> BodyFeedback {
        let (subscriber, feedback) = subscription(body);
        self.subscribers.push(subscriber);
        feedback
    }

    /// Number of live subscriptions (as of the last step).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // --- Static blocks ---

    /// Add a static unit cube at `cell`. No-op if one is already there.
    pub fn insert_block(&mut self, cell: VoxelCell) {
        if self.blocks.contains_key(&cell) {
            return;
        }
        let half = BLOCK_SIZE / 2.0;
        let collider = ColliderBuilder::cuboid(half, half, half)
            .translation(to_vector(cell.center()))
            .build();
        let handle = self.colliders.insert(collider);
        self.blocks.insert(cell, handle);
        self.block_cells.insert(handle, cell);
        self.queries_dirty = true;
        trace!(?cell, "block collider added");
    }

    /// Remove the static cube at `cell`, if any.
    pub fn remove_block(&mut self, cell: VoxelCell) {
        let Some(handle) = self.blocks.remove(&cell) else {
            return;
        };
        self.block_cells.remove(&handle);
        self.colliders
            .remove(handle, &mut self.islands, &mut self.bodies, true);
        self.queries_dirty = true;
        trace!(?cell, "block collider removed");
    }

    /// Remove every block collider.
    pub fn clear_blocks(&mut self) {
        let cells: Vec<VoxelCell> = self.blocks.keys().copied().collect();
        for cell in cells {
            self.remove_block(cell);
        }
        debug!("block colliders cleared");
    }

    /// Number of block colliders.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if a block collider exists at `cell`.
    #[must_use]
    pub fn has_block(&self, cell: VoxelCell) -> bool {
        self.blocks.contains_key(&cell)
    }

    // --- Simulation ---

    /// Run one fixed step and publish feedback.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.queries),
            &(),
            &(),
        );
        self.queries_dirty = false;
        self.publish();
    }

    /// Advance by `dt` seconds of wall time in fixed steps.
    ///
    /// Leftover time carries over to the next call. Time beyond
    /// `max_substeps` steps is dropped. Returns the number of steps run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        let timestep = self.settings.timestep;
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= timestep && steps < self.settings.max_substeps {
            self.step();
            self.accumulator -= timestep;
            steps += 1;
        }
        if steps == self.settings.max_substeps {
            self.accumulator = self.accumulator.min(timestep);
        }
        steps
    }

    fn publish(&mut self) {
        let bodies = &self.bodies;
        self.subscribers.retain(|sub| {
            let Some(rb) = bodies.get(sub.body.0) else {
                return false;
            };
            sub.send(BodySample {
                position: from_vector(rb.translation()),
                velocity: from_vector(rb.linvel()),
            })
        });
    }

    // --- Queries ---

    /// First static surface along `ray` within `max_distance`.
    ///
    /// Dynamic bodies are ignored.
    pub fn cast_pointer_ray(&mut self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        if ray.direction.length_squared() == 0.0 || !ray.origin.is_finite() {
            return None;
        }
        if self.queries_dirty {
            self.queries.update(&self.colliders);
            self.queries_dirty = false;
        }

        let physics_ray = PhysicsRay::new(to_point(ray.origin), to_vector(ray.direction));
        let (handle, hit) = self.queries.cast_ray_and_get_normal(
            &self.bodies,
            &self.colliders,
            &physics_ray,
            max_distance,
            true,
            QueryFilter::only_fixed(),
        )?;

        if handle == self.ground {
            let point = from_point(&physics_ray.point_at(hit.time_of_impact));
            return Some(SurfaceHit::Ground { point });
        }
        let cell = *self.block_cells.get(&handle)?;
        let face = BlockFace::from_normal(from_vector(&hit.normal))?;
        Some(SurfaceHit::Block { cell, face })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(PhysicsSettings::default())
    }

    #[test]
    fn ball_falls_then_rests_on_ground() {
        let mut world = world();
        let ball = world.spawn_ball(Vec3::new(0.0, 2.0, 0.0), 0.4, 1.0);

        for _ in 0..10 {
            world.step();
        }
        let falling = world.sample(ball).unwrap();
        assert!(falling.velocity.y < -1.0);
        assert!(falling.position.y < 2.0);

        for _ in 0..240 {
            world.step();
        }
        let resting = world.sample(ball).unwrap();
        assert_relative_eq!(resting.position.y, GROUND_HEIGHT + 0.4, epsilon = 0.05);
        assert!(resting.velocity.y.abs() < 0.1);
    }

    #[test]
    fn ball_lands_on_top_of_block() {
        let mut world = world();
        world.insert_block(VoxelCell::new(0, 0, 0));
        let ball = world.spawn_ball(Vec3::new(0.0, 3.0, 0.0), 0.4, 1.0);

        for _ in 0..240 {
            world.step();
        }
        let resting = world.sample(ball).unwrap();
        assert_relative_eq!(resting.position.y, 0.5 + 0.4, epsilon = 0.05);
        assert!(resting.velocity.y.abs() < 0.1);
    }

    #[test]
    fn feedback_arrives_once_per_step_in_order() {
        let mut world = world();
        let ball = world.spawn_ball(Vec3::new(0.0, 5.0, 0.0), 0.4, 1.0);
        let feedback = world.subscribe(ball);
        assert_eq!(feedback.body(), ball);

        for _ in 0..3 {
            world.step();
        }
        let samples: Vec<_> = feedback.drain().collect();
        assert_eq!(samples.len(), 3);
        assert!(samples[1].velocity.y < samples[0].velocity.y);
        assert!(samples[2].velocity.y < samples[1].velocity.y);
        assert!(feedback.latest().is_none());
    }

    #[test]
    fn dropped_feedback_is_pruned() {
        let mut world = world();
        let ball = world.spawn_ball(Vec3::ZERO, 0.4, 1.0);
        let kept = world.subscribe(ball);
        let dropped = world.subscribe(ball);
        assert_eq!(world.subscriber_count(), 2);

        drop(dropped);
        world.step();
        assert_eq!(world.subscriber_count(), 1);
        assert!(kept.latest().is_some());

        world.remove_body(ball);
        assert_eq!(world.subscriber_count(), 0);
    }

    #[test]
    fn velocity_and_teleport() {
        let mut world = world();
        let ball = world.spawn_ball(Vec3::new(0.0, 0.0, 0.0), 0.4, 1.0);
        world.set_velocity(ball, Vec3::new(3.0, 0.0, 0.0));
        assert_relative_eq!(world.sample(ball).unwrap().velocity.x, 3.0);

        world.teleport(ball, Vec3::new(1.0, 2.0, 3.0));
        let sample = world.sample(ball).unwrap();
        assert_eq!(sample.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sample.velocity, Vec3::ZERO);
    }

    #[test]
    fn advance_runs_fixed_steps() {
        let mut world = world();
        let ball = world.spawn_ball(Vec3::new(0.0, 5.0, 0.0), 0.4, 1.0);
        let feedback = world.subscribe(ball);

        assert_eq!(world.advance(1.0 / 30.0 + 0.001), 2);
        assert_eq!(world.advance(0.0), 0);
        assert_eq!(world.advance(f32::NAN), 0);
        // Long frames are capped.
        assert_eq!(world.advance(1.0), 5);
        assert_eq!(feedback.drain().count(), 7);
    }

    #[test]
    fn ray_hits_block_face() {
        let mut world = world();
        world.insert_block(VoxelCell::new(2, 0, 2));
        world.insert_block(VoxelCell::new(2, 0, 2));
        assert_eq!(world.block_count(), 1);

        let down = Ray::new(Vec3::new(2.1, 5.0, 1.9), Vec3::NEG_Y);
        assert_eq!(
            world.cast_pointer_ray(&down, 100.0),
            Some(SurfaceHit::Block {
                cell: VoxelCell::new(2, 0, 2),
                face: BlockFace::PosY,
            })
        );

        let side = Ray::new(Vec3::new(10.0, 0.0, 2.0), Vec3::NEG_X);
        assert_eq!(
            world.cast_pointer_ray(&side, 100.0),
            Some(SurfaceHit::Block {
                cell: VoxelCell::new(2, 0, 2),
                face: BlockFace::PosX,
            })
        );
    }

    #[test]
    fn ray_falls_through_to_ground() {
        let mut world = world();
        world.insert_block(VoxelCell::new(0, 0, 0));
        world.remove_block(VoxelCell::new(0, 0, 0));
        assert!(!world.has_block(VoxelCell::new(0, 0, 0)));

        let ray = Ray::new(Vec3::new(0.2, 4.0, 0.3), Vec3::NEG_Y);
        match world.cast_pointer_ray(&ray, 100.0) {
            Some(SurfaceHit::Ground { point }) => {
                assert_relative_eq!(point.x, 0.2, epsilon = 1e-4);
                assert_relative_eq!(point.y, GROUND_HEIGHT, epsilon = 1e-4);
                assert_relative_eq!(point.z, 0.3, epsilon = 1e-4);
            }
            other => panic!("expected ground hit, got {other:?}"),
        }
    }

    #[test]
    fn ray_ignores_player_and_misses_sky() {
        let mut world = world();
        world.spawn_ball(Vec3::new(0.0, 2.0, 0.0), 0.4, 1.0);

        let through_player = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(matches!(
            world.cast_pointer_ray(&through_player, 100.0),
            Some(SurfaceHit::Ground { .. })
        ));

        let up = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(world.cast_pointer_ray(&up, 100.0), None);
        let short = Ray::new(Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y);
        assert_eq!(world.cast_pointer_ray(&short, 10.0), None);
    }

    #[test]
    fn clear_blocks_removes_all() {
        let mut world = world();
        for x in 0..4 {
            world.insert_block(VoxelCell::new(x, 0, 0));
        }
        world.clear_blocks();
        assert_eq!(world.block_count(), 0);
        let ray = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(matches!(
            world.cast_pointer_ray(&ray, 100.0),
            Some(SurfaceHit::Ground { .. })
        ));
    }
}

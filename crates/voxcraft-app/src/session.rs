//! The per-frame game session.

use anyhow::Context;
use tracing::{debug, error, info};
use voxcraft_architect::{ArchitectPanel, ArchitectService, GeminiArchitect, PanelOutcome};
use voxcraft_core::math::Ray;
use voxcraft_core::{PointerAction, SurfaceHit};
use voxcraft_input::InputSnapshot;
use voxcraft_physics::PhysicsWorld;
use voxcraft_player::{CameraPose, CameraRig, Player};
use voxcraft_world::{resolve_placement, Confirm, Storage, WorldChange, WorldStore};

use crate::config::GameConfig;

/// How far a pointer ray reaches.
pub const POINTER_REACH: f32 = 1000.0;

/// Whether the player is alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Playing,
    /// Health reached zero. Only [`GameSession::restart`] leaves this state.
    Dead,
}

/// What happened during one [`GameSession::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Fall damage taken this frame.
    pub damage: u32,
    /// Fixed physics steps run.
    pub physics_steps: u32,
    /// Camera placement for rendering.
    pub camera: Option<CameraPose>,
    /// Architect request that finished this frame.
    pub architect: Option<PanelOutcome>,
    /// Health hit zero this frame.
    pub died: bool,
    /// The session is (still) dead; nothing was simulated.
    pub dead: bool,
}

/// All game state, advanced together once per frame.
///
/// The session owns its storage backend; nothing is persisted until
/// [`save`](Self::save).
pub struct GameSession<S: ArchitectService = GeminiArchitect> {
    config: GameConfig,
    storage: Box<dyn Storage>,
    store: WorldStore,
    physics: PhysicsWorld,
    player: Player,
    camera: CameraRig,
    architect: Option<ArchitectPanel<S>>,
    state: SessionState,
}

impl<S: ArchitectService> std::fmt::Debug for GameSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("blocks", &self.store.len())
            .field("health", &self.store.health())
            .field("physics", &self.physics)
            .field("architect", &self.architect.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: ArchitectService> GameSession<S> {
    /// Load the world from `storage` and spawn the player.
    pub fn new(config: GameConfig, storage: Box<dyn Storage>) -> Self {
        let mut store = WorldStore::load(storage.as_ref());
        store.watch_changes();
        let mut physics = PhysicsWorld::new(config.physics_settings());
        let player = Player::spawn(&mut physics, config.player.clone());
        let mut camera = CameraRig::new(config.camera.clone());
        camera.snap(player.position());

        let mut session = Self {
            config,
            storage,
            store,
            physics,
            player,
            camera,
            architect: None,
            state: SessionState::Playing,
        };
        session.sync_colliders();
        if session.store.is_dead() {
            session.die();
        }
        session
    }

    /// Attach an architect panel.
    #[must_use]
    pub fn with_architect(mut self, panel: ArchitectPanel<S>) -> Self {
        self.architect = Some(panel);
        self
    }

    // --- Accessors ---

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &WorldStore {
        &self.store
    }

    /// Mutable world access. Collider changes are picked up on the next
    /// tick or pointer ray.
    pub fn store_mut(&mut self) -> &mut WorldStore {
        &mut self.store
    }

    #[must_use]
    pub const fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub const fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn architect_mut(&mut self) -> Option<&mut ArchitectPanel<S>> {
        self.architect.as_mut()
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.state == SessionState::Dead
    }

    // --- Frame ---

    /// Advance the game by one frame.
    ///
    /// Order: block selection and view, player steering and fall damage,
    /// physics, camera, collider sync, architect, death check. Does nothing
    /// while dead.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> FrameReport {
        if self.is_dead() {
            return FrameReport {
                dead: true,
                ..FrameReport::default()
            };
        }
        let mut report = FrameReport::default();

        if let Some(block) = input.select {
            self.store.select_block_type(block);
        }
        if input.toggle_view {
            let mode = self.camera.toggle_view();
            debug!(?mode, "view toggled");
        }
        self.camera.look(input.look_delta);

        let frame = self
            .player
            .update(&mut self.physics, input.movement, self.camera.rotation());
        if frame.damage > 0 {
            self.store.take_damage(frame.damage);
            report.damage = frame.damage;
        }

        report.physics_steps = self.physics.advance(dt);

        let position = self
            .physics
            .sample(self.player.body())
            .map_or_else(|| self.player.position(), |sample| sample.position);
        report.camera = Some(self.camera.follow(position));

        self.sync_colliders();

        if let Some(panel) = self.architect.as_mut() {
            report.architect = panel.poll(&mut self.store);
        }

        if self.store.is_dead() {
            self.die();
            report.died = true;
            report.dead = true;
        }
        report
    }

    fn die(&mut self) {
        self.state = SessionState::Dead;
        error!("player died");
    }

    /// Leave the dead state: wipe the world, restore health and respawn.
    ///
    /// Also works while alive, as a hard reset.
    pub fn restart(&mut self) {
        self.store.restore_defaults();
        self.player.respawn(&mut self.physics);
        self.camera.snap(self.player.position());
        self.sync_colliders();
        self.state = SessionState::Playing;
        info!("session restarted");
    }

    // --- Interaction ---

    /// Apply a click that landed on `hit`. Returns `true` if the world changed.
    pub fn pointer_hit(&mut self, hit: SurfaceHit, action: PointerAction) -> bool {
        if self.is_dead() {
            return false;
        }
        let Some(intent) = resolve_placement(hit, action) else {
            return false;
        };
        let changed = self.store.apply_intent(intent);
        self.sync_colliders();
        changed
    }

    /// Raycast `ray` against the world and apply the click to what it hits.
    pub fn pointer_ray(&mut self, ray: &Ray, action: PointerAction) -> bool {
        if self.is_dead() {
            return false;
        }
        self.sync_colliders();
        match self.physics.cast_pointer_ray(ray, POINTER_REACH) {
            Some(hit) => self.pointer_hit(hit, action),
            None => false,
        }
    }

    /// Restore up to `amount` health.
    pub fn heal(&mut self, amount: u32) {
        if !self.is_dead() {
            self.store.heal(amount);
        }
    }

    /// Ask `confirm`, then wipe the world and restore health.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> bool {
        let reset = self.store.reset(confirm);
        if reset {
            self.sync_colliders();
        }
        reset
    }

    /// Start an architect request on the attached panel.
    pub fn request_structure(&mut self, prompt: &str) -> anyhow::Result<()> {
        let panel = self
            .architect
            .as_mut()
            .context("no architect is configured")?;
        panel.request(prompt)?;
        Ok(())
    }

    /// Block until the in-flight architect request finishes and apply it.
    pub fn wait_for_architect(&mut self) -> Option<PanelOutcome> {
        let outcome = self.architect.as_mut()?.wait(&mut self.store);
        self.sync_colliders();
        outcome
    }

    /// Persist the world and health.
    pub fn save(&mut self) -> anyhow::Result<()> {
        self.store
            .save(self.storage.as_mut())
            .context("failed to save world")
    }

    /// Mirror store changes into the physics world.
    fn sync_colliders(&mut self) {
        for change in self.store.take_changes() {
            match change {
                WorldChange::Added(block) => self.physics.insert_block(block.pos),
                WorldChange::Removed(cell) => self.physics.remove_block(cell),
                WorldChange::Cleared => self.physics.clear_blocks(),
            }
        }
    }
}

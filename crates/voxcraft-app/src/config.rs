//! Game configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec3;
use serde::Deserialize;
use voxcraft_architect::ArchitectSettings;
use voxcraft_physics::PhysicsSettings;
use voxcraft_player::{CameraSettings, PlayerSettings};

/// Physics section of [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration (negative is down).
    pub gravity: f32,
    /// Fixed step in seconds.
    pub timestep: f32,
    /// Maximum fixed steps per frame.
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let defaults = PhysicsSettings::default();
        Self {
            gravity: defaults.gravity,
            timestep: defaults.timestep,
            max_substeps: defaults.max_substeps,
        }
    }
}

impl From<&PhysicsConfig> for PhysicsSettings {
    fn from(config: &PhysicsConfig) -> Self {
        Self {
            gravity: config.gravity,
            timestep: config.timestep,
            max_substeps: config.max_substeps.max(1),
        }
    }
}

/// Storage section of [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `world.json` and `health.json`.
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("voxcraft-data"),
        }
    }
}

/// Everything tunable about a game session.
///
/// Every field has a default, so a TOML file only needs the values it
/// changes:
///
/// ```toml
/// [player]
/// speed = 7.5
///
/// [physics]
/// gravity = -20.0
///
/// [storage]
/// dir = "saves/default"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerSettings,
    pub camera: CameraSettings,
    pub physics: PhysicsConfig,
    pub storage: StorageConfig,
    pub architect: ArchitectSettings,
}

impl GameConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Set the storage directory.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.dir = dir.into();
        self
    }

    /// Set where the player spawns.
    #[must_use]
    pub fn with_spawn_point(mut self, spawn: Vec3) -> Self {
        self.player.spawn_point = spawn;
        self
    }

    /// Set the gravity.
    #[must_use]
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.physics.gravity = gravity;
        self
    }

    /// Set the architect model name.
    #[must_use]
    pub fn with_architect_model(mut self, model: impl Into<String>) -> Self {
        self.architect.model = model.into();
        self
    }

    /// Physics parameters for the simulation.
    #[must_use]
    pub fn physics_settings(&self) -> PhysicsSettings {
        PhysicsSettings::from(&self.physics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gameplay_constants() {
        let config = GameConfig::default();
        assert_eq!(config.player.speed, 5.0);
        assert_eq!(config.player.jump_impulse, 4.0);
        assert_eq!(config.player.fall_damage_threshold, -10.0);
        assert_eq!(config.player.spawn_point, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(config.camera.eye_height, 0.7);
        assert_eq!(config.camera.third_person_offset, Vec3::new(0.0, 2.0, 5.0));
        assert_eq!(config.physics.gravity, -9.81);
        assert_eq!(config.architect.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [player]
            speed = 7.5
            spawn_point = [1.0, 10.0, -1.0]

            [physics]
            gravity = -20.0

            [storage]
            dir = "saves/a"

            [architect]
            model = "local-model"
            "#,
        )
        .unwrap();

        assert_eq!(config.player.speed, 7.5);
        assert_eq!(config.player.spawn_point, Vec3::new(1.0, 10.0, -1.0));
        assert_eq!(config.player.jump_impulse, 4.0);
        assert_eq!(config.physics.gravity, -20.0);
        assert_eq!(config.physics.timestep, 1.0 / 60.0);
        assert_eq!(config.storage.dir, PathBuf::from("saves/a"));
        assert_eq!(config.architect.model, "local-model");
        assert_eq!(config.camera, CameraSettings::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(GameConfig::from_toml_str("[player]\nspeed = \"fast\"").is_err());
    }

    #[test]
    fn builder_overrides() {
        let config = GameConfig::default()
            .with_storage_dir("/tmp/world")
            .with_spawn_point(Vec3::new(0.0, 30.0, 0.0))
            .with_gravity(-1.0)
            .with_architect_model("m");
        assert_eq!(config.storage.dir, PathBuf::from("/tmp/world"));
        assert_eq!(config.player.spawn_point.y, 30.0);
        assert_eq!(config.physics_settings().gravity, -1.0);
        assert_eq!(config.architect.model, "m");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GameConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("here.toml"));
    }
}

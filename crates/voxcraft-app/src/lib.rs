//! Game session for Voxcraft.
//!
//! [`GameSession`] owns every piece of game state (the world store, the
//! physics world, the player, the camera rig and the architect panel) and
//! advances them together once per frame. Front ends feed it an
//! [`InputSnapshot`](voxcraft_input::InputSnapshot) per frame and pointer
//! hits as they happen.
//!
//! # Example
//!
//! ```no_run
//! use voxcraft_app::{init_logging, GameConfig, GameSession};
//! use voxcraft_input::InputSnapshot;
//! use voxcraft_world::FileStorage;
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging();
//!     let config = GameConfig::default();
//!     let storage = FileStorage::new(&config.storage.dir);
//!     let mut session: GameSession = GameSession::new(config, Box::new(storage));
//!
//!     for _ in 0..60 {
//!         session.tick(&InputSnapshot::default(), 1.0 / 60.0);
//!     }
//!     session.save()
//! }
//! ```

mod config;
mod logging;
mod session;

pub use config::{GameConfig, PhysicsConfig, StorageConfig};
pub use logging::{init_logging, init_logging_with};
pub use session::{FrameReport, GameSession, SessionState, POINTER_REACH};

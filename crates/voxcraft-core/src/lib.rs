//! Core types for Voxcraft.
//!
//! This crate provides the foundational types shared by every other crate:
//! - The block registry ([`BlockType`] and its rendering attributes)
//! - Grid coordinates ([`VoxelCell`]) and cube faces ([`BlockFace`])
//! - Pointer hits and actions, plus ray helpers for picking
//! - The common error type

pub mod block;
pub mod coords;
pub mod error;
pub mod interaction;
pub mod math;

pub use block::{BlockAttributes, BlockType};
pub use coords::{BlockFace, VoxelCell};
pub use error::{Error, Result};
pub use interaction::{PointerAction, SurfaceHit};

/// Game-wide constants
pub mod constants {
    /// Maximum (and starting) player health.
    pub const MAX_HEALTH: u32 = 10;
    /// Height of the ground plane. Blocks resting on it sit at y = 0.
    pub const GROUND_HEIGHT: f32 = -0.5;
    /// Layer that ground clicks place blocks into.
    pub const GROUND_LAYER: i32 = 0;
    /// Edge length of a placed block.
    pub const BLOCK_SIZE: f32 = 1.0;
}

//! Rigid-body physics adapter for Voxcraft.
//!
//! Wraps a `rapier3d` pipeline with the handful of operations the game needs:
//! one dynamic ball for the player, a static ground plane, one static cube per
//! placed block, per-step body feedback over channels, and pointer raycasts
//! that report what a click landed on.

mod convert;
mod feedback;
mod world;

pub use feedback::{BodyFeedback, BodySample};
pub use world::{BodyHandle, PhysicsSettings, PhysicsWorld};

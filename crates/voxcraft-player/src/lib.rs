//! Player controller for Voxcraft.
//!
//! Turns an [`InputSnapshot`](voxcraft_input::InputSnapshot) and physics
//! feedback into velocity commands, detects hard landings and places the
//! camera.
//!
//! The pure parts ([`PlayerController`], [`FallDamageDetector`],
//! [`CameraRig`]) never touch the physics world; [`Player`] binds them to a
//! body and its feedback channel.

mod camera;
mod controller;
mod fall;
mod player;

pub use camera::{CameraPose, CameraRig, CameraSettings, ViewMode};
pub use controller::{PlayerController, PlayerSettings};
pub use fall::FallDamageDetector;
pub use player::{Player, PlayerFrame};

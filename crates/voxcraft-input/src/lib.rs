//! Input handling for Voxcraft.
//!
//! Raw keyboard, mouse and touch events are folded into an [`InputManager`],
//! which hands the game one [`InputSnapshot`] per frame. The snapshot is the
//! only thing the player controller and the session look at.
//!
//! # Core Types
//!
//! - [`InputManager`]: Collects events and produces snapshots
//! - [`KeyBindings`]: Maps physical keys to [`GameAction`]s
//! - [`VirtualJoystick`]: Touch pad that drives the same movement flags as WASD
//! - [`classify_click`]: Decides whether a click places or removes
//!
//! # Usage
//!
//! ```ignore
//! use voxcraft_input::{InputManager, KeyBindings};
//!
//! let mut input = InputManager::new(KeyBindings::default());
//!
//! // In the event handler
//! input.process_window_event(&event);
//!
//! // Once per frame
//! let snapshot = input.snapshot();
//! session.tick(&snapshot, dt);
//! input.end_frame();
//! ```

mod action;
mod input;
mod joystick;
mod keyboard;
mod pointer;
mod snapshot;

pub use action::{GameAction, KeyBindings};
pub use input::InputManager;
pub use joystick::VirtualJoystick;
pub use keyboard::KeyboardState;
pub use pointer::{classify_click, Modifiers, PointerButton};
pub use snapshot::{InputSnapshot, MovementState};

// Re-export winit types commonly used with input
pub use winit::event::{DeviceEvent, WindowEvent};
pub use winit::keyboard::KeyCode;

//! AI text-to-structure builder for Voxcraft.
//!
//! A natural-language request ("a small stone tower") goes to a
//! generative-model service, which answers with a list of block placements.
//! The placements are validated and applied to the world in one batch.
//!
//! - [`ArchitectService`]: anything that turns a prompt into commands
//! - [`GeminiArchitect`]: HTTP implementation against a Gemini-style API
//! - [`apply_commands`]: validates commands and bulk-inserts them
//! - [`ArchitectPanel`]: runs one request at a time in the background and is
//!   polled from the frame loop

mod apply;
mod command;
mod error;
mod gemini;
mod panel;
mod service;
mod style;

pub use apply::{apply_commands, ApplyReport};
pub use command::{parse_commands, ArchitectCommand};
pub use error::{ArchitectError, Result};
pub use gemini::{ArchitectSettings, GeminiArchitect};
pub use panel::{ArchitectPanel, PanelOutcome};
pub use service::{request_structure, ArchitectService};
pub use style::{compose_prompt, BuildStyle};

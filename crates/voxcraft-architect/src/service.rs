//! The architect service abstraction.

use std::future::Future;

use tracing::{info, warn};

use crate::command::ArchitectCommand;
use crate::error::Result;
use crate::style::BuildStyle;

/// Something that turns a building request into block placements.
pub trait ArchitectService: Send + Sync + 'static {
    /// Ask for a structure. `prompt` is already composed with the style.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<Vec<ArchitectCommand>>> + Send;
}

/// Compose the prompt and query `service`, turning every failure into an
/// empty list.
///
/// The caller is expected to have rejected blank prompts already; one that
/// slips through yields an empty list without a request.
pub async fn request_structure<S: ArchitectService>(
    service: &S,
    prompt: &str,
    style: BuildStyle,
) -> Vec<ArchitectCommand> {
    let full = match crate::style::compose_prompt(prompt, style) {
        Ok(full) => full,
        Err(err) => {
            warn!(%err, "architect request not sent");
            return Vec::new();
        }
    };
    match service.generate(&full).await {
        Ok(commands) => {
            info!(count = commands.len(), %style, "architect answered");
            commands
        }
        Err(err) => {
            warn!(%err, "architect request failed");
            Vec::new()
        }
    }
}

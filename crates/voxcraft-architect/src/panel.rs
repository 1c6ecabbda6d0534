//! Background request runner polled from the frame loop.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{info, warn};
use voxcraft_world::WorldStore;

use crate::apply::{apply_commands, ApplyReport};
use crate::command::ArchitectCommand;
use crate::error::{ArchitectError, Result};
use crate::service::{request_structure, ArchitectService};
use crate::style::{compose_prompt, BuildStyle};

/// Result of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    /// The service answered with at least one command.
    Applied(ApplyReport),
    /// The service failed or answered with nothing; the user may try again.
    NothingChanged,
}

/// Runs at most one architect request at a time.
///
/// [`request`](Self::request) starts a request on the tokio runtime and
/// returns immediately. The frame loop calls [`poll`](Self::poll), which
/// applies the answer to the store once it has arrived. A second request is
/// refused while one is in flight; nothing is cancelled.
#[derive(Debug)]
pub struct ArchitectPanel<S> {
    service: Arc<S>,
    runtime: Handle,
    style: BuildStyle,
    pending: Option<oneshot::Receiver<Vec<ArchitectCommand>>>,
}

impl<S: ArchitectService> ArchitectPanel<S> {
    pub fn new(service: S, runtime: Handle) -> Self {
        Self {
            service: Arc::new(service),
            runtime,
            style: BuildStyle::None,
            pending: None,
        }
    }

    #[must_use]
    pub const fn style(&self) -> BuildStyle {
        self.style
    }

    pub fn set_style(&mut self, style: BuildStyle) {
        self.style = style;
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a request.
    ///
    /// Fails without contacting the service if the prompt is blank or a
    /// request is already in flight.
    pub fn request(&mut self, prompt: &str) -> Result<()> {
        if self.is_busy() {
            return Err(ArchitectError::Busy);
        }
        compose_prompt(prompt, self.style)?;

        let (tx, rx) = oneshot::channel();
        let service = Arc::clone(&self.service);
        let prompt = prompt.to_string();
        let style = self.style;
        self.runtime.spawn(async move {
            let commands = request_structure(service.as_ref(), &prompt, style).await;
            // The panel may have been dropped; nobody is left to tell.
            let _ = tx.send(commands);
        });
        self.pending = Some(rx);
        info!(%style, "architect request started");
        Ok(())
    }

    /// Apply the answer if it has arrived. Returns `None` while still waiting
    /// or when nothing was requested.
    pub fn poll(&mut self, store: &mut WorldStore) -> Option<PanelOutcome> {
        let rx = self.pending.as_mut()?;
        let commands = match rx.try_recv() {
            Ok(commands) => commands,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => {
                warn!("architect request ended without an answer");
                Vec::new()
            }
        };
        self.pending = None;
        Some(Self::finish(store, &commands))
    }

    /// Block the calling thread until the in-flight request finishes, then
    /// apply it. Must not be called from inside the runtime.
    pub fn wait(&mut self, store: &mut WorldStore) -> Option<PanelOutcome> {
        let rx = self.pending.take()?;
        let commands = self.runtime.block_on(rx).unwrap_or_else(|_| {
            warn!("architect request ended without an answer");
            Vec::new()
        });
        Some(Self::finish(store, &commands))
    }

    fn finish(store: &mut WorldStore, commands: &[ArchitectCommand]) -> PanelOutcome {
        if commands.is_empty() {
            info!("architect returned nothing, try again");
            return PanelOutcome::NothingChanged;
        }
        PanelOutcome::Applied(apply_commands(store, commands))
    }
}

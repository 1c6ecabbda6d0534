//! Per-step body feedback delivered over channels.

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use glam::Vec3;

use crate::world::BodyHandle;

/// Samples buffered per subscriber before new ones are dropped.
const FEEDBACK_CAPACITY: usize = 256;

/// Position and linear velocity of a body after one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySample {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Receiving end of a body subscription.
///
/// Dropping it unsubscribes; the world prunes the sender on its next step.
#[derive(Debug)]
pub struct BodyFeedback {
    body: BodyHandle,
    rx: Receiver<BodySample>,
}

impl BodyFeedback {
    /// Body this feedback belongs to.
    #[must_use]
    pub const fn body(&self) -> BodyHandle {
        self.body
    }

    /// Drain every sample received since the last call, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = BodySample> + '_ {
        self.rx.try_iter()
    }

    /// Most recent sample, discarding older ones.
    #[must_use]
    pub fn latest(&self) -> Option<BodySample> {
        self.drain().last()
    }
}

/// Sending end kept by the world.
#[derive(Debug)]
pub(crate) struct Subscriber {
    pub body: BodyHandle,
    tx: Sender<BodySample>,
}

impl Subscriber {
    /// Deliver a sample. Returns `false` once the receiver is gone.
    pub fn send(&self, sample: BodySample) -> bool {
        match self.tx.try_send(sample) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!(body = ?self.body, "feedback buffer full, sample dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

pub(crate) fn subscription(body: BodyHandle) -> (Subscriber, BodyFeedback) {
    let (tx, rx) = channel::bounded(FEEDBACK_CAPACITY);
    (Subscriber { body, tx }, BodyFeedback { body, rx })
}

//! Decision exchange between the monitoring loop and the foreground.
//!
//! The loop raises a request and blocks on a condition variable; the
//! foreground answers exactly once through a [`DecisionReply`]. Teardown
//! closes the exchange so a blocked loop always wakes up with `Terminate`.

use crate::safe_lock;
use log::{debug, warn};
use std::sync::{Arc, Condvar, Mutex};

/// Answer to a distraction prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Terminate the distraction and keep studying.
    Resume,
    /// End the session.
    Terminate,
}

/// Tri-state value held while an exchange is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptDecision {
    Pending,
    Resume,
    Terminate,
}

impl From<Decision> for InterruptDecision {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Resume => InterruptDecision::Resume,
            Decision::Terminate => InterruptDecision::Terminate,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    decision: Option<InterruptDecision>,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct Handshake {
    slot: Mutex<Slot>,
    changed: Condvar,
}

impl Handshake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an exchange. Returns `false` when the handshake has been closed
    /// by teardown; the caller must then act as if `Terminate` was chosen.
    pub fn raise(&self) -> bool {
        let mut slot = safe_lock(&self.slot, "Handshake");
        if slot.closed {
            return false;
        }
        slot.decision = Some(InterruptDecision::Pending);
        true
    }

    /// Record the foreground's answer. Only the first answer to a pending
    /// exchange counts; later ones return `false`.
    pub fn resolve(&self, decision: Decision) -> bool {
        let mut slot = safe_lock(&self.slot, "Handshake");
        if slot.decision != Some(InterruptDecision::Pending) {
            debug!("Ignoring {decision:?}: no pending decision");
            return false;
        }
        slot.decision = Some(decision.into());
        self.changed.notify_all();
        true
    }

    /// Block until the open exchange is answered, then reset it.
    pub fn wait(&self) -> Decision {
        let mut slot = safe_lock(&self.slot, "Handshake");
        while slot.decision == Some(InterruptDecision::Pending) {
            slot = match self.changed.wait(slot) {
                Ok(guard) => guard,
                Err(poisoned) => {
                    warn!("Handshake mutex was poisoned, recovering");
                    poisoned.into_inner()
                }
            };
        }

        match slot.decision.take() {
            Some(InterruptDecision::Resume) => Decision::Resume,
            Some(InterruptDecision::Terminate | InterruptDecision::Pending) | None => Decision::Terminate,
        }
    }

    pub fn is_pending(&self) -> bool {
        safe_lock(&self.slot, "Handshake").decision == Some(InterruptDecision::Pending)
    }

    /// Close the exchange for good, answering `Terminate` to any pending
    /// request. Returns `true` if a request was outstanding.
    pub fn force_terminate(&self) -> bool {
        let mut slot = safe_lock(&self.slot, "Handshake");
        slot.closed = true;
        let was_pending = slot.decision == Some(InterruptDecision::Pending);
        if was_pending {
            slot.decision = Some(InterruptDecision::Terminate);
            self.changed.notify_all();
        }
        was_pending
    }
}

/// One-shot handle the foreground uses to answer a prompt. Safe to send to
/// any thread and to resolve after the prompt call has returned.
#[derive(Debug, Clone)]
pub struct DecisionReply {
    handshake: Arc<Handshake>,
}

impl DecisionReply {
    pub(crate) fn new(handshake: Arc<Handshake>) -> Self {
        Self { handshake }
    }

    pub fn resolve(&self, decision: Decision) -> bool {
        self.handshake.resolve(decision)
    }

    pub fn resume(&self) -> bool {
        self.resolve(Decision::Resume)
    }

    pub fn terminate(&self) -> bool {
        self.resolve(Decision::Terminate)
    }
}

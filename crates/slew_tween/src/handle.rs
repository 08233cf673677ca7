//! Settle-once outcome handles

use crate::error::TweenError;
use std::sync::{Arc, Mutex};

/// How a session ended
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Ran to completion; every attribute landed exactly on its target
    Completed,
    /// Cancelled before completion (named replacement or explicit terminate)
    Cancelled,
    /// An attribute write or the tick hook failed mid-flight
    Failed(TweenError),
}

/// Cloneable handle to a session's eventual outcome
///
/// Settles exactly once; later settle attempts are no-ops. The model is
/// single-threaded cooperative, so the handle is query-style: hosts poll
/// between frames rather than block on it.
#[derive(Clone, Debug, Default)]
pub struct TweenHandle {
    shared: Arc<Mutex<Option<Outcome>>>,
}

impl TweenHandle {
    pub(crate) fn pending() -> Self {
        Self::default()
    }

    pub(crate) fn settled(outcome: Outcome) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Some(outcome))),
        }
    }

    /// Settle the handle; returns false if it was already settled
    pub(crate) fn settle(&self, outcome: Outcome) -> bool {
        let mut slot = self.shared.lock().unwrap();
        if slot.is_some() {
            return false;
        }
        *slot = Some(outcome);
        true
    }

    /// The outcome, if settled
    pub fn outcome(&self) -> Option<Outcome> {
        self.shared.lock().unwrap().clone()
    }

    pub fn is_settled(&self) -> bool {
        self.shared.lock().unwrap().is_some()
    }

    pub fn is_pending(&self) -> bool {
        !self.is_settled()
    }

    /// True once the session ran to completion
    pub fn completed(&self) -> bool {
        matches!(self.outcome(), Some(Outcome::Completed))
    }

    /// True once the session was cancelled
    pub fn cancelled(&self) -> bool {
        matches!(self.outcome(), Some(Outcome::Cancelled))
    }

    /// The failure, if the session failed
    pub fn error(&self) -> Option<TweenError> {
        match self.outcome() {
            Some(Outcome::Failed(e)) => Some(e),
            _ => None,
        }
    }
}

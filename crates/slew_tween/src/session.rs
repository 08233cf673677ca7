//! Animation sessions and the per-frame advance
//!
//! A session is one in-flight animate request: its attribute tweens, its
//! elapsed-time counter, its easing curve and its settle-once handle. The
//! frame clock drives [`advance`] once per rendered frame until the session
//! completes, is cancelled, or fails.

use crate::attr::AttrTween;
use crate::easing::Easing;
use crate::error::TweenError;
use crate::handle::{Outcome, TweenHandle};
use slew_core::{CallbackId, ContextId};
use slotmap::new_key_type;
use smallvec::SmallVec;
use std::mem;
use std::sync::{Arc, Mutex};

new_key_type! {
    /// Handle to a live session inside the tweener
    pub struct SessionId;
}

/// Snapshot of a session handed to the per-tick hook
#[derive(Clone, Copy, Debug)]
pub struct TickInfo<'a> {
    /// Accumulated elapsed time, including this frame's delta
    pub elapsed_ms: f32,
    pub duration_ms: f32,
    /// Eased progress applied to every attribute this tick
    pub progress: f32,
    pub name: Option<&'a str>,
}

/// Per-frame side-effect hook, invoked after all attribute writes for a tick
///
/// Returning an error settles the session as failed.
pub type TickHook = Box<dyn FnMut(f32, &TickInfo<'_>) -> Result<(), TweenError> + Send>;

pub(crate) struct SessionState {
    pub(crate) id: SessionId,
    /// Named sessions are discoverable via the registry; `Arc<str>` so the
    /// per-tick snapshot clone is a refcount bump, not an allocation
    pub(crate) name: Option<Arc<str>>,
    pub(crate) attrs: SmallVec<[AttrTween; 4]>,
    pub(crate) duration_ms: f32,
    pub(crate) elapsed_ms: f32,
    pub(crate) easing: Easing,
    pub(crate) on_tick: Option<TickHook>,
    pub(crate) context: ContextId,
    pub(crate) callback: Option<CallbackId>,
    pub(crate) handle: TweenHandle,
}

pub(crate) type SharedSession = Arc<Mutex<SessionState>>;

/// What one tick of a session produced
pub(crate) enum Advance {
    /// Still running; another frame is needed
    Running,
    /// This tick decided the outcome; the caller performs cleanup
    Finished(Outcome),
    /// The session settled before this callback fired; nothing was touched
    Stale,
}

/// Advance a session by one frame's elapsed milliseconds
///
/// Attribute writes happen in list order, the hook runs after all of them,
/// and the final tick forces eased progress to exactly 1.0 so attributes
/// land on their targets regardless of the curve's behavior near 1.
///
/// User code (container writes, the hook) runs with the session lock
/// released; the mutable parts are taken out of the state around it so a
/// hook may terminate its own session without deadlocking.
pub(crate) fn advance(session: &SharedSession, dt_ms: f32) -> Advance {
    let (mut attrs, mut hook, name, eased, complete, elapsed, duration) = {
        let mut s = session.lock().unwrap();
        if s.handle.is_settled() {
            return Advance::Stale;
        }

        s.elapsed_ms += dt_ms;
        let complete = s.elapsed_ms >= s.duration_ms;
        let ratio = s.elapsed_ms / s.duration_ms;
        let eased = if complete { 1.0 } else { s.easing.apply(ratio) };

        (
            mem::take(&mut s.attrs),
            s.on_tick.take(),
            s.name.clone(),
            eased,
            complete,
            s.elapsed_ms,
            s.duration_ms,
        )
    };

    let mut result = Ok(());
    for attr in attrs.iter_mut() {
        if let Err(e) = attr.apply(eased) {
            result = Err(TweenError::from(e));
            break;
        }
    }

    if result.is_ok() {
        if let Some(hook) = hook.as_mut() {
            let info = TickInfo {
                elapsed_ms: elapsed,
                duration_ms: duration,
                progress: eased,
                name: name.as_deref(),
            };
            result = hook(dt_ms, &info);
        }
    }

    {
        // Restore regardless of outcome; harmless if user code settled us.
        let mut s = session.lock().unwrap();
        s.attrs = attrs;
        s.on_tick = hook;
    }

    match result {
        Err(e) => Advance::Finished(Outcome::Failed(e)),
        Ok(()) if complete => Advance::Finished(Outcome::Completed),
        Ok(()) => Advance::Running,
    }
}

//! The tween manager
//!
//! `Tweener` accepts animate requests, registers each session's per-frame
//! callback with the injected clock, tracks named sessions in a registry, and
//! guarantees exactly-once settlement with synchronous deregistration.

use crate::attr::{AttrSpec, AttrTween};
use crate::easing::Easing;
use crate::error::TweenError;
use crate::handle::{Outcome, TweenHandle};
use crate::session::{advance, Advance, SessionId, SessionState, SharedSession, TickHook, TickInfo};
use rustc_hash::FxHashMap;
use slew_core::{ContextId, FrameClock, TickPriority};
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::sync::{Arc, Mutex, Weak};

/// Configuration for one animate request
pub struct TweenOptions {
    name: Option<String>,
    duration_ms: f32,
    easing: Easing,
    priority: TickPriority,
    context: ContextId,
    on_tick: Option<TickHook>,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            name: None,
            duration_ms: 1000.0,
            easing: Easing::Linear,
            priority: TickPriority::Low,
            context: ContextId::ROOT,
            on_tick: None,
        }
    }
}

impl TweenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the session; at most one live session per name, newer requests
    /// cancel the older one
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn priority(mut self, priority: TickPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn context(mut self, context: ContextId) -> Self {
        self.context = context;
        self
    }

    /// Per-frame hook, invoked after all attribute writes for the tick
    pub fn on_tick<F>(mut self, hook: F) -> Self
    where
        F: FnMut(f32, &TickInfo<'_>) -> Result<(), TweenError> + Send + 'static,
    {
        self.on_tick = Some(Box::new(hook));
        self
    }
}

struct TweenerInner {
    sessions: SlotMap<SessionId, SharedSession>,
    by_name: FxHashMap<String, SessionId>,
}

/// The tween manager
///
/// An explicit instance passed by reference to callers; holds the injected
/// frame clock and the name registry. Cheap to clone via [`Tweener::clone`]
/// (shared state).
pub struct Tweener {
    inner: Arc<Mutex<TweenerInner>>,
    clock: Arc<dyn FrameClock>,
}

impl Tweener {
    pub fn new(clock: Arc<dyn FrameClock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TweenerInner {
                sessions: SlotMap::with_key(),
                by_name: FxHashMap::default(),
            })),
            clock,
        }
    }

    /// Start an animation over the given attribute list
    ///
    /// Resolution errors (missing attribute, kind mismatch) are returned
    /// without scheduling anything. A non-empty batch whose every delta is
    /// zero, or a non-positive duration, never registers a frame callback;
    /// the returned handle is already settled. Otherwise the handle settles
    /// exactly once when the session completes, is cancelled, or fails.
    pub fn animate(
        &self,
        specs: Vec<AttrSpec>,
        options: TweenOptions,
    ) -> Result<TweenHandle, TweenError> {
        // A pending session under the same name is cancelled first; its
        // cleanup removes its own registry entry, never the newcomer's.
        if let Some(name) = options.name.as_deref() {
            if let Some(old) = self.lookup(name) {
                tracing::debug!(name, "replacing pending tween");
                self.settle(&old, Outcome::Cancelled);
            }
        }

        let mut attrs: SmallVec<[AttrTween; 4]> = SmallVec::with_capacity(specs.len());
        for spec in specs {
            attrs.push(spec.resolve()?);
        }

        if !attrs.is_empty() && attrs.iter().all(|a| a.is_settled()) {
            tracing::trace!(name = options.name.as_deref(), "tween is a no-op, not scheduling");
            return Ok(TweenHandle::settled(Outcome::Completed));
        }

        if options.duration_ms <= 0.0 {
            // Zero-length timeline: the first tick happens inline at full
            // progress and the clock is never involved.
            for attr in attrs.iter_mut() {
                attr.apply(1.0)?;
            }
            return Ok(TweenHandle::settled(Outcome::Completed));
        }

        let handle = TweenHandle::pending();
        let session: SharedSession = Arc::new(Mutex::new(SessionState {
            id: SessionId::default(),
            name: options.name.as_deref().map(Arc::from),
            attrs,
            duration_ms: options.duration_ms,
            elapsed_ms: 0.0,
            easing: options.easing,
            on_tick: options.on_tick,
            context: options.context,
            callback: None,
            handle: handle.clone(),
        }));

        // Insert into the live map (and registry) before the callback can
        // possibly fire.
        let id = {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.sessions.insert(session.clone());
            if let Some(name) = options.name.clone() {
                inner.by_name.insert(name, id);
            }
            id
        };
        let context = {
            let mut s = session.lock().unwrap();
            s.id = id;
            s.context
        };

        let cb_session = session.clone();
        let cb_inner = Arc::downgrade(&self.inner);
        let cb_clock = self.clock.clone();
        let callback = self.clock.add(
            Box::new(move |dt_ms| {
                if let Advance::Finished(outcome) = advance(&cb_session, dt_ms) {
                    settle_session(&cb_session, &cb_inner, cb_clock.as_ref(), outcome);
                }
            }),
            context,
            options.priority,
        );
        session.lock().unwrap().callback = Some(callback);

        tracing::debug!(
            name = options.name.as_deref(),
            duration_ms = options.duration_ms,
            "tween scheduled"
        );
        Ok(handle)
    }

    /// Cancel the named session, if one is pending
    ///
    /// A no-op for unknown names. Legal from within the session's own tick
    /// hook or attribute write.
    pub fn terminate(&self, name: &str) {
        if let Some(session) = self.lookup(name) {
            tracing::debug!(name, "terminating tween");
            self.settle(&session, Outcome::Cancelled);
        }
    }

    /// True while a session with this name is pending
    pub fn is_active(&self, name: &str) -> bool {
        self.inner.lock().unwrap().by_name.contains_key(name)
    }

    /// Number of live sessions, named or not
    pub fn session_count(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }

    fn lookup(&self, name: &str) -> Option<SharedSession> {
        let inner = self.inner.lock().unwrap();
        inner
            .by_name
            .get(name)
            .and_then(|id| inner.sessions.get(*id))
            .cloned()
    }

    fn settle(&self, session: &SharedSession, outcome: Outcome) {
        settle_session(
            session,
            &Arc::downgrade(&self.inner),
            self.clock.as_ref(),
            outcome,
        );
    }
}

impl Clone for Tweener {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Settle a session and perform its cleanup
///
/// The first settle wins; it deregisters the frame callback in the same
/// synchronous turn (a cancelled session's stale callback must never fire
/// again) and removes the live-map entry. The registry entry is removed only
/// if it still points at this session, so an older session's late cleanup
/// cannot evict a newer session that took over the name.
fn settle_session(
    session: &SharedSession,
    inner: &Weak<Mutex<TweenerInner>>,
    clock: &dyn FrameClock,
    outcome: Outcome,
) {
    let (first, callback, id, name) = {
        let mut s = session.lock().unwrap();
        let first = s.handle.settle(outcome.clone());
        (first, s.callback.take(), s.id, s.name.clone())
    };
    if !first {
        return;
    }

    if let Some(callback) = callback {
        clock.remove(callback);
    }

    match inner.upgrade() {
        Some(inner) => {
            let mut g = inner.lock().unwrap();
            g.sessions.remove(id);
            if let Some(name) = name.as_deref() {
                if g.by_name.get(name) == Some(&id) {
                    g.by_name.remove(name);
                }
            }
            tracing::debug!(name = name.as_deref(), ?outcome, "tween settled");
        }
        // Outcome is already settled; a vanished manager only costs bookkeeping.
        None => tracing::warn!(
            name = name.as_deref(),
            "tweener dropped before session cleanup"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slew_core::{AttrContainer, AttrMap, Color, ManualClock, Value};

    fn setup() -> (Arc<ManualClock>, Tweener) {
        let clock = Arc::new(ManualClock::new());
        let tweener = Tweener::new(clock.clone());
        (clock, tweener)
    }

    #[test]
    fn noop_batch_never_schedules() {
        let (clock, tweener) = setup();
        let target = AttrMap::new().with("x", 5.0).shared();

        let handle = tweener
            .animate(
                vec![AttrSpec::new(target, "x", 5.0)],
                TweenOptions::new().name("idle"),
            )
            .unwrap();

        assert!(handle.completed());
        assert_eq!(clock.callback_count(), 0);
        assert!(!tweener.is_active("idle"));
        assert_eq!(tweener.session_count(), 0);
    }

    #[test]
    fn zero_duration_snaps_to_target() {
        let (clock, tweener) = setup();
        let target = AttrMap::new().with("x", 0.0).shared();

        let handle = tweener
            .animate(
                vec![AttrSpec::new(target.clone(), "x", 42.0)],
                TweenOptions::new().duration_ms(0.0),
            )
            .unwrap();

        assert!(handle.completed());
        assert_eq!(clock.callback_count(), 0);
        assert_eq!(target.lock().unwrap().attr("x"), Some(Value::Number(42.0)));
    }

    #[test]
    fn resolution_error_schedules_nothing() {
        let (clock, tweener) = setup();
        let target = AttrMap::new().with("x", 0.0).shared();

        let err = tweener
            .animate(
                vec![AttrSpec::new(target, "x", Color::RED)],
                TweenOptions::new(),
            )
            .unwrap_err();

        assert!(matches!(err, TweenError::Attr(_)));
        assert_eq!(clock.callback_count(), 0);
        assert_eq!(tweener.session_count(), 0);
    }

    #[test]
    fn empty_batch_acts_as_timer() {
        let (clock, tweener) = setup();

        let handle = tweener
            .animate(vec![], TweenOptions::new().duration_ms(100.0))
            .unwrap();

        assert!(handle.is_pending());
        assert_eq!(clock.callback_count(), 1);

        clock.frame(100.0);
        assert!(handle.completed());
        assert_eq!(clock.callback_count(), 0);
    }

    #[test]
    fn terminate_unknown_name_is_noop() {
        let (clock, tweener) = setup();
        tweener.terminate("nobody");
        assert_eq!(clock.callback_count(), 0);
        assert_eq!(tweener.session_count(), 0);
    }

    #[test]
    fn session_count_tracks_unnamed_sessions() {
        let (clock, tweener) = setup();
        let target = AttrMap::new().with("x", 0.0).shared();

        let handle = tweener
            .animate(
                vec![AttrSpec::new(target, "x", 1.0)],
                TweenOptions::new().duration_ms(200.0),
            )
            .unwrap();

        assert_eq!(tweener.session_count(), 1);
        clock.frame(200.0);
        assert_eq!(tweener.session_count(), 0);
        assert!(handle.completed());
    }
}

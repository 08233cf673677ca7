//! Frame clock capability
//!
//! Animations do not own a loop; they register per-frame callbacks with a
//! clock and the host drives it. The trait keeps the engine agnostic of the
//! actual rendering loop; `ManualClock` is the in-process implementation used
//! by headless hosts and tests.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex};

/// Scoping token for frame callbacks
///
/// Callbacks registered under independent contexts do not interfere; a host
/// may drive one context at a time via [`ManualClock::frame_for`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

impl ContextId {
    /// The canonical root context
    pub const ROOT: ContextId = ContextId(0);
}

/// Scheduling priority for frame callbacks
///
/// Higher priorities run earlier within a frame; registration order breaks
/// ties. `Low` is the default for animations: above idle work, below input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum TickPriority {
    Idle,
    #[default]
    Low,
    Normal,
    High,
}

new_key_type! {
    /// Handle to a registered frame callback
    pub struct CallbackId;
}

/// A per-frame callback receiving the frame's elapsed milliseconds
pub type FrameCallback = Box<dyn FnMut(f32) + Send>;

/// The clock capability animations register with
pub trait FrameClock: Send + Sync {
    /// Register a callback; it fires once per frame until removed
    fn add(&self, callback: FrameCallback, context: ContextId, priority: TickPriority)
        -> CallbackId;

    /// Deregister a callback
    ///
    /// Legal from inside a running callback (including the one being removed);
    /// a callback removed mid-frame never fires again, not even later in the
    /// same frame.
    fn remove(&self, id: CallbackId);
}

struct Registration {
    context: ContextId,
    priority: TickPriority,
    seq: u64,
    /// Taken out of the slot while the callback runs, so a re-entrant
    /// `remove` deletes the slot and the callback is simply dropped on return
    callback: Option<FrameCallback>,
}

struct ClockInner {
    entries: SlotMap<CallbackId, Registration>,
    next_seq: u64,
}

/// An explicitly driven frame clock
///
/// The host calls [`frame`](ManualClock::frame) once per rendered frame with
/// the elapsed milliseconds since the previous one. Callbacks added while a
/// frame is running first fire on the next frame.
pub struct ManualClock {
    inner: Arc<Mutex<ClockInner>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockInner {
                entries: SlotMap::with_key(),
                next_seq: 0,
            })),
        }
    }

    /// Drive one frame for every context
    pub fn frame(&self, dt_ms: f32) {
        self.run_frame(None, dt_ms);
    }

    /// Drive one frame for a single context only
    pub fn frame_for(&self, context: ContextId, dt_ms: f32) {
        self.run_frame(Some(context), dt_ms);
    }

    /// Number of currently registered callbacks
    pub fn callback_count(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    fn run_frame(&self, context: Option<ContextId>, dt_ms: f32) {
        // Snapshot the due callbacks up front: higher priority first, then
        // registration order. Additions during the frame miss the snapshot.
        let mut due: Vec<(TickPriority, u64, CallbackId)> = {
            let inner = self.inner.lock().unwrap();
            inner
                .entries
                .iter()
                .filter(|(_, r)| context.map_or(true, |c| r.context == c))
                .map(|(id, r)| (r.priority, r.seq, id))
                .collect()
        };
        due.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        for (_, _, id) in due {
            // Take the callback out of its slot so user code may re-enter
            // `add`/`remove` without holding the lock.
            let taken = {
                let mut inner = self.inner.lock().unwrap();
                inner.entries.get_mut(id).and_then(|r| r.callback.take())
            };
            let Some(mut callback) = taken else {
                // Removed earlier in this frame
                continue;
            };

            callback(dt_ms);

            let mut inner = self.inner.lock().unwrap();
            if let Some(reg) = inner.entries.get_mut(id) {
                reg.callback = Some(callback);
            }
            // Slot gone: the callback removed itself; drop it here.
        }
    }
}

impl FrameClock for ManualClock {
    fn add(
        &self,
        callback: FrameCallback,
        context: ContextId,
        priority: TickPriority,
    ) -> CallbackId {
        let mut inner = self.inner.lock().unwrap();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let id = inner.entries.insert(Registration {
            context,
            priority,
            seq,
            callback: Some(callback),
        });
        tracing::trace!(?id, ?context, ?priority, "frame callback registered");
        id
    }

    fn remove(&self, id: CallbackId) {
        let removed = self.inner.lock().unwrap().entries.remove(id);
        if removed.is_some() {
            tracing::trace!(?id, "frame callback removed");
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

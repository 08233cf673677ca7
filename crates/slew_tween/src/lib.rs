//! Slew Tween Engine
//!
//! Per-frame attribute tweening synchronized to a shared clock.
//!
//! - **Easing**: linear, cosine, and circular curves over [0, 1]
//! - **Interpolation**: numeric and color-valued attributes, exact convergence
//! - **Named sessions**: at most one live session per name; newer requests
//!   cancel older ones, `terminate` cancels by name
//! - **Settle-once handles**: completed / cancelled / failed, exactly once
//!
//! # Example
//!
//! ```rust
//! use slew_core::{AttrContainer, AttrMap, ManualClock, Value};
//! use slew_tween::{AttrSpec, Easing, TweenOptions, Tweener};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualClock::new());
//! let tweener = Tweener::new(clock.clone());
//!
//! let sprite = AttrMap::new().with("x", 0.0).shared();
//! let handle = tweener
//!     .animate(
//!         vec![AttrSpec::new(sprite.clone(), "x", 100.0)],
//!         TweenOptions::new()
//!             .name("slide")
//!             .duration_ms(1000.0)
//!             .easing(Easing::InOutCosine),
//!     )
//!     .unwrap();
//!
//! // The host drives the clock once per rendered frame.
//! clock.frame(400.0);
//! clock.frame(400.0);
//! clock.frame(400.0);
//!
//! assert!(handle.completed());
//! assert_eq!(sprite.lock().unwrap().attr("x"), Some(Value::Number(100.0)));
//! ```

pub mod attr;
pub mod easing;
pub mod error;
pub mod handle;
pub mod session;
pub mod tweener;

pub use attr::AttrSpec;
pub use easing::Easing;
pub use error::TweenError;
pub use handle::{Outcome, TweenHandle};
pub use session::{SessionId, TickHook, TickInfo};
pub use tweener::{TweenOptions, Tweener};

//! Slew Core Primitives
//!
//! This crate provides the foundational pieces the tween engine is built on:
//!
//! - **Values**: numeric and RGBA color values under one `Value` type
//! - **Attribute Containers**: objects exposing readable/writable named properties
//! - **Frame Clock**: the per-frame callback capability animations register with
//!
//! # Example
//!
//! ```rust
//! use slew_core::{AttrMap, ContextId, FrameClock, ManualClock, TickPriority, Value};
//! use std::sync::{Arc, Mutex};
//!
//! let clock = ManualClock::new();
//! let hits = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = hits.clone();
//! clock.add(
//!     Box::new(move |dt| sink.lock().unwrap().push(dt)),
//!     ContextId::ROOT,
//!     TickPriority::Low,
//! );
//!
//! clock.frame(16.0);
//! assert_eq!(*hits.lock().unwrap(), vec![16.0]);
//!
//! let mut attrs = AttrMap::new();
//! attrs.insert("alpha", Value::Number(0.5));
//! assert_eq!(attrs.get("alpha"), Some(Value::Number(0.5)));
//! ```

pub mod clock;
pub mod color;
pub mod error;
pub mod value;

pub use clock::{CallbackId, ContextId, FrameCallback, FrameClock, ManualClock, TickPriority};
pub use color::Color;
pub use error::AttrError;
pub use value::{AttrContainer, AttrMap, SharedContainer, Value};

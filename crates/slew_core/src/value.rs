//! Animatable values and attribute containers

use crate::color::Color;
use crate::error::AttrError;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};

/// A value an attribute can hold: a plain number or an RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f32),
    Color(Color),
}

impl Value {
    pub fn is_color(&self) -> bool {
        matches!(self, Value::Color(_))
    }

    /// Kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Color(_) => "color",
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            Value::Number(_) => None,
        }
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n)
    }
}

// Lets bare float literals flow into `impl Into<Value>` parameters.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n as f32)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

/// An object exposing readable/writable named properties
///
/// This is the only capability the tween engine requires of an animated
/// object. Containers are shared, not owned, by animations; their lifetime
/// is independent of any session animating them.
pub trait AttrContainer: Send {
    /// Read the current value of a property, if present
    fn attr(&self, key: &str) -> Option<Value>;

    /// Write a property value
    fn set_attr(&mut self, key: &str, value: Value) -> Result<(), AttrError>;
}

/// Shared handle to an attribute container
pub type SharedContainer = Arc<Mutex<dyn AttrContainer>>;

/// Default map-backed attribute container
///
/// Writes to unknown keys insert them, matching loose property-bag semantics.
#[derive(Debug, Default)]
pub struct AttrMap {
    attrs: FxHashMap<String, Value>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self {
            attrs: FxHashMap::default(),
        }
    }

    /// Builder: set an initial attribute
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.attrs.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Wrap in a shared handle for animating
    pub fn shared(self) -> SharedContainer {
        Arc::new(Mutex::new(self))
    }
}

impl AttrContainer for AttrMap {
    fn attr(&self, key: &str) -> Option<Value> {
        self.get(key)
    }

    fn set_attr(&mut self, key: &str, value: Value) -> Result<(), AttrError> {
        self.attrs.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kind_accessors() {
        let n = Value::Number(3.5);
        let c = Value::Color(Color::RED);

        assert!(!n.is_color());
        assert!(c.is_color());
        assert_eq!(n.as_number(), Some(3.5));
        assert_eq!(n.as_color(), None);
        assert_eq!(c.as_color(), Some(Color::RED));
        assert_eq!(n.kind(), "number");
        assert_eq!(c.kind(), "color");
    }

    #[test]
    fn attr_map_read_write() {
        let mut map = AttrMap::new().with("x", 1.0);
        assert_eq!(map.attr("x"), Some(Value::Number(1.0)));
        assert_eq!(map.attr("y"), None);

        map.set_attr("y", Value::Number(2.0)).unwrap();
        assert_eq!(map.attr("y"), Some(Value::Number(2.0)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn shared_container_is_object_safe() {
        let shared = AttrMap::new().with("fill", Color::BLUE).shared();
        let value = shared.lock().unwrap().attr("fill");
        assert_eq!(value, Some(Value::Color(Color::BLUE)));
    }
}

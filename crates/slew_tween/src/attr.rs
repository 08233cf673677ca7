//! Attribute descriptors and interpolation
//!
//! An [`AttrSpec`] is what a caller hands to `animate`; resolution turns it
//! into an [`AttrTween`] with a concrete starting value and delta. Each tick
//! the tween writes exactly one interpolated value back to its container.

use slew_core::{AttrError, SharedContainer, Value};

/// One property animation unit: target container + key + destination value
pub struct AttrSpec {
    target: SharedContainer,
    key: String,
    to: Value,
    from: Option<Value>,
}

impl AttrSpec {
    pub fn new(target: SharedContainer, key: impl Into<String>, to: impl Into<Value>) -> Self {
        Self {
            target,
            key: key.into(),
            to: to.into(),
            from: None,
        }
    }

    /// Builder: explicit starting value (default: the container's current value)
    pub fn with_from(mut self, from: impl Into<Value>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Resolve the starting value and delta against the container's current state
    pub(crate) fn resolve(self) -> Result<AttrTween, AttrError> {
        let from = match self.from {
            Some(v) => v,
            None => self
                .target
                .lock()
                .unwrap()
                .attr(&self.key)
                .ok_or_else(|| AttrError::Missing(self.key.clone()))?,
        };

        let (delta, is_color) = match (from, self.to) {
            (Value::Number(f), Value::Number(t)) => (t - f, false),
            (Value::Color(_), Value::Color(_)) => (0.0, true),
            (f, t) => {
                return Err(AttrError::KindMismatch {
                    key: self.key,
                    expected: t.kind(),
                    got: f.kind(),
                })
            }
        };

        Ok(AttrTween {
            target: self.target,
            key: self.key,
            from,
            to: self.to,
            delta,
            is_color,
            progress_applied: 0.0,
        })
    }
}

/// A resolved attribute tween
pub struct AttrTween {
    target: SharedContainer,
    key: String,
    from: Value,
    to: Value,
    /// `to - from` for numeric tweens; colors interpolate channel-wise per
    /// tick instead of through a scalar delta
    delta: f32,
    is_color: bool,
    /// Fraction of the delta already applied; diagnostic, refreshed each tick
    progress_applied: f32,
}

impl AttrTween {
    /// True when there is nothing to animate
    pub(crate) fn is_settled(&self) -> bool {
        if self.is_color {
            self.from == self.to
        } else {
            self.delta == 0.0
        }
    }

    /// Write the value for `progress` into the container
    ///
    /// `progress >= 1.0` writes `to` exactly, bypassing interpolation
    /// arithmetic so convergence is not subject to floating-point drift.
    pub(crate) fn apply(&mut self, progress: f32) -> Result<(), AttrError> {
        let value = if progress >= 1.0 {
            self.to
        } else if self.is_color {
            match (self.from, self.to) {
                (Value::Color(a), Value::Color(b)) => Value::Color(a.mix(b, progress)),
                // resolve() guarantees both sides are colors
                _ => unreachable!("color tween with non-color endpoints"),
            }
        } else {
            match self.from {
                Value::Number(f) => Value::Number(f + self.delta * progress),
                _ => unreachable!("numeric tween with non-numeric endpoints"),
            }
        };

        self.progress_applied = progress;
        self.target.lock().unwrap().set_attr(&self.key, value)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn progress_applied(&self) -> f32 {
        self.progress_applied
    }
}

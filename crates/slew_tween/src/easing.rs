//! Easing functions for tweens

use std::f32::consts::PI;

/// Easing function type
///
/// Maps normalized progress [0, 1] to eased progress [0, 1]. Inputs outside
/// that domain are not supported; the tick algorithm forces progress to 1.0
/// at completion before any curve is consulted.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Cosine-shaped ease in and out: `(1 - cos(pi * t)) / 2`
    InOutCosine,
    /// Circular ease out: `sqrt(1 - (t - 1)^2)`
    OutCircle,
    /// Circular ease in: `1 - sqrt(1 - t^2)`
    InCircle,
    /// Caller-supplied curve over the same [0, 1] domain
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::InOutCosine => (1.0 - (PI * t).cos()) / 2.0,
            Easing::OutCircle => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
            Easing::InCircle => 1.0 - (1.0 - t * t).sqrt(),
            Easing::Custom(f) => f(t),
        }
    }
}

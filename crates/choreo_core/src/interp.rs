//! Interpolation functions for tweened values

use crate::error::ChoreoError;

/// Default decay rate for [`Interpolator::ExpDecay`].
pub const DEFAULT_DECAY: f32 = 6.0;

/// Interpolation kind for a tween
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interpolator {
    #[default]
    Linear,
    /// Sine-based symmetric acceleration and deceleration
    EaseInOut,
    /// Decay-rate chase toward the end value. `step` is raw elapsed seconds
    /// rather than normalized progress, and the end value is only approached
    /// asymptotically; suited to chase-style motion, not fixed-duration
    /// arrival.
    ExpDecay { decay: f32 },
}

impl Interpolator {
    /// Exponential decay with the default rate
    pub fn exp_decay() -> Self {
        Self::ExpDecay {
            decay: DEFAULT_DECAY,
        }
    }

    /// Resolve an interpolator from its configuration name.
    ///
    /// Unknown names are a configuration error and fail immediately.
    pub fn from_name(name: &str) -> Result<Self, ChoreoError> {
        match name {
            "linear" => Ok(Self::Linear),
            "ease-in-out" => Ok(Self::EaseInOut),
            "exp-decay" => Ok(Self::exp_decay()),
            other => {
                tracing::error!(name = %other, "unknown interpolator");
                Err(ChoreoError::UnknownInterpolator(other.to_string()))
            }
        }
    }

    /// Blend between `start` and `end` at `step`.
    ///
    /// For [`Linear`](Self::Linear) and [`EaseInOut`](Self::EaseInOut),
    /// `step` is normalized progress in `[0, 1]` and the endpoints are
    /// exact: `apply(a, b, 0.0) == a` and `apply(a, b, 1.0) == b`.
    pub fn apply(&self, start: f32, end: f32, step: f32) -> f32 {
        match self {
            Self::Linear => lerp(start, end, step),
            Self::EaseInOut => lerp(start, end, ease_in_out_sine(step)),
            Self::ExpDecay { decay } => end + (start - end) * (-decay * step).exp(),
        }
    }
}

/// Linear blend between `a` and `b`
pub fn lerp(a: f32, b: f32, step: f32) -> f32 {
    a + (b - a) * step
}

fn ease_in_out_sine(x: f32) -> f32 {
    -((std::f32::consts::PI * x).cos() - 1.0) / 2.0
}

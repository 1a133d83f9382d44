//! Parameter range and scaling for host-automated parameters.
//!
//! Provides normalized (0.0-1.0) ↔ real value conversion.
//!
//! # Example
//!
//! ```
//! use monoslide_core::{ParameterRange, ParameterScale};
//!
//! // Forced velocity: 0 (off) to 127, integer steps
//! let velocity = ParameterRange::integer(0, 127, 0);
//! assert_eq!(velocity.denormalize(1.0), 127.0);
//! assert_eq!(velocity.scale, ParameterScale::Integer);
//! ```

/// How a parameter value is scaled between normalized (0-1) and real values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterScale {
    /// `real = min + normalized * (max - min)`
    #[default]
    Linear,

    /// Values are quantized to integers between `min` and `max`.
    Integer,
}

/// Valid range and default of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub scale: ParameterScale,
}

impl ParameterRange {
    /// `default` is clamped to the range.
    pub fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        debug_assert!(max > min, "max must be greater than min");

        Self {
            min,
            max,
            default: default.clamp(min, max),
            scale,
        }
    }

    pub fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    pub fn integer(min: i32, max: i32, default: i32) -> Self {
        Self::new(
            min as f32,
            max as f32,
            default as f32,
            ParameterScale::Integer,
        )
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        let range = self.max - self.min;

        if range <= 0.0 {
            return 0.0;
        }

        (value - self.min) / range
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        self.quantize(self.min + normalized * (self.max - self.min))
    }

    /// Clamp a real value to this parameter's range, quantizing integer
    /// parameters. NaN maps to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        self.quantize(value.clamp(self.min, self.max))
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    fn quantize(&self, value: f32) -> f32 {
        match self.scale {
            ParameterScale::Linear => value,
            ParameterScale::Integer => value.round(),
        }
    }
}

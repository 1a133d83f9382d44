//! Builder for configuring and constructing a `MonoSlide`.

use std::sync::Arc;

use monoslide_core::{ParamId, ParamSnapshot, SlideConfig, SlideParams};

use crate::{MonoSlide, Result};

/// Collects configuration and initial parameter values, then validates both
/// in [`build`](Self::build).
///
/// # Example
///
/// ```
/// use monoslide::prelude::*;
///
/// let slide = MonoSlide::builder()
///     .sample_rate(44100.0)
///     .message_rate_hz(1000)
///     .beat_divisor(32.0)
///     .bend_semitone_distance(12.0)
///     .build()?;
///
/// assert_eq!(slide.config().message_interval(), 44);
/// assert_eq!(slide.params().get(ParamId::BendSemitoneDistance), 12.0);
/// # Ok::<(), monoslide::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MonoSlideBuilder {
    config: SlideConfig,
    params: ParamSnapshot,
}

impl MonoSlideBuilder {
    /// Default: 44100
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Default: 500 (one bend update every 2 ms)
    pub fn message_rate_hz(mut self, rate: u32) -> Self {
        self.config.message_rate_hz = rate;
        self
    }

    /// Tempo until the host reports one. Default: 120
    pub fn default_bpm(mut self, bpm: f32) -> Self {
        self.config.default_bpm = bpm;
        self
    }

    /// Default: 8192
    pub fn output_capacity_bytes(mut self, bytes: usize) -> Self {
        self.config.output_capacity_bytes = bytes;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SlideConfig) -> Self {
        self.config = config;
        self
    }

    pub fn beat_divisor(mut self, value: f32) -> Self {
        self.params.beat_divisor = value;
        self
    }

    pub fn bend_semitone_distance(mut self, value: f32) -> Self {
        self.params.bend_semitone_distance = value;
        self
    }

    /// 0 keeps the played velocity.
    pub fn forced_velocity(mut self, value: f32) -> Self {
        self.params.forced_velocity = value;
        self
    }

    /// Validate and build.
    ///
    /// Initial parameter values must lie inside their ranges; live writes
    /// through [`SlideParams`] are clamped instead.
    pub fn build(self) -> Result<MonoSlide> {
        let values = [
            (ParamId::BeatDivisor, self.params.beat_divisor),
            (ParamId::BendSemitoneDistance, self.params.bend_semitone_distance),
            (ParamId::ForcedVelocity, self.params.forced_velocity),
        ];
        for (id, value) in values {
            if !id.range().contains(value) {
                return Err(monoslide_core::Error::InvalidParameter {
                    name: id.name(),
                    value,
                }
                .into());
            }
        }

        MonoSlide::with_params(self.config, Arc::new(SlideParams::from_snapshot(self.params)))
    }
}

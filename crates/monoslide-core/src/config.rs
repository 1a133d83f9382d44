//! Engine configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration fixed for the lifetime of an engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    pub sample_rate: f64,
    /// Bend updates per second while sliding (500 = every 2 ms).
    pub message_rate_hz: u32,
    /// Tempo assumed until the host sends a position update.
    pub default_bpm: f32,
    /// Byte capacity of output sequences created by the engine.
    pub output_capacity_bytes: usize,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            message_rate_hz: 500,
            default_bpm: 120.0,
            output_capacity_bytes: 8192,
        }
    }
}

impl SlideConfig {
    pub fn validate(&self) -> Result<()> {
        if !(8000.0..=384000.0).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if self.message_rate_hz == 0 || self.message_interval() == 0 {
            return Err(Error::InvalidConfig(format!(
                "message_rate_hz {} gives no usable update interval at {} Hz",
                self.message_rate_hz, self.sample_rate
            )));
        }
        if !self.default_bpm.is_finite() || self.default_bpm <= 0.0 {
            return Err(Error::InvalidTempo(self.default_bpm));
        }
        if self.output_capacity_bytes < monoslide_midi::event_size(3) {
            return Err(Error::InvalidConfig(format!(
                "output_capacity_bytes {} cannot hold a single event",
                self.output_capacity_bytes
            )));
        }
        Ok(())
    }

    /// Samples between periodic bend updates. Independent of tempo.
    #[inline]
    pub fn message_interval(&self) -> u32 {
        if self.message_rate_hz == 0 {
            return 0;
        }
        (self.sample_rate as u32) / self.message_rate_hz
    }

    /// Samples per beat before any tempo update arrives.
    #[inline]
    pub fn default_samples_per_beat(&self) -> u32 {
        monoslide_midi::bpm_to_samples_per_beat(self.default_bpm, self.sample_rate)
            .unwrap_or(self.sample_rate as u32 / 2)
    }
}

//! Slide engine: pitch-bend value as a function of elapsed slide time.
//!
//! A slide sweeps linearly from the slide base to the slide top over
//! `samples_per_beat * velocity / beat_divisor` samples, then folds back to the
//! base over the same duration. After the return leg the slide ends and the
//! bend stays where it was last sent.
//!
//! All bends are relative to `key_playing`, the key of the last emitted
//! note-on, and are given as signed offsets from the 14-bit center.

use crate::params::ParamSnapshot;
use crate::stack::NoteEntry;

/// Largest negative bend offset.
pub const BEND_MIN: i32 = -8192;
/// Largest positive bend offset.
pub const BEND_MAX: i32 = 8191;

/// What the engine is doing for the current block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    /// No note held.
    Idle,
    /// One note sounding with a fixed bend.
    Holding,
    /// Bend sweeping between the two top notes.
    Sliding,
}

/// Result of evaluating a slide at the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideStep {
    Bend(i32),
    /// The ping-pong window is over, the pair is out of bend range, or the
    /// slide has no duration.
    Ended,
}

/// Slide length in samples for a note of `velocity`.
#[inline]
pub fn slide_duration(samples_per_beat: u32, velocity: u8, beat_divisor: f32) -> u32 {
    if beat_divisor.is_nan() || beat_divisor <= 0.0 {
        return 0;
    }
    let duration = (samples_per_beat as u64 * velocity as u64) as f64 / beat_divisor as f64;
    duration.min(u32::MAX as f64) as u32
}

/// Convert a pitch offset in semitones to a signed bend offset, where
/// `semitones` is the full-scale bend range. Truncates toward zero.
#[inline]
pub fn relative_key_to_bend(relative_key: f64, semitones: f32) -> i32 {
    let multiplier = if relative_key < 0.0 { 8192.0 } else { 8191.0 };
    let bend = multiplier * relative_key / semitones as f64;
    (bend as i32).clamp(BEND_MIN, BEND_MAX)
}

/// Slide state persisting across blocks.
#[derive(Debug, Clone)]
pub struct SlideEngine {
    key_playing: u8,
    is_sliding: bool,
    samples_passed: u32,
    samples_per_beat: u32,
}

impl SlideEngine {
    pub fn new(samples_per_beat: u32) -> Self {
        Self {
            key_playing: 0,
            is_sliding: false,
            samples_passed: 0,
            samples_per_beat,
        }
    }

    pub fn reset(&mut self, samples_per_beat: u32) {
        *self = Self::new(samples_per_beat);
    }

    #[inline]
    pub fn key_playing(&self) -> u8 {
        self.key_playing
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.is_sliding
    }

    #[inline]
    pub fn samples_passed(&self) -> u32 {
        self.samples_passed
    }

    #[inline]
    pub fn samples_per_beat(&self) -> u32 {
        self.samples_per_beat
    }

    #[inline]
    pub fn set_samples_per_beat(&mut self, samples_per_beat: u32) {
        self.samples_per_beat = samples_per_beat;
    }

    /// Record the key of an emitted note-on; later bends are relative to it.
    #[inline]
    pub fn play(&mut self, key: u8) {
        self.key_playing = key;
    }

    /// Restart the slide timeline after notes were added.
    #[inline]
    pub fn restart(&mut self, sliding: bool) {
        self.samples_passed = 0;
        if sliding {
            self.is_sliding = true;
        }
    }

    #[inline]
    pub fn stop_sliding(&mut self) {
        self.is_sliding = false;
    }

    /// Move the slide timeline forward. Only a running slide advances.
    #[inline]
    pub fn advance(&mut self, samples: u32) {
        if self.is_sliding {
            self.samples_passed = self.samples_passed.saturating_add(samples);
        }
    }

    /// Bend for a slide from `base_key` toward `top` at the current time.
    pub fn slide_bend(&self, top: &NoteEntry, base_key: u8, params: &ParamSnapshot) -> SlideStep {
        let duration = slide_duration(self.samples_per_beat, top.velocity, params.beat_divisor);
        if duration == 0 {
            return SlideStep::Ended;
        }

        let duration = duration as u64;
        let mut elapsed = self.samples_passed as u64;
        if elapsed > duration * 2 {
            return SlideStep::Ended;
        }
        if elapsed > duration {
            elapsed = duration * 2 - elapsed;
        }

        let semitones = params.bend_semitone_distance;
        let key_diff = top.key as i32 - base_key as i32;
        let key_offset = base_key as i32 - self.key_playing as i32;
        if key_offset.abs() as f32 > semitones || (key_diff + key_offset).abs() as f32 > semitones
        {
            return SlideStep::Ended;
        }

        let relative_key = (elapsed as f64 / duration as f64) * key_diff as f64 + key_offset as f64;
        SlideStep::Bend(relative_key_to_bend(relative_key, semitones))
    }

    /// Fixed bend that makes the sounding note play `key`, or `None` when
    /// `key` is out of bend range from `key_playing`.
    pub fn hold_bend(&self, key: u8, params: &ParamSnapshot) -> Option<i32> {
        let relative_key = key as i32 - self.key_playing as i32;
        if relative_key.abs() as f32 > params.bend_semitone_distance {
            return None;
        }
        Some(relative_key_to_bend(
            relative_key as f64,
            params.bend_semitone_distance,
        ))
    }
}

//! Live parameters shared between the host and the audio thread.

use crate::lockfree::AtomicFloat;
use crate::parameter::ParameterRange;

/// Identifies one of the engine's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Divides the beat-length-times-velocity slide duration.
    BeatDivisor,
    /// Semitones covered by a full-scale pitch bend, in either direction.
    BendSemitoneDistance,
    /// Velocity for every emitted note-on; 0 keeps the played velocity.
    ForcedVelocity,
}

impl ParamId {
    pub const ALL: [ParamId; 3] = [
        ParamId::BeatDivisor,
        ParamId::BendSemitoneDistance,
        ParamId::ForcedVelocity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamId::BeatDivisor => "beat_divisor",
            ParamId::BendSemitoneDistance => "bend_semitone_distance",
            ParamId::ForcedVelocity => "forced_velocity",
        }
    }

    pub fn range(self) -> ParameterRange {
        match self {
            ParamId::BeatDivisor => ParameterRange::linear(1.0, 256.0, 16.0),
            ParamId::BendSemitoneDistance => ParameterRange::linear(1.0, 48.0, 2.0),
            ParamId::ForcedVelocity => ParameterRange::integer(0, 127, 0),
        }
    }
}

/// Plain copy of the parameters, taken once per scheduling tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub beat_divisor: f32,
    pub bend_semitone_distance: f32,
    pub forced_velocity: f32,
}

impl ParamSnapshot {
    /// Velocity to send with a note-on for a note played at `velocity`.
    #[inline]
    pub fn note_on_velocity(&self, velocity: u8) -> u8 {
        if self.forced_velocity > 0.0 {
            self.forced_velocity.min(127.0) as u8
        } else {
            velocity
        }
    }
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            beat_divisor: ParamId::BeatDivisor.range().default,
            bend_semitone_distance: ParamId::BendSemitoneDistance.range().default,
            forced_velocity: ParamId::ForcedVelocity.range().default,
        }
    }
}

/// Engine parameters as lock-free atomics.
///
/// Writers (host automation, UI) and the audio thread share one instance
/// behind an `Arc`. Every write is clamped to the parameter's range, so the
/// audio thread never sees a zero divisor or a zero bend range.
#[derive(Debug, Clone)]
pub struct SlideParams {
    beat_divisor: AtomicFloat,
    bend_semitone_distance: AtomicFloat,
    forced_velocity: AtomicFloat,
}

impl SlideParams {
    pub fn new() -> Self {
        Self::from_snapshot(ParamSnapshot::default())
    }

    pub fn from_snapshot(snapshot: ParamSnapshot) -> Self {
        let params = Self {
            beat_divisor: AtomicFloat::default(),
            bend_semitone_distance: AtomicFloat::default(),
            forced_velocity: AtomicFloat::default(),
        };
        params.set(ParamId::BeatDivisor, snapshot.beat_divisor);
        params.set(ParamId::BendSemitoneDistance, snapshot.bend_semitone_distance);
        params.set(ParamId::ForcedVelocity, snapshot.forced_velocity);
        params
    }

    #[inline]
    fn slot(&self, id: ParamId) -> &AtomicFloat {
        match id {
            ParamId::BeatDivisor => &self.beat_divisor,
            ParamId::BendSemitoneDistance => &self.bend_semitone_distance,
            ParamId::ForcedVelocity => &self.forced_velocity,
        }
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.slot(id).get()
    }

    /// Store `value` clamped to the parameter's range.
    pub fn set(&self, id: ParamId, value: f32) {
        self.slot(id).set(id.range().clamp(value));
    }

    /// Store a host-normalized (0.0-1.0) value.
    pub fn set_normalized(&self, id: ParamId, normalized: f32) {
        self.slot(id).set(id.range().denormalize(normalized));
    }

    #[inline]
    pub fn get_normalized(&self, id: ParamId) -> f32 {
        id.range().normalize(self.get(id))
    }

    #[inline]
    pub fn set_beat_divisor(&self, value: f32) {
        self.set(ParamId::BeatDivisor, value);
    }

    #[inline]
    pub fn set_bend_semitone_distance(&self, value: f32) {
        self.set(ParamId::BendSemitoneDistance, value);
    }

    #[inline]
    pub fn set_forced_velocity(&self, value: f32) {
        self.set(ParamId::ForcedVelocity, value);
    }

    /// Racy read of all three values; each is individually consistent.
    #[inline]
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            beat_divisor: self.beat_divisor.get_relaxed(),
            bend_semitone_distance: self.bend_semitone_distance.get_relaxed(),
            forced_velocity: self.forced_velocity.get_relaxed(),
        }
    }
}

impl Default for SlideParams {
    fn default() -> Self {
        Self::new()
    }
}

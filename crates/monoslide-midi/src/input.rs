//! Time-stamped input events delivered by the host for one block.

use crate::event::MidiAction;

/// Payload of a [`TimedEvent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind<'a> {
    /// Raw MIDI bytes, borrowed from the host's input sequence.
    Midi(&'a [u8]),
    /// Decoded time/position update.
    Tempo { bpm: f32 },
}

/// Input event positioned at a frame offset within the current block.
///
/// Offsets within one block must be non-decreasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedEvent<'a> {
    pub frame_offset: usize,
    pub kind: EventKind<'a>,
}

impl<'a> TimedEvent<'a> {
    #[inline]
    pub fn midi(frame_offset: usize, bytes: &'a [u8]) -> Self {
        Self {
            frame_offset,
            kind: EventKind::Midi(bytes),
        }
    }

    #[inline]
    pub fn tempo(frame_offset: usize, bpm: f32) -> Self {
        Self {
            frame_offset,
            kind: EventKind::Tempo { bpm },
        }
    }

    /// Classification of the MIDI payload, `None` for tempo updates.
    #[inline]
    pub fn midi_action(&self) -> Option<MidiAction> {
        match self.kind {
            EventKind::Midi(bytes) => Some(MidiAction::classify(bytes)),
            EventKind::Tempo { .. } => None,
        }
    }

    #[inline]
    pub fn is_note_on(&self) -> bool {
        self.midi_action().is_some_and(|action| action.is_note_on())
    }
}

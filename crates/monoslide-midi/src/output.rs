//! Fixed-capacity output event sequence.
//!
//! Mirrors the framing of a host atom sequence: every event costs a fixed
//! header plus its body padded to 8 bytes, and the whole sequence must fit in
//! the byte capacity the host provides. Storage is reserved once, so pushing
//! from the audio thread never allocates.

use crate::error::{Error, Result};
use crate::event::{MidiAction, MidiEvent};

/// Per-event header: 8-byte timestamp, 4-byte body size, 4-byte body type.
pub const EVENT_HEADER_BYTES: usize = 16;

/// Event bodies are padded to this alignment.
pub const EVENT_ALIGN: usize = 8;

/// Bytes an event with a `body_len`-byte body occupies in the sequence.
#[inline]
pub const fn event_size(body_len: usize) -> usize {
    EVENT_HEADER_BYTES + (body_len + EVENT_ALIGN - 1) / EVENT_ALIGN * EVENT_ALIGN
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    frame_offset: usize,
    start: usize,
    len: usize,
}

/// One event read back from a [`MidiOutputBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputEvent<'a> {
    pub frame_offset: usize,
    pub bytes: &'a [u8],
}

impl OutputEvent<'_> {
    #[inline]
    pub fn action(&self) -> MidiAction {
        MidiAction::classify(self.bytes)
    }

    pub fn to_midi_event(&self) -> std::result::Result<MidiEvent, midi_msg::ParseError> {
        MidiEvent::from_bytes_with_offset(self.bytes, self.frame_offset)
    }
}

/// Output MIDI sequence with a fixed byte capacity.
#[derive(Debug, Clone)]
pub struct MidiOutputBuffer {
    slots: Vec<Slot>,
    data: Vec<u8>,
    capacity_bytes: usize,
    used_bytes: usize,
    /// Set when a push failed since the last `clear()`
    overflowed: bool,
}

impl MidiOutputBuffer {
    /// Create a sequence that can hold `capacity_bytes` of framed events.
    pub fn with_capacity(capacity_bytes: usize) -> Self {
        let max_events = capacity_bytes / event_size(1);
        Self {
            slots: Vec::with_capacity(max_events),
            data: Vec::with_capacity(capacity_bytes),
            capacity_bytes,
            used_bytes: 0,
            overflowed: false,
        }
    }

    /// Remove all events. Keeps the reserved storage.
    #[inline]
    pub fn clear(&mut self) {
        self.slots.clear();
        self.data.clear();
        self.used_bytes = 0;
        self.overflowed = false;
    }

    /// Append `bytes` at `frame_offset`.
    ///
    /// Fails without modifying the sequence if the event does not fit.
    pub fn push(&mut self, frame_offset: usize, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let needed = event_size(bytes.len());
        let remaining = self.remaining_bytes();
        if needed > remaining {
            self.overflowed = true;
            return Err(Error::OutputFull { needed, remaining });
        }

        debug_assert!(
            self.slots
                .last()
                .map_or(true, |last| last.frame_offset <= frame_offset),
            "output frame offsets must be non-decreasing"
        );

        let start = self.data.len();
        self.data.extend_from_slice(bytes);
        self.slots.push(Slot {
            frame_offset,
            start,
            len: bytes.len(),
        });
        self.used_bytes += needed;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = OutputEvent<'_>> + '_ {
        self.slots.iter().map(move |slot| OutputEvent {
            frame_offset: slot.frame_offset,
            bytes: &self.data[slot.start..slot.start + slot.len],
        })
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<OutputEvent<'_>> {
        self.slots.get(index).map(|slot| OutputEvent {
            frame_offset: slot.frame_offset,
            bytes: &self.data[slot.start..slot.start + slot.len],
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    #[inline]
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    #[inline]
    pub fn remaining_bytes(&self) -> usize {
        self.capacity_bytes - self.used_bytes
    }

    #[inline]
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

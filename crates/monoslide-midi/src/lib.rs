//! MIDI types for the monoslide engine.
//!
//! Everything here is sized for use on the audio thread: input events borrow
//! the host's bytes, synthesized messages are 3-byte arrays, and the output
//! sequence has a fixed byte capacity reserved up front.
//!
//! # Example
//!
//! ```
//! use monoslide_midi::{MidiAction, MidiOutputBuffer, RawMidiEvent, TimedEvent};
//!
//! let note_on = [0x90, 60, 100];
//! let event = TimedEvent::midi(0, &note_on);
//! assert_eq!(event.midi_action(), Some(MidiAction::NoteOn { key: 60, velocity: 100 }));
//!
//! let mut output = MidiOutputBuffer::with_capacity(1024);
//! let bend = RawMidiEvent::pitch_bend_raw(0, 0, 8192);
//! output.push(bend.frame_offset, bend.bytes()).unwrap();
//! assert_eq!(output.len(), 1);
//! ```

pub mod error;
pub use error::{Error, Result};

pub use event::{MidiAction, MidiEvent, RawMidiEvent};
pub use input::{EventKind, TimedEvent};
pub use output::{event_size, MidiOutputBuffer, OutputEvent, EVENT_HEADER_BYTES};
pub use utils::{
    bend_to_14bit, bpm_to_samples_per_beat, combine_14bit, split_14bit, BEND_CENTER, BEND_MAX,
};

// Re-export essential upstream types (users shouldn't need to import midi-msg directly)
pub use midi_msg::{Channel, ChannelVoiceMsg};

pub mod event;
pub(crate) mod input;
pub(crate) mod output;
pub(crate) mod utils;

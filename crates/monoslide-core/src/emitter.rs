//! Output emitter: time-stamps synthesized messages into the output sequence.

use monoslide_midi::{bend_to_14bit, MidiOutputBuffer, RawMidiEvent};
use monoslide_midi::Error;
use tracing::{error, warn};

/// MIDI channel (0-based) of every synthesized message.
pub const OUTPUT_CHANNEL: u8 = 0;

/// Writes into a block's output sequence. Never blocks or grows the buffer:
/// a message that does not fit is logged and dropped.
pub struct OutputEmitter<'a> {
    output: &'a mut MidiOutputBuffer,
    dropped: usize,
}

impl<'a> OutputEmitter<'a> {
    pub fn new(output: &'a mut MidiOutputBuffer) -> Self {
        Self { output, dropped: 0 }
    }

    /// Messages dropped for lack of capacity since this emitter was created.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[inline]
    pub fn note_on(&mut self, frame_offset: usize, key: u8, velocity: u8) -> bool {
        self.send(RawMidiEvent::note_on_raw(
            frame_offset,
            OUTPUT_CHANNEL,
            key,
            velocity,
        ))
    }

    /// Release velocity is always 0.
    #[inline]
    pub fn note_off(&mut self, frame_offset: usize, key: u8) -> bool {
        self.send(RawMidiEvent::note_off_raw(frame_offset, OUTPUT_CHANNEL, key, 0))
    }

    /// `value` is a signed offset from center (0 = no bend).
    #[inline]
    pub fn pitch_bend(&mut self, frame_offset: usize, value: i32) -> bool {
        self.send(RawMidiEvent::pitch_bend_raw(
            frame_offset,
            OUTPUT_CHANNEL,
            bend_to_14bit(value),
        ))
    }

    #[inline]
    pub fn send(&mut self, event: RawMidiEvent) -> bool {
        self.forward(event.frame_offset, event.bytes())
    }

    /// Append `bytes` unchanged.
    pub fn forward(&mut self, frame_offset: usize, bytes: &[u8]) -> bool {
        match self.output.push(frame_offset, bytes) {
            Ok(()) => true,
            Err(e @ Error::OutputFull { .. }) => {
                self.dropped += 1;
                error!(frame_offset, "Could not append MIDI event: {}", e);
                false
            }
            Err(Error::EmptyMessage) => {
                warn!(frame_offset, "Skipping empty MIDI message");
                false
            }
        }
    }
}

//! RT-safe MIDI event types with sample-accurate timing.

use midi_msg::{Channel, ChannelVoiceMsg, MidiMsg};

/// Status nibble for note-off.
pub const NOTE_OFF: u8 = 0x80;
/// Status nibble for note-on.
pub const NOTE_ON: u8 = 0x90;
/// Status nibble for control change.
pub const CONTROL_CHANGE: u8 = 0xB0;
/// Status nibble for pitch bend.
pub const PITCH_BEND: u8 = 0xE0;

/// First controller of the channel mode range that silences notes
/// (All Notes Off, Omni Off, Omni On, Mono On, Poly On).
pub const CC_ALL_NOTES_OFF: u8 = 123;
/// Last controller of that range (Poly On).
pub const CC_POLY_ON: u8 = 127;

/// What the slide engine does with an incoming MIDI message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiAction {
    NoteOn { key: u8, velocity: u8 },
    NoteOff { key: u8 },
    AllNotesOff,
    /// Anything the engine does not interpret; forwarded unchanged.
    Other,
}

impl MidiAction {
    /// Classify raw MIDI bytes. Never fails: short or unknown messages
    /// are reported as [`MidiAction::Other`].
    ///
    /// A note-on with velocity 0 is a note-off.
    #[inline]
    pub fn classify(bytes: &[u8]) -> Self {
        let [status, data1, data2] = match bytes {
            [status, data1, data2, ..] => [*status, *data1 & 0x7F, *data2 & 0x7F],
            _ => return MidiAction::Other,
        };

        match status & 0xF0 {
            NOTE_ON if data2 > 0 => MidiAction::NoteOn {
                key: data1,
                velocity: data2,
            },
            NOTE_ON | NOTE_OFF => MidiAction::NoteOff { key: data1 },
            CONTROL_CHANGE if (CC_ALL_NOTES_OFF..=CC_POLY_ON).contains(&data1) => {
                MidiAction::AllNotesOff
            }
            _ => MidiAction::Other,
        }
    }

    #[inline]
    pub fn is_note_on(&self) -> bool {
        matches!(self, MidiAction::NoteOn { .. })
    }
}

/// Typed view of a channel voice message with its frame offset.
///
/// Used to inspect output; the engine itself works on [`RawMidiEvent`]
/// and borrowed byte slices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    /// Offset within the current buffer (0 = first sample).
    pub frame_offset: usize,
    pub channel: Channel,
    pub msg: ChannelVoiceMsg,
}

impl MidiEvent {
    pub fn from_bytes_with_offset(
        bytes: &[u8],
        frame_offset: usize,
    ) -> Result<Self, midi_msg::ParseError> {
        let (msg, _len) = MidiMsg::from_midi(bytes)?;
        match msg {
            MidiMsg::ChannelVoice { channel, msg } => Ok(Self {
                frame_offset,
                channel,
                msg,
            }),
            _ => Err(midi_msg::ParseError::Invalid(
                "Expected ChannelVoice message",
            )),
        }
    }
}

/// Raw 3-byte MIDI event built on the audio thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawMidiEvent {
    pub frame_offset: usize,
    pub data: [u8; 3],
    /// Valid bytes in `data` (1-3).
    pub len: u8,
}

impl RawMidiEvent {
    #[inline]
    pub fn new(frame_offset: usize, data: [u8; 3], len: u8) -> Self {
        Self {
            frame_offset,
            data,
            len,
        }
    }

    #[inline]
    pub fn note_on_raw(frame_offset: usize, channel: u8, key: u8, velocity: u8) -> Self {
        Self::new(
            frame_offset,
            [NOTE_ON | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
            3,
        )
    }

    #[inline]
    pub fn note_off_raw(frame_offset: usize, channel: u8, key: u8, velocity: u8) -> Self {
        Self::new(
            frame_offset,
            [NOTE_OFF | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
            3,
        )
    }

    /// `bend` is the unsigned 14-bit value (8192 = center).
    #[inline]
    pub fn pitch_bend_raw(frame_offset: usize, channel: u8, bend: u16) -> Self {
        let (lsb, msb) = crate::utils::split_14bit(bend);
        Self::new(frame_offset, [PITCH_BEND | (channel & 0x0F), lsb, msb], 3)
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

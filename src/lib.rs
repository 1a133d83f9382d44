//! # MonoSlide - Mono Portamento MIDI Effect
//!
//! Turns overlapping MIDI notes into a single sounding note whose pitch glides
//! between held notes using synthesized pitch-bend messages. Slide speed comes
//! from the velocity of the note being slid to, the host tempo and the beat
//! divisor parameter.
//!
//! ## Architecture
//!
//! MonoSlide is an umbrella crate that coordinates:
//! - **monoslide-midi** - MIDI types (timed input, raw messages, output sequence)
//! - **monoslide-core** - Real-time core (note stack, slide engine, block scheduler)
//!
//! ## Quick Start
//!
//! ```
//! use monoslide::prelude::*;
//!
//! let mut slide = MonoSlide::builder()
//!     .sample_rate(48000.0)
//!     .bend_semitone_distance(12.0)
//!     .build()?;
//! slide.activate();
//!
//! let mut output = slide.output_buffer();
//! let (low, high) = ([0x90, 60, 100], [0x90, 64, 40]);
//!
//! slide.run(512, &[TimedEvent::midi(0, &low)], &mut output);
//! slide.run(512, &[TimedEvent::midi(0, &high)], &mut output);
//! assert_eq!(slide.state(), SlideState::Sliding);
//! # Ok::<(), monoslide::Error>(())
//! ```

/// Re-export of monoslide-core for direct access
pub use monoslide_core as core;

/// Re-export of monoslide-midi for direct access
pub use monoslide_midi as midi;

pub use monoslide_core::{
    BlockScheduler, BlockStats, NoteEntry, NoteStack, ParamId, ParamSnapshot, ParameterRange,
    ParameterScale, SlideConfig, SlideEngine, SlideParams, SlideState, SlideStep,
};

pub use monoslide_midi::{
    EventKind, MidiAction, MidiEvent, MidiOutputBuffer, OutputEvent, RawMidiEvent, TimedEvent,
};

pub mod error;
pub use error::{Error, Result};

mod builder;
mod engine;

pub use builder::MonoSlideBuilder;
pub use engine::MonoSlide;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{MonoSlide, MonoSlideBuilder};

    pub use crate::{
        EventKind, MidiAction, MidiOutputBuffer, OutputEvent, ParamId, SlideConfig, SlideParams,
        SlideState, TimedEvent,
    };

    pub use crate::{Error, Result};
}

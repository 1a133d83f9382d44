//! Real-time core of the mono portamento engine.
//!
//! # Primary API
//!
//! - [`BlockScheduler`]: Runs one processing block against the held notes
//! - [`NoteStack`]: Held notes in priority order
//! - [`SlideEngine`]: Pitch-bend value over a slide's lifetime
//! - [`SlideParams`]: Lock-free live parameters
//! - [`SlideConfig`]: Per-instance configuration
//!
//! # Example
//!
//! ```
//! use monoslide_core::{BlockScheduler, SlideConfig, SlideParams, SlideState};
//! use monoslide_midi::{MidiOutputBuffer, TimedEvent};
//!
//! let config = SlideConfig { sample_rate: 48000.0, ..Default::default() };
//! let mut scheduler = BlockScheduler::new(&config);
//! let params = SlideParams::new();
//! let mut output = MidiOutputBuffer::with_capacity(config.output_capacity_bytes);
//!
//! let note_on = [0x90, 60, 100];
//! scheduler.process(256, &[TimedEvent::midi(0, &note_on)], &params, &mut output);
//!
//! assert_eq!(output.len(), 2); // centered bend, then the note-on
//! assert_eq!(scheduler.state(), SlideState::Holding);
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::SlideConfig;

pub(crate) mod lockfree;
pub use lockfree::AtomicFloat;

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};

pub mod params;
pub use params::{ParamId, ParamSnapshot, SlideParams};

pub mod stack;
pub use stack::{NoteEntry, NoteStack, StackResult, STACK_CAPACITY};

pub mod slide;
pub use slide::{relative_key_to_bend, slide_duration, SlideEngine, SlideState, SlideStep};

pub mod emitter;
pub use emitter::{OutputEmitter, OUTPUT_CHANNEL};

pub mod scheduler;
pub use scheduler::{BlockScheduler, BlockStats};

//! MonoSlide: the host-facing processor.

use std::sync::Arc;

use monoslide_core::{BlockScheduler, BlockStats, SlideConfig, SlideParams, SlideState};
use monoslide_midi::{MidiOutputBuffer, TimedEvent};
use tracing::debug;

use crate::Result;

/// Mono portamento processor for one plugin instance.
///
/// Owns all engine state. The host calls [`activate`](Self::activate) before
/// starting audio, then [`run`](Self::run) once per block from its real-time
/// thread. Parameters live behind [`params`](Self::params) and may be written
/// from any thread while audio runs.
///
/// # Example
///
/// ```
/// use monoslide::prelude::*;
///
/// let mut slide = MonoSlide::builder().sample_rate(48000.0).build()?;
/// slide.params().set_beat_divisor(8.0);
/// slide.activate();
///
/// let mut output = slide.output_buffer();
/// let note_on = [0x90, 60, 100];
/// slide.run(512, &[TimedEvent::midi(0, &note_on)], &mut output);
/// assert_eq!(output.len(), 2);
/// # Ok::<(), monoslide::Error>(())
/// ```
pub struct MonoSlide {
    config: SlideConfig,
    scheduler: BlockScheduler,
    params: Arc<SlideParams>,
    active: bool,
    /// Set once an inactive `run` has been logged, until the next deactivation.
    idle_logged: bool,
}

impl MonoSlide {
    /// Create a processor from a validated configuration.
    pub fn new(config: SlideConfig) -> Result<Self> {
        Self::with_params(config, Arc::new(SlideParams::new()))
    }

    pub(crate) fn with_params(config: SlideConfig, params: Arc<SlideParams>) -> Result<Self> {
        config.validate()?;
        debug!(
            sample_rate = config.sample_rate,
            message_interval = config.message_interval(),
            "Created MonoSlide"
        );
        Ok(Self {
            scheduler: BlockScheduler::new(&config),
            config,
            params,
            active: false,
            idle_logged: false,
        })
    }

    pub fn builder() -> crate::MonoSlideBuilder {
        crate::MonoSlideBuilder::default()
    }

    #[inline]
    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    /// Shared handle to the live parameters.
    #[inline]
    pub fn params(&self) -> Arc<SlideParams> {
        Arc::clone(&self.params)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Reset the engine to its activation state: no notes held, default tempo.
    pub fn activate(&mut self) {
        self.scheduler.reset();
        self.active = true;
        debug!("MonoSlide activated");
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.idle_logged = false;
        debug!("MonoSlide deactivated");
    }

    /// Process one block.
    ///
    /// Clears `output`, then fills it with the synthesized and forwarded
    /// messages for this block. Allocation-free as long as `output` was
    /// created with enough capacity (see [`output_buffer`](Self::output_buffer)).
    pub fn run(
        &mut self,
        n_samples: usize,
        events: &[TimedEvent<'_>],
        output: &mut MidiOutputBuffer,
    ) -> BlockStats {
        output.clear();
        if !self.active {
            if !self.idle_logged {
                debug!("run() called on an inactive MonoSlide, ignoring blocks");
                self.idle_logged = true;
            }
            return BlockStats::default();
        }
        self.scheduler
            .process(n_samples, events, &self.params, output)
    }

    /// Allocate an output sequence with the configured capacity.
    pub fn output_buffer(&self) -> MidiOutputBuffer {
        MidiOutputBuffer::with_capacity(self.config.output_capacity_bytes)
    }

    #[inline]
    pub fn state(&self) -> SlideState {
        self.scheduler.state()
    }

    /// Key of the note currently sounding on the output, if any.
    #[inline]
    pub fn sounding_key(&self) -> Option<u8> {
        (!self.scheduler.stack().is_empty()).then(|| self.scheduler.slide().key_playing())
    }

    /// Keys currently held, bottom to top.
    pub fn held_keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.scheduler.stack().iter().map(|entry| entry.key)
    }

    /// Current beat length in samples, following host tempo updates.
    #[inline]
    pub fn samples_per_beat(&self) -> u32 {
        self.scheduler.slide().samples_per_beat()
    }
}

impl std::fmt::Debug for MonoSlide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoSlide")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("state", &self.state())
            .finish()
    }
}

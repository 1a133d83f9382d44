//! Block scheduler: drives the note stack and slide engine through one
//! processing block.
//!
//! The block is split at every distinct input frame offset. For each
//! sub-interval the scheduler applies releases, tempo updates and passthrough
//! messages first, then note-ons, so simultaneous events resolve the same way
//! regardless of arrival order. It then runs scheduling ticks: one forced tick
//! when the held notes changed in a way that needs an immediate message, plus
//! one periodic tick per elapsed `message_interval`. Everything emitted for a
//! sub-interval carries its boundary frame, so output offsets never decrease.
//!
//! Nothing here allocates.

use monoslide_midi::{bpm_to_samples_per_beat, EventKind, MidiAction, MidiOutputBuffer, TimedEvent};
use tracing::{debug, warn};

use crate::config::SlideConfig;
use crate::emitter::OutputEmitter;
use crate::params::{ParamSnapshot, SlideParams};
use crate::slide::{SlideEngine, SlideState, SlideStep};
use crate::stack::NoteStack;

/// Counters for one processed block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockStats {
    /// Scheduling ticks run, forced and periodic.
    pub ticks: usize,
    /// Messages dropped because the output sequence was full.
    pub dropped: usize,
}

/// What changed in the held notes during one sub-interval.
#[derive(Debug, Clone, Copy)]
struct IntervalChange {
    note_stopped: bool,
    note_started: bool,
}

pub struct BlockScheduler {
    stack: NoteStack,
    slide: SlideEngine,
    samples_since_sent: u32,
    message_interval: u32,
    sample_rate: f64,
    default_samples_per_beat: u32,
}

impl BlockScheduler {
    pub fn new(config: &SlideConfig) -> Self {
        let default_samples_per_beat = config.default_samples_per_beat();
        Self {
            stack: NoteStack::new(),
            slide: SlideEngine::new(default_samples_per_beat),
            samples_since_sent: 0,
            message_interval: config.message_interval().max(1),
            sample_rate: config.sample_rate,
            default_samples_per_beat,
        }
    }

    /// Forget all held notes and slide progress.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.slide.reset(self.default_samples_per_beat);
        self.samples_since_sent = 0;
    }

    #[inline]
    pub fn stack(&self) -> &NoteStack {
        &self.stack
    }

    #[inline]
    pub fn slide(&self) -> &SlideEngine {
        &self.slide
    }

    #[inline]
    pub fn message_interval(&self) -> u32 {
        self.message_interval
    }

    pub fn state(&self) -> SlideState {
        if self.stack.is_empty() {
            SlideState::Idle
        } else if self.slide.is_sliding() {
            SlideState::Sliding
        } else {
            SlideState::Holding
        }
    }

    /// Process one block of `n_samples` frames.
    ///
    /// `events` must be ordered by non-decreasing frame offset. Clears
    /// `output` first, so it holds only this block's messages.
    pub fn process(
        &mut self,
        n_samples: usize,
        events: &[TimedEvent<'_>],
        params: &SlideParams,
        output: &mut MidiOutputBuffer,
    ) -> BlockStats {
        output.clear();
        let mut emitter = OutputEmitter::new(output);
        let mut stats = BlockStats::default();
        let mut last_frame = 0;
        let mut start = 0;

        while start < events.len() {
            // Out-of-order offsets are folded onto the current boundary
            let frame = events[start].frame_offset.max(last_frame);
            let group_len = events[start..]
                .iter()
                .take_while(|event| event.frame_offset <= frame)
                .count();
            let elapsed = frame - last_frame;
            last_frame = frame;

            stats.ticks += self.run_interval(
                to_samples(elapsed),
                &events[start..start + group_len],
                frame,
                params,
                &mut emitter,
            );
            start += group_len;
        }

        if last_frame < n_samples {
            stats.ticks += self.run_interval(
                to_samples(n_samples - last_frame),
                &[],
                last_frame,
                params,
                &mut emitter,
            );
        }

        stats.dropped = emitter.dropped();
        stats
    }

    fn run_interval(
        &mut self,
        n_samples: u32,
        events: &[TimedEvent<'_>],
        frame: usize,
        params: &SlideParams,
        emitter: &mut OutputEmitter<'_>,
    ) -> usize {
        let old_len = self.stack.len();
        let old_pair = self.stack.slide_pair();

        // Everything except note-ons
        for event in events {
            match event.kind {
                EventKind::Tempo { bpm } => self.set_tempo(bpm),
                EventKind::Midi(bytes) => match MidiAction::classify(bytes) {
                    MidiAction::NoteOn { .. } => {}
                    MidiAction::NoteOff { key } => {
                        self.stack.remove(key);
                    }
                    MidiAction::AllNotesOff => self.stack.clear(),
                    MidiAction::Other => {
                        emitter.forward(frame, bytes);
                    }
                },
            }
        }

        self.stack.compact();
        let note_stopped = old_len > 0 && self.stack.is_empty();
        let mut force_update =
            note_stopped || (old_len >= 2 && old_pair != self.stack.slide_pair());
        if force_update {
            self.slide.stop_sliding();
        }

        let start_at = self.stack.len();
        for event in events {
            if let EventKind::Midi(bytes) = event.kind {
                if let MidiAction::NoteOn { key, velocity } = MidiAction::classify(bytes) {
                    self.stack.add(key, velocity);
                }
            }
        }

        let note_started = start_at == 0 && !self.stack.is_empty();
        self.stack.move_primary_to_top(start_at);
        if self.stack.len() > start_at {
            self.slide.restart(self.stack.len() >= 2);
            force_update = true;
        }

        let change = IntervalChange {
            note_stopped,
            note_started,
        };
        let mut ticks = 0;
        self.samples_since_sent = self.samples_since_sent.saturating_add(n_samples);
        while force_update || self.samples_since_sent >= self.message_interval {
            let forced = std::mem::take(&mut force_update);
            if !forced {
                self.samples_since_sent -= self.message_interval;
            }
            self.tick(forced, change, frame, &params.snapshot(), emitter);
            ticks += 1;
        }
        ticks
    }

    fn tick(
        &mut self,
        forced: bool,
        change: IntervalChange,
        frame: usize,
        params: &ParamSnapshot,
        emitter: &mut OutputEmitter<'_>,
    ) {
        if forced && change.note_stopped {
            emitter.note_off(frame, self.slide.key_playing());
        }
        let Some(top) = self.stack.top().copied() else {
            return;
        };

        if forced && change.note_started {
            // With two or more new notes the slide starts from the base
            let note = self.stack.slide_base().copied().unwrap_or(top);
            emitter.pitch_bend(frame, 0);
            self.slide.play(note.key);
            emitter.note_on(frame, note.key, params.note_on_velocity(note.velocity));
            return;
        }

        if !self.slide.is_sliding() {
            if forced {
                if let Some(bend) = self.slide.hold_bend(top.key, params) {
                    emitter.pitch_bend(frame, bend);
                }
            }
            return;
        }

        let Some(base) = self.stack.slide_base().copied() else {
            self.slide.stop_sliding();
            return;
        };
        match self.slide.slide_bend(&top, base.key, params) {
            SlideStep::Bend(bend) => {
                emitter.pitch_bend(frame, bend);
            }
            SlideStep::Ended => self.slide.stop_sliding(),
        }
        if !forced {
            self.slide.advance(self.message_interval);
        }
    }

    fn set_tempo(&mut self, bpm: f32) {
        match bpm_to_samples_per_beat(bpm, self.sample_rate) {
            Some(samples_per_beat) => {
                debug!(bpm, samples_per_beat, "Tempo update");
                self.slide.set_samples_per_beat(samples_per_beat);
            }
            None => warn!(bpm, "Ignoring invalid tempo"),
        }
    }
}

#[inline]
fn to_samples(frames: usize) -> u32 {
    frames.min(u32::MAX as usize) as u32
}

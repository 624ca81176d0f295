/// Note sequencing - queues notes and renders them back to back
/// through the string synthesizer
use std::collections::VecDeque;

use log::{info, warn};
use rand::Rng;

use crate::audio::AudioSink;
use crate::config::SynthesisConfig;
use crate::error::{PluckError, Result};
use crate::note::Note;
use crate::synth::StringSynthesizer;

pub mod playback;

use playback::{PlaybackReport, PlaybackState, Rendered, SkippedNote};

pub struct Sequencer {
    synth: StringSynthesizer,
    pending: VecDeque<Note>,
    capacity: Option<usize>,
    state: PlaybackState,
}

impl Sequencer {
    /// Sequencer with an unbounded note queue.
    pub fn new(config: SynthesisConfig) -> Self {
        Self {
            synth: StringSynthesizer::new(config),
            pending: VecDeque::new(),
            capacity: None,
            state: PlaybackState::Idle,
        }
    }

    /// Sequencer whose queue holds at most `capacity` notes.
    pub fn with_capacity(config: SynthesisConfig, capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &SynthesisConfig {
        self.synth.config()
    }

    /// Current playback state.
    ///
    /// `play` holds `&mut self` for the whole Idle -> Playing -> Idle
    /// transition, so callers outside it always see `Idle`.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Queues a note behind every note already pending.
    ///
    /// A full bounded queue drops the note and reports `QueueFull`; the
    /// sequencer stays usable.
    pub fn add_note(&mut self, note: Note) -> Result<()> {
        if let Some(capacity) = self.capacity {
            if self.pending.len() >= capacity {
                let err = PluckError::QueueFull { capacity };
                warn!("{}", err);
                return Err(err);
            }
        }
        self.pending.push_back(note);
        Ok(())
    }

    /// Pending notes in playback order.
    pub fn notes(&self) -> Vec<Note> {
        self.pending.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drains the queue into one buffer using process-wide randomness.
    pub fn render(&mut self) -> Rendered {
        self.render_with_rng(&mut rand::thread_rng())
    }

    /// Drains the queue into one buffer, drawing excitation noise from `rng`.
    ///
    /// Notes the synthesizer rejects are skipped and listed in the report.
    pub fn render_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Rendered {
        let mut rendered = Rendered::default();
        let mut index = 0;

        while let Some(note) = self.pending.pop_front() {
            match self.synth.synthesize(&note, rng) {
                Ok(samples) => {
                    rendered.samples.extend_from_slice(&samples);
                    rendered.report.notes_rendered += 1;
                }
                Err(err) => {
                    warn!("Skipped note {}: {}", index + 1, err);
                    rendered.report.skipped.push(SkippedNote {
                        index,
                        note,
                        reason: err.to_string(),
                    });
                }
            }
            index += 1;
        }

        rendered.report.samples = rendered.samples.len();
        rendered
    }

    /// Renders every queued note and hands the buffer to `sink`.
    pub fn play(&mut self, sink: &mut dyn AudioSink) -> Result<PlaybackReport> {
        self.play_with_rng(sink, &mut rand::thread_rng())
    }

    /// Like [`Sequencer::play`], with an explicit noise source.
    ///
    /// Sink failures end this playback attempt and are returned as is; the
    /// queue has already been drained by then.
    pub fn play_with_rng<R: Rng + ?Sized>(
        &mut self,
        sink: &mut dyn AudioSink,
        rng: &mut R,
    ) -> Result<PlaybackReport> {
        self.state = PlaybackState::Playing;
        let Rendered { samples, report } = self.render_with_rng(rng);
        let sample_rate = self.config().sample_rate();

        info!(
            "Playing {} notes ({} samples, {:.2} s at {} Hz)",
            report.notes_rendered,
            report.samples,
            report.duration_secs(sample_rate),
            sample_rate
        );

        let result = sink.render(sample_rate, samples);
        self.state = PlaybackState::Idle;
        result?;

        info!("Playback finished");
        Ok(report)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(SynthesisConfig::default())
    }
}

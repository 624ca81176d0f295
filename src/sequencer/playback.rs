/// Playback state and the summary of a rendered sequence
use crate::note::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Notes may be queued
    #[default]
    Idle,
    /// The queue is being drained
    Playing,
}

/// A queued note that produced no samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedNote {
    /// Position of the note in the queue, 0-based
    pub index: usize,
    pub note: Note,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackReport {
    pub notes_rendered: usize,
    pub skipped: Vec<SkippedNote>,
    pub samples: usize,
}

impl PlaybackReport {
    /// Length of the rendered buffer in seconds.
    pub fn duration_secs(&self, sample_rate: u32) -> f32 {
        self.samples as f32 / sample_rate as f32
    }
}

/// Output of draining the queue: the concatenated buffer and its report.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub samples: Vec<f32>,
    pub report: PlaybackReport,
}

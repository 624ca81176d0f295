/// PLUCK - plucked-string tone synthesis
///
/// This library provides the pieces for turning a list of notes into
/// guitar-like audio:
/// - Karplus-Strong string synthesis with the Jaffe-Smith averaging decay
/// - A FIFO note sequencer that concatenates synthesized notes
/// - Audio output through cpal, or into memory for testing
/// - Score file parsing and an interactive configuration prompt

pub mod audio;
pub mod config;
pub mod error;
pub mod note;
pub mod pitch;
pub mod prompt;
pub mod score;
pub mod sequencer;
pub mod synth;

// Re-export commonly used types
pub use audio::{AudioSink, BufferSink, CpalSink};
pub use config::SynthesisConfig;
pub use error::{AudioError, ConfigWarning, LineError, PluckError};
pub use note::Note;
pub use sequencer::playback::{PlaybackReport, PlaybackState};
pub use sequencer::Sequencer;
pub use synth::{synthesize, StringSynthesizer};

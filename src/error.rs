use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluckError {
    #[error("invalid pitch '{0}'")]
    InvalidPitch(String),

    #[error("invalid duration {0} ms")]
    InvalidDuration(f32),

    #[error("frequency must be positive and finite, got {0} Hz")]
    NonPositiveFrequency(f32),

    #[error("frequency {frequency} Hz cannot be synthesized at {sample_rate} Hz")]
    InvalidFrequency { frequency: f32, sample_rate: u32 },

    #[error("note queue is full ({capacity} notes), note dropped")]
    QueueFull { capacity: usize },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Failures reported by an audio sink.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("audio stream failed: {0}")]
    Stream(String),
}

/// Non-fatal diagnostics produced while validating a synthesis config.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    #[error("invalid sample rate {requested} Hz, using default sample rate ({fallback} Hz) instead")]
    SampleRateOutOfRange { requested: u32, fallback: u32 },

    #[error("invalid decay rate {requested}, using default decay rate ({fallback}) instead")]
    DecayRateOutOfRange { requested: f32, fallback: f32 },
}

/// Why a score line produced no note.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("line is blank")]
    Blank,

    #[error("missing duration field")]
    MissingDuration,

    #[error("duration '{0}' is not a valid number of milliseconds")]
    InvalidDuration(String),

    #[error("pitch '{0}' cannot be resolved")]
    InvalidPitch(String),

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

pub type Result<T> = std::result::Result<T, PluckError>;

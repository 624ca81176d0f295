use crate::error::{PluckError, Result};
use crate::pitch;

/// One plucked note: a pitch in Hz held for a number of milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    frequency: f32,
    duration_ms: f32,
}

impl Note {
    pub fn new(frequency: f32, duration_ms: f32) -> Result<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(PluckError::NonPositiveFrequency(frequency));
        }
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(PluckError::InvalidDuration(duration_ms));
        }
        Ok(Self {
            frequency,
            duration_ms,
        })
    }

    /// Builds a note from a scientific pitch designator such as `C#3`.
    pub fn from_pitch(designator: &str, duration_ms: f32) -> Result<Self> {
        Self::new(pitch::frequency_of(designator)?, duration_ms)
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }
}

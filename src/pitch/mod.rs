/// Scientific pitch notation to equal-tempered frequency (A4 = 440 Hz)
use std::fmt;
use std::str::FromStr;

use crate::error::PluckError;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const DEFAULT_OCTAVE: i32 = 4;

/// A parsed pitch designator such as `A4`, `C#3` or `Bb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    /// Semitone within the octave, C = 0 (may be -1 or 12 after an accidental)
    class: i32,
    octave: i32,
}

impl Pitch {
    pub fn midi_number(&self) -> i32 {
        12 * (self.octave + 1) + self.class
    }

    pub fn frequency(&self) -> f32 {
        midi_to_frequency(self.midi_number())
    }
}

impl FromStr for Pitch {
    type Err = PluckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PluckError::InvalidPitch(s.to_string());
        let mut chars = s.chars();

        let class = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (class, rest) = match rest.chars().next() {
            Some('#') => (class + 1, &rest[1..]),
            Some('b') => (class - 1, &rest[1..]),
            _ => (class, rest),
        };

        let octave = match rest.len() {
            0 => DEFAULT_OCTAVE,
            1 => rest
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .map(|d| d as i32)
                .ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        Ok(Self { class, octave })
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", midi_note_name(self.midi_number()))
    }
}

/// Resolves a designator straight to Hz.
pub fn frequency_of(designator: &str) -> Result<f32, PluckError> {
    designator.parse::<Pitch>().map(|pitch| pitch.frequency())
}

pub fn midi_to_frequency(note: i32) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

pub fn midi_note_name(note: i32) -> String {
    let octave = note.div_euclid(12) - 1;
    let note_index = note.rem_euclid(12) as usize;
    format!("{}{}", NOTE_NAMES[note_index], octave)
}

/// Name of the equal-tempered pitch closest to `frequency`.
pub fn nearest_name(frequency: f32) -> String {
    if !frequency.is_finite() || frequency <= 0.0 {
        return format!("{} Hz", frequency);
    }
    let note = (69.0 + 12.0 * (frequency / 440.0).log2()).round() as i32;
    midi_note_name(note)
}

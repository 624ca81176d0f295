/// Plucked-string synthesis (Karplus-Strong with the Jaffe-Smith averaging decay)
///
/// A burst of white noise one string period long circulates through a delay
/// line. Every output sample is the decayed average of the previous output and
/// the sample leaving the line, and is fed back into the line. The averaging
/// acts as a low-pass filter, so high partials die out first.
use log::debug;
use rand::Rng;

use crate::config::{SynthesisConfig, MAX_SAMPLE_RATE};
use crate::error::{PluckError, Result};
use crate::note::Note;
use crate::pitch;

pub mod delay_line;

pub use delay_line::DelayLine;

/// Upper bound on any single buffer: one hour at the highest sample rate.
pub const MAX_NOTE_SAMPLES: usize = MAX_SAMPLE_RATE as usize * 3600;

/// Number of delay line slots for one period of `frequency`.
pub fn period_samples(frequency: f32, sample_rate: u32) -> Result<usize> {
    let invalid = PluckError::InvalidFrequency {
        frequency,
        sample_rate,
    };
    if !frequency.is_finite() || frequency <= 0.0 || frequency >= sample_rate as f32 {
        return Err(invalid);
    }
    let period = (sample_rate as f32 / frequency).round();
    if !(1.0..=MAX_NOTE_SAMPLES as f32).contains(&period) {
        return Err(invalid);
    }
    Ok(period as usize)
}

/// Number of output samples a note of `duration_ms` occupies.
pub fn total_samples(duration_ms: f32, sample_rate: u32) -> Result<usize> {
    let total = (sample_rate as f64 * duration_ms as f64 / 1000.0).round();
    if !(0.0..=MAX_NOTE_SAMPLES as f64).contains(&total) {
        return Err(PluckError::InvalidDuration(duration_ms));
    }
    Ok(total as usize)
}

/// Synthesizes one plucked note.
///
/// The noise burst is drawn from `rng`; a seeded generator gives reproducible
/// output. A duration that rounds to zero samples yields an empty vector.
pub fn synthesize<R: Rng + ?Sized>(
    frequency: f32,
    duration_ms: f32,
    config: &SynthesisConfig,
    rng: &mut R,
) -> Result<Vec<f32>> {
    let sample_rate = config.sample_rate();
    let decay_rate = config.decay_rate();
    let period = period_samples(frequency, sample_rate)?;
    let total = total_samples(duration_ms, sample_rate)?;

    let mut line = DelayLine::with_noise(period, rng).ok_or(PluckError::InvalidFrequency {
        frequency,
        sample_rate,
    })?;
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(total)
        .map_err(|_| PluckError::InvalidDuration(duration_ms))?;
    let mut previous = 0.0_f32;

    for _ in 0..total {
        let current = line.read();
        let new = ((previous + current) / 2.0) * decay_rate;
        line.write_and_advance(new);
        samples.push(new);
        previous = new;
    }

    Ok(samples)
}

/// Synthesizer bound to one configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSynthesizer {
    config: SynthesisConfig,
}

impl StringSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn synthesize<R: Rng + ?Sized>(&self, note: &Note, rng: &mut R) -> Result<Vec<f32>> {
        debug!(
            "Synthesizing {} ({:.2} Hz) for {} ms",
            pitch::nearest_name(note.frequency()),
            note.frequency(),
            note.duration_ms()
        );
        synthesize(note.frequency(), note.duration_ms(), &self.config, rng)
    }
}

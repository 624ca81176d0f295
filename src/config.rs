/// Synthesis parameters shared by every note of a sequence
use log::warn;

use crate::error::ConfigWarning;

pub const DEFAULT_SAMPLE_RATE: u32 = 8000;
pub const MIN_SAMPLE_RATE: u32 = 8000;
pub const MAX_SAMPLE_RATE: u32 = 48000;
pub const DEFAULT_DECAY_RATE: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisConfig {
    sample_rate: u32,
    decay_rate: f32,
}

impl SynthesisConfig {
    /// Builds a config, replacing out-of-range values with the defaults.
    /// Each replacement is logged as a warning.
    pub fn new(sample_rate: u32, decay_rate: f32) -> Self {
        let (config, warnings) = Self::validated(sample_rate, decay_rate);
        for warning in &warnings {
            warn!("{}", warning);
        }
        config
    }

    /// Same clamping as [`SynthesisConfig::new`], but hands the diagnostics
    /// back instead of logging them.
    pub fn validated(sample_rate: u32, decay_rate: f32) -> (Self, Vec<ConfigWarning>) {
        let mut warnings = Vec::new();

        let sample_rate = if (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
            sample_rate
        } else {
            warnings.push(ConfigWarning::SampleRateOutOfRange {
                requested: sample_rate,
                fallback: DEFAULT_SAMPLE_RATE,
            });
            DEFAULT_SAMPLE_RATE
        };

        // NaN fails the range check too
        let decay_rate = if (0.0..=1.0).contains(&decay_rate) {
            decay_rate
        } else {
            warnings.push(ConfigWarning::DecayRateOutOfRange {
                requested: decay_rate,
                fallback: DEFAULT_DECAY_RATE,
            });
            DEFAULT_DECAY_RATE
        };

        (
            Self {
                sample_rate,
                decay_rate,
            },
            warnings,
        )
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            decay_rate: DEFAULT_DECAY_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SynthesisConfig::default();
        assert_eq!(config.sample_rate(), 8000);
        assert_eq!(config.decay_rate(), 0.99);
    }

    #[test]
    fn test_in_range_values_kept() {
        let (config, warnings) = SynthesisConfig::validated(44100, 0.5);
        assert_eq!(config.sample_rate(), 44100);
        assert_eq!(config.decay_rate(), 0.5);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let (low, warnings) = SynthesisConfig::validated(8000, 0.0);
        assert!(warnings.is_empty());
        assert_eq!(low.decay_rate(), 0.0);

        let (high, warnings) = SynthesisConfig::validated(48000, 1.0);
        assert!(warnings.is_empty());
        assert_eq!(high.sample_rate(), 48000);
        assert_eq!(high.decay_rate(), 1.0);
    }

    #[test]
    fn test_sample_rate_clamped() {
        let config = SynthesisConfig::new(1000, 0.5);
        assert_eq!(config.sample_rate(), 8000);
        assert_eq!(config.decay_rate(), 0.5);

        let (config, warnings) = SynthesisConfig::validated(96000, 0.5);
        assert_eq!(config.sample_rate(), 8000);
        assert_eq!(
            warnings,
            vec![ConfigWarning::SampleRateOutOfRange {
                requested: 96000,
                fallback: 8000
            }]
        );
    }

    #[test]
    fn test_decay_rate_clamped() {
        let config = SynthesisConfig::new(16000, 1.5);
        assert_eq!(config.sample_rate(), 16000);
        assert_eq!(config.decay_rate(), 0.99);

        let (config, warnings) = SynthesisConfig::validated(16000, f32::NAN);
        assert_eq!(config.decay_rate(), 0.99);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_both_out_of_range() {
        let (config, warnings) = SynthesisConfig::validated(0, -0.1);
        assert_eq!(config, SynthesisConfig::default());
        assert_eq!(warnings.len(), 2);
    }
}

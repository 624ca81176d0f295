/// Interactive configuration questions, read from any `BufRead`
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::config::{SynthesisConfig, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};
use crate::error::Result;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Repeats `question` until the answer parses as `T`.
    fn ask_parsed<T: FromStr>(&mut self, question: &str, retry: &str) -> Result<T> {
        let mut answer = self.ask(question)?;
        loop {
            if let Ok(value) = answer.parse() {
                return Ok(value);
            }
            answer = self.ask(retry)?;
        }
    }

    pub fn ask_filename(&mut self) -> Result<String> {
        self.ask("Please enter the filename you want to read in: ")
    }

    /// `true` for `y`, `false` for `n`, case-insensitive.
    pub fn ask_use_defaults(&mut self) -> Result<bool> {
        let question = "Do you want to use the default settings? Please type 'y' for yes or 'n' for no.\n";
        let mut answer = self.ask(question)?;
        loop {
            if answer.eq_ignore_ascii_case("y") {
                return Ok(true);
            }
            if answer.eq_ignore_ascii_case("n") {
                return Ok(false);
            }
            writeln!(self.output, "Please enter valid input")?;
            answer = self.ask(question)?;
        }
    }

    /// Any integer is accepted; range checking is left to [`SynthesisConfig`].
    /// Values outside `u32` saturate, so they still clamp to the default.
    pub fn ask_sample_rate(&mut self) -> Result<u32> {
        let question = format!(
            "Please enter your desired sample rate in Hz (integer between {} and {}): ",
            MIN_SAMPLE_RATE, MAX_SAMPLE_RATE
        );
        let retry = format!(
            "Please enter a valid integer between {} and {}: ",
            MIN_SAMPLE_RATE, MAX_SAMPLE_RATE
        );
        let sample_rate: i64 = self.ask_parsed(&question, &retry)?;
        Ok(sample_rate.clamp(0, u32::MAX as i64) as u32)
    }

    pub fn ask_decay_rate(&mut self) -> Result<f32> {
        self.ask_parsed(
            "Please enter a floating-point value for decay rate (between 0.0 and 1.0): ",
            "Please enter a valid float between 0.0 and 1.0: ",
        )
    }

    pub fn ask_config(&mut self) -> Result<SynthesisConfig> {
        if self.ask_use_defaults()? {
            return Ok(SynthesisConfig::default());
        }
        let sample_rate = self.ask_sample_rate()?;
        let decay_rate = self.ask_decay_rate()?;
        Ok(SynthesisConfig::new(sample_rate, decay_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluckError;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_filename_trimmed() {
        let mut p = prompt("  song.txt \n");
        assert_eq!(p.ask_filename().unwrap(), "song.txt");
    }

    #[test]
    fn test_defaults_answer() {
        assert!(prompt("Y\n").ask_use_defaults().unwrap());
        assert!(!prompt("n\n").ask_use_defaults().unwrap());
    }

    #[test]
    fn test_defaults_reprompts() {
        let mut p = prompt("maybe\n\ny\n");
        assert!(p.ask_use_defaults().unwrap());
        let output = String::from_utf8(p.output).unwrap();
        assert_eq!(output.matches("Please enter valid input").count(), 2);
    }

    #[test]
    fn test_custom_config() {
        let mut p = prompt("n\n16000\n0.95\n");
        let config = p.ask_config().unwrap();
        assert_eq!(config.sample_rate(), 16000);
        assert_eq!(config.decay_rate(), 0.95);
    }

    #[test]
    fn test_numeric_reprompt() {
        let mut p = prompt("n\nfast\n22050\nslow\n0.5\n");
        let config = p.ask_config().unwrap();
        assert_eq!(config.sample_rate(), 22050);
        assert_eq!(config.decay_rate(), 0.5);
        let output = String::from_utf8(p.output).unwrap();
        assert!(output.contains("Please enter a valid integer"));
        assert!(output.contains("Please enter a valid float"));
    }

    #[test]
    fn test_out_of_range_is_clamped_not_reprompted() {
        let config = prompt("n\n1000\n1.5\n").ask_config().unwrap();
        assert_eq!(config, SynthesisConfig::default());
    }

    #[test]
    fn test_any_integer_sample_rate_accepted() {
        let mut p = prompt("-5\n");
        assert_eq!(p.ask_sample_rate().unwrap(), 0);

        let mut p = prompt("99999999999\n");
        assert_eq!(p.ask_sample_rate().unwrap(), u32::MAX);

        let mut p = prompt("n\n-5\n0.5\n");
        let config = p.ask_config().unwrap();
        assert_eq!(config.sample_rate(), 8000);
        assert_eq!(config.decay_rate(), 0.5);
        let output = String::from_utf8(p.output).unwrap();
        assert!(!output.contains("Please enter a valid integer"));
    }

    #[test]
    fn test_eof_is_error() {
        let result = prompt("n\nabc\n").ask_config();
        assert!(matches!(result, Err(PluckError::Io(_))));
    }
}

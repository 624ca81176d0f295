/// Reading note lists: one `<pitch> <duration ms>` pair per line
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::warn;

use crate::error::{LineError, PluckError, Result};
use crate::note::Note;

/// A score line that produced no note. `line` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: LineError,
}

#[derive(Debug, Clone, Default)]
pub struct Score {
    pub notes: Vec<Note>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses a single line. Fields past the duration are ignored.
pub fn parse_line(line: &str) -> std::result::Result<Note, LineError> {
    let mut fields = line.split_whitespace();
    let designator = fields.next().ok_or(LineError::Blank)?;
    let duration = fields.next().ok_or(LineError::MissingDuration)?;

    let duration_ms: f32 = duration
        .parse()
        .map_err(|_| LineError::InvalidDuration(duration.to_string()))?;

    Note::from_pitch(designator, duration_ms).map_err(|err| match err {
        PluckError::InvalidPitch(pitch) => LineError::InvalidPitch(pitch),
        _ => LineError::InvalidDuration(duration.to_string()),
    })
}

/// Parses every line of `reader`, skipping the ones that do not describe a note.
///
/// Only read failures abort; each skipped line is logged and recorded.
pub fn parse_score<R: BufRead>(mut reader: R) -> Result<Score> {
    let mut score = Score::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => parse_line(line),
            Err(_) => Err(LineError::InvalidEncoding),
        };
        match parsed {
            Ok(note) => score.notes.push(note),
            Err(reason) => {
                warn!("Skipped line {}: {}", line_number, reason);
                score.skipped.push(SkippedLine {
                    line: line_number,
                    reason,
                });
            }
        }
    }

    Ok(score)
}

/// Opens and parses a score file.
pub fn load_score(path: &Path) -> Result<Score> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => PluckError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PluckError::Io(err),
    })?;
    parse_score(BufReader::new(file))
}

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use log::info;

use pluck::audio::{AudioSink, BufferSink, CpalSink};
use pluck::prompt::Prompt;
use pluck::score::load_score;
use pluck::{Sequencer, SynthesisConfig};

const USAGE: &str = "Usage: pluck [--defaults] [--dry-run] [score.txt]";

struct Options {
    score: Option<PathBuf>,
    use_defaults: bool,
    dry_run: bool,
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        score: None,
        use_defaults: false,
        dry_run: false,
    };

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--defaults" => options.use_defaults = true,
            "--dry-run" => options.dry_run = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, USAGE),
            path if options.score.is_none() => options.score = Some(PathBuf::from(path)),
            _ => bail!("only one score file may be given\n{}", USAGE),
        }
    }

    Ok(options)
}

fn run() -> Result<()> {
    let options = parse_args()?;
    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());

    let score_path = match options.score {
        Some(path) => path,
        None => PathBuf::from(prompt.ask_filename()?),
    };

    let config = if options.use_defaults {
        SynthesisConfig::default()
    } else {
        prompt.ask_config()?
    };
    info!(
        "Sample rate {} Hz, decay rate {}",
        config.sample_rate(),
        config.decay_rate()
    );

    let score = load_score(&score_path)
        .with_context(|| format!("Failed to load score '{}'", score_path.display()))?;
    info!(
        "Loaded {} notes from {} ({} lines skipped)",
        score.notes.len(),
        score_path.display(),
        score.skipped.len()
    );

    let mut sequencer = Sequencer::new(config);
    for note in score.notes {
        // A full queue logs and drops the note
        let _ = sequencer.add_note(note);
    }

    let mut sink: Box<dyn AudioSink> = if options.dry_run {
        Box::new(BufferSink::new())
    } else {
        Box::new(CpalSink::new())
    };

    let report = sequencer
        .play(sink.as_mut())
        .context("Playback failed")?;

    println!(
        "Played {} notes ({:.2} s){}",
        report.notes_rendered,
        report.duration_secs(config.sample_rate()),
        if report.skipped.is_empty() {
            String::new()
        } else {
            format!(", {} skipped", report.skipped.len())
        }
    );

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

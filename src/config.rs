//! Run configuration: environment defaults and command-line parsing.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::core::types::{MAX_LEVEL, MIN_LEVEL};
use crate::highscores::HighScoreEntry;

/// Frames the demo plays when `--frames` is not given (one minute at 60 fps)
pub const DEFAULT_DEMO_FRAMES: usize = 3600;

/// Host frame length the demo feeds to the engine
pub const DEMO_FRAME_MS: u32 = 16;

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub level: u8,
    pub log_level: LevelFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            level: MIN_LEVEL,
            log_level: LevelFilter::Warn,
        }
    }
}

impl RunConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from any variable source; unset or unparsable values keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("TETRIS_MAX_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let level = lookup("TETRIS_MAX_LEVEL")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .filter(|l| (MIN_LEVEL..=MAX_LEVEL).contains(l))
            .unwrap_or(defaults.level);

        let log_level = lookup("TETRIS_MAX_LOG")
            .and_then(|s| s.trim().parse::<LevelFilter>().ok())
            .unwrap_or(defaults.log_level);

        Self {
            seed,
            level,
            log_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoArgs {
    pub seed: u32,
    pub level: u8,
    pub frames: usize,
    /// Write the generated input trace here
    pub record: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Demo(DemoArgs),
    Replay { trace: PathBuf },
    Scores { table: PathBuf, entry: HighScoreEntry },
    Help,
}

pub const USAGE: &str = "\
usage:
  tetris-max demo [--seed N] [--level L] [--frames N] [--record TRACE.json]
  tetris-max replay TRACE.json
  tetris-max scores TABLE.json NAME SCORE ROWS DATE

environment:
  TETRIS_MAX_SEED   default seed (1)
  TETRIS_MAX_LEVEL  default start level, 1-10 (1)
  TETRIS_MAX_LOG    off|error|warn|info|debug|trace (warn)";

fn parse_value<T: std::str::FromStr>(cmd: &str, flag: &str, value: Option<&String>) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("{}: missing value for {}", cmd, flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("{}: invalid {} value: {}", cmd, flag, v))
}

/// Parse command-line arguments (without the program name)
pub fn parse_args(args: &[String], config: &RunConfig) -> Result<Command> {
    let Some(cmd) = args.first() else {
        return Ok(Command::Demo(DemoArgs {
            seed: config.seed,
            level: config.level,
            frames: DEFAULT_DEMO_FRAMES,
            record: None,
        }));
    };

    match cmd.as_str() {
        "demo" => parse_demo_args(&args[1..], config).map(Command::Demo),
        "replay" => match &args[1..] {
            [trace] => Ok(Command::Replay {
                trace: PathBuf::from(trace),
            }),
            _ => Err(anyhow!("replay: expected exactly one trace file")),
        },
        "scores" => match &args[1..] {
            [table, name, score, rows, date] => {
                let score = parse_value("scores", "score", Some(score))?;
                let rows = parse_value("scores", "rows", Some(rows))?;
                Ok(Command::Scores {
                    table: PathBuf::from(table),
                    entry: HighScoreEntry::new(name.as_str(), score, rows, date.as_str()),
                })
            }
            _ => Err(anyhow!(
                "scores: expected TABLE.json NAME SCORE ROWS DATE"
            )),
        },
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(anyhow!("unknown command: {}", other)),
    }
}

fn parse_demo_args(args: &[String], config: &RunConfig) -> Result<DemoArgs> {
    let mut demo = DemoArgs {
        seed: config.seed,
        level: config.level,
        frames: DEFAULT_DEMO_FRAMES,
        record: None,
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                demo.seed = parse_value("demo", "--seed", args.get(i))?;
            }
            "--level" => {
                i += 1;
                let level: u8 = parse_value("demo", "--level", args.get(i))?;
                if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
                    return Err(anyhow!(
                        "demo: --level must be {}-{}, got {}",
                        MIN_LEVEL,
                        MAX_LEVEL,
                        level
                    ));
                }
                demo.level = level;
            }
            "--frames" => {
                i += 1;
                demo.frames = parse_value("demo", "--frames", args.get(i))?;
            }
            "--record" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("demo: missing value for --record"))?;
                demo.record = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("demo: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(demo)
}

//! Headless Tetris Max runner (default binary).
//!
//! Rendering, audio, and input wiring belong to a host; this binary drives the
//! engine from scripted or recorded input and prints the outcome.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use log::info;

use tetris_max::autoplay::{render_board, run_demo};
use tetris_max::config::{parse_args, Command, DemoArgs, RunConfig, DEMO_FRAME_MS, USAGE};
use tetris_max::core::{GameState, InputTrace};
use tetris_max::highscores::{HighScoreEntry, HighScoreTable};
use tetris_max::logging;

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    logging::init(config.log_level).map_err(|e| anyhow!("logger init failed: {}", e))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args, &config)? {
        Command::Demo(demo) => demo_command(&demo),
        Command::Replay { trace } => replay_command(&trace),
        Command::Scores { table, entry } => scores_command(&table, entry),
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn print_summary(state: &GameState) {
    print!("{}", render_board(state));
    println!(
        "score {}  lines {}  level {}  ticks {}{}",
        state.score(),
        state.lines(),
        state.level(),
        state.tick_count(),
        if state.game_over() { "  GAME OVER" } else { "" }
    );
    let counts = state
        .spawn_counts()
        .iter()
        .zip(tetris_max::types::Shape::ALL)
        .map(|(n, shape)| format!("{}={}", shape.as_str(), n))
        .collect::<Vec<_>>()
        .join(" ");
    println!("pieces {}", counts);
}

fn demo_command(demo: &DemoArgs) -> Result<()> {
    info!(
        "demo: seed {} level {} frames {}",
        demo.seed, demo.level, demo.frames
    );
    let run = run_demo(demo.seed, demo.level, demo.frames, DEMO_FRAME_MS);
    print_summary(&run.state);
    println!("events {}", run.events);

    if let Some(path) = &demo.record {
        let json = serde_json::to_string(&run.trace)?;
        fs::write(path, json)
            .map_err(|e| anyhow!("demo: write {} failed: {}", path.display(), e))?;
        println!("trace written to {}", path.display());
    }
    Ok(())
}

fn replay_command(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("replay: read {} failed: {}", path.display(), e))?;
    let trace: InputTrace = serde_json::from_str(&text)
        .map_err(|e| anyhow!("replay: invalid trace {}: {}", path.display(), e))?;
    info!(
        "replay: seed {} level {}, {} frames over {} ms",
        trace.seed,
        trace.level,
        trace.frames.len(),
        trace.duration_ms()
    );

    let (state, outcome) = trace.replay();
    print_summary(&state);
    let tokens: Vec<&str> = outcome.events.iter().map(|e| e.as_str()).collect();
    println!("events {}", tokens.join(" "));
    println!("board hash {:016x}", state.snapshot().board_hash);
    Ok(())
}

fn scores_command(path: &Path, entry: HighScoreEntry) -> Result<()> {
    let mut table = match fs::read_to_string(path) {
        Ok(text) => HighScoreTable::from_json(&text)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HighScoreTable::new(),
        Err(e) => return Err(anyhow!("scores: read {} failed: {}", path.display(), e)),
    };

    match table.insert(entry) {
        Some(index) => {
            fs::write(path, table.to_json()?)
                .map_err(|e| anyhow!("scores: write {} failed: {}", path.display(), e))?;
            println!("rank {}", index + 1);
        }
        None => println!("did not qualify"),
    }

    for (i, e) in table.entries().iter().enumerate() {
        println!("{:>2}. {:<12} {:>8} {:>5}  {}", i + 1, e.name, e.score, e.rows, e.date);
    }
    Ok(())
}

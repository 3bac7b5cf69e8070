//! Monster-slayer: a turn-based player-versus-monster battle.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one command per line. Diagnostics go to stderr through `tracing`.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use monster_slayer::engine::Engine;
use monster_slayer::protocol::parser::{parse_command, Command};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Turn-based battle against a monster over a line protocol")]
struct Args {
    /// Seed for the dice; battles are reproducible for a given seed.
    #[arg(long)]
    seed: Option<u64>,
}

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(seed),
        None => Engine::new(),
    };

    for chunk in stdin.lock().split(b'\n') {
        let bytes = match chunk {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("stdin read failed: {}", e);
                break;
            }
        };
        let line = match String::from_utf8(bytes) {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!("skipping non-UTF-8 input line: {}", e);
                continue;
            }
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Act(action) => engine.handle_action(action, &mut out)?,
            Command::Show => engine.handle_show(&mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Position { json } => {
                if let Err(e) = engine.set_position(&json) {
                    tracing::warn!("position rejected: {}", e);
                    writeln!(out, "error {}", e)?;
                    out.flush()?;
                }
            }
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(name, value) {
                    tracing::warn!("setoption rejected: {}", e);
                    writeln!(out, "error {}", e)?;
                    out.flush()?;
                }
            }
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::Quit => break,
        }
    }

    out.flush()?;
    Ok(())
}

//! Batch battle simulation CLI.
//!
//! Plays many battles with a scripted player policy and writes one JSON
//! record per battle (JSONL), followed by a summary on stderr.
//!
//! Usage:
//!   cargo run --release --bin autoplay -- --battles 1000 --policy cautious

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use monster_slayer::autoplay::{
    run_autoplay_with_callback, write_battle_json, AutoplayConfig, AutoplaySummary, Policy,
};
use monster_slayer::resolve::Rules;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Simulate many monster battles with a scripted player")]
struct Args {
    /// Number of battles to play.
    #[arg(long, default_value_t = 100)]
    battles: usize,

    /// Player policy: aggressive, cautious, or random.
    #[arg(long, default_value_t = Policy::Cautious)]
    policy: Policy,

    /// Health below which the cautious policy heals.
    #[arg(long, default_value_t = 40)]
    heal_below: u32,

    /// Number of parallel threads.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Abandon a battle after this many actions.
    #[arg(long, default_value_t = 500)]
    max_actions: u32,

    /// Count heals as turns.
    #[arg(long)]
    heal_advances_turn: bool,

    /// Do not count a special attack refused for cooldown as a turn.
    #[arg(long)]
    rejected_special_keeps_turn: bool,

    /// Output file path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress the summary.
    #[arg(long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> AutoplayConfig {
        AutoplayConfig {
            num_battles: self.battles,
            policy: self.policy,
            heal_below: self.heal_below,
            max_actions: self.max_actions,
            rules: Rules {
                heal_advances_turn: self.heal_advances_turn,
                rejected_special_advances_turn: !self.rejected_special_keeps_turn,
            },
            threads: self.threads,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let start = Instant::now();
    let mut summary = AutoplaySummary::default();
    let mut write_error: Option<io::Error> = None;

    run_autoplay_with_callback(&config, |battle| {
        summary.record(&battle);
        if write_error.is_none() {
            if let Err(e) = write_battle_json(&battle, &mut out) {
                write_error = Some(e);
            }
        }
    })?;

    if let Some(e) = write_error {
        return Err(e).context("failed to write battle record");
    }
    out.flush().context("failed to flush output")?;

    if !args.quiet {
        eprintln!("{}", summary);
        eprintln!("Total time: {:.2}s", start.elapsed().as_secs_f64());
    }
    Ok(())
}

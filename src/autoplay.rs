//! Batch battle simulation.
//!
//! Plays many battles with a scripted policy choosing the player's actions
//! and records each one (winner, turns taken, final health, full log) for
//! balance analysis. Battles are independent, so they can be spread over a
//! rayon thread pool.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::battle::{Action, BattleState, LogEntry, Winner};
use crate::resolve::{resolve, Rules};

/// How the simulated player picks an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Special attack whenever it is ready, otherwise a regular attack.
    Aggressive,
    /// Heal below the configured threshold, otherwise fight aggressively.
    Cautious,
    /// Uniform choice among the actions currently available.
    Random,
}

impl Policy {
    pub const fn name(self) -> &'static str {
        match self {
            Policy::Aggressive => "aggressive",
            Policy::Cautious => "cautious",
            Policy::Random => "random",
        }
    }

    /// Picks the next action for `state`.
    pub fn choose<R: Rng>(self, state: &BattleState, heal_below: u32, rng: &mut R) -> Action {
        let strike = if state.special_ready() {
            Action::SpecialAttack
        } else {
            Action::Attack
        };
        match self {
            Policy::Aggressive => strike,
            Policy::Cautious => {
                if state.player_health < heal_below {
                    Action::Heal
                } else {
                    strike
                }
            }
            Policy::Random => {
                let choices: &[Action] = if state.special_ready() {
                    &[Action::Attack, Action::Heal, Action::SpecialAttack]
                } else {
                    &[Action::Attack, Action::Heal]
                };
                choices[rng.gen_range(0..choices.len())]
            }
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy '{0}' (expected aggressive, cautious, or random)")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aggressive" => Ok(Policy::Aggressive),
            "cautious" => Ok(Policy::Cautious),
            "random" => Ok(Policy::Random),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Errors from running a batch of battles.
#[derive(Debug, thiserror::Error)]
pub enum AutoplayError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("autoplay worker thread panicked")]
    WorkerPanicked,
}

/// Configuration for batch battle simulation.
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    /// Number of battles to play.
    pub num_battles: usize,
    pub policy: Policy,
    /// Player health below which the cautious policy heals.
    pub heal_below: u32,
    /// Battles still undecided after this many actions are abandoned.
    pub max_actions: u32,
    pub rules: Rules,
    /// Number of parallel threads for concurrent battles.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig {
            num_battles: 100,
            policy: Policy::Cautious,
            heal_below: 40,
            max_actions: 500,
            rules: Rules::classic(),
            threads: 4,
            seed: 0,
        }
    }
}

/// A complete simulated battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    /// Sequential battle ID.
    pub battle_id: usize,
    pub policy: Policy,
    /// `None` if the battle hit the action limit.
    pub winner: Option<Winner>,
    pub turns: u32,
    pub actions: u32,
    /// Special attacks refused because of the cooldown.
    pub rejected_specials: u32,
    pub final_player_health: u32,
    pub final_monster_health: u32,
    pub log: Vec<LogEntry>,
}

/// Plays a single battle and returns its record.
pub fn play_battle(config: &AutoplayConfig, battle_id: usize, rng: &mut SmallRng) -> BattleRecord {
    let mut state = BattleState::new();
    let mut actions = 0u32;
    let mut rejected_specials = 0u32;

    while !state.is_over() && actions < config.max_actions {
        let action = config.policy.choose(&state, config.heal_below, rng);
        let resolution = resolve(&state, action, &config.rules, rng);
        if resolution.notice.is_some() {
            rejected_specials += 1;
        }
        state = resolution.state;
        actions += 1;
    }

    BattleRecord {
        battle_id,
        policy: config.policy,
        winner: state.winner(),
        turns: state.turn,
        actions,
        rejected_specials,
        final_player_health: state.player_health,
        final_monster_health: state.monster_health,
        log: state.log,
    }
}

/// Plays every configured battle and collects the records in completion
/// order.
pub fn run_autoplay(config: &AutoplayConfig) -> Result<Vec<BattleRecord>, AutoplayError> {
    let mut battles = Vec::with_capacity(config.num_battles);
    run_autoplay_with_callback(config, |battle| battles.push(battle))?;
    Ok(battles)
}

/// Plays every configured battle, calling `on_battle` with each finished
/// record.
///
/// Records are delivered on the calling thread as they complete, so the
/// caller can stream them to disk.
pub fn run_autoplay_with_callback<F>(
    config: &AutoplayConfig,
    on_battle: F,
) -> Result<(), AutoplayError>
where
    F: FnMut(BattleRecord),
{
    if config.threads > 1 {
        run_parallel(config, on_battle)
    } else {
        run_sequential(config, on_battle);
        Ok(())
    }
}

/// Dice for battle `battle_id`: derived from the seed, or from entropy.
fn battle_rng(seed: u64, battle_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(battle_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_progress(done: usize, config: &AutoplayConfig, battle: &BattleRecord, started: Instant) {
    let outcome = battle.winner.map_or("unfinished", Winner::name);
    tracing::debug!(
        "Battle {}/{}: {} after {} turns ({:.2}ms)",
        done,
        config.num_battles,
        outcome,
        battle.turns,
        started.elapsed().as_secs_f64() * 1000.0,
    );
}

fn run_sequential<F>(config: &AutoplayConfig, mut on_battle: F)
where
    F: FnMut(BattleRecord),
{
    for i in 0..config.num_battles {
        let mut rng = battle_rng(config.seed, i);
        let started = Instant::now();
        let battle = play_battle(config, i, &mut rng);
        log_progress(i + 1, config, &battle, started);
        on_battle(battle);
    }
}

/// Plays battles concurrently on a rayon pool; finished records come back
/// over a channel.
fn run_parallel<F>(config: &AutoplayConfig, mut on_battle: F) -> Result<(), AutoplayError>
where
    F: FnMut(BattleRecord),
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<BattleRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    std::thread::scope(|scope| {
        let completed = &completed;
        let worker = scope.spawn(move || {
            pool.install(|| {
                (0..config.num_battles)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = battle_rng(config.seed, i);
                        let started = Instant::now();
                        let battle = play_battle(config, i, &mut rng);
                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_progress(done, config, &battle, started);
                        let _ = tx.send(battle);
                    });
            });
        });

        for battle in rx {
            on_battle(battle);
        }

        worker.join().map_err(|_| AutoplayError::WorkerPanicked)
    })
}

/// Writes battle records as JSONL (one JSON object per battle, one per line).
pub fn write_jsonl<W: Write>(battles: &[BattleRecord], out: &mut W) -> io::Result<()> {
    for battle in battles {
        write_battle_json(battle, out)?;
    }
    out.flush()
}

/// Writes a single battle record as a JSON line.
pub fn write_battle_json<W: Write>(battle: &BattleRecord, out: &mut W) -> io::Result<()> {
    serde_json::to_writer(&mut *out, battle)?;
    writeln!(out)
}

/// Aggregate results over a batch of battles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoplaySummary {
    pub battles: usize,
    pub player_wins: usize,
    pub monster_wins: usize,
    pub unfinished: usize,
    pub total_turns: u64,
    pub total_actions: u64,
    pub rejected_specials: u64,
}

impl AutoplaySummary {
    /// Adds one battle to the totals.
    pub fn record(&mut self, battle: &BattleRecord) {
        self.battles += 1;
        match battle.winner {
            Some(Winner::Player) => self.player_wins += 1,
            Some(Winner::Monster) => self.monster_wins += 1,
            None => self.unfinished += 1,
        }
        self.total_turns += u64::from(battle.turns);
        self.total_actions += u64::from(battle.actions);
        self.rejected_specials += u64::from(battle.rejected_specials);
    }

    pub fn from_battles(battles: &[BattleRecord]) -> Self {
        let mut summary = Self::default();
        for battle in battles {
            summary.record(battle);
        }
        summary
    }

    fn per_battle(&self, total: u64) -> f64 {
        total as f64 / self.battles.max(1) as f64
    }

    fn percent(&self, count: usize) -> f64 {
        100.0 * count as f64 / self.battles.max(1) as f64
    }

    pub fn mean_turns(&self) -> f64 {
        self.per_battle(self.total_turns)
    }

    pub fn mean_actions(&self) -> f64 {
        self.per_battle(self.total_actions)
    }
}

impl fmt::Display for AutoplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Autoplay Summary ===")?;
        writeln!(f, "Battles: {}", self.battles)?;
        writeln!(f, "Avg turns/battle: {:.1}", self.mean_turns())?;
        writeln!(f, "Avg actions/battle: {:.1}", self.mean_actions())?;
        writeln!(f, "Rejected specials: {}", self.rejected_specials)?;
        writeln!(
            f,
            "  {:>10}: {} ({:.1}%)",
            "player",
            self.player_wins,
            self.percent(self.player_wins)
        )?;
        writeln!(
            f,
            "  {:>10}: {} ({:.1}%)",
            "monster",
            self.monster_wins,
            self.percent(self.monster_wins)
        )?;
        write!(
            f,
            "  {:>10}: {} ({:.1}%)",
            "unfinished",
            self.unfinished,
            self.percent(self.unfinished)
        )
    }
}

//! Headless driver: runs the simulation at the fixed tick rate and logs
//! alerts and events as they happen.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use airwave_core::constants::TICK_RATE;
use airwave_core::enums::{AlertLevel, Difficulty};
use airwave_sim::engine::{SimConfig, SimEngine};

#[derive(Parser, Debug)]
#[command(name = "airwave", about = "Air traffic control simulation")]
struct Args {
    /// RNG seed. Identical seeds replay identical sessions.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Difficulty tier: easy, medium or hard.
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Stop after this many ticks (0 = run until interrupted).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Run unpaced instead of in real time.
    #[arg(long)]
    fast: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config = SimConfig {
        seed: args.seed,
        difficulty: args.difficulty,
        ..Default::default()
    };
    let mut engine = SimEngine::new(config);
    tracing::info!(seed = args.seed, difficulty = ?args.difficulty, "session started");

    let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let mut next_tick = Instant::now();
    loop {
        let snapshot = engine.tick();

        for alert in &snapshot.alerts {
            match alert.level {
                AlertLevel::Critical => tracing::error!(tick = alert.tick, "{}", alert.message),
                AlertLevel::Warning => tracing::warn!(tick = alert.tick, "{}", alert.message),
                AlertLevel::Info => tracing::info!(tick = alert.tick, "{}", alert.message),
            }
        }
        for event in &snapshot.audio_events {
            tracing::info!(?event, "event");
        }
        if snapshot.time.tick % (10 * u64::from(TICK_RATE)) == 0 {
            tracing::info!(
                tick = snapshot.time.tick,
                aircraft = snapshot.aircraft.len(),
                score = snapshot.score.total,
                "status"
            );
        }

        if args.ticks > 0 && snapshot.time.tick >= args.ticks {
            break;
        }
        if !args.fast {
            next_tick += tick_duration;
            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
            } else {
                // Fell behind; rebase instead of bursting to catch up.
                next_tick = now;
            }
        }
    }

    let score = engine.score();
    println!(
        "session over after {} ticks: {} banked, {} completed, {} crashed, {} violations",
        engine.time().tick,
        score.total,
        score.completed,
        score.crashed,
        score.violations
    );
    Ok(())
}

//! Guess the Angle headless driver
//!
//! Plays rounds with a simple auto-aimer and logs each attempt. Rendering and
//! input live outside this crate; this binary stands in for both.
//!
//! Usage: `guess-the-angle [--config FILE] [--seed N] [--rounds N]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use guess_the_angle::consts::FRAME_DT;
use guess_the_angle::{AttemptReport, Command, DrillConfig, Phase, SimulationEngine};

/// Frames before an attempt is abandoned (never reached with sane configs)
const MAX_FRAMES_PER_ATTEMPT: u32 = 100_000;

#[derive(Parser, Debug)]
#[command(name = "guess-the-angle")]
#[command(about = "Play Guess the Angle rounds with an auto-aimer")]
struct Args {
    /// JSON drill config (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for scenario generation
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Number of rounds to play
    #[arg(long, default_value_t = 3)]
    rounds: u32,
}

/// Angle from the collar straight at the orebody center, snapped to the
/// rotate step, with a little aiming error
fn choose_angle(engine: &SimulationEngine, rng: &mut Pcg32) -> f64 {
    let round = engine.round();
    let to_target = round.target_center - round.origin;
    let exact = to_target.y.atan2(to_target.x).to_degrees();
    let step = engine.config().angle.step;
    let wobble = rng.random_range(-2i32..=2) as f64 * step;
    engine.config().angle.clamp(((exact / step).round() * step) + wobble)
}

/// Rotate one step at a time, the way the arrow keys would
fn aim(engine: &mut SimulationEngine, rng: &mut Pcg32, angle: f64) {
    let step = engine.config().angle.step;
    while (engine.angle() - angle).abs() >= step / 2.0 {
        let delta = if engine.angle() < angle { step } else { -step };
        if !engine.apply(Command::Rotate(delta), rng) {
            break;
        }
    }
}

fn play_round(engine: &mut SimulationEngine, rng: &mut Pcg32) {
    loop {
        let target_angle = choose_angle(engine, rng);
        aim(engine, rng, target_angle);
        engine.apply(Command::Fire, rng);

        let mut frames = 0;
        while engine.phase() == Phase::Advancing && frames < MAX_FRAMES_PER_ATTEMPT {
            engine.tick(FRAME_DT);
            frames += 1;
        }

        match AttemptReport::from_engine(engine) {
            Some(report) => {
                for line in report.to_string().lines() {
                    log::info!("  {line}");
                }
            }
            None => {
                log::warn!("Attempt did not resolve after {frames} frames");
                return;
            }
        }

        if !engine.apply(Command::Reattempt, rng) {
            return;
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Guess the Angle (headless) starting...");

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match DrillConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => DrillConfig::default(),
    };

    let mut rng = Pcg32::seed_from_u64(args.seed);
    log::info!("Seed: {}", args.seed);

    let mut engine = SimulationEngine::new(config, &mut rng);
    for round in 0..args.rounds {
        if round > 0 {
            engine.apply(Command::NewRound, &mut rng);
        }
        play_round(&mut engine, &mut rng);
    }

    match serde_json::to_string_pretty(&engine.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize final state: {e}"),
    }

    ExitCode::SUCCESS
}

//! Space Blaster headless runner
//!
//! Plays a scripted session against the headless platform backend and logs a
//! summary. A windowed backend plugs into the same `Game::run_frame` call.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use space_blaster::platform::headless::{
    Autopilot, FixedClock, RecordingAudio, RecordingRenderer, ScriptedInput,
};
use space_blaster::sim::GameEvent;
use space_blaster::{AssetCatalog, Game, Tuning};

/// Command-line arguments for a headless session
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// RNG seed (defaults to a fixed seed for reproducible runs)
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Frames per second of the fixed clock
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// JSON tuning file; missing fields use defaults
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Write the default tuning as JSON to stdout and exit
    #[arg(long)]
    dump_tuning: bool,

    /// Frames between autopilot shots
    #[arg(long, default_value_t = 8)]
    fire_every: u64,

    /// Print the session summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    if args.dump_tuning {
        println!("{}", Tuning::default().to_json()?);
        return Ok(());
    }

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!("Space Blaster (headless) starting, seed {}", args.seed);

    let assets = AssetCatalog::placeholder(tuning.explosion_frame_count);
    let mut clock = FixedClock::new(args.fps);
    let mut game = Game::new(args.seed, tuning, assets, 0.0).context("invalid tuning")?;
    let pilot = Autopilot {
        fire_every: args.fire_every,
        ..Autopilot::default()
    };

    let mut input = ScriptedInput::new();
    let mut renderer = RecordingRenderer::new();
    let mut audio = RecordingAudio::default();

    let total_frames = (args.seconds.max(0.0) * args.fps as f64).round() as u64;
    for frame in 0..total_frames {
        pilot.input_for(frame, &mut input);
        let events = game.run_frame(&clock, &input, &mut renderer, &mut audio);
        for event in &events {
            if let GameEvent::MeteorDestroyed { at } = event {
                log::debug!("Frame {frame}: meteor destroyed at ({:.0}, {:.0})", at.x, at.y);
            }
        }
        clock.advance();
    }

    let stats = &game.stats;
    if args.json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        log::info!(
            "{} frames: {} lasers fired, {} meteors spawned, {} destroyed, {} ship contacts, {} sounds",
            stats.frames,
            stats.lasers_fired,
            stats.meteors_spawned,
            stats.meteors_destroyed,
            stats.ship_contacts,
            audio.played.len()
        );
    }

    Ok(())
}

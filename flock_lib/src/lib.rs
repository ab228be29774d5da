use birdwatcher::{Birdwatcher, BoidRecord, RecordError};
use config::{ConfigError, RecordOptions, SimConfig, World};
use flock::FlockEngine;
use thiserror::Error;

pub mod birdwatcher;
pub mod boid;
pub mod config;
pub mod flock;
pub mod math_helpers;

/// Errors surfaced by the headless drivers.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Runs the simulation without a display surface: seeds a flock, ticks
/// it `no_ticks` times and returns the sampled records, saving them as
/// CSV when the recording options say so.
pub fn run_headless(
    no_ticks: u64,
    config: SimConfig,
    world: World,
    recording: &RecordOptions,
) -> Result<Vec<BoidRecord>, RunError> {
    run_headless_seeded(no_ticks, config, world, recording, None)
}

/// Same as [`run_headless`], with an optional fixed RNG seed for
/// reproducible runs.
pub fn run_headless_seeded(
    no_ticks: u64,
    config: SimConfig,
    world: World,
    recording: &RecordOptions,
    seed: Option<u64>,
) -> Result<Vec<BoidRecord>, RunError> {
    if recording.sample_rate == 0 {
        return Err(ConfigError::SampleRate.into());
    }

    let mut engine = match seed {
        Some(seed) => FlockEngine::with_seed(config, &world, seed)?,
        None => FlockEngine::new(config, &world)?,
    };
    let mut watcher = Birdwatcher::new(recording.sample_rate);

    for _ in 0..no_ticks {
        engine.tick(&world);
        watcher.watch(&engine);
    }

    Ok(watcher.pop_data_save(recording)?)
}

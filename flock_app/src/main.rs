use std::{fs::File, io::BufReader, process};

use clap_serde_derive::{clap::Parser, ClapSerde};

use flock_lib::config::{RecordOptions, SimConfig, World};

mod cliargs;
use cliargs::{Args, Config};

fn main() {
    let mut args = Args::parse();

    // config file first, CLI flags override it
    let config = if let Ok(f) = File::open(&args.config_path) {
        match serde_yaml::from_reader::<_, <Config as ClapSerde>::Opt>(BufReader::new(f)) {
            Ok(file_config) => Config::from(file_config).merge(&mut args.config),
            Err(err) => {
                eprintln!("error in configuration file: {err}");
                process::exit(1);
            }
        }
    } else {
        Config::from(&mut args.config)
    };

    let sim_config = SimConfig {
        num_boids: config.no_boids,
        sensing_radius: config.sensing_radius,
        separation_radius: config.separation_radius,
        wall_displacement: config.wall_displacement,
        max_speed: config.max_speed,
        cohesion_co: config.cohesion_co,
        separation_co: config.separation_co,
        alignment_co: config.alignment_co,
        noise_amplitude: config.noise_amplitude,
    };

    let world = World {
        walls_enabled: config.walls,
        ..World::new(config.width, config.height)
    };

    let recording = RecordOptions {
        sample_rate: config.sample_rate,
        save_csv: config.save,
        timestamp: config.save_timestamp,
        ..Default::default()
    };

    let seed = match config.seed {
        0 => None,
        seed => Some(seed),
    };

    match flock_lib::run_headless_seeded(config.ticks, sim_config, world, &recording, seed) {
        Ok(records) => {
            println!(
                "simulated {no_boids} boids for {ticks} ticks, {samples} samples collected",
                no_boids = config.no_boids,
                ticks = config.ticks,
                samples = records.len()
            );
        }
        Err(err) => {
            eprintln!("simulation failed: {err}");
            process::exit(1);
        }
    }
}

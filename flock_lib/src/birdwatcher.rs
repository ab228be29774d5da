use std::{fs::OpenOptions, mem};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::{config::RecordOptions, flock::FlockEngine};

const PREFIX: &str = "flock-data";

/// One sampled boid state.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct BoidRecord {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub speed: f32,
    pub tick: u64,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to open output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write record: {0}")]
    Csv(#[from] csv::Error),
}

/// Accumulates sampled flock states and writes them out as CSV.
pub struct Birdwatcher {
    records: Vec<BoidRecord>,
    ticker: u64,
    sample_rate: u64,
}

impl Birdwatcher {
    /// Watcher sampling every `sample_rate`-th tick. A rate of 1
    /// records everything.
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            records: Vec::new(),
            ticker: 0,
            sample_rate,
        }
    }

    /// Samples the flock if the tick counter lands on the sample rate.
    pub fn watch(&mut self, engine: &FlockEngine) {
        if !self.should_sample() {
            return;
        }

        let tick = self.ticker / self.sample_rate;
        self.records.extend(engine.boids().iter().map(|b| BoidRecord {
            id: b.id,
            x: b.position.x,
            y: b.position.y,
            vx: b.velocity.x,
            vy: b.velocity.y,
            speed: b.velocity.length(),
            tick,
        }));
    }

    pub fn restart(&mut self) {
        self.records.clear();
    }

    pub fn pop_data(&mut self) -> Vec<BoidRecord> {
        mem::take(&mut self.records)
    }

    /// Returns the collected data while emptying the watcher's memory,
    /// saving it as CSV first when the recording options ask for it.
    ///
    /// Depending on the options the file name is either timestamped or
    /// a fixed name that gets overwritten run over run.
    pub fn pop_data_save(
        &mut self,
        recording: &RecordOptions,
    ) -> Result<Vec<BoidRecord>, RecordError> {
        let data = self.pop_data();

        if !recording.save_csv {
            return Ok(data);
        }

        if let Some(path) = &recording.output_path {
            let file_path = format!(
                "{path}{file_name}",
                file_name = Birdwatcher::dataset_name(recording, Utc::now())
            );

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(file_path)?;
            let mut wtr = csv::Writer::from_writer(file);

            for record in &data {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }

        Ok(data)
    }

    fn dataset_name(recording: &RecordOptions, now: DateTime<Utc>) -> String {
        match recording.timestamp {
            true => format!(
                "{prefix}_{datetime}.csv",
                prefix = PREFIX,
                datetime = now.timestamp_millis()
            ),
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.ticker += 1;
        self.ticker % self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use glam::Vec2;

    use super::Birdwatcher;
    use crate::{
        boid::Boid,
        config::{RecordOptions, SimConfig},
        flock::FlockEngine,
    };

    #[test]
    fn dataset_name_timestamped() {
        let recording = RecordOptions {
            timestamp: true,
            ..Default::default()
        };
        let dt = Utc.timestamp_millis_opt(1668038059490).unwrap();

        assert_eq!(
            Birdwatcher::dataset_name(&recording, dt),
            "flock-data_1668038059490.csv"
        );
    }

    #[test]
    fn dataset_name_overwrite() {
        let recording = RecordOptions {
            timestamp: false,
            ..Default::default()
        };
        let dt = Utc.timestamp_millis_opt(1668038059490).unwrap();

        assert_eq!(Birdwatcher::dataset_name(&recording, dt), "flock-data.csv");
    }

    #[test]
    fn watch_honours_the_sample_rate() {
        let config = SimConfig {
            noise_amplitude: 0.,
            ..Default::default()
        };
        let boids = vec![
            Boid::new(100., 100., Vec2::ZERO, 0),
            Boid::new(400., 400., Vec2::ZERO, 1),
        ];
        let engine = FlockEngine::from_boids(config, boids).unwrap();
        let mut watcher = Birdwatcher::new(2);

        for _ in 0..4 {
            watcher.watch(&engine);
        }

        // two samples of two boids each
        let data = watcher.pop_data();
        assert_eq!(data.len(), 4);
        assert_eq!(data[0].tick, 1);
        assert_eq!(data[3].tick, 2);
    }

    #[test]
    fn pop_data_empties_the_watcher() {
        let engine = FlockEngine::from_boids(
            SimConfig::default(),
            vec![Boid::new(1., 1., Vec2::ZERO, 0)],
        )
        .unwrap();
        let mut watcher = Birdwatcher::new(1);

        watcher.watch(&engine);
        assert_eq!(watcher.pop_data().len(), 1);
        assert!(watcher.pop_data().is_empty());
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable constants of a simulation run.
///
/// An engine takes one of these at construction and keeps it for its
/// lifetime; there is no ambient mutable state to poke at mid-run. The
/// defaults are the reference parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// number of boids seeded at start, fixed for the run
    pub num_boids: usize,
    /// maximum distance at which another boid counts as a neighbour
    pub sensing_radius: f32,
    /// closer threshold at which the repulsive correction kicks in
    pub separation_radius: f32,
    /// distance from an edge at which wall avoidance starts pushing back
    pub wall_displacement: f32,
    /// speed cap, enforced by rescaling after every tick
    pub max_speed: f32,
    /// rule divisors, a larger value weakens the corresponding pull
    pub cohesion_co: f32,
    pub separation_co: f32,
    pub alignment_co: f32,
    /// half-width of the uniform per-axis velocity perturbation, 0 disables
    pub noise_amplitude: f32,
}

impl SimConfig {
    /// Rejects degenerate configurations up front so that per-tick code
    /// never has to defend against them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed > 0.) || !self.max_speed.is_finite() {
            return Err(ConfigError::MaxSpeed(self.max_speed));
        }

        for (name, value) in [
            ("sensing_radius", self.sensing_radius),
            ("separation_radius", self.separation_radius),
            ("wall_displacement", self.wall_displacement),
        ] {
            if !(value > 0.) || !value.is_finite() {
                return Err(ConfigError::Radius { name, value });
            }
        }

        for (name, value) in [
            ("cohesion_co", self.cohesion_co),
            ("separation_co", self.separation_co),
            ("alignment_co", self.alignment_co),
        ] {
            // an infinite divisor is a legitimate way of switching a rule off
            if !(value > 0.) {
                return Err(ConfigError::Coefficient { name, value });
            }
        }

        if self.noise_amplitude < 0. || !self.noise_amplitude.is_finite() {
            return Err(ConfigError::NoiseAmplitude(self.noise_amplitude));
        }

        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            num_boids: 150,
            sensing_radius: 120.,
            separation_radius: 30.,
            wall_displacement: 65.,
            max_speed: 5.,
            cohesion_co: 2000.,
            separation_co: 7.,
            alignment_co: 100.,
            noise_amplitude: 0.05,
        }
    }
}

/// Bounds and toggles of the hosting surface, read once per tick.
///
/// The bounds may change between ticks (e.g. on resize); wrap-around
/// pulls any boid left outside back into the new bounds. `debugging`
/// has no effect on the simulation, it only tells a renderer to
/// decorate the focus boid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub walls_enabled: bool,
    pub debugging: bool,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        World {
            width,
            height,
            walls_enabled: true,
            debugging: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.)
            || !(self.height > 0.)
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ConfigError::WorldBounds {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Sampling and CSV output options for the [`Birdwatcher`].
///
/// [`Birdwatcher`]: crate::birdwatcher::Birdwatcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOptions {
    /// sample every n-th tick
    pub sample_rate: u64,
    pub save_csv: bool,
    pub output_path: Option<String>,
    /// timestamp the file name instead of overwriting
    pub timestamp: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        RecordOptions {
            sample_rate: 1,
            save_csv: false,
            output_path: Some("./".to_owned()),
            timestamp: true,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_speed must be positive and finite, got {0}")]
    MaxSpeed(f32),
    #[error("{name} must be positive and finite, got {value}")]
    Radius { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    Coefficient { name: &'static str, value: f32 },
    #[error("noise_amplitude must not be negative, got {0}")]
    NoiseAmplitude(f32),
    #[error("world bounds must be positive, got {width}x{height}")]
    WorldBounds { width: f32, height: f32 },
    #[error("sample_rate must be at least 1")]
    SampleRate,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConfigError, SimConfig, World};

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[rstest]
    #[case(SimConfig { max_speed: 0., ..Default::default() })]
    #[case(SimConfig { max_speed: f32::NAN, ..Default::default() })]
    #[case(SimConfig { sensing_radius: -1., ..Default::default() })]
    #[case(SimConfig { separation_radius: 0., ..Default::default() })]
    #[case(SimConfig { wall_displacement: f32::INFINITY, ..Default::default() })]
    #[case(SimConfig { cohesion_co: 0., ..Default::default() })]
    #[case(SimConfig { alignment_co: -2., ..Default::default() })]
    #[case(SimConfig { noise_amplitude: -0.1, ..Default::default() })]
    fn degenerate_config_is_rejected(#[case] config: SimConfig) {
        assert!(config.validate().is_err());
    }

    #[test]
    fn infinite_coefficient_switches_a_rule_off() {
        let config = SimConfig {
            cohesion_co: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_area_world_is_rejected() {
        let world = World::new(0., 600.);
        assert_eq!(
            world.validate(),
            Err(ConfigError::WorldBounds {
                width: 0.,
                height: 600.
            })
        );
    }
}

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::boid::Boid;
use crate::config::{ConfigError, SimConfig, World};
use crate::math_helpers::distance_boid;

/// Owns the boid set and advances it one discrete tick at a time.
///
/// A tick reads the set as it stood when the tick started: steering
/// deltas are gathered for every boid first and applied afterwards, so
/// the iteration order never leaks into rule inputs. Noise comes from
/// a seedable RNG owned by the engine; amplitude 0 disables it, which
/// makes scenario tests fully deterministic.
pub struct FlockEngine {
    boids: Vec<Boid>,
    config: SimConfig,
    rng: Xoshiro256PlusPlus,
}

impl FlockEngine {
    /// Engine with a randomly seeded population and RNG.
    pub fn new(config: SimConfig, world: &World) -> Result<Self, ConfigError> {
        Self::build(config, world, Xoshiro256PlusPlus::from_entropy())
    }

    /// Engine with a fixed RNG seed; the same seed reproduces the run.
    pub fn with_seed(config: SimConfig, world: &World, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, world, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn build(
        config: SimConfig,
        world: &World,
        mut rng: Xoshiro256PlusPlus,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        world.validate()?;

        let boids = seed_boids(&config, world, &mut rng);

        Ok(FlockEngine { boids, config, rng })
    }

    /// Engine over a caller-supplied population, for scenario tests and
    /// replays. Ids must be distinct; the supplied population takes
    /// precedence over `config.num_boids`.
    pub fn from_boids(config: SimConfig, boids: Vec<Boid>) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(FlockEngine {
            boids,
            config,
            rng: Xoshiro256PlusPlus::seed_from_u64(0),
        })
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The boid a debugging renderer decorates with the sensing and
    /// separation radii. The simulation itself never treats it
    /// specially.
    pub fn focus_boid(&self) -> Option<&Boid> {
        self.boids.first()
    }

    /// Throws the current population away and seeds a fresh one.
    pub fn restart(&mut self, world: &World) {
        self.boids = seed_boids(&self.config, world, &mut self.rng);
    }

    /// Advances every boid by one frame of motion. The bounds may
    /// differ from the previous tick, e.g. after a resize; wrap-around
    /// pulls stragglers back in.
    pub fn tick(&mut self, world: &World) {
        let mut deltas: Vec<Vec2> = Vec::with_capacity(self.boids.len());
        let mut neighbours: Vec<&Boid> = Vec::new();

        // calculation loop, against the pre-tick state
        for boid in self.boids.iter() {
            neighbours.clear();
            neighbours_of(boid, &self.boids, self.config.sensing_radius, &mut neighbours);
            deltas.push(boid.run_rules(&neighbours, world, &self.config));
        }

        // update loop
        for (boid, delta) in self.boids.iter_mut().zip(deltas) {
            let noise = if self.config.noise_amplitude > 0. {
                Vec2::new(
                    self.rng
                        .gen_range(-self.config.noise_amplitude..self.config.noise_amplitude),
                    self.rng
                        .gen_range(-self.config.noise_amplitude..self.config.noise_amplitude),
                )
            } else {
                Vec2::ZERO
            };

            boid.update_location(delta, noise, world, &self.config);
        }
    }
}

/// Brute-force neighbour scan: every other boid strictly closer than
/// `sensing_radius` counts. Coincident boids (distance 0) are not
/// neighbours, which also keeps the separation rule clear of a
/// division by zero.
pub fn neighbours_of<'a>(
    boid: &Boid,
    all_boids: &'a [Boid],
    sensing_radius: f32,
    neighbours: &mut Vec<&'a Boid>,
) {
    for other in all_boids {
        if other.id == boid.id {
            continue;
        }

        let distance = distance_boid(boid, other);
        if distance > 0. && distance < sensing_radius {
            neighbours.push(other);
        }
    }
}

fn seed_boids(config: &SimConfig, world: &World, rng: &mut Xoshiro256PlusPlus) -> Vec<Boid> {
    (0..config.num_boids)
        .map(|id| {
            let x = rng.gen::<f32>() * world.width;
            let y = rng.gen::<f32>() * world.height;
            let vx = (rng.gen::<f32>() - 0.5) * config.max_speed;
            let vy = (rng.gen::<f32>() - 0.5) * config.max_speed;

            Boid::new(x, y, Vec2::new(vx, vy), id)
        })
        .collect()
}

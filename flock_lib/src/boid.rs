use glam::Vec2;

use crate::{
    config::{SimConfig, World},
    math_helpers::{distance_boid, wrap},
};

/// Divisor of the linear wall restoring force.
const WALL_PUSH_DIVISOR: f32 = 100.;

/// Display colour of a boid, rederived from the post-clamp speed every
/// tick. Purely presentational; no rule reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const WHITE: Colour = Colour {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Maps speed linearly onto a red-to-green gradient: stationary is
    /// pure red, `max_speed` pure green, blue stays off.
    pub fn from_speed(speed: f32, max_speed: f32) -> Self {
        let delta = (speed / max_speed).clamp(0., 1.) * 255.;
        Colour {
            r: (255. - delta) as u8,
            g: delta as u8,
            b: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Boid {
    /// sequential id starting from 0
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub colour: Colour,
}

impl Boid {
    /// Creates a new [`Boid`].
    pub fn new(x: f32, y: f32, velocity: Vec2, id: usize) -> Self {
        Boid {
            id,
            position: Vec2::new(x, y),
            velocity,
            colour: Colour::WHITE,
        }
    }

    /// Accumulates the steering contributions of all rules against the
    /// given neighbourhood and returns a velocity delta. The caller
    /// applies it together with noise once every boid has been
    /// evaluated, so rule inputs always see the pre-tick state.
    pub fn run_rules(&self, neighbours: &[&Boid], world: &World, config: &SimConfig) -> Vec2 {
        if neighbours.is_empty() {
            // everything, walls included, is gated behind neighbour presence
            return Vec2::ZERO;
        }

        let mut sum = Vec2::ZERO;

        sum += self.alignment(neighbours, config);
        sum += self.cohesion(neighbours, config);
        sum += self.separation(neighbours, config);

        if world.walls_enabled {
            sum += self.wall_avoidance(world, config);
        }

        sum
    }

    /// Steers a fraction `1/alignment_co` of the way towards the mean
    /// velocity of the neighbourhood.
    fn alignment(&self, neighbours: &[&Boid], config: &SimConfig) -> Vec2 {
        let mut mean = Vec2::ZERO;
        for other in neighbours {
            mean += other.velocity;
        }
        mean /= neighbours.len() as f32;

        (mean - self.velocity) / config.alignment_co
    }

    /// Steers a fraction `1/cohesion_co` of the way towards the mean
    /// position of the neighbourhood.
    fn cohesion(&self, neighbours: &[&Boid], config: &SimConfig) -> Vec2 {
        let mut centre = Vec2::ZERO;
        for other in neighbours {
            centre += other.position;
        }
        centre /= neighbours.len() as f32;

        (centre - self.position) / config.cohesion_co
    }

    /// For every neighbour closer than the separation radius,
    /// accumulates the unit vector pointing away from it scaled by the
    /// inverse distance, then averages over those neighbours and scales
    /// by `1/separation_co`.
    fn separation(&self, neighbours: &[&Boid], config: &SimConfig) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in neighbours {
            let distance = distance_boid(self, other);
            if distance < config.separation_radius {
                // distance > 0 holds for any neighbour, see neighbours_of
                sum += (self.position - other.position).normalize() / distance;
                count += 1;
            }
        }

        if count > 0 {
            sum / (count as f32 * config.separation_co)
        } else {
            Vec2::ZERO
        }
    }

    /// Linear restoring push away from any edge closer than
    /// `wall_displacement`, proportional to the penetration depth. Both
    /// axes are evaluated independently; a boid in a corner is pushed
    /// on both.
    fn wall_avoidance(&self, world: &World, config: &SimConfig) -> Vec2 {
        let mut push = Vec2::ZERO;

        if self.position.x < config.wall_displacement {
            push.x += (config.wall_displacement - self.position.x) / WALL_PUSH_DIVISOR;
        } else if self.position.x > world.width - config.wall_displacement {
            push.x -=
                (self.position.x - (world.width - config.wall_displacement)) / WALL_PUSH_DIVISOR;
        }

        if self.position.y < config.wall_displacement {
            push.y += (config.wall_displacement - self.position.y) / WALL_PUSH_DIVISOR;
        } else if self.position.y > world.height - config.wall_displacement {
            push.y -=
                (self.position.y - (world.height - config.wall_displacement)) / WALL_PUSH_DIVISOR;
        }

        push
    }

    /// Applies the accumulated steering delta plus noise, clamps the
    /// speed by rescaling (direction preserved), rederives the colour
    /// from the clamped speed and advances the position with
    /// wrap-around at the bounds.
    pub fn update_location(&mut self, delta: Vec2, noise: Vec2, world: &World, config: &SimConfig) {
        self.velocity += delta + noise;
        self.velocity = self.velocity.clamp_length_max(config.max_speed);

        self.colour = Colour::from_speed(self.velocity.length(), config.max_speed);

        self.position += self.velocity;
        self.position.x = wrap(self.position.x, world.width);
        self.position.y = wrap(self.position.y, world.height);
    }
}

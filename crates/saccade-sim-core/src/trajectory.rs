use rand::Rng;

use crate::bounds::Bounds;
use crate::config::SimConfig;
use crate::constraint::{clamp_position, clamp_velocity};

/// One epoch of continuous object motion: a sampled length and a velocity
/// that is guaranteed to keep the final position inside the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    /// Number of ticks the epoch lasts.
    pub len: usize,
    /// Per-tick object velocity, fixed for the whole epoch.
    pub vel: [f32; 2],
}

impl Trajectory {
    /// Sample the next motion epoch. The start position is carried over
    /// from the previous epoch; only length and velocity are drawn fresh.
    pub fn generate<R: Rng>(
        rng: &mut R,
        config: &SimConfig,
        world: Bounds,
        start: [f32; 2],
    ) -> Self {
        let len = config.traj_len_range.sample(rng);
        let mut vel = [0.0f32; 2];
        if !rng.random_bool(config.zero_vel_prob) {
            for (axis, v) in vel.iter_mut().enumerate() {
                let candidate = -config.max_obj_vel + 2.0 * rng.random::<f32>() * config.max_obj_vel;
                let anchor = clamp_position(start[axis], world.max);
                *v = clamp_velocity(candidate, anchor, len, world);
            }
        }
        Self { len, vel }
    }
}

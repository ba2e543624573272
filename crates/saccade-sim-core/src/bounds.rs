use serde::{Deserialize, Serialize};

use crate::constants::WORLD_HALF_EXTENT;

/// Closed scalar range, applied per axis to positions in the square world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Absolute position limits: the normalized world minus its safety margin.
    pub fn world(margin: f32) -> Self {
        Self {
            min: -WORLD_HALF_EXTENT + margin,
            max: WORLD_HALF_EXTENT - margin,
        }
    }

    /// Object-relative-to-eye limits: a fraction of the world minus the margin.
    pub fn view(view_fraction: f32, margin: f32) -> Self {
        Self {
            min: -view_fraction + margin,
            max: view_fraction - margin,
        }
    }

    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

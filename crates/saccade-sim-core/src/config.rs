use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;

/// Inclusive range of tick counts for sampling epoch lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub min: usize,
    pub max: usize,
}

impl TickRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(self.min..=self.max)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible runs.
    pub seed: u64,
    /// Range of trajectory lengths, in ticks.
    pub traj_len_range: TickRange,
    /// Range of fixation durations, in ticks.
    pub fix_dur_range: TickRange,
    /// Maximum saccade magnitude per axis.
    pub max_saccade: f32,
    /// Maximum object velocity per axis.
    pub max_obj_vel: f32,
    /// Probability of a zero-velocity trajectory, decided before the
    /// velocity itself is drawn. 1.0 recovers the stationary-object setup.
    pub zero_vel_prob: f64,
    /// Edge around the normalized world the eye must not look past.
    pub margin: f32,
    /// Size of the view window as a proportion of the world.
    pub view_fraction: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            traj_len_range: TickRange::new(8, 8),
            fix_dur_range: TickRange::new(2, 2),
            max_saccade: 0.4,
            max_obj_vel: 0.4,
            zero_vel_prob: 0.0,
            margin: 0.1,
            view_fraction: 0.5,
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    InvalidTrajLenRange => "traj_len_range must satisfy 1 <= min <= max";
    InvalidFixDurRange => "fix_dur_range must satisfy 1 <= min <= max";
    InvalidMaxSaccade => "max_saccade must be positive and finite";
    InvalidMaxObjVel => "max_obj_vel must be non-negative and finite";
    InvalidZeroVelProb => "zero_vel_prob must be finite and within [0,1]";
    InvalidMargin => "margin must be finite, non-negative, and leave a non-empty world";
    InvalidViewFraction => "view_fraction must be finite and within (0,1)";
    ViewNotInsideWorld => "view window must be non-empty and strictly smaller than the world";
}

impl std::error::Error for SimConfigError {}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_epochs()?;
        self.validate_motion()?;
        self.validate_geometry()?;
        Ok(())
    }

    fn validate_epochs(&self) -> Result<(), SimConfigError> {
        if self.traj_len_range.min < 1 || self.traj_len_range.min > self.traj_len_range.max {
            return Err(SimConfigError::InvalidTrajLenRange);
        }
        if self.fix_dur_range.min < 1 || self.fix_dur_range.min > self.fix_dur_range.max {
            return Err(SimConfigError::InvalidFixDurRange);
        }
        Ok(())
    }

    fn validate_motion(&self) -> Result<(), SimConfigError> {
        if !(self.max_saccade.is_finite() && self.max_saccade > 0.0) {
            return Err(SimConfigError::InvalidMaxSaccade);
        }
        if !(self.max_obj_vel.is_finite() && self.max_obj_vel >= 0.0) {
            return Err(SimConfigError::InvalidMaxObjVel);
        }
        if !(self.zero_vel_prob.is_finite() && (0.0..=1.0).contains(&self.zero_vel_prob)) {
            return Err(SimConfigError::InvalidZeroVelProb);
        }
        Ok(())
    }

    fn validate_geometry(&self) -> Result<(), SimConfigError> {
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(SimConfigError::InvalidMargin);
        }
        if self.world_bounds().range() <= 0.0 {
            return Err(SimConfigError::InvalidMargin);
        }
        if !(self.view_fraction.is_finite() && self.view_fraction > 0.0 && self.view_fraction < 1.0)
        {
            return Err(SimConfigError::InvalidViewFraction);
        }
        // non-empty view also guarantees the eye always has a valid position
        // from which the current object is visible
        if self.view_bounds().range() <= 0.0 {
            return Err(SimConfigError::ViewNotInsideWorld);
        }
        Ok(())
    }

    /// Absolute eye/object position limits derived from the margin.
    pub fn world_bounds(&self) -> Bounds {
        Bounds::world(self.margin)
    }

    /// Object-relative-to-eye visibility limits.
    pub fn view_bounds(&self) -> Bounds {
        Bounds::view(self.view_fraction, self.margin)
    }
}

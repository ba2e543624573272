pub mod bounds;
pub mod config;
pub mod constants;
pub mod constraint;
pub mod counter;
pub mod fixation;
pub mod record;
pub mod rng;
pub mod scene;
pub mod trajectory;

pub use config::{SimConfig, SimConfigError, TickRange};
pub use record::{RunStats, TickRecord, collect_run_stats};
pub use scene::Scene;

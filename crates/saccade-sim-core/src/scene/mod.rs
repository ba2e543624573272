use rand_chacha::ChaCha12Rng;

use crate::bounds::Bounds;
use crate::config::{SimConfig, SimConfigError};
use crate::counter::Counter;
use crate::fixation::Fixation;
use crate::record::TickRecord;
use crate::rng;
use crate::trajectory::Trajectory;

/// Generator of object-tracking gaze sequences.
///
/// Owns the object and eye state plus the RNG stream and advances one tick
/// per [`Scene::step`] call. Trajectories and saccades are always computed
/// one epoch ahead: at the start of `step`, the `*_next` fields hold what
/// will become the current values by the end of the call, so saccade
/// planning can see the motion it must keep in view.
pub struct Scene {
    config: SimConfig,
    world: Bounds,
    view: Bounds,
    rng: ChaCha12Rng,

    /// Tick counter within the current trajectory.
    tick: Counter,
    /// Tick counter within the current fixation.
    fix_tick: Counter,
    /// Length of the upcoming trajectory, adopted when `tick` wraps.
    traj_len: usize,
    /// Duration of the upcoming fixation, adopted when `fix_tick` wraps.
    fix_dur: usize,

    obj_pos: [f32; 2],
    obj_view_pos: [f32; 2],
    obj_vel: [f32; 2],
    obj_pos_next: [f32; 2],
    obj_vel_next: [f32; 2],
    eye_pos: [f32; 2],
    sac_plan: [f32; 2],
    saccade: [f32; 2],
    new_traj: bool,
    new_sac: bool,
}

impl Scene {
    /// Build a generator from a validated configuration, seeded from
    /// `config.seed`.
    pub fn new(config: SimConfig) -> Result<Self, SimConfigError> {
        let rng = rng::create_rng(config.seed);
        Self::with_rng(config, rng)
    }

    /// Build one of several independent generators sharing a base seed.
    /// Each episode index yields its own RNG stream, so episodes can run
    /// on separate workers without coordination.
    pub fn for_episode(config: SimConfig, episode: usize) -> Result<Self, SimConfigError> {
        let rng = rng::derive_episode_rng(config.seed, episode);
        Self::with_rng(config, rng)
    }

    fn with_rng(config: SimConfig, rng: ChaCha12Rng) -> Result<Self, SimConfigError> {
        config.validate()?;
        let mut scene = Self {
            world: config.world_bounds(),
            view: config.view_bounds(),
            config,
            rng,
            tick: Counter::starting_at(-1),
            fix_tick: Counter::starting_at(-1),
            traj_len: 0,
            fix_dur: 0,
            obj_pos: [0.0; 2],
            obj_view_pos: [0.0; 2],
            obj_vel: [0.0; 2],
            obj_pos_next: [0.0; 2],
            obj_vel_next: [0.0; 2],
            eye_pos: [0.0; 2],
            sac_plan: [0.0; 2],
            saccade: [0.0; 2],
            new_traj: false,
            new_sac: false,
        };
        // first trajectory and saccade plan must be ready before the first
        // step, which then adopts both
        scene.next_traj();
        Ok(scene)
    }

    /// Advance the scene by one tick and return the emitted record.
    ///
    /// Never fails: the constraint solver keeps every committed position
    /// inside its bounds, so the engine is a closed numeric system.
    pub fn step(&mut self) -> TickRecord {
        self.new_traj = self.tick.incr();
        self.new_sac = self.fix_tick.incr();

        if self.new_traj {
            // adopt the epoch computed by the previous round's look-ahead
            self.tick.max = self.traj_len as i64;
            self.obj_vel = self.obj_vel_next;
        }

        if self.new_sac {
            self.do_saccade();
            self.fix_tick.max = self.fix_dur as i64;
        } else {
            self.saccade = [0.0; 2];
        }

        // commit the position computed last round, then derive the
        // view-relative coordinate
        self.obj_pos = self.obj_pos_next;
        self.obj_view_pos = [
            self.obj_pos[0] - self.eye_pos[0],
            self.obj_pos[1] - self.eye_pos[1],
        ];

        // look ahead: prepare the next epoch before its first tick
        if self.tick.cur + 1 >= self.tick.max {
            self.next_traj();
        } else {
            self.obj_pos_next = [
                self.obj_pos[0] + self.obj_vel[0],
                self.obj_pos[1] + self.obj_vel[1],
            ];
            if self.fix_tick.cur + 1 >= self.fix_tick.max {
                self.next_saccade();
            }
        }

        self.record()
    }

    /// Step `ticks` times, collecting every record.
    pub fn run_ticks(&mut self, ticks: usize) -> Vec<TickRecord> {
        (0..ticks).map(|_| self.step()).collect()
    }

    fn next_traj(&mut self) {
        let traj = Trajectory::generate(&mut self.rng, &self.config, self.world, self.obj_pos_next);
        self.traj_len = traj.len;
        self.obj_vel_next = traj.vel;
        // a new object always gets an immediate saccade, so the upcoming
        // fixation starts with it in view
        self.next_saccade();
        self.fix_tick.force_wrap_next();
    }

    fn next_saccade(&mut self) {
        let fix = Fixation::plan(
            &mut self.rng,
            &self.config,
            self.eye_pos,
            self.obj_pos_next,
            self.obj_vel_next,
            self.world,
            self.view,
        );
        self.fix_dur = fix.dur;
        self.sac_plan = fix.plan;
    }

    fn do_saccade(&mut self) {
        self.eye_pos[0] += self.sac_plan[0];
        self.eye_pos[1] += self.sac_plan[1];
        self.saccade = self.sac_plan;
        self.sac_plan = [0.0; 2];
    }

    fn record(&self) -> TickRecord {
        TickRecord {
            tick: self.tick.cur,
            fix_tick: self.fix_tick.cur,
            obj_pos: self.obj_pos,
            obj_view_pos: self.obj_view_pos,
            obj_vel: self.obj_vel,
            obj_pos_next: self.obj_pos_next,
            eye_pos: self.eye_pos,
            sac_plan: self.sac_plan,
            saccade: self.saccade,
            new_traj: self.new_traj,
            new_sac: self.new_sac,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Length of the trajectory prepared for the next epoch.
    pub fn traj_len(&self) -> usize {
        self.traj_len
    }

    /// Duration of the fixation prepared for the next epoch.
    pub fn fix_dur(&self) -> usize {
        self.fix_dur
    }

    pub fn world_bounds(&self) -> Bounds {
        self.world
    }

    pub fn view_bounds(&self) -> Bounds {
        self.view
    }
}

#[cfg(test)]
mod tests;

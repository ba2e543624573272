use rand::Rng;

use crate::bounds::Bounds;
use crate::config::SimConfig;
use crate::constraint::clamp_saccade;

/// One eye-dwell epoch: the saccade that opens it and how long it holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fixation {
    /// Number of ticks the eye dwells before the next saccade.
    pub dur: usize,
    /// Eye displacement to execute when the previous fixation ends.
    pub plan: [f32; 2],
}

impl Fixation {
    /// Plan the next fixation. The clamp sees the upcoming epoch's object
    /// position and velocity, so the object stays visible both when the
    /// fixation starts and, best-effort, through its projected end.
    pub fn plan<R: Rng>(
        rng: &mut R,
        config: &SimConfig,
        eye_pos: [f32; 2],
        obj_pos_next: [f32; 2],
        obj_vel_next: [f32; 2],
        world: Bounds,
        view: Bounds,
    ) -> Self {
        let dur = config.fix_dur_range.sample(rng);
        let mut plan = [0.0f32; 2];
        for (axis, p) in plan.iter_mut().enumerate() {
            let candidate = -config.max_saccade + 2.0 * rng.random::<f32>() * config.max_saccade;
            *p = clamp_saccade(
                candidate,
                eye_pos[axis],
                obj_pos_next[axis],
                obj_vel_next[axis],
                dur,
                world,
                view,
            );
        }
        Self { dur, plan }
    }
}

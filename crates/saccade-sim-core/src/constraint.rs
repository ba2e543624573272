//! Pure 1-D constraint solvers for object velocity and saccade planning.
//!
//! All functions are total over finite inputs and applied once per axis.
//! `clamp_saccade` composes four corrective passes in a fixed order; the
//! order is a priority policy: world containment of the eye outranks
//! containment of the current object position, which outranks containment
//! of the projected end-of-fixation position.

use crate::bounds::Bounds;

/// Rescale a candidate velocity so that `start + vel * remaining_ticks`
/// lands exactly on the violated world edge. With `remaining_ticks == 0`
/// there is nothing to project and the candidate is returned unchanged.
///
/// Only the final tick is constrained; a large velocity may still overshoot
/// on intermediate ticks.
pub fn clamp_velocity(vel: f32, start: f32, remaining_ticks: usize, world: Bounds) -> f32 {
    if remaining_ticks == 0 {
        return vel;
    }
    let ticks = remaining_ticks as f32;
    let end = start + vel * ticks;
    if end > world.max {
        (world.max - start) / ticks
    } else if end < world.min {
        (world.min - start) / ticks
    } else {
        vel
    }
}

/// Saturate a position to `[-limit, limit]`. Defensive only; the step
/// engine never produces out-of-range positions on its own.
pub fn clamp_position(pos: f32, limit: f32) -> f32 {
    pos.clamp(-limit, limit)
}

/// Shift `dev` by exactly the overshoot so that `target` lands on the
/// nearest edge of the view window around the candidate eye position
/// `eye_start + dev`. No-op when the target is already visible.
pub fn shift_target_into_view(dev: f32, eye_start: f32, target: f32, view: Bounds) -> f32 {
    let eye = eye_start + dev;
    let low = eye + view.min;
    let high = eye + view.max;
    if target < low {
        dev + (target - low)
    } else if target > high {
        dev + (target - high)
    } else {
        dev
    }
}

/// Shift `dev` so the candidate eye position `eye_start + dev` lands on the
/// nearest world edge when it would fall outside. No-op when already inside.
pub fn shift_eye_into_world(dev: f32, eye_start: f32, world: Bounds) -> f32 {
    let eye = eye_start + dev;
    if eye < world.min {
        dev + (world.min - eye)
    } else if eye > world.max {
        dev + (world.max - eye)
    } else {
        dev
    }
}

/// Clamp a candidate saccade displacement so the eye stays in the world and
/// the tracked object stays visible.
///
/// Passes, in order:
/// 1. keep the object's projected end-of-fixation position in view;
/// 2. keep the eye inside the world (may partially undo pass 1);
/// 3. keep the object's current position in view, protecting the start of
///    the upcoming fixation;
/// 4. re-clamp the eye, since pass 3 can reintroduce a world violation.
///
/// Post-conditions: the eye lands inside the world and the current object
/// position is inside the resulting view window. End-of-fixation visibility
/// is best-effort: it is corrected first but can be traded away by the
/// later passes.
pub fn clamp_saccade(
    dev: f32,
    eye_start: f32,
    obj_pos: f32,
    obj_vel: f32,
    ticks_ahead: usize,
    world: Bounds,
    view: Bounds,
) -> f32 {
    let obj_end = obj_pos + obj_vel * ticks_ahead as f32;
    let dev = shift_target_into_view(dev, eye_start, obj_end, view);
    let dev = shift_eye_into_world(dev, eye_start, world);
    let dev = shift_target_into_view(dev, eye_start, obj_pos, view);
    shift_eye_into_world(dev, eye_start, world)
}

use super::*;
use crate::config::TickRange;
use crate::record::collect_run_stats;

const TOL: f32 = 1e-4;

fn make_config() -> SimConfig {
    SimConfig::default()
}

fn make_scene(config: SimConfig) -> Scene {
    Scene::new(config).expect("test config should be valid")
}

#[test]
fn first_step_starts_trajectory_and_executes_saccade() {
    let mut scene = make_scene(make_config());
    let rec = scene.step();
    assert_eq!(rec.tick, 0);
    assert_eq!(rec.fix_tick, 0);
    assert!(rec.new_traj);
    assert!(rec.new_sac);
}

#[test]
fn eye_never_leaves_world_bounds() {
    for seed in 0..5 {
        let config = SimConfig {
            seed,
            ..make_config()
        };
        let world = config.world_bounds();
        let mut scene = make_scene(config);
        for rec in scene.run_ticks(1000) {
            for axis in 0..2 {
                assert!(
                    rec.eye_pos[axis] >= world.min - TOL && rec.eye_pos[axis] <= world.max + TOL,
                    "seed {seed}: eye {:?} outside world at tick {}",
                    rec.eye_pos,
                    rec.tick
                );
            }
        }
    }
}

#[test]
fn object_visible_after_every_saccade() {
    for seed in 0..5 {
        let config = SimConfig {
            seed,
            ..make_config()
        };
        let view = config.view_bounds();
        let mut scene = make_scene(config);
        for rec in scene.run_ticks(1000) {
            if !rec.new_sac {
                continue;
            }
            for axis in 0..2 {
                assert!(
                    rec.obj_view_pos[axis] >= view.min - TOL
                        && rec.obj_view_pos[axis] <= view.max + TOL,
                    "seed {seed}: object at {:?} left view after saccade",
                    rec.obj_view_pos
                );
            }
        }
    }
}

#[test]
fn view_position_is_object_minus_eye() {
    let mut scene = make_scene(make_config());
    for rec in scene.run_ticks(200) {
        assert_eq!(rec.obj_view_pos[0], rec.obj_pos[0] - rec.eye_pos[0]);
        assert_eq!(rec.obj_view_pos[1], rec.obj_pos[1] - rec.eye_pos[1]);
    }
}

#[test]
fn same_seed_reproduces_identical_records() {
    let config = make_config();
    let a = make_scene(config.clone()).run_ticks(300);
    let b = make_scene(config).run_ticks(300);
    assert_eq!(a, b);
}

#[test]
fn episode_streams_are_independent() {
    let config = make_config();
    let a = Scene::for_episode(config.clone(), 0)
        .expect("valid config")
        .run_ticks(100);
    let b = Scene::for_episode(config, 1)
        .expect("valid config")
        .run_ticks(100);
    assert_ne!(a, b);
}

#[test]
fn trajectory_gaps_match_sampled_lengths() {
    let config = SimConfig {
        traj_len_range: TickRange::new(3, 6),
        ..make_config()
    };
    let mut scene = make_scene(config);
    let records = scene.run_ticks(600);
    let starts: Vec<i64> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.new_traj)
        .map(|(i, _)| i as i64)
        .collect();
    assert!(starts.len() > 2);
    assert_eq!(starts[0], 0);
    for pair in starts.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((3..=6).contains(&gap), "trajectory gap {gap} out of range");
    }
}

#[test]
fn fixation_gaps_match_sampled_durations_within_a_trajectory() {
    // one long trajectory so no trajectory boundary forces an early saccade
    let config = SimConfig {
        traj_len_range: TickRange::new(256, 256),
        fix_dur_range: TickRange::new(2, 4),
        ..make_config()
    };
    let mut scene = make_scene(config);
    let records = scene.run_ticks(200);
    let sac_ticks: Vec<i64> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.new_sac)
        .map(|(i, _)| i as i64)
        .collect();
    assert!(sac_ticks.len() > 10);
    for pair in sac_ticks.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((2..=4).contains(&gap), "fixation gap {gap} out of range");
    }
}

#[test]
fn new_trajectory_always_executes_a_saccade() {
    let config = SimConfig {
        traj_len_range: TickRange::new(5, 9),
        fix_dur_range: TickRange::new(2, 4),
        ..make_config()
    };
    let mut scene = make_scene(config);
    for rec in scene.run_ticks(500) {
        if rec.new_traj {
            assert!(rec.new_sac, "trajectory start at tick {} without saccade", rec.tick);
        }
    }
}

#[test]
fn executed_saccade_matches_previous_plan() {
    let config = SimConfig {
        fix_dur_range: TickRange::new(3, 3),
        ..make_config()
    };
    let mut scene = make_scene(config);
    let records = scene.run_ticks(200);
    for i in 1..records.len() {
        if records[i].new_sac {
            assert_eq!(records[i].saccade, records[i - 1].sac_plan);
        } else {
            assert_eq!(records[i].saccade, [0.0, 0.0]);
        }
    }
}

#[test]
fn plan_is_zeroed_once_executed() {
    // with 3-tick fixations the look-ahead never replans on a saccade tick,
    // so the emitted plan must be zero right after execution
    let config = SimConfig {
        traj_len_range: TickRange::new(256, 256),
        fix_dur_range: TickRange::new(3, 3),
        ..make_config()
    };
    let mut scene = make_scene(config);
    for rec in scene.run_ticks(200) {
        if rec.new_sac && !rec.new_traj && rec.tick > 0 {
            assert_eq!(rec.sac_plan, [0.0, 0.0]);
        }
    }
}

#[test]
fn certain_zero_velocity_freezes_object() {
    let config = SimConfig {
        zero_vel_prob: 1.0,
        ..make_config()
    };
    let mut scene = make_scene(config);
    for rec in scene.run_ticks(400) {
        assert_eq!(rec.obj_vel, [0.0, 0.0]);
        assert_eq!(rec.obj_pos, [0.0, 0.0]);
    }
}

#[test]
fn sixteen_tick_reference_scenario() {
    // stationary object, 8-tick trajectories, 2-tick fixations: two
    // trajectory starts, a saccade every other tick, eye inside the
    // margin-reduced world throughout
    let config = SimConfig {
        seed: 42,
        traj_len_range: TickRange::new(8, 8),
        fix_dur_range: TickRange::new(2, 2),
        max_saccade: 0.4,
        max_obj_vel: 0.0,
        zero_vel_prob: 0.0,
        margin: 0.1,
        view_fraction: 0.5,
    };
    let mut scene = make_scene(config);
    let records = scene.run_ticks(16);

    let traj_starts: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.new_traj)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(traj_starts, vec![0, 8]);

    let sac_ticks: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.new_sac)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(sac_ticks, vec![0, 2, 4, 6, 8, 10, 12, 14]);

    for rec in &records {
        for axis in 0..2 {
            assert!(rec.eye_pos[axis] >= -0.9 - TOL && rec.eye_pos[axis] <= 0.9 + TOL);
        }
    }
}

#[test]
fn counters_track_position_within_epochs() {
    let config = SimConfig {
        traj_len_range: TickRange::new(8, 8),
        fix_dur_range: TickRange::new(2, 2),
        ..make_config()
    };
    let mut scene = make_scene(config);
    let records = scene.run_ticks(16);
    for (i, rec) in records.iter().enumerate() {
        assert_eq!(rec.tick, (i % 8) as i64);
        assert_eq!(rec.fix_tick, (i % 2) as i64);
    }
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = SimConfig {
        view_fraction: 1.5,
        ..make_config()
    };
    assert!(matches!(
        Scene::new(config),
        Err(SimConfigError::InvalidViewFraction)
    ));
}

#[test]
fn run_stats_agree_with_records() {
    let mut scene = make_scene(make_config());
    let records = scene.run_ticks(128);
    let stats = collect_run_stats(&records);
    assert_eq!(stats.ticks, 128);
    assert_eq!(
        stats.trajectories,
        records.iter().filter(|r| r.new_traj).count()
    );
    assert_eq!(stats.saccades, records.iter().filter(|r| r.new_sac).count());
    assert!(stats.max_abs_eye[0] <= 0.9 + TOL);
    assert!(stats.max_abs_eye[1] <= 0.9 + TOL);
}

#[test]
fn moving_object_stays_in_world_at_trajectory_ends() {
    // velocity clamping anchors the final position of each trajectory
    let config = SimConfig {
        max_obj_vel: 0.8,
        ..make_config()
    };
    let world = config.world_bounds();
    let mut scene = make_scene(config);
    let records = scene.run_ticks(1000);
    for i in 1..records.len() {
        if records[i].new_traj {
            // last tick of the previous trajectory
            for axis in 0..2 {
                let p = records[i - 1].obj_pos[axis];
                assert!(p >= world.min - TOL && p <= world.max + TOL);
            }
        }
    }
}

//! Move-validation latency benchmarks.
//!
//! `check_move` sits on the planning hot path; these benches cover the XY
//! fast path, the derated Z path, and the rejection path.

use criterion::{Criterion, criterion_group, criterion_main};
use gantry_common::axis::{AxisMask, Coord};
use gantry_kinematics::CartesianKinematics;
use gantry_kinematics::config::GantryConfig;
use gantry_kinematics::motion::Move;
use gantry_kinematics::pipeline::{MaxRates, MotionPipeline, QueueHandle};
use gantry_kinematics::rail::Stepper;
use std::hint::black_box;

struct NullPipeline;

impl MotionPipeline for NullPipeline {
    fn max_rates(&self) -> MaxRates {
        MaxRates {
            velocity: 500.0,
            accel: 3000.0,
        }
    }

    fn trajectory_queue(&self) -> QueueHandle {
        QueueHandle::new(0)
    }

    fn register_step_generator(&mut self, _stepper: &Stepper) {}

    fn flush_step_generation(&mut self) {}

    fn position(&self) -> Coord {
        [0.0; 3]
    }

    fn set_position(&mut self, _position: Coord) {}
}

fn homed_kinematics() -> CartesianKinematics {
    let config: GantryConfig = toml::from_str(
        r#"
max_z_velocity = 25.0
max_z_accel = 300.0

[rail.x]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0

[rail.y]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0

[rail.z]
position_min = 0.0
position_max = 150.0
position_endstop = 0.0
"#,
    )
    .expect("parse config");
    let mut pipeline = NullPipeline;
    let mut kin = CartesianKinematics::new(&config, &mut pipeline).expect("construct");
    kin.set_position([0.0; 3], AxisMask::XYZ);
    kin
}

fn bench_xy_fast_path(c: &mut Criterion) {
    let kin = homed_kinematics();
    c.bench_function("check_move_xy_fast_path", |b| {
        b.iter(|| {
            let mut mv = Move::new([0.0; 3], black_box([100.0, 100.0, 0.0]), 300.0, 3000.0);
            kin.check_move(&mut mv).unwrap();
            mv
        });
    });
}

fn bench_z_derate(c: &mut Criterion) {
    let kin = homed_kinematics();
    c.bench_function("check_move_z_derate", |b| {
        b.iter(|| {
            let mut mv = Move::new([0.0; 3], black_box([150.0, 0.0, 150.0]), 300.0, 3000.0);
            kin.check_move(&mut mv).unwrap();
            mv
        });
    });
}

fn bench_rejection(c: &mut Criterion) {
    let kin = homed_kinematics();
    c.bench_function("check_move_out_of_range", |b| {
        b.iter(|| {
            let mut mv = Move::new([0.0; 3], black_box([250.0, 100.0, 0.0]), 300.0, 3000.0);
            kin.check_move(&mut mv).unwrap_err()
        });
    });
}

criterion_group!(benches, bench_xy_fast_path, bench_z_derate, bench_rejection);
criterion_main!(benches);

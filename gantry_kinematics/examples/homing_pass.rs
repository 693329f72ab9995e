//! End-to-end demo: construct the kinematics from a config, run a homing
//! pass with a scripted controller, validate a few moves, and switch the
//! dual carriage.
//!
//! Run with `RUST_LOG=debug cargo run --example homing_pass` to watch the
//! sequencing.

use gantry_common::axis::{Axis, Coord};
use gantry_kinematics::config::GantryConfig;
use gantry_kinematics::homing::AxisTargets;
use gantry_kinematics::motion::Move;
use gantry_kinematics::pipeline::{
    HomingController, MaxRates, MotionPipeline, QueueHandle,
};
use gantry_kinematics::rail::{Rail, Stepper};
use gantry_kinematics::{CartesianKinematics, ProbeError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
max_z_velocity = 25.0
max_z_accel = 300.0

[rail.x]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0
homing_speed = 40.0

[rail.y]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0
homing_speed = 40.0

[rail.z]
position_min = 0.0
position_max = 150.0
position_endstop = 0.0

[dual_carriage]
axis = "x"
position_min = 0.0
position_max = 200.0
position_endstop = 200.0
"#;

/// Stand-in pipeline: fixed maxima, one queue, a position cell.
struct DemoPipeline {
    position: Coord,
}

impl MotionPipeline for DemoPipeline {
    fn max_rates(&self) -> MaxRates {
        MaxRates {
            velocity: 500.0,
            accel: 3000.0,
        }
    }

    fn trajectory_queue(&self) -> QueueHandle {
        QueueHandle::new(0)
    }

    fn register_step_generator(&mut self, stepper: &Stepper) {
        println!("registered {}", stepper.name());
    }

    fn flush_step_generation(&mut self) {}

    fn position(&self) -> Coord {
        self.position
    }

    fn set_position(&mut self, position: Coord) {
        self.position = position;
    }
}

/// Controller that pretends every probe succeeds immediately.
struct DemoController;

impl HomingController for DemoController {
    fn home_rails(
        &mut self,
        rails: &[&Rail],
        forcepos: AxisTargets,
        homepos: AxisTargets,
    ) -> Result<(), ProbeError> {
        for rail in rails {
            println!(
                "probing rail '{}' at {} mm/s ({forcepos:?} -> {homepos:?})",
                rail.name(),
                rail.homing().speed
            );
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let config: GantryConfig = toml::from_str(CONFIG)?;
    config.validate()?;

    let mut pipeline = DemoPipeline { position: [0.0; 3] };
    let mut controller = DemoController;
    let mut kin = CartesianKinematics::new(&config, &mut pipeline)?;

    println!("\n-- homing all axes --");
    kin.home(&mut pipeline, &mut controller, &[Axis::X, Axis::Y, Axis::Z])?;
    println!("homed: '{}'", kin.status().homed_axes);

    println!("\n-- validating moves --");
    let mut mv = Move::new([0.0; 3], [100.0, 100.0, 0.0], 300.0, 3000.0);
    kin.check_move(&mut mv)?;
    println!("xy move ok, ceilings {:.1} mm/s / {:.0} mm/s^2", mv.velocity(), mv.accel());

    let mut mv = Move::new([0.0; 3], [150.0, 0.0, 150.0], 300.0, 3000.0);
    kin.check_move(&mut mv)?;
    println!("xz diagonal derated to {:.2} mm/s", mv.velocity());

    let mut mv = Move::new([0.0; 3], [250.0, 100.0, 0.0], 300.0, 3000.0);
    match kin.check_move(&mut mv) {
        Err(err) => println!("rejected as expected: {err}"),
        Ok(()) => println!("unexpectedly accepted"),
    }

    println!("\n-- switching carriages --");
    kin.set_active_carriage(&mut pipeline, 1)?;
    println!(
        "carriage 1 active, x travel now {:?}, position {:?}",
        kin.limits().get(Axis::X).bounds(),
        pipeline.position
    );
    kin.set_active_carriage(&mut pipeline, 0)?;
    println!(
        "carriage 0 restored, x travel {:?}, position {:?}",
        kin.limits().get(Axis::X).bounds(),
        pipeline.position
    );

    Ok(())
}

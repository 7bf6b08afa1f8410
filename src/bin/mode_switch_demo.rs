//! Runs a robot through exploration and manipulation modes.

use robot_idioms::{ExplorationMode, ManipulationMode, Robot, telemetry};

fn main() {
    telemetry::init();

    let mut robot = Robot::new(ExplorationMode::new(1.0, 0.5));
    println!("{}", robot.operate());

    robot.switch_mode(ManipulationMode::new(2.5, 0.8));
    println!(">>> Switched robot mode!");
    println!("{}", robot.operate());

    robot.switch_mode(ExplorationMode::new(3.0, 1.0));
    println!(">>> Switched robot mode!");
    println!("{}", robot.operate());
}

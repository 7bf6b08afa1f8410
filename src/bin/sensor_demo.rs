//! Reads each sensor through the common driver interface, then swaps a rig's sensor.

use robot_idioms::{Camera, Imu, Sensor, SensorDriver, SensorRig, Sonar, telemetry};

fn main() {
    telemetry::init();

    let sensors: [Sensor; 3] = [
        Camera::default().into(),
        Imu::default().into(),
        Sonar::default().into(),
    ];
    for sensor in &sensors {
        let reading = sensor.read_data();
        println!("{reading}  {:?}", reading.payload);
    }

    println!("computing : {}", sensors[2].compute(10, 20));

    let mut rig = SensorRig::new(Camera::default());
    println!("{}", rig.read());
    rig.mount(Imu::default());
    println!("{}", rig.read());
}

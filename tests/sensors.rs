// tests/sensors.rs
use glam::{Quat, UVec2, Vec3};
use robot_idioms::{
    Camera, Imu, LifecycleLog, Sensor, SensorDriver, SensorPayload, SensorReading, SensorRig,
    SensorType, Sonar, Tracked,
};

/// A sonar stand-in whose lifetime is visible through a [`LifecycleLog`].
#[derive(Debug)]
struct Beacon {
    tag: Tracked,
}

impl SensorDriver for Beacon {
    fn kind(&self) -> SensorType {
        SensorType::Sonar
    }

    fn read_data(&self) -> SensorReading {
        SensorReading {
            sensor: self.kind(),
            description: format!("Beacon {} pinging", self.tag.value),
            payload: SensorPayload::Range {
                distance: self.tag.value as f32,
            },
        }
    }
}

#[test]
fn test_each_sensor_reads_its_own_data() {
    let sensors: Vec<Sensor> = vec![
        Camera::default().into(),
        Imu::default().into(),
        Sonar::default().into(),
    ];
    let descriptions: Vec<String> = sensors.iter().map(|s| s.read_data().description).collect();

    assert_eq!(
        descriptions,
        vec![
            "Camera capturing image...",
            "IMU measuring acceleration and orientation...",
            "Sonar detecting distance to obstacle...",
        ]
    );
}

#[test]
fn test_payloads_carry_sensor_parameters() {
    let camera = Camera {
        resolution: UVec2::new(1920, 1080),
    };
    assert_eq!(
        camera.read_data().payload,
        SensorPayload::Image {
            resolution: UVec2::new(1920, 1080)
        }
    );

    let imu = Imu::default();
    match imu.read_data().payload {
        SensorPayload::Inertial {
            acceleration,
            orientation,
        } => {
            assert_eq!(acceleration, Vec3::new(0.0, -9.81, 0.0));
            assert_eq!(orientation, Quat::IDENTITY);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    // Negative ranges are clamped to zero.
    let sonar = Sonar { range: -2.0 };
    assert_eq!(
        sonar.read_data().payload,
        SensorPayload::Range { distance: 0.0 }
    );
}

#[test]
fn test_compute_default_and_override() {
    let camera: Sensor = Camera::default().into();
    let imu: Sensor = Imu::default().into();
    let sonar: Sensor = Sonar::default().into();

    assert_eq!(camera.compute(10, 20), 0);
    assert_eq!(imu.compute(10, 20), 0);
    assert_eq!(sonar.compute(10, 20), 200);
    // Widened product does not overflow.
    assert_eq!(
        sonar.compute(i32::MAX, 2),
        i64::from(i32::MAX) * 2
    );
}

#[test]
fn test_rig_swaps_mounted_sensor() {
    let mut rig = SensorRig::new(Camera::default());
    assert_eq!(rig.kind(), SensorType::Camera);
    assert_eq!(rig.read().sensor, SensorType::Camera);

    rig.mount(Imu::default());
    assert_eq!(rig.kind(), SensorType::IMU);
    assert_eq!(
        rig.read().description,
        "IMU measuring acceleration and orientation..."
    );

    rig.mount(SensorType::Sonar);
    assert_eq!(rig.compute(3, 4), 12);
    assert!(matches!(rig.sensor(), Sensor::Sonar(_)));
}

#[test]
fn test_mount_drops_previous_sensor() {
    let log = LifecycleLog::new();
    let mut rig = SensorRig::with_sensor(Beacon {
        tag: Tracked::new(10, &log),
    });
    assert_eq!(rig.read().description, "Beacon 10 pinging");

    rig.mount(Beacon {
        tag: Tracked::new(20, &log),
    });

    assert_eq!(log.destroyed(10), 1, "replaced sensor is released by mount");
    assert_eq!(log.live(), 1);
    assert_eq!(rig.read().description, "Beacon 20 pinging");
    // No override, so the trait default applies.
    assert_eq!(rig.compute(6, 7), 0);
}

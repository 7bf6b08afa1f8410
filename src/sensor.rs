//! Robot sensors behind one driver interface, and a rig that holds the mounted one.

use glam::{Quat, UVec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Kinds of sensor a rig can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorType {
    /// Optical camera producing image frames.
    Camera,
    /// Inertial measurement unit (acceleration and orientation).
    IMU,
    /// Ultrasonic range finder.
    Sonar,
}

/// Typed data produced by a single [`SensorDriver::read_data`] call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SensorPayload {
    /// Frame size in pixels.
    Image { resolution: UVec2 },
    /// Linear acceleration (m/s^2) and orientation in world space.
    Inertial { acceleration: Vec3, orientation: Quat },
    /// Distance to the nearest obstacle (m).
    Range { distance: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor: SensorType,
    pub description: String,
    pub payload: SensorPayload,
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// The interface every sensor implements.
pub trait SensorDriver {
    fn kind(&self) -> SensorType;

    fn read_data(&self) -> SensorReading;

    /// Sensor-specific arithmetic on two samples. Sensors that have none return 0.
    fn compute(&self, _a: i32, _b: i32) -> i64 {
        debug!(sensor = ?self.kind(), "Default compute");
        0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub resolution: UVec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            resolution: UVec2::new(640, 480),
        }
    }
}

impl SensorDriver for Camera {
    fn kind(&self) -> SensorType {
        SensorType::Camera
    }

    fn read_data(&self) -> SensorReading {
        SensorReading {
            sensor: self.kind(),
            description: "Camera capturing image...".to_string(),
            payload: SensorPayload::Image {
                resolution: self.resolution,
            },
        }
    }
}

/// Inertial measurement unit. Reports a fixed at-rest sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Imu {
    pub acceleration: Vec3,
    pub orientation: Quat,
}

impl Default for Imu {
    fn default() -> Self {
        Self {
            // Gravity only, robot standing upright.
            acceleration: Vec3::new(0.0, -9.81, 0.0),
            orientation: Quat::IDENTITY,
        }
    }
}

impl SensorDriver for Imu {
    fn kind(&self) -> SensorType {
        SensorType::IMU
    }

    fn read_data(&self) -> SensorReading {
        SensorReading {
            sensor: self.kind(),
            description: "IMU measuring acceleration and orientation...".to_string(),
            payload: SensorPayload::Inertial {
                acceleration: self.acceleration,
                orientation: self.orientation.normalize(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sonar {
    /// Distance reported by the last ping (m).
    pub range: f32,
}

impl Default for Sonar {
    fn default() -> Self {
        Self { range: 1.5 }
    }
}

impl SensorDriver for Sonar {
    fn kind(&self) -> SensorType {
        SensorType::Sonar
    }

    fn read_data(&self) -> SensorReading {
        SensorReading {
            sensor: self.kind(),
            description: "Sonar detecting distance to obstacle...".to_string(),
            payload: SensorPayload::Range {
                distance: self.range.max(0.0),
            },
        }
    }

    /// Product of the two samples, widened so it cannot overflow.
    fn compute(&self, a: i32, b: i32) -> i64 {
        debug!(a, b, "computing");
        i64::from(a) * i64::from(b)
    }
}

/// A type-erased wrapper so any supported sensor can sit in one slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Sensor {
    Camera(Camera),
    IMU(Imu),
    Sonar(Sonar),
}

impl SensorDriver for Sensor {
    fn kind(&self) -> SensorType {
        match self {
            Self::Camera(s) => s.kind(),
            Self::IMU(s) => s.kind(),
            Self::Sonar(s) => s.kind(),
        }
    }

    fn read_data(&self) -> SensorReading {
        match self {
            Self::Camera(s) => s.read_data(),
            Self::IMU(s) => s.read_data(),
            Self::Sonar(s) => s.read_data(),
        }
    }

    fn compute(&self, a: i32, b: i32) -> i64 {
        match self {
            Self::Camera(s) => s.compute(a, b),
            Self::IMU(s) => s.compute(a, b),
            Self::Sonar(s) => s.compute(a, b),
        }
    }
}

impl From<Camera> for Sensor {
    fn from(s: Camera) -> Self {
        Self::Camera(s)
    }
}

impl From<Imu> for Sensor {
    fn from(s: Imu) -> Self {
        Self::IMU(s)
    }
}

impl From<Sonar> for Sensor {
    fn from(s: Sonar) -> Self {
        Self::Sonar(s)
    }
}

impl From<SensorType> for Sensor {
    /// The default-configured sensor of the given kind.
    fn from(kind: SensorType) -> Self {
        match kind {
            SensorType::Camera => Camera::default().into(),
            SensorType::IMU => Imu::default().into(),
            SensorType::Sonar => Sonar::default().into(),
        }
    }
}

/// A mount point holding exactly one sensor, by default any [`Sensor`].
#[derive(Debug)]
pub struct SensorRig<S = Sensor> {
    sensor: S,
}

impl SensorRig {
    pub fn new(sensor: impl Into<Sensor>) -> Self {
        Self::with_sensor(sensor.into())
    }
}

impl<S: SensorDriver> SensorRig<S> {
    pub fn with_sensor(sensor: S) -> Self {
        debug!(sensor = ?sensor.kind(), "sensor mounted");
        Self { sensor }
    }

    /// Swaps in `sensor`. The previously mounted sensor is dropped before this returns.
    pub fn mount(&mut self, sensor: impl Into<S>) {
        let old = std::mem::replace(&mut self.sensor, sensor.into());
        info!(from = ?old.kind(), to = ?self.sensor.kind(), "sensor replaced");
        drop(old);
    }

    pub fn kind(&self) -> SensorType {
        self.sensor.kind()
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn read(&self) -> SensorReading {
        self.sensor.read_data()
    }

    pub fn compute(&self, a: i32, b: i32) -> i64 {
        self.sensor.compute(a, b)
    }
}

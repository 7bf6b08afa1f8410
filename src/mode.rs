//! Robot operating modes and the [`Robot`] that switches between them at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Tuning shared by every operating mode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    /// Travel speed (m/s).
    pub speed: f64,
    /// Sensor sensitivity in `[0, 1]`.
    pub sensitivity: f64,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            sensitivity: 0.5,
        }
    }
}

impl ModeSettings {
    pub fn new(speed: f64, sensitivity: f64) -> Self {
        Self { speed, sensitivity }
    }
}

/// The capability set every operating mode provides.
pub trait RobotMode {
    fn settings(&self) -> &ModeSettings;

    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Performs the mode's task and describes what was done.
    fn run_task(&self) -> String;

    fn status(&self) -> String {
        let s = self.settings();
        format!("Speed = {}, Sensitivity = {}", s.speed, s.sensitivity)
    }
}

/// Mode A: exploration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplorationMode {
    pub settings: ModeSettings,
}

impl ExplorationMode {
    pub fn new(speed: f64, sensitivity: f64) -> Self {
        Self {
            settings: ModeSettings::new(speed, sensitivity),
        }
    }
}

impl RobotMode for ExplorationMode {
    fn settings(&self) -> &ModeSettings {
        &self.settings
    }

    fn name(&self) -> &'static str {
        "exploration"
    }

    fn run_task(&self) -> String {
        "[Mode A] Exploring environment with LIDAR...".to_string()
    }
}

/// Mode B: manipulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManipulationMode {
    pub settings: ModeSettings,
}

impl ManipulationMode {
    pub fn new(speed: f64, sensitivity: f64) -> Self {
        Self {
            settings: ModeSettings::new(speed, sensitivity),
        }
    }
}

impl RobotMode for ManipulationMode {
    fn settings(&self) -> &ModeSettings {
        &self.settings
    }

    fn name(&self) -> &'static str {
        "manipulation"
    }

    fn run_task(&self) -> String {
        "[Mode B] Performing object manipulation with arm...".to_string()
    }
}

/// Every mode a [`Robot`] can run, so dispatch is a `match` rather than a downcast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    Exploration(ExplorationMode),
    Manipulation(ManipulationMode),
}

impl RobotMode for Mode {
    fn settings(&self) -> &ModeSettings {
        match self {
            Self::Exploration(m) => m.settings(),
            Self::Manipulation(m) => m.settings(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Exploration(m) => m.name(),
            Self::Manipulation(m) => m.name(),
        }
    }

    fn run_task(&self) -> String {
        match self {
            Self::Exploration(m) => m.run_task(),
            Self::Manipulation(m) => m.run_task(),
        }
    }

    fn status(&self) -> String {
        match self {
            Self::Exploration(m) => m.status(),
            Self::Manipulation(m) => m.status(),
        }
    }
}

impl From<ExplorationMode> for Mode {
    fn from(mode: ExplorationMode) -> Self {
        Self::Exploration(mode)
    }
}

impl From<ManipulationMode> for Mode {
    fn from(mode: ManipulationMode) -> Self {
        Self::Manipulation(mode)
    }
}

/// The outcome of one [`Robot::operate`] call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub mode: String,
    pub status: String,
    pub task: String,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status)?;
        write!(f, "{}", self.task)
    }
}

/// A robot running exactly one mode at a time.
///
/// There is no modeless state: the robot is built with a mode and
/// [`switch_mode`](Self::switch_mode) swaps it for another. The mode type
/// defaults to the closed [`Mode`] enum; any other [`RobotMode`] works too.
#[derive(Debug)]
pub struct Robot<M = Mode> {
    mode: M,
    switches: usize,
}

impl Robot {
    pub fn new(mode: impl Into<Mode>) -> Self {
        Self::with_mode(mode.into())
    }
}

impl<M: RobotMode> Robot<M> {
    pub fn with_mode(mode: M) -> Self {
        debug!(mode = mode.name(), "robot created");
        Self { mode, switches: 0 }
    }

    /// Reports the active mode's status, then runs its task.
    pub fn operate(&self) -> Operation {
        Operation {
            mode: self.mode.name().to_string(),
            status: self.mode.status(),
            task: self.mode.run_task(),
        }
    }

    /// Installs `mode`; the previous one is dropped before this returns.
    pub fn switch_mode(&mut self, mode: impl Into<M>) {
        let old = std::mem::replace(&mut self.mode, mode.into());
        self.switches += 1;
        info!(from = old.name(), to = self.mode.name(), "Switched robot mode");
        drop(old);
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }

    /// How many times the mode has been replaced since construction.
    pub fn switch_count(&self) -> usize {
        self.switches
    }
}

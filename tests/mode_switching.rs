// tests/mode_switching.rs
use robot_idioms::{
    ExplorationMode, LifecycleLog, ManipulationMode, Mode, ModeSettings, Robot, RobotMode, Tracked,
};
use std::cell::Cell;
use std::rc::Rc;

/// A mode that owns a tracked payload and counts how often its task runs.
#[derive(Debug)]
struct Patrol {
    settings: ModeSettings,
    payload: Tracked,
    runs: Rc<Cell<usize>>,
}

impl Patrol {
    fn tracked(id: i32, log: &LifecycleLog) -> (Self, Rc<Cell<usize>>) {
        let runs = Rc::new(Cell::new(0));
        let mode = Self {
            settings: ModeSettings::default(),
            payload: Tracked::new(id, log),
            runs: runs.clone(),
        };
        (mode, runs)
    }
}

impl RobotMode for Patrol {
    fn settings(&self) -> &ModeSettings {
        &self.settings
    }

    fn name(&self) -> &'static str {
        "patrol"
    }

    fn run_task(&self) -> String {
        self.runs.set(self.runs.get() + 1);
        format!("[Patrol {}] sweeping perimeter", self.payload.value)
    }
}

#[test]
fn test_operate_reports_status_then_task() {
    let robot = Robot::new(ExplorationMode::new(1.0, 0.5));
    let op = robot.operate();

    assert_eq!(op.mode, "exploration");
    assert_eq!(op.status, "Speed = 1, Sensitivity = 0.5");
    assert_eq!(op.task, "[Mode A] Exploring environment with LIDAR...");
    assert_eq!(
        op.to_string(),
        "Speed = 1, Sensitivity = 0.5\n[Mode A] Exploring environment with LIDAR..."
    );
}

#[test]
fn test_switch_dispatches_to_new_mode_only() {
    let mut robot = Robot::new(ExplorationMode::new(1.0, 0.5));

    robot.switch_mode(ManipulationMode::new(2.5, 0.8));
    let op = robot.operate();
    assert_eq!(op.task, "[Mode B] Performing object manipulation with arm...");
    assert_eq!(op.status, "Speed = 2.5, Sensitivity = 0.8");
    assert!(matches!(robot.mode(), Mode::Manipulation(_)));

    // Back to mode A with different parameters.
    robot.switch_mode(ExplorationMode::new(3.0, 1.0));
    let op = robot.operate();
    assert_eq!(op.task, "[Mode A] Exploring environment with LIDAR...");
    assert_eq!(op.status, "Speed = 3, Sensitivity = 1");
    assert_eq!(robot.switch_count(), 2);
}

#[test]
fn test_mode_enum_delegates_to_variant() {
    let inner = ManipulationMode::new(0.2, 0.9);
    let mode: Mode = inner.clone().into();

    assert_eq!(mode.run_task(), inner.run_task());
    assert_eq!(mode.status(), inner.status());
    assert_eq!(mode.settings(), &inner.settings);
    assert_eq!(mode.name(), "manipulation");
}

#[test]
fn test_switch_destroys_old_mode_and_never_calls_it_again() {
    let log = LifecycleLog::new();
    let (first, first_runs) = Patrol::tracked(1, &log);
    let (second, second_runs) = Patrol::tracked(2, &log);

    let mut robot = Robot::with_mode(first);
    robot.operate();
    assert_eq!(first_runs.get(), 1);

    robot.switch_mode(second);
    // The replaced mode is gone as soon as the switch returns.
    assert_eq!(log.destroyed(1), 1);
    assert_eq!(log.destroyed(2), 0);
    assert_eq!(log.live(), 1);

    let op = robot.operate();
    robot.operate();
    assert_eq!(op.task, "[Patrol 2] sweeping perimeter");
    assert_eq!(first_runs.get(), 1, "old mode must not run after the switch");
    assert_eq!(second_runs.get(), 2);
    assert_eq!(robot.mode().payload.value, 2);

    drop(robot);
    assert_eq!(log.live(), 0);
}

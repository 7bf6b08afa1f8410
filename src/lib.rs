//! # robot-idioms
//!
//! Small, self-contained patterns that show up all over robot software:
//!
//! - [`ownership`]: an exclusive holder that can be emptied, refilled and moved, and a
//!   reference-counted shared holder with a weak observer that detects release.
//! - [`mode`]: a `Robot` that swaps its operating mode at runtime.
//! - [`sensor`]: interchangeable sensors (camera, IMU, sonar) behind one driver trait.
//! - [`counter`]: a shared counter incremented by concurrent workers, guarded by a mutex
//!   or by an atomic.
//!
//! Each pattern has a console demo under `src/bin/`.

pub mod counter;
pub mod error;
pub mod mode;
pub mod ownership;
pub mod sensor;
pub mod telemetry;

pub use counter::*;
pub use error::{IdiomError, Result};
pub use mode::*;
pub use ownership::*;
pub use sensor::*;

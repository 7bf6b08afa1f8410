//! Increments a shared counter from two threads, first behind a mutex, then atomically.

use robot_idioms::{ContentionConfig, CounterStrategy, Result, telemetry};

fn main() -> Result<()> {
    telemetry::init();
    let config = ContentionConfig::default();

    let locked = CounterStrategy::Mutex.run(&config)?;
    println!("Final counter (with mutex): {}", locked.total);

    let atomic = CounterStrategy::Atomic.run(&config)?;
    println!("Final counter (with atomic): {}", atomic.total);

    Ok(())
}

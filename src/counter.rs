//! A shared counter hammered by concurrent workers, guarded two ways.
//!
//! [`MutexCounter`] serialises every increment behind a lock; [`AtomicCounter`]
//! lets the hardware do it with `fetch_add`. [`run_contended`] drives either
//! one and always lands on `workers * iterations`.

use crate::error::{IdiomError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use tracing::{debug, info};

/// How a [`SharedCounter`] keeps concurrent increments from colliding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterStrategy {
    Mutex,
    Atomic,
}

impl CounterStrategy {
    /// A fresh counter starting at zero.
    pub fn counter(self) -> Box<dyn SharedCounter> {
        match self {
            Self::Mutex => Box::new(MutexCounter::default()),
            Self::Atomic => Box::new(AtomicCounter::default()),
        }
    }

    /// Runs a full contention round on a fresh counter.
    pub fn run(self, config: &ContentionConfig) -> Result<CounterReport> {
        let counter = self.counter();
        let total = run_contended(counter.as_ref(), config)?;
        info!(strategy = ?self, total, "Final counter");
        Ok(CounterReport {
            strategy: self,
            workers: config.workers,
            iterations: config.iterations,
            total,
        })
    }
}

/// A counter that many threads may increment at once.
pub trait SharedCounter: Send + Sync {
    fn increment(&self) -> Result<()>;

    fn value(&self) -> Result<u64>;

    fn strategy(&self) -> CounterStrategy;
}

#[derive(Debug, Default)]
pub struct MutexCounter {
    count: Mutex<u64>,
}

impl SharedCounter for MutexCounter {
    fn increment(&self) -> Result<()> {
        // Guard is released when it goes out of scope.
        let mut guard = self
            .count
            .lock()
            .map_err(|e| IdiomError::LockPoisoned(e.to_string()))?;
        *guard += 1;
        Ok(())
    }

    fn value(&self) -> Result<u64> {
        self.count
            .lock()
            .map(|guard| *guard)
            .map_err(|e| IdiomError::LockPoisoned(e.to_string()))
    }

    fn strategy(&self) -> CounterStrategy {
        CounterStrategy::Mutex
    }
}

#[derive(Debug, Default)]
pub struct AtomicCounter {
    count: AtomicU64,
}

impl SharedCounter for AtomicCounter {
    fn increment(&self) -> Result<()> {
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn value(&self) -> Result<u64> {
        Ok(self.count.load(Ordering::SeqCst))
    }

    fn strategy(&self) -> CounterStrategy {
        CounterStrategy::Atomic
    }
}

/// Shape of a contention round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentionConfig {
    /// Number of concurrent workers.
    pub workers: usize,
    /// Increments performed by each worker.
    pub iterations: u64,
}

impl Default for ContentionConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            iterations: 1_000_000,
        }
    }
}

impl ContentionConfig {
    /// The total every strategy must reach, or `None` if it does not fit in a `u64`.
    pub fn expected_total(&self) -> Option<u64> {
        u64::try_from(self.workers)
            .ok()?
            .checked_mul(self.iterations)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterReport {
    pub strategy: CounterStrategy,
    pub workers: usize,
    pub iterations: u64,
    pub total: u64,
}

/// Spawns `config.workers` threads that each increment `counter`
/// `config.iterations` times, waits for all of them, and returns the final value.
pub fn run_contended<C: SharedCounter + ?Sized>(
    counter: &C,
    config: &ContentionConfig,
) -> Result<u64> {
    debug!(
        strategy = ?counter.strategy(),
        workers = config.workers,
        iterations = config.iterations,
        "starting contention round"
    );

    thread::scope(|scope| {
        let handles: Vec<_> = (0..config.workers)
            .map(|_| {
                scope.spawn(|| -> Result<()> {
                    for _ in 0..config.iterations {
                        counter.increment()?;
                    }
                    Ok(())
                })
            })
            .collect();

        // Join everything before reporting, even if one worker failed.
        let mut first_err = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            let outcome = handle
                .join()
                .unwrap_or(Err(IdiomError::WorkerPanicked { worker }));
            if let Err(e) = outcome {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    })?;

    counter.value()
}

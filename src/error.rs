use thiserror::Error;

/// Failures raised by the holders and the contention runner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdiomError {
    /// An exclusive or shared holder was read while it owned nothing.
    #[error("accessed an empty holder")]
    EmptyHolder,
    /// A weak observer was promoted after its value had been released.
    #[error("observed value has already been released")]
    Expired,
    /// The counter's mutex was poisoned by a panicking holder of the lock.
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
    /// A contention worker panicked; `worker` is its spawn index.
    #[error("worker {worker} panicked before finishing its increments")]
    WorkerPanicked { worker: usize },
}

pub type Result<T> = std::result::Result<T, IdiomError>;

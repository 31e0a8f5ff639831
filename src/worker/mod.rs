//! Fixed-size worker pool
//!
//! The pool runs arbitrary [`Job`]s on a fixed number of tokio tasks pulling
//! from one shared queue. It knows nothing about crawling: the crawler wraps
//! each page in a job and collects results through its own channels.

mod job;
mod pool;

pub use job::{Job, JobFuture};
pub use pool::WorkerPool;

use thiserror::Error;

/// Worker pool errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("worker pool size must be at least 1, got {0}")]
    InvalidSize(usize),

    #[error("worker pool has already been started")]
    AlreadyStarted,

    #[error("worker pool has not been started")]
    NotStarted,

    #[error("worker pool is closed")]
    Closed,
}

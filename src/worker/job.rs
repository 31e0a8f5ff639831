use std::future::Future;
use std::pin::Pin;

/// Future returned by [`Job::run`]
pub type JobFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A unit of work the [`super::WorkerPool`] can execute
///
/// A job consumes itself when run. It reports its outcome through whatever
/// channel it carries; the pool only drives it to completion.
pub trait Job: Send + 'static {
    fn run(self: Box<Self>) -> JobFuture;
}

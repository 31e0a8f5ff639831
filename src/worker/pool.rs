use super::{Job, PoolError};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

type JobQueue = mpsc::Receiver<Box<dyn Job>>;

/// A pool of `size` workers sharing one job queue
///
/// Submission never waits on the queue: each [`WorkerPool::add_job`] hands the
/// job to its own sending task. Code running on a worker can therefore feed
/// new jobs into the pool without deadlocking against the queue it drains.
///
/// # Lifecycle
///
/// 1. [`WorkerPool::new`] validates the size
/// 2. [`WorkerPool::start`] spawns the workers
/// 3. [`WorkerPool::add_job`] any number of times
/// 4. [`WorkerPool::close`] waits for every submitted job to be queued, closes
///    the queue and waits for the workers to drain it and exit
pub struct WorkerPool {
    size: usize,
    sender: Option<mpsc::Sender<Box<dyn Job>>>,
    receiver: Arc<Mutex<JobQueue>>,
    workers: Vec<JoinHandle<()>>,
    started: bool,
}

impl WorkerPool {
    /// Creates a new pool with `size` workers
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerPool)` - A pool that has not been started yet
    /// * `Err(PoolError::InvalidSize)` - `size` is zero
    pub fn new(size: usize) -> Result<Self, PoolError> {
        if size == 0 {
            return Err(PoolError::InvalidSize(size));
        }

        let (sender, receiver) = mpsc::channel(size);

        Ok(Self {
            size,
            sender: Some(sender),
            receiver: Arc::new(Mutex::new(receiver)),
            workers: Vec::with_capacity(size),
            started: false,
        })
    }

    /// Number of workers in the pool
    pub fn size(&self) -> usize {
        self.size
    }

    /// Spawns the workers
    ///
    /// Each worker loops receiving a job and running it to completion, and
    /// exits once the queue is closed and empty.
    pub fn start(&mut self) -> Result<(), PoolError> {
        if self.started {
            return Err(PoolError::AlreadyStarted);
        }
        if self.sender.is_none() {
            return Err(PoolError::Closed);
        }
        self.started = true;

        for id in 0..self.size {
            let receiver = Arc::clone(&self.receiver);
            self.workers.push(tokio::spawn(run_worker(id, receiver)));
        }

        tracing::debug!("Started worker pool with {} workers", self.size);
        Ok(())
    }

    /// Submits a job without waiting for a worker to accept it
    ///
    /// Must be called from within a tokio runtime.
    pub fn add_job(&self, job: Box<dyn Job>) -> Result<(), PoolError> {
        let sender = self.sender.clone().ok_or(PoolError::Closed)?;

        tokio::spawn(async move {
            if sender.send(job).await.is_err() {
                tracing::warn!("Job dropped: worker queue closed before it was accepted");
            }
        });

        Ok(())
    }

    /// Closes the queue and waits for the workers to finish
    ///
    /// The queue only closes once every pending submission has been accepted,
    /// so all jobs submitted before this call still run. A worker that panicked
    /// is logged and does not stop the others from being awaited.
    pub async fn close(&mut self) -> Result<(), PoolError> {
        if !self.started {
            return Err(PoolError::NotStarted);
        }

        // Pending submissions hold their own sender clones; the channel closes
        // when the last of them has delivered its job.
        if self.sender.take().is_none() {
            return Err(PoolError::Closed);
        }

        for (id, handle) in self.workers.drain(..).enumerate() {
            if let Err(e) = handle.await {
                tracing::error!("Worker {} terminated abnormally: {}", id, e);
            }
        }

        tracing::debug!("Worker pool closed");
        Ok(())
    }
}

async fn run_worker(id: usize, receiver: Arc<Mutex<JobQueue>>) {
    tracing::trace!("Worker {} started", id);

    loop {
        // The lock is released before the job runs
        let job = { receiver.lock().await.recv().await };

        match job {
            Some(job) => job.run().await,
            None => break,
        }
    }

    tracing::trace!("Worker {} finished", id);
}

//! Bounded worker pool for CPU-bound work.
//!
//! The request-handling path must never block, so extraction and scoring
//! run on a fixed set of dedicated OS threads. Jobs are admitted in
//! arrival order through a single queue; queuing is the system's only
//! form of backpressure. Once a job has been handed to a worker it runs
//! to completion: there is no cancellation primitive, and a caller that
//! stops waiting simply never observes the result.
//!
//! Domain failures travel by value inside the job's return type; the
//! [`OffloadError`] variants cover only the pool's own failure modes.

pub mod error;


pub use error::OffloadError;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, error};

/// Default number of pool workers.
pub const DEFAULT_WORKER_COUNT: usize = 3;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size pool of OS threads executing blocking jobs in arrival order.
///
/// The pool is constructed explicitly at startup, shared behind an `Arc`,
/// and drained with [`WorkerPool::shutdown`] at process teardown.
pub struct WorkerPool {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Spawns `worker_count` dedicated worker threads.
    pub fn new(worker_count: usize) -> Result<Self, OffloadError> {
        if worker_count == 0 {
            return Err(OffloadError::ZeroWorkers);
        }

        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(worker_count);
        for index in 0..worker_count {
            let receiver = Arc::clone(&receiver);
            let handle = std::thread::Builder::new()
                .name(format!("shortlist-worker-{index}"))
                .spawn(move || worker_loop(index, receiver))
                .map_err(|e| OffloadError::SpawnFailed { source: e })?;
            workers.push(handle);
        }

        debug!(worker_count, "worker pool started");
        Ok(Self {
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
        })
    }

    /// Runs `task` on a pool worker and resolves with its return value.
    ///
    /// The calling task suspends here until the worker finishes. Results
    /// and failures are delivered to this caller only; nothing leaks
    /// across requests.
    pub async fn run<F, R>(&self, task: F) -> Result<R, OffloadError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let job: Job = Box::new(move || {
            match panic::catch_unwind(AssertUnwindSafe(task)) {
                // The caller may have stopped waiting; a dead receiver is fine.
                Ok(value) => {
                    let _ = reply.send(value);
                }
                Err(_) => error!("offloaded job panicked"),
            }
        });

        {
            let sender = self.sender.lock();
            let Some(sender) = sender.as_ref() else {
                return Err(OffloadError::PoolClosed);
            };
            sender.send(job).map_err(|_| OffloadError::PoolClosed)?;
        }

        response.await.map_err(|_| OffloadError::JobAborted)
    }

    /// Closes the queue, lets queued and in-flight jobs finish, and joins
    /// every worker thread. Idempotent.
    pub fn shutdown(&self) {
        let sender = self.sender.lock().take();
        drop(sender);

        let workers = std::mem::take(&mut *self.workers.lock());
        for handle in workers {
            if handle.join().is_err() {
                error!("worker thread terminated abnormally");
            }
        }
        debug!("worker pool drained");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.lock().len())
            .field("accepting", &self.sender.lock().is_some())
            .finish()
    }
}

fn worker_loop(index: usize, receiver: Arc<Mutex<mpsc::Receiver<Job>>>) {
    loop {
        // The queue lock is held while waiting for a job and released
        // before running it, so up to `worker_count` jobs execute in
        // parallel.
        let message = {
            let receiver = receiver.lock();
            receiver.recv()
        };
        match message {
            Ok(job) => job(),
            // Queue closed: drain complete for this worker.
            Err(mpsc::RecvError) => {
                debug!(worker = index, "worker exiting");
                break;
            }
        }
    }
}

use thiserror::Error;

/// Failure modes of the worker pool itself.
///
/// Domain errors raised inside an offloaded job are not represented here;
/// they travel by value in the job's return type.
#[derive(Debug, Error)]
pub enum OffloadError {
    /// The pool requires at least one worker.
    #[error("worker pool requires at least one worker")]
    ZeroWorkers,

    /// The pool has been shut down and accepts no further jobs.
    #[error("worker pool is shut down")]
    PoolClosed,

    /// The job was dispatched but never produced a result (it panicked,
    /// or the pool was drained before it ran).
    #[error("offloaded job did not complete")]
    JobAborted,

    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {source}")]
    SpawnFailed {
        #[source]
        source: std::io::Error,
    },
}

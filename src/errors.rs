use thiserror::Error;

/// Failures the search surfaces to its caller.
///
/// Degenerate arithmetic (division by zero, non-finite intermediate values, forbidden zero
/// terms in a series) is never an error: both the build and the verification phases skip
/// such candidates silently.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("hash table I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("hash table (de)serialization failed: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("could not start the worker pool: {0}")]
    WorkerPool(String),

    /// A worker slab died mid-run. Results of the other slabs are still returned.
    #[error("worker slab {slab} failed: {reason}")]
    SlabFailed { slab: usize, reason: String },
}

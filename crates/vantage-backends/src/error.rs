//! Error types for backend operations

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur when launching kernels
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Work division describes zero threads
    #[error("empty work division: {grid_blocks} blocks of {block_threads} threads")]
    EmptyWorkDiv {
        grid_blocks: usize,
        block_threads: usize,
    },
}

//! Error types for vantage-core operations

/// Result type for vantage-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing memory objects
///
/// Accessor-contract violations (re-wrapping, widening a tag set, missing
/// backend support) never reach this type; they are rejected during
/// compilation. Runtime errors exist only at the host edges where data
/// enters a memory object.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Element count does not match the requested extents
    #[error("extent mismatch: extents describe {expected} elements, data has {actual}")]
    ExtentMismatch { expected: usize, actual: usize },
}

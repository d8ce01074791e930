//! Index integer types usable for buffer indexing
//!
//! Accessors and views are generic over the integral type used for index
//! computations. Offset arithmetic happens in `usize`; the trait provides
//! the round-trips.

use std::fmt;

/// An integral type usable for indexing and index computations.
pub trait BufferIdx: Copy + PartialEq + Eq + fmt::Debug + 'static {
    /// Widen to `usize` for offset arithmetic.
    fn to_usize(self) -> usize;

    /// Narrow from `usize`. Values are extents and indices of in-memory
    /// buffers, so they fit the index type of the view they came from;
    /// implementations assert that in debug builds.
    fn from_usize(value: usize) -> Self;
}

impl BufferIdx for usize {
    fn to_usize(self) -> usize {
        self
    }

    fn from_usize(value: usize) -> Self {
        value
    }
}

impl BufferIdx for u32 {
    fn to_usize(self) -> usize {
        self as usize
    }

    fn from_usize(value: usize) -> Self {
        debug_assert!(
            value <= u32::MAX as usize,
            "index {value} exceeds the u32 index range"
        );
        value as u32
    }
}

impl BufferIdx for u64 {
    fn to_usize(self) -> usize {
        self as usize
    }

    fn from_usize(value: usize) -> Self {
        // usize is at most 64 bits wide, so this never truncates.
        value as u64
    }
}

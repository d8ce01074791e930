//! Work division: how many kernel threads a launch spans
//!
//! A work division names a grid of blocks and the threads per block, per
//! dimension. Executors flatten the two into a global thread extent and
//! invoke the kernel once per global index.

use std::fmt;

use vantage_core::BufferIdx;

use crate::error::{BackendError, Result};

/// Grid and block shape of a kernel launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkDiv<I: BufferIdx, const D: usize> {
    grid_blocks: [I; D],
    block_threads: [I; D],
}

impl<I: BufferIdx, const D: usize> WorkDiv<I, D> {
    /// A work division with explicit grid and block shapes.
    pub fn new(grid_blocks: [I; D], block_threads: [I; D]) -> Self {
        Self {
            grid_blocks,
            block_threads,
        }
    }

    /// Blocks per dimension of the grid.
    pub fn grid_blocks(&self) -> [I; D] {
        self.grid_blocks
    }

    /// Threads per dimension of a block.
    pub fn block_threads(&self) -> [I; D] {
        self.block_threads
    }

    /// Global thread extent per dimension.
    pub fn global_threads(&self) -> [usize; D] {
        let mut extent = [0usize; D];
        for d in 0..D {
            extent[d] = self.grid_blocks[d].to_usize() * self.block_threads[d].to_usize();
        }
        extent
    }

    /// Total number of kernel invocations the division describes.
    pub fn total_threads(&self) -> usize {
        self.global_threads().iter().product()
    }

    /// Reject divisions that would launch zero threads.
    pub fn validate(&self) -> Result<()> {
        if self.total_threads() == 0 {
            return Err(BackendError::EmptyWorkDiv {
                grid_blocks: self.grid_blocks.iter().map(|b| b.to_usize()).product(),
                block_threads: self.block_threads.iter().map(|t| t.to_usize()).product(),
            });
        }
        Ok(())
    }
}

impl<I: BufferIdx> WorkDiv<I, 1> {
    /// One block spanning `threads` threads.
    pub fn linear(threads: I) -> Self {
        Self::new([I::from_usize(1)], [threads])
    }

    /// A single kernel thread.
    pub fn single() -> Self {
        Self::linear(I::from_usize(1))
    }
}

impl<I: BufferIdx, const D: usize> fmt::Display for WorkDiv<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WorkDiv({:?} blocks x {:?} threads)",
            self.grid_blocks, self.block_threads
        )
    }
}

/// Map a flat thread id back to its N-dimensional global index, row-major.
pub(crate) fn unflatten<I: BufferIdx, const D: usize>(
    mut flat: usize,
    extent: &[usize; D],
) -> [I; D] {
    let mut index = [I::from_usize(0); D];
    for d in (0..D).rev() {
        index[d] = I::from_usize(flat % extent[d]);
        flat /= extent[d];
    }
    index
}

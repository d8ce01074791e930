//! Kernel executors
//!
//! A kernel is a plain closure over its accessors, invoked once per global
//! thread index of a [`WorkDiv`]. Accessors are `Copy`, so kernels capture
//! them by value and a single closure serves both executors.

use rayon::prelude::*;
use vantage_core::{Accelerator, BufferIdx};

use crate::accel::{CpuSerial, CpuThreads};
use crate::error::Result;
use crate::workdiv::{unflatten, WorkDiv};

/// Kernel launch on an accelerator.
pub trait Launch<I: BufferIdx, const D: usize>: Accelerator {
    /// Invoke `kernel` once per global thread index of `div`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::EmptyWorkDiv`](crate::BackendError::EmptyWorkDiv)
    /// if the division describes zero threads.
    fn exec<K>(div: &WorkDiv<I, D>, kernel: K) -> Result<()>
    where
        K: Fn([I; D]) + Send + Sync;
}

impl<I: BufferIdx, const D: usize> Launch<I, D> for CpuSerial {
    fn exec<K>(div: &WorkDiv<I, D>, kernel: K) -> Result<()>
    where
        K: Fn([I; D]) + Send + Sync,
    {
        div.validate()?;
        let extent = div.global_threads();
        let total = div.total_threads();
        let span = tracing::debug_span!("kernel_exec", accel = Self::NAME, threads = total);
        let _guard = span.enter();
        for flat in 0..total {
            kernel(unflatten(flat, &extent));
        }
        Ok(())
    }
}

impl<I: BufferIdx, const D: usize> Launch<I, D> for CpuThreads {
    fn exec<K>(div: &WorkDiv<I, D>, kernel: K) -> Result<()>
    where
        K: Fn([I; D]) + Send + Sync,
    {
        div.validate()?;
        let extent = div.global_threads();
        let total = div.total_threads();
        let span = tracing::debug_span!("kernel_exec", accel = Self::NAME, threads = total);
        let _guard = span.enter();
        (0..total)
            .into_par_iter()
            .for_each(|flat| kernel(unflatten(flat, &extent)));
        Ok(())
    }
}

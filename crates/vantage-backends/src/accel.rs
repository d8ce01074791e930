//! CPU accelerators
//!
//! Both CPU accelerators address host memory directly, so they share one
//! accessor recipe: the plain-pointer handle over whatever view they are
//! given. They differ only in how their executors schedule kernel threads
//! (see [`crate::exec`]).

use vantage_core::{Accelerator, BuildAccessor, PlainPtr, View};

/// Single-threaded CPU accelerator.
///
/// Kernel indices run as one sequential loop on the calling thread. The
/// baseline accelerator; useful for debugging kernels before handing them
/// to a parallel executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSerial;

/// Multi-threaded CPU accelerator backed by a work-stealing thread pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuThreads;

impl Accelerator for CpuSerial {
    const NAME: &'static str = "cpu-serial";
}

impl Accelerator for CpuThreads {
    const NAME: &'static str = "cpu-threads";
}

// SAFETY: both CPU accelerators hand out PlainPtr handles describing the
// given view verbatim, with the exclusive path routed through from_view_mut.
unsafe impl<'v, V, const D: usize> BuildAccessor<'v, V, D> for CpuSerial
where
    V: View<D> + 'v,
{
    type Handle = PlainPtr<'v, V::Elem, V::Idx, D>;

    fn build(view: &'v V) -> Self::Handle {
        PlainPtr::from_view(view)
    }

    fn build_mut(view: &'v mut V) -> Self::Handle {
        PlainPtr::from_view_mut(view)
    }
}

unsafe impl<'v, V, const D: usize> BuildAccessor<'v, V, D> for CpuThreads
where
    V: View<D> + 'v,
{
    type Handle = PlainPtr<'v, V::Elem, V::Idx, D>;

    fn build(view: &'v V) -> Self::Handle {
        PlainPtr::from_view(view)
    }

    fn build_mut(view: &'v mut V) -> Self::Handle {
        PlainPtr::from_view_mut(view)
    }
}

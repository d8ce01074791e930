//! Memory handles: thin, copyable descriptors of view storage
//!
//! A handle is what an accessor actually carries: base pointer, extents and
//! pitches of the memory object it was built from, nothing else. Handles
//! never own storage and never free anything. Concrete handle types carry a
//! lifetime brand of the view they were built from, so the borrow checker
//! keeps the memory object alive for as long as any accessor over it.

use std::fmt;
use std::marker::PhantomData;

use crate::idx::BufferIdx;
use crate::view::View;

/// Descriptor of the storage behind a memory object.
///
/// Backends choose the handle type their accessors carry through
/// [`BuildAccessor`](crate::BuildAccessor). The provided `linear_index`
/// turns an N-dimensional index into a flat element offset, panicking on
/// out-of-bounds coordinates the way standard slices do.
///
/// # Safety
///
/// Implementations must guarantee that `as_ptr` is valid for reads of the
/// `extents`/`pitches`-described elements for the handle's entire lifetime,
/// and that `as_mut_ptr` is valid for writes whenever the handle was built
/// from an exclusive borrow. Accessors dereference these pointers without
/// further checks beyond bounds.
pub unsafe trait MemoryHandle<T, I: BufferIdx, const D: usize>: Copy {
    /// Base pointer of the element buffer.
    fn as_ptr(&self) -> *const T;

    /// Mutable base pointer of the element buffer.
    ///
    /// Whether stores through this pointer are permitted is decided by the
    /// access-mode tag of the accessor holding the handle, not here.
    fn as_mut_ptr(&self) -> *mut T;

    /// Number of elements per dimension.
    fn extents(&self) -> [I; D];

    /// Element stride per dimension.
    fn pitches(&self) -> [I; D];

    /// Flat element offset of an N-dimensional index.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is outside the handle's extents.
    fn linear_index(&self, index: [I; D]) -> usize {
        let extents = self.extents();
        let pitches = self.pitches();
        let mut offset = 0usize;
        for d in 0..D {
            let i = index[d].to_usize();
            let extent = extents[d].to_usize();
            assert!(i < extent, "index {i} out of bounds for extent {extent} in dimension {d}");
            offset += i * pitches[d].to_usize();
        }
        offset
    }
}

/// Plain-pointer handle over host-resident storage.
///
/// This is the handle the CPU accelerators build: the view's base pointer
/// plus its shape descriptor, branded with the view borrow's lifetime.
pub struct PlainPtr<'v, T, I: BufferIdx, const D: usize> {
    ptr: *mut T,
    extents: [I; D],
    pitches: [I; D],
    _view: PhantomData<&'v ()>,
}

impl<'v, T, I: BufferIdx, const D: usize> PlainPtr<'v, T, I, D> {
    /// Describe a shared view. The resulting handle must only ever end up
    /// inside read-only accessors; [`Accessor::new`](crate::Accessor::new)
    /// is unsafe precisely so that callers take on that obligation. The
    /// safe construction functions pair this with `ReadAccess` only.
    pub fn from_view<V>(view: &'v V) -> Self
    where
        V: View<D, Elem = T, Idx = I>,
    {
        Self {
            ptr: view.as_ptr() as *mut T,
            extents: view.extents(),
            pitches: view.pitches(),
            _view: PhantomData,
        }
    }

    /// Describe an exclusive view, permitting write-capable accessors.
    pub fn from_view_mut<V>(view: &'v mut V) -> Self
    where
        V: View<D, Elem = T, Idx = I>,
    {
        let extents = view.extents();
        let pitches = view.pitches();
        Self {
            ptr: view.as_mut_ptr(),
            extents,
            pitches,
            _view: PhantomData,
        }
    }
}

impl<T, I: BufferIdx, const D: usize> Clone for PlainPtr<'_, T, I, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I: BufferIdx, const D: usize> Copy for PlainPtr<'_, T, I, D> {}

impl<T, I: BufferIdx, const D: usize> PartialEq for PlainPtr<'_, T, I, D> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.extents == other.extents && self.pitches == other.pitches
    }
}

impl<T, I: BufferIdx, const D: usize> Eq for PlainPtr<'_, T, I, D> {}

impl<T, I: BufferIdx, const D: usize> fmt::Debug for PlainPtr<'_, T, I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainPtr")
            .field("ptr", &self.ptr)
            .field("extents", &self.extents)
            .field("pitches", &self.pitches)
            .finish()
    }
}

// SAFETY: a PlainPtr is a non-owning descriptor of storage that outlives it
// (the 'v brand). Sending or sharing the descriptor is safe whenever the
// element type itself is; whether concurrent kernels may *store* through
// overlapping accessors is the kernel author's contract, exactly as on a
// device backend, and is not policed at runtime.
unsafe impl<T: Send + Sync, I: BufferIdx, const D: usize> Send for PlainPtr<'_, T, I, D> {}
unsafe impl<T: Send + Sync, I: BufferIdx, const D: usize> Sync for PlainPtr<'_, T, I, D> {}

// SAFETY: the pointer, extents and pitches are taken verbatim from a view
// borrowed for 'v, so the described elements stay readable for the handle's
// lifetime; from_view_mut starts from an exclusive borrow, making the
// mutable pointer writable under the same brand.
unsafe impl<T, I: BufferIdx, const D: usize> MemoryHandle<T, I, D> for PlainPtr<'_, T, I, D> {
    fn as_ptr(&self) -> *const T {
        self.ptr as *const T
    }

    fn as_mut_ptr(&self) -> *mut T {
        self.ptr
    }

    fn extents(&self) -> [I; D] {
        self.extents
    }

    fn pitches(&self) -> [I; D] {
        self.pitches
    }
}

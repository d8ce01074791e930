//! The accessor: a capability-tagged, non-owning wrapper over a memory object
//!
//! An accessor pairs a [`MemoryHandle`] with an access-mode tag set. Which
//! indexing operations exist on a given accessor is decided entirely by the
//! head tag of that set, during compilation; there is no runtime permission
//! check anywhere. Accessors are `Copy` and are meant to be passed by value
//! into kernels.
//!
//! # Capability narrowing
//!
//! An accessor holding several tags can be constrained down to any single
//! member of its set, and never the other way around:
//!
//! ```
//! use vantage_core::{Accessor, PlainPtr, ReadAccess, WriteAccess};
//!
//! let mut data = vec![0.0f32; 4];
//! let handle = PlainPtr::from_view_mut(&mut data);
//! // SAFETY: exclusive borrow, so any tag set may ride on the handle.
//! let acc: Accessor<_, f32, usize, 1, (ReadAccess, WriteAccess)> =
//!     unsafe { Accessor::new(handle) };
//!
//! let read = acc.read_only();
//! assert_eq!(read.at(0), 0.0);
//!
//! let write = acc.write_only();
//! write.set(0, 1.5);
//! assert_eq!(read.at(0), 1.5);
//! ```
//!
//! Narrowing to a tag outside the set does not compile:
//!
//! ```compile_fail
//! use vantage_core::{Accessor, PlainPtr, ReadAccess};
//!
//! let mut data = vec![0.0f32; 4];
//! let acc: Accessor<_, f32, usize, 1, ReadAccess> =
//!     unsafe { Accessor::new(PlainPtr::from_view_mut(&mut data)) };
//! let write = acc.write_only(); // ReadAccess does not hold WriteAccess
//! ```
//!
//! Neither does loading through a write-only accessor:
//!
//! ```compile_fail
//! use vantage_core::{Accessor, PlainPtr, WriteAccess};
//!
//! let mut data = vec![0.0f32; 4];
//! let acc: Accessor<_, f32, usize, 1, WriteAccess> =
//!     unsafe { Accessor::new(PlainPtr::from_view_mut(&mut data)) };
//! let value = acc.at(0); // WriteAccess permits no loads
//! ```
//!
//! Nor wrapping an accessor inside another accessor:
//!
//! ```compile_fail
//! use vantage_core::{Accessor, PlainPtr, ReadAccess};
//!
//! let data = vec![0.0f32; 4];
//! let acc: Accessor<_, f32, usize, 1, ReadAccess> =
//!     unsafe { Accessor::new(PlainPtr::from_view(&data)) };
//! let again = PlainPtr::from_view(&acc); // an accessor is not a view
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::access::{
    AccessMode, AccessModes, ContainsMode, ReadAccess, ReadMode, ReadWriteAccess, WriteAccess,
    WriteMode,
};
use crate::handle::MemoryHandle;
use crate::idx::BufferIdx;

/// A capability-tagged view-of-a-view granting restricted element access.
///
/// Type parameters: the memory handle `H`, the element type `T`, the index
/// integer type `I`, the dimensionality `D` and the tag set `M`. The tag
/// set is never empty; accessors with more than one tag behave as an
/// accessor of their first tag.
pub struct Accessor<H, T, I, const D: usize, M> {
    handle: H,
    _marker: PhantomData<(T, I, M)>,
}

impl<H: Clone, T, I, const D: usize, M> Clone for Accessor<H, T, I, D, M> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            _marker: PhantomData,
        }
    }
}

impl<H: Copy, T, I, const D: usize, M> Copy for Accessor<H, T, I, D, M> {}

impl<H: PartialEq, T, I, const D: usize, M> PartialEq for Accessor<H, T, I, D, M> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<H: Eq, T, I, const D: usize, M> Eq for Accessor<H, T, I, D, M> {}

impl<H: fmt::Debug, T, I, const D: usize, M> fmt::Debug for Accessor<H, T, I, D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("handle", &self.handle)
            .field("modes", &std::any::type_name::<M>())
            .finish()
    }
}

impl<H, T, I, const D: usize, M> Accessor<H, T, I, D, M>
where
    H: MemoryHandle<T, I, D>,
    I: BufferIdx,
    M: AccessModes,
{
    /// Wrap a memory handle. The safe construction functions call this
    /// internally; user code normally goes through
    /// [`access_with`](crate::access_with) and friends, which pick the
    /// borrow strength from the requested tags.
    ///
    /// # Safety
    ///
    /// The handle must originate from a borrow at least as strong as the
    /// tag set demands: a set containing any write-capable tag requires a
    /// handle built from an exclusive borrow of the view. Pairing a
    /// shared-borrow handle with a write-capable set would let safe code
    /// mutate through an immutable borrow.
    ///
    /// That pairing therefore does not compile without an `unsafe` block:
    ///
    /// ```compile_fail
    /// use vantage_core::{Accessor, PlainPtr, WriteAccess};
    ///
    /// let data = vec![1.0f32; 4];
    /// let acc: Accessor<_, f32, usize, 1, WriteAccess> =
    ///     Accessor::new(PlainPtr::from_view(&data)); // missing unsafe
    /// acc.set(0, 2.0);
    /// ```
    pub unsafe fn new(handle: H) -> Self {
        Self {
            handle,
            _marker: PhantomData,
        }
    }

    /// The underlying memory handle.
    pub fn memory_handle(&self) -> H {
        self.handle
    }

    /// Number of elements per dimension of the wrapped memory object.
    pub fn extents(&self) -> [I; D] {
        self.handle.extents()
    }

    /// Constrain the accessor to a single member of its tag set.
    ///
    /// Same-tag constraining of a single-tag accessor passes the accessor
    /// through unchanged. Requesting a tag outside the set is a compile
    /// error (see [`ContainsMode`]).
    pub fn constrain<N, P>(self) -> Accessor<H, T, I, D, N>
    where
        N: AccessMode,
        M: ContainsMode<N, P>,
    {
        Accessor {
            handle: self.handle,
            _marker: PhantomData,
        }
    }

    /// Constrain to read-only access.
    pub fn read_only<P>(self) -> Accessor<H, T, I, D, ReadAccess>
    where
        M: ContainsMode<ReadAccess, P>,
    {
        self.constrain()
    }

    /// Constrain to write-only access.
    pub fn write_only<P>(self) -> Accessor<H, T, I, D, WriteAccess>
    where
        M: ContainsMode<WriteAccess, P>,
    {
        self.constrain()
    }

    /// Constrain to read-write access.
    pub fn read_write<P>(self) -> Accessor<H, T, I, D, ReadWriteAccess>
    where
        M: ContainsMode<ReadWriteAccess, P>,
    {
        self.constrain()
    }
}

// ================================================================================================
// Loads (head tag permits reads)
// ================================================================================================

impl<H, T, I, const D: usize, M> Accessor<H, T, I, D, M>
where
    H: MemoryHandle<T, I, D>,
    T: Copy,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode,
{
    /// Load the element at an N-dimensional index.
    pub fn load(&self, index: [I; D]) -> T {
        let offset = self.handle.linear_index(index);
        // SAFETY: linear_index bounds-checked the coordinates against the
        // extents of the live view the handle was built from.
        unsafe { *self.handle.as_ptr().add(offset) }
    }
}

// ================================================================================================
// Stores (head tag permits writes)
// ================================================================================================

impl<H, T, I, const D: usize, M> Accessor<H, T, I, D, M>
where
    H: MemoryHandle<T, I, D>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: WriteMode,
{
    /// Store an element at an N-dimensional index.
    ///
    /// Accessors are passed by value into kernels, so stores go through a
    /// shared receiver. Kernels writing the same element through
    /// overlapping accessors from several threads are the kernel author's
    /// responsibility, as on any device backend.
    pub fn store(&self, index: [I; D], value: T) {
        let offset = self.handle.linear_index(index);
        // SAFETY: bounds checked as in `load`; exclusive access to the view
        // was taken when the write-capable handle was built.
        unsafe { *self.handle.as_mut_ptr().add(offset) = value }
    }
}

// ================================================================================================
// Subscript by N-dimensional index array
// ================================================================================================

impl<H, T, I, const D: usize, M> Index<[I; D]> for Accessor<H, T, I, D, M>
where
    H: MemoryHandle<T, I, D>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode,
{
    type Output = T;

    fn index(&self, index: [I; D]) -> &T {
        let offset = self.handle.linear_index(index);
        // SAFETY: bounds checked; the view outlives the handle.
        unsafe { &*self.handle.as_ptr().add(offset) }
    }
}

impl<H, T, I, const D: usize, M> IndexMut<[I; D]> for Accessor<H, T, I, D, M>
where
    H: MemoryHandle<T, I, D>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode + WriteMode,
{
    fn index_mut(&mut self, index: [I; D]) -> &mut T {
        let offset = self.handle.linear_index(index);
        // SAFETY: bounds checked; the handle was built from an exclusive
        // borrow of the view.
        unsafe { &mut *self.handle.as_mut_ptr().add(offset) }
    }
}

// ================================================================================================
// Flat subscript, one-dimensional accessors
// ================================================================================================

impl<H, T, I, M> Index<I> for Accessor<H, T, I, 1, M>
where
    H: MemoryHandle<T, I, 1>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode,
{
    type Output = T;

    fn index(&self, index: I) -> &T {
        &self[[index]]
    }
}

impl<H, T, I, M> IndexMut<I> for Accessor<H, T, I, 1, M>
where
    H: MemoryHandle<T, I, 1>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode + WriteMode,
{
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self[[index]]
    }
}

// ================================================================================================
// Per-dimension coordinate access, ranks 1 to 3
// ================================================================================================

impl<H, T, I, M> Accessor<H, T, I, 1, M>
where
    H: MemoryHandle<T, I, 1>,
    T: Copy,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode,
{
    /// Load the element at coordinate `x`.
    pub fn at(&self, x: I) -> T {
        self.load([x])
    }
}

impl<H, T, I, M> Accessor<H, T, I, 1, M>
where
    H: MemoryHandle<T, I, 1>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: WriteMode,
{
    /// Store `value` at coordinate `x`.
    pub fn set(&self, x: I, value: T) {
        self.store([x], value)
    }
}

impl<H, T, I, M> Accessor<H, T, I, 2, M>
where
    H: MemoryHandle<T, I, 2>,
    T: Copy,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode,
{
    /// Load the element at coordinates `(y, x)`.
    pub fn at(&self, y: I, x: I) -> T {
        self.load([y, x])
    }
}

impl<H, T, I, M> Accessor<H, T, I, 2, M>
where
    H: MemoryHandle<T, I, 2>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: WriteMode,
{
    /// Store `value` at coordinates `(y, x)`.
    pub fn set(&self, y: I, x: I, value: T) {
        self.store([y, x], value)
    }
}

impl<H, T, I, M> Accessor<H, T, I, 3, M>
where
    H: MemoryHandle<T, I, 3>,
    T: Copy,
    I: BufferIdx,
    M: AccessModes,
    M::Head: ReadMode,
{
    /// Load the element at coordinates `(z, y, x)`.
    pub fn at(&self, z: I, y: I, x: I) -> T {
        self.load([z, y, x])
    }
}

impl<H, T, I, M> Accessor<H, T, I, 3, M>
where
    H: MemoryHandle<T, I, 3>,
    I: BufferIdx,
    M: AccessModes,
    M::Head: WriteMode,
{
    /// Store `value` at coordinates `(z, y, x)`.
    pub fn set(&self, z: I, y: I, x: I, value: T) {
        self.store([z, y, x], value)
    }
}

// ================================================================================================
// Classification
// ================================================================================================

/// Marker trait implemented by every [`Accessor`] instantiation and by
/// nothing else.
///
/// Diagnostics and dispatch code can use it as a bound to special-case
/// accessors. Non-accessor types do not implement it, views included:
///
/// ```compile_fail
/// fn takes_accessor<A: vantage_core::IsAccessor>(_: &A) {}
///
/// takes_accessor(&vec![1, 2, 3]); // a dynamic container is not an accessor
/// ```
///
/// ```compile_fail
/// fn takes_accessor<A: vantage_core::IsAccessor>(_: &A) {}
///
/// takes_accessor(&[1, 2, 3]); // a fixed-size container is not an accessor
/// ```
///
/// ```compile_fail
/// fn takes_accessor<A: vantage_core::IsAccessor>(_: &A) {}
///
/// let mut storage = vec![0i32; 6];
/// let view = vantage_core::SliceView::new(storage.as_mut_slice(), [2usize, 3]).unwrap();
/// takes_accessor(&view); // a raw view is not an accessor
/// ```
///
/// ```compile_fail
/// fn takes_accessor<A: vantage_core::IsAccessor>(_: &A) {}
///
/// let buffer: vantage_core::Buffer<f32, usize, 1> = vantage_core::Buffer::new([4]);
/// takes_accessor(&buffer); // an owned buffer is not an accessor
/// ```
///
/// ```compile_fail
/// fn takes_accessor<A: vantage_core::IsAccessor>(_: &A) {}
///
/// takes_accessor(&42i32); // a primitive is not an accessor
/// ```
pub trait IsAccessor {}

impl<H, T, I, const D: usize, M> IsAccessor for Accessor<H, T, I, D, M> {}

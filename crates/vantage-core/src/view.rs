//! The memory-object layer: views over dense N-dimensional element buffers
//!
//! Anything implementing [`View`] can be wrapped by an accessor. The trait
//! doubles as the "is a view" classification used during accessor
//! construction: accessors deliberately do not implement it, so wrapping an
//! accessor a second time is a compile error rather than a runtime check.

use crate::error::{Error, Result};
use crate::idx::BufferIdx;

/// A dense, strided, N-dimensional memory object.
///
/// Views describe storage; they never copy it. The descriptor consists of
/// per-dimension extents and pitches (element strides, row-major, innermost
/// dimension contiguous) plus the base pointer of the element buffer.
pub trait View<const D: usize> {
    /// Element type stored by the memory object.
    type Elem;

    /// Integral type used for indexing and index computations.
    type Idx: BufferIdx;

    /// Number of elements per dimension.
    fn extents(&self) -> [Self::Idx; D];

    /// Element stride per dimension. The innermost dimension has pitch 1.
    fn pitches(&self) -> [Self::Idx; D];

    /// Base pointer of the element buffer.
    fn as_ptr(&self) -> *const Self::Elem;

    /// Mutable base pointer of the element buffer.
    fn as_mut_ptr(&mut self) -> *mut Self::Elem;
}

/// Row-major pitches for the given extents, innermost dimension contiguous.
pub(crate) fn row_major_pitches<I: BufferIdx, const D: usize>(extents: &[I; D]) -> [I; D] {
    let mut pitches = [I::from_usize(1); D];
    let mut stride = 1usize;
    for d in (0..D).rev() {
        pitches[d] = I::from_usize(stride);
        stride *= extents[d].to_usize();
    }
    pitches
}

/// Total element count described by the extents.
pub(crate) fn element_count<I: BufferIdx, const D: usize>(extents: &[I; D]) -> usize {
    extents.iter().map(|e| e.to_usize()).product()
}

/// A borrowed plain-pointer view over externally-owned storage.
///
/// Wraps a mutable slice someone else owns and gives it an N-dimensional
/// shape. The slice length must match the extents exactly.
#[derive(Debug)]
pub struct SliceView<'a, T, I: BufferIdx, const D: usize> {
    data: &'a mut [T],
    extents: [I; D],
    pitches: [I; D],
}

impl<'a, T, I: BufferIdx, const D: usize> SliceView<'a, T, I, D> {
    /// Shape the borrowed slice as an N-dimensional view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtentMismatch`] if the slice length differs from
    /// the element count described by `extents`.
    pub fn new(data: &'a mut [T], extents: [I; D]) -> Result<Self> {
        let expected = element_count(&extents);
        if data.len() != expected {
            return Err(Error::ExtentMismatch {
                expected,
                actual: data.len(),
            });
        }
        let pitches = row_major_pitches(&extents);
        Ok(Self {
            data,
            extents,
            pitches,
        })
    }
}

impl<T, I: BufferIdx, const D: usize> View<D> for SliceView<'_, T, I, D> {
    type Elem = T;
    type Idx = I;

    fn extents(&self) -> [I; D] {
        self.extents
    }

    fn pitches(&self) -> [I; D] {
        self.pitches
    }

    fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }
}

// Standard sequence containers classify as 1-D views.

impl<T> View<1> for Vec<T> {
    type Elem = T;
    type Idx = usize;

    fn extents(&self) -> [usize; 1] {
        [self.len()]
    }

    fn pitches(&self) -> [usize; 1] {
        [1]
    }

    fn as_ptr(&self) -> *const T {
        self.as_slice().as_ptr()
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        self.as_mut_slice().as_mut_ptr()
    }
}

impl<T, const N: usize> View<1> for [T; N] {
    type Elem = T;
    type Idx = usize;

    fn extents(&self) -> [usize; 1] {
        [N]
    }

    fn pitches(&self) -> [usize; 1] {
        [1]
    }

    fn as_ptr(&self) -> *const T {
        self.as_slice().as_ptr()
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        self.as_mut_slice().as_mut_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_pitches() {
        assert_eq!(row_major_pitches(&[1024usize]), [1]);
        assert_eq!(row_major_pitches(&[4usize, 8]), [8, 1]);
        assert_eq!(row_major_pitches(&[2usize, 3, 4]), [12, 4, 1]);
    }

    #[test]
    fn test_slice_view_shapes_external_storage() {
        let mut storage = vec![0i32; 6];
        let view = SliceView::new(storage.as_mut_slice(), [2usize, 3]).unwrap();
        assert_eq!(view.extents(), [2, 3]);
        assert_eq!(view.pitches(), [3, 1]);
    }

    #[test]
    fn test_slice_view_rejects_wrong_length() {
        let mut storage = vec![0i32; 5];
        let result = SliceView::<i32, usize, 2>::new(storage.as_mut_slice(), [2, 3]);
        assert!(matches!(
            result,
            Err(Error::ExtentMismatch {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_std_containers_are_views() {
        fn extent_of<V: View<1, Idx = usize>>(view: &V) -> usize {
            view.extents()[0]
        }

        let v = vec![1.0f32; 16];
        assert_eq!(extent_of(&v), 16);

        let a = [0u8; 42];
        assert_eq!(extent_of(&a), 42);
    }
}

//! Owned, dense, pitched N-dimensional buffers
//!
//! `Buffer` is the host-owned memory object accessors most commonly wrap.
//! It owns its storage; accessors built over it are non-owning descriptors
//! whose borrows the compiler ties to the buffer's lifetime.

use crate::error::{Error, Result};
use crate::idx::BufferIdx;
use crate::view::{element_count, row_major_pitches, View};

/// An owned dense N-dimensional element buffer with row-major layout.
///
/// # Examples
///
/// ```
/// use vantage_core::Buffer;
///
/// let mut buffer: Buffer<f32, usize, 2> = Buffer::new([4, 8]);
/// assert_eq!(buffer.extents(), [4, 8]);
/// assert_eq!(buffer.len(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct Buffer<T, I: BufferIdx, const D: usize> {
    data: Vec<T>,
    extents: [I; D],
    pitches: [I; D],
}

impl<T, I: BufferIdx, const D: usize> Buffer<T, I, D> {
    /// Allocate a buffer of the given extents, default-initialized.
    pub fn new(extents: [I; D]) -> Self
    where
        T: Default + Clone,
    {
        let len = element_count(&extents);
        Self {
            data: vec![T::default(); len],
            extents,
            pitches: row_major_pitches(&extents),
        }
    }

    /// Take ownership of existing data and shape it to the given extents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtentMismatch`] if the element count of `data`
    /// differs from the count described by `extents`.
    pub fn from_vec(extents: [I; D], data: Vec<T>) -> Result<Self> {
        let expected = element_count(&extents);
        if data.len() != expected {
            return Err(Error::ExtentMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            extents,
            pitches: row_major_pitches(&extents),
        })
    }

    /// Number of elements per dimension.
    pub fn extents(&self) -> [I; D] {
        self.extents
    }

    /// Element stride per dimension.
    pub fn pitches(&self) -> [I; D] {
        self.pitches
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major slice over all elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Copy data from a host slice into the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtentMismatch`] if the slice length does not match
    /// the buffer's element count.
    #[tracing::instrument(skip(self, src), fields(
        elements = src.len(),
        bytes = std::mem::size_of_val(src),
    ))]
    pub fn copy_from_slice(&mut self, src: &[T]) -> Result<()>
    where
        T: Copy,
    {
        if src.len() != self.data.len() {
            return Err(Error::ExtentMismatch {
                expected: self.data.len(),
                actual: src.len(),
            });
        }
        self.data.copy_from_slice(src);
        tracing::debug!("buffer_copy_from_slice");
        Ok(())
    }

    /// Copy the buffer contents out to a `Vec` in row-major order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.to_vec()
    }
}

impl<T: bytemuck::Pod, I: BufferIdx, const D: usize> Buffer<T, I, D> {
    /// Zero-copy byte view over the element storage.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Zero-copy mutable byte view over the element storage.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }
}

impl<T, I: BufferIdx, const D: usize> View<D> for Buffer<T, I, D> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_basic_properties() {
        let buffer: Buffer<f32, usize, 1> = Buffer::new([1024]);
        assert_eq!(buffer.extents(), [1024]);
        assert_eq!(buffer.pitches(), [1]);
        assert_eq!(buffer.len(), 1024);
        assert!(!buffer.is_empty());
        assert!(buffer.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_buffer_two_dimensional_pitches() {
        let buffer: Buffer<i32, u32, 2> = Buffer::new([4, 8]);
        assert_eq!(buffer.pitches(), [8, 1]);
        assert_eq!(buffer.len(), 32);
    }

    #[test]
    fn test_from_vec_round_trip() {
        let buffer = Buffer::<i32, usize, 1>::from_vec([3], vec![1, 2, 3]).unwrap();
        assert_eq!(buffer.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_from_vec_extent_mismatch() {
        let result = Buffer::<i32, usize, 1>::from_vec([4], vec![1, 2, 3]);
        match result {
            Err(Error::ExtentMismatch { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            _ => panic!("expected ExtentMismatch"),
        }
    }

    #[test]
    fn test_copy_from_slice_size_mismatch() {
        let mut buffer: Buffer<f32, usize, 1> = Buffer::new([8]);
        let result = buffer.copy_from_slice(&[0.0f32; 4]);
        assert!(result.is_err());
    }

    #[test]
    fn test_byte_view_matches_element_view() {
        let mut buffer: Buffer<u16, usize, 1> = Buffer::new([4]);
        assert_eq!(buffer.as_bytes().len(), 8);
        buffer.as_bytes_mut()[0] = 0xff;
        assert_eq!(buffer.to_vec()[0], u16::from_ne_bytes([0xff, 0x00]));
    }
}

//! # Vantage Core
//!
//! Capability-tagged memory accessors for heterogeneous compute kernels.
//!
//! Kernels should not receive raw buffers: a buffer says nothing about what
//! the kernel is allowed to do with it. Vantage wraps memory objects in
//! [`Accessor`]s, which carry the permitted access modes in their type.
//! A kernel whose signature asks for a read-only accessor cannot store
//! through it; the program does not compile. There is no runtime permission
//! machinery at all.
//!
//! ## Core Components
//!
//! - **Access modes** ([`ReadAccess`], [`WriteAccess`], [`ReadWriteAccess`]):
//!   zero-size tags naming a capability
//! - **[`Accessor`]**: a copyable, non-owning wrapper pairing a memory
//!   handle with a tag set; supports flat, array and per-dimension indexing
//! - **[`View`]**: the memory-object abstraction ([`Buffer`], [`SliceView`],
//!   `Vec<T>` and `[T; N]` all qualify)
//! - **[`BuildAccessor`]**: the per-accelerator customization point that
//!   picks the handle type accessors carry
//!
//! ## Example
//!
//! ```
//! use vantage_core::{Accessor, Buffer, PlainPtr, ReadAccess, WriteAccess};
//!
//! let mut buffer: Buffer<f32, usize, 1> = Buffer::new([1024]);
//! // SAFETY: exclusive borrow, so the read-write tag set is permitted.
//! let acc: Accessor<_, f32, usize, 1, (ReadAccess, WriteAccess)> =
//!     unsafe { Accessor::new(PlainPtr::from_view_mut(&mut buffer)) };
//!
//! acc.write_only().set(0, 42.0);
//! assert_eq!(acc.at(0), 42.0);
//!
//! // Hand a read-only view of the same memory to a consumer.
//! let read = acc.read_only();
//! assert_eq!(read[0], 42.0);
//! ```

pub mod access;
pub mod accessor;
pub mod buffer;
pub mod builder;
pub mod error;
pub mod handle;
pub mod idx;
pub mod view;

pub use access::{
    AccessMode, AccessModes, ContainsMode, ReadAccess, ReadMode, ReadWriteAccess, WriteAccess,
    WriteMode,
};
pub use accessor::{Accessor, IsAccessor};
pub use buffer::Buffer;
pub use builder::{access, access_with, read_access, write_access, Accelerator, BuildAccessor};
pub use error::{Error, Result};
pub use handle::{MemoryHandle, PlainPtr};
pub use idx::BufferIdx;
pub use view::{SliceView, View};

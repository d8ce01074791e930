//! Access-mode tags and tag-set machinery
//!
//! Access modes are zero-size marker types that label an accessor with the
//! operations it permits. They only ever appear in type-parameter position;
//! nothing branches on them at runtime. A tag *set* is either a single tag
//! or a tuple of tags, and an accessor carrying several tags behaves like
//! an accessor of its first tag until it is constrained down to one.

mod sealed {
    pub trait Sealed {}
}

/// Access tag type indicating read-only access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadAccess;

/// Access tag type indicating write-only access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteAccess;

/// Access tag type indicating read-write access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadWriteAccess;

/// One of the three access-mode tags.
///
/// The set of modes is closed; this trait is sealed and implemented exactly
/// for [`ReadAccess`], [`WriteAccess`] and [`ReadWriteAccess`].
pub trait AccessMode: sealed::Sealed + Copy + 'static {}

impl sealed::Sealed for ReadAccess {}
impl sealed::Sealed for WriteAccess {}
impl sealed::Sealed for ReadWriteAccess {}

impl AccessMode for ReadAccess {}
impl AccessMode for WriteAccess {}
impl AccessMode for ReadWriteAccess {}

/// Access modes that permit loads.
pub trait ReadMode: AccessMode {}

impl ReadMode for ReadAccess {}
impl ReadMode for ReadWriteAccess {}

/// Access modes that permit stores.
pub trait WriteMode: AccessMode {}

impl WriteMode for WriteAccess {}
impl WriteMode for ReadWriteAccess {}

/// An ordered, non-empty set of access modes.
///
/// A single tag is a set of one; tuples of two or three tags are larger
/// sets. `Head` is the first tag in the set: an accessor with multiple
/// access modes behaves as an accessor of its head mode for indexing, while
/// the full set stays available for [`ContainsMode`] checks.
pub trait AccessModes: sealed::Sealed + Copy + 'static {
    /// First tag in the set; selects the indexing behavior.
    type Head: AccessMode;
}

impl AccessModes for ReadAccess {
    type Head = ReadAccess;
}

impl AccessModes for WriteAccess {
    type Head = WriteAccess;
}

impl AccessModes for ReadWriteAccess {
    type Head = ReadWriteAccess;
}

impl<A: AccessMode, B: AccessMode> sealed::Sealed for (A, B) {}
impl<A: AccessMode, B: AccessMode, C: AccessMode> sealed::Sealed for (A, B, C) {}

impl<A: AccessMode, B: AccessMode> AccessModes for (A, B) {
    type Head = A;
}

impl<A: AccessMode, B: AccessMode, C: AccessMode> AccessModes for (A, B, C) {
    type Head = A;
}

/// Type-level slot indices disambiguating [`ContainsMode`] impls.
///
/// A tag may occur at more than one position of a set; the slot parameter
/// keeps the membership impls coherent. Callers never name these: the slot
/// is inferred.
#[derive(Debug, Clone, Copy)]
pub struct Slot0;

/// Second slot of a tag set. See [`Slot0`].
#[derive(Debug, Clone, Copy)]
pub struct Slot1;

/// Third slot of a tag set. See [`Slot0`].
#[derive(Debug, Clone, Copy)]
pub struct Slot2;

/// Compile-time membership of a tag in a tag set.
///
/// `M: ContainsMode<N, P>` holds when the mode `N` occurs in the set `M`
/// (at slot `P`). Constraining an accessor to a mode outside its set leaves
/// this bound unsatisfied, which is a compile error.
#[diagnostic::on_unimplemented(
    message = "the accessor must already hold the requested access mode `{Mode}`",
    label = "`{Mode}` is not a member of the tag set `{Self}`",
    note = "capability narrowing only restricts a tag set; it can never widen it"
)]
pub trait ContainsMode<Mode: AccessMode, Slot> {}

impl ContainsMode<ReadAccess, Slot0> for ReadAccess {}
impl ContainsMode<WriteAccess, Slot0> for WriteAccess {}
impl ContainsMode<ReadWriteAccess, Slot0> for ReadWriteAccess {}

impl<A: AccessMode, B: AccessMode> ContainsMode<A, Slot0> for (A, B) {}
impl<A: AccessMode, B: AccessMode> ContainsMode<B, Slot1> for (A, B) {}

impl<A: AccessMode, B: AccessMode, C: AccessMode> ContainsMode<A, Slot0> for (A, B, C) {}
impl<A: AccessMode, B: AccessMode, C: AccessMode> ContainsMode<B, Slot1> for (A, B, C) {}
impl<A: AccessMode, B: AccessMode, C: AccessMode> ContainsMode<C, Slot2> for (A, B, C) {}

//! Accessor construction: the per-accelerator customization point
//!
//! Views do not know how an accelerator wants to address their storage, so
//! accessor construction is routed through [`BuildAccessor`], a trait each
//! accelerator implements per view family. The free functions in this
//! module are the user-facing entry points; they pick the handle type from
//! the accelerator's impl and fix the tag set from the caller's request.

use crate::access::{AccessModes, ReadAccess, ReadWriteAccess};
use crate::accessor::Accessor;
use crate::handle::MemoryHandle;
use crate::view::View;

/// A compute accelerator, selected by type.
///
/// Accelerators are zero-size type tags; every backend crate supplies its
/// own. The name is used in log spans.
pub trait Accelerator: Copy + Default + 'static {
    /// Human-readable accelerator name.
    const NAME: &'static str;
}

/// Per-accelerator accessor construction.
///
/// An accelerator implements this for every view family it can address,
/// choosing the [`MemoryHandle`] its accessors carry. The handle borrows
/// the view for `'v`; the borrow checker keeps the view alive for as long
/// as any accessor built from it.
///
/// # Safety
///
/// Implementations must return handles describing exactly the storage of
/// the given view, and `build` handles must be safe to pair with read-only
/// tag sets while `build_mut` handles must be safe to pair with any tag
/// set. The construction functions below rely on this when they call the
/// unsafe [`Accessor::new`].
pub unsafe trait BuildAccessor<'v, V, const D: usize>: Accelerator
where
    V: View<D> + 'v,
{
    /// Handle type the accessors of this accelerator carry.
    type Handle: MemoryHandle<V::Elem, V::Idx, D>;

    /// Describe a shared view. Only read-only accessors may be built over
    /// the result.
    fn build(view: &'v V) -> Self::Handle;

    /// Describe an exclusive view for write-capable accessors.
    fn build_mut(view: &'v mut V) -> Self::Handle;
}

/// Build an accessor over a view with an explicit tag set.
///
/// The set may hold one, two or three tags; indexing follows the first.
/// Wrapping an accessor again is a compile error since accessors are not
/// views.
pub fn access_with<'v, A, M, V, const D: usize>(
    view: &'v mut V,
) -> Accessor<A::Handle, V::Elem, V::Idx, D, M>
where
    A: BuildAccessor<'v, V, D>,
    M: AccessModes,
    V: View<D> + 'v,
{
    // SAFETY: build_mut starts from an exclusive borrow, which supports
    // every tag set (BuildAccessor contract).
    unsafe { Accessor::new(A::build_mut(view)) }
}

/// Build a read-write accessor over a view.
pub fn access<'v, A, V, const D: usize>(
    view: &'v mut V,
) -> Accessor<A::Handle, V::Elem, V::Idx, D, ReadWriteAccess>
where
    A: BuildAccessor<'v, V, D>,
    V: View<D> + 'v,
{
    access_with::<A, ReadWriteAccess, V, D>(view)
}

/// Build a read-only accessor over a shared view.
pub fn read_access<'v, A, V, const D: usize>(
    view: &'v V,
) -> Accessor<A::Handle, V::Elem, V::Idx, D, ReadAccess>
where
    A: BuildAccessor<'v, V, D>,
    V: View<D> + 'v,
{
    // SAFETY: the shared-borrow handle is paired with ReadAccess only
    // (BuildAccessor contract).
    unsafe { Accessor::new(A::build(view)) }
}

/// Build a write-only accessor over a view.
pub fn write_access<'v, A, V, const D: usize>(
    view: &'v mut V,
) -> Accessor<A::Handle, V::Elem, V::Idx, D, crate::access::WriteAccess>
where
    A: BuildAccessor<'v, V, D>,
    V: View<D> + 'v,
{
    access_with::<A, crate::access::WriteAccess, V, D>(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{ReadAccess, WriteAccess};
    use crate::handle::PlainPtr;

    #[derive(Debug, Clone, Copy, Default)]
    struct TestAccel;

    impl Accelerator for TestAccel {
        const NAME: &'static str = "test";
    }

    // SAFETY: PlainPtr describes the given view verbatim; from_view_mut is
    // used for the exclusive path.
    unsafe impl<'v, V, const D: usize> BuildAccessor<'v, V, D> for TestAccel
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

    #[test]
    fn test_access_builds_read_write() {
        let mut data = vec![0.0f32; 8];
        let acc = access::<TestAccel, _, 1>(&mut data);
        acc.set(5, 2.0);
        assert_eq!(acc.at(5), 2.0);
    }

    #[test]
    fn test_read_access_over_shared_view() {
        let data = vec![3i32; 4];
        let acc = read_access::<TestAccel, _, 1>(&data);
        assert_eq!(acc.at(2), 3);
    }

    #[test]
    fn test_write_access_then_narrow_is_identity() {
        let mut data = vec![0i32; 4];
        let acc = write_access::<TestAccel, _, 1>(&mut data);
        acc.write_only().set(1, 9);
        drop(acc);
        assert_eq!(data[1], 9);
    }

    #[test]
    fn test_explicit_tag_set_follows_head() {
        let mut data = vec![1.0f32; 4];
        let acc = access_with::<TestAccel, (ReadAccess, WriteAccess), _, 1>(&mut data);
        // Head is ReadAccess, so loads work directly.
        assert_eq!(acc.at(0), 1.0);
        // Stores require narrowing to the WriteAccess member first.
        acc.write_only().set(0, 2.0);
        assert_eq!(acc.read_only().at(0), 2.0);
    }
}

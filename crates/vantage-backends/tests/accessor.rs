//! End-to-end accessor tests over the CPU accelerators

use vantage_backends::{CpuSerial, CpuThreads, Launch, WorkDiv};
use vantage_core::{
    access, read_access, write_access, Accessor, Buffer, IsAccessor, PlainPtr, ReadAccess,
    ReadWriteAccess, SliceView, View, WriteAccess,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn extent_of<V: View<1, Idx = usize>>(view: &V) -> usize {
    view.extents()[0]
}

#[test]
fn buffers_and_containers_classify_as_views() {
    let buffer: Buffer<f32, usize, 1> = Buffer::new([16]);
    assert_eq!(extent_of(&buffer), 16);

    let mut storage = vec![0i32; 6];
    let slice_view = SliceView::new(storage.as_mut_slice(), [6usize]).unwrap();
    assert_eq!(extent_of(&slice_view), 6);

    let v = vec![0u8; 3];
    assert_eq!(extent_of(&v), 3);

    let a = [0u8; 4];
    assert_eq!(extent_of(&a), 4);
}

fn classify_accessor<A: IsAccessor>(_: &A) {}

#[test]
fn accessors_classify_as_accessors_not_views() {
    let data = vec![0.0f32; 4];
    let acc = read_access::<CpuSerial, _, 1>(&data);
    classify_accessor(&acc);
    classify_accessor(&acc.read_only());
    // The complementary fact, that accessors are not views and cannot be
    // re-wrapped, is a compile_fail doctest on vantage_core::Accessor.
}

// Kernels with fully spelled-out accessor signatures, the way library code
// receiving accessors from callers is written.

fn fill_kernel(
    index: [usize; 1],
    data: Accessor<PlainPtr<'_, f32, usize, 1>, f32, usize, 1, WriteAccess>,
) {
    data.set(index[0], index[0] as f32);
}

fn sum_kernel(
    index: [usize; 1],
    data: Accessor<PlainPtr<'_, f32, usize, 1>, f32, usize, 1, ReadAccess>,
    total: &std::sync::atomic::AtomicU64,
) {
    let value = data.at(index[0]) as u64;
    total.fetch_add(value, std::sync::atomic::Ordering::Relaxed);
}

#[test]
fn explicit_signature_kernels_round_trip() {
    init_tracing();
    let mut buffer: Buffer<f32, usize, 1> = Buffer::new([64]);
    {
        let out = write_access::<CpuSerial, _, 1>(&mut buffer);
        CpuSerial::exec(&WorkDiv::linear(64), move |index| fill_kernel(index, out)).unwrap();
    }

    let total = std::sync::atomic::AtomicU64::new(0);
    let input = read_access::<CpuSerial, _, 1>(&buffer);
    CpuSerial::exec(&WorkDiv::linear(64), |index| {
        sum_kernel(index, input, &total)
    })
    .unwrap();

    assert_eq!(total.into_inner(), (0..64).sum::<u64>());
}

#[test]
fn all_three_indexing_forms_address_the_same_elements() {
    let mut buffer: Buffer<f32, usize, 1> = Buffer::new([1024]);
    {
        let data = access::<CpuSerial, _, 1>(&mut buffer);
        CpuSerial::exec(&WorkDiv::single(), move |[_i]: [usize; 1]| {
            let mut a = data;
            a[1] = 1.0;
            a.set(2, 2.0);
            a[[3]] = 3.0;
        })
        .unwrap();
    }

    let expected: Vec<f32> = (0..1024)
        .map(|i| match i {
            1 => 1.0,
            2 => 2.0,
            3 => 3.0,
            _ => 0.0,
        })
        .collect();
    assert_eq!(buffer.to_vec(), expected);
}

#[test]
fn flat_and_array_reads_agree_with_coordinate_reads() {
    let mut buffer = Buffer::<f32, usize, 1>::from_vec([8], (0..8).map(|i| i as f32).collect())
        .unwrap();
    let data = access::<CpuSerial, _, 1>(&mut buffer);
    for i in 0..8 {
        assert_eq!(data[i], data.at(i));
        assert_eq!(data[[i]], data.at(i));
    }
}

// An accessor adapter applying a projection to every load, written against
// the read capability only.

#[derive(Clone, Copy)]
struct Projected<A, F> {
    inner: A,
    projection: F,
}

impl<A, F> Projected<A, F>
where
    A: Copy,
    F: Fn(i32) -> i32 + Copy,
{
    fn new(inner: A, projection: F) -> Self {
        Self { inner, projection }
    }

    fn at(&self, i: usize) -> i32
    where
        A: std::ops::Index<usize, Output = i32>,
    {
        (self.projection)(self.inner[i])
    }
}

#[test]
fn projection_accessor_doubles_on_read() {
    let mut src: Buffer<i32, usize, 1> = Buffer::new([1]);
    src.copy_from_slice(&[42]).unwrap();
    let mut dst: Buffer<i32, usize, 1> = Buffer::new([1]);

    {
        let input = Projected::new(read_access::<CpuSerial, _, 1>(&src), |v: i32| 2 * v);
        let output = write_access::<CpuSerial, _, 1>(&mut dst);
        CpuSerial::exec(&WorkDiv::single(), move |[i]| {
            output.set(i, input.at(i));
        })
        .unwrap();
    }

    assert_eq!(dst.to_vec(), vec![84]);
}

#[test]
fn constraining_reaches_every_member_of_the_tag_set() {
    let mut data = vec![0.0f32; 4];
    let acc = vantage_core::access_with::<
        CpuSerial,
        (ReadAccess, WriteAccess, ReadWriteAccess),
        _,
        1,
    >(&mut data);

    let w = acc.write_only();
    w.set(0, 5.0);

    let r = acc.read_only();
    assert_eq!(r.at(0), 5.0);

    let rw = acc.read_write();
    rw.set(0, rw.at(0) + 1.0);
    assert_eq!(r.at(0), 6.0);

    // Same-tag constraining of an already-narrow accessor is the identity.
    assert_eq!(r.read_only(), r);
    assert_eq!(w.write_only(), w);
    assert_eq!(rw.read_write(), rw);
}

#[test]
fn multi_tag_accessor_indexes_as_its_first_tag() {
    let mut data = vec![9.0f32; 4];
    {
        let acc = vantage_core::access_with::<CpuSerial, (ReadAccess, WriteAccess), _, 1>(
            &mut data,
        );
        // Head ReadAccess: loads work without narrowing.
        assert_eq!(acc.at(2), 9.0);
        // Stores need the WriteAccess member, reached by narrowing.
        acc.write_only().set(2, 10.0);
        assert_eq!(acc.at(2), 10.0);
    }
    assert_eq!(data[2], 10.0);
}

#[test]
fn default_construction_yields_read_write() {
    let mut data = vec![0.0f32; 4];
    let acc = access::<CpuSerial, _, 1>(&mut data);
    // Both capabilities present without any narrowing.
    acc.set(1, 3.5);
    assert_eq!(acc.at(1), 3.5);
    // And the accessor is already its own read-write narrowing.
    assert_eq!(acc.read_write(), acc);
}

#[test]
fn parallel_writers_cover_the_whole_buffer() {
    let mut buffer: Buffer<u64, usize, 1> = Buffer::new([4096]);
    {
        let out = write_access::<CpuThreads, _, 1>(&mut buffer);
        CpuThreads::exec(&WorkDiv::new([16usize], [256]), move |[i]| {
            out.set(i, (i as u64) * 3);
        })
        .unwrap();
    }
    assert!(buffer
        .as_slice()
        .iter()
        .enumerate()
        .all(|(i, &v)| v == (i as u64) * 3));
}

#[test]
fn two_dimensional_kernel_addresses_by_coordinates() {
    let mut buffer: Buffer<i32, usize, 2> = Buffer::new([8, 16]);
    {
        let out = access::<CpuSerial, _, 2>(&mut buffer);
        CpuSerial::exec(&WorkDiv::new([8usize, 1], [1, 16]), move |[y, x]| {
            out.set(y, x, (y * 100 + x) as i32);
        })
        .unwrap();
    }
    let data = read_access::<CpuSerial, _, 2>(&buffer);
    assert_eq!(data.at(3, 7), 307);
    assert_eq!(data[[3, 7]], 307);
}

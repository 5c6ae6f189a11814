//! Integration tests: ownership modes, moves and copies across the three
//! wrapper kinds.

use duplex_core::{MatrixHandle, VectorHandle};
use duplex_test_utils::{numbered_matrix, ramp, ramp_handle, tight_config};
use duplex_wrap::{ContainerError, Matrix, Mode, Vector, VectorList};

// ── Mode after construction ─────────────────────────────────────

#[test]
fn fresh_wrappers_own_and_aliases_alias() {
    assert_eq!(Vector::<f64>::new().mode(), Mode::Owning);
    assert_eq!(Vector::<f64>::with_len(4).unwrap().mode(), Mode::Owning);
    assert_eq!(ramp(3).clone().mode(), Mode::Owning);
    assert_eq!(Matrix::<i8>::with_dims(2, 2).unwrap().mode(), Mode::Owning);
    assert_eq!(VectorList::<u8>::new().mode(), Mode::Owning);

    let mut vh = ramp_handle(2);
    assert_eq!(Vector::alias(&mut vh).mode(), Mode::Aliasing);
    let mut mh = MatrixHandle::<u8>::init(1, 1).unwrap();
    assert_eq!(Matrix::alias(&mut mh).mode(), Mode::Aliasing);
}

#[test]
fn capture_adopts_without_copying() {
    let handle = ramp_handle(5);
    let before = handle.as_slice().as_ptr();
    let v = Vector::capture(handle);
    assert!(v.is_owning());
    assert_eq!(v.as_slice().as_ptr(), before);
}

// ── Move ────────────────────────────────────────────────────────

#[test]
fn move_then_read() {
    let mut a = ramp(4);
    let ptr = a.as_slice().as_ptr();
    let b = a.take();
    assert_eq!(b, [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(b.as_slice().as_ptr(), ptr);
    assert_eq!(a.len(), 0);
    assert!(a.is_moved_from());
}

#[test]
fn plain_rust_move_keeps_storage() {
    let a = ramp(2);
    let ptr = a.as_slice().as_ptr();
    let b = a;
    assert_eq!(b.as_slice().as_ptr(), ptr);
}

#[test]
fn moved_from_matrix_reports_precondition() {
    let mut m = numbered_matrix(2, 2);
    let _moved = m.take();
    assert_eq!(m.resize(3, 3), Err(ContainerError::moved_from()));
}

// ── Copy ────────────────────────────────────────────────────────

#[test]
fn copy_then_mutate() {
    let a = ramp(3);
    let mut b = a.clone();
    b[0] = 42.0;
    assert_eq!(a[0], 1.0);
    assert_eq!(b[0], 42.0);
}

#[test]
fn try_clone_keeps_limits() {
    let a = Vector::from_slice_in(&tight_config(3), &[1, 2, 3]).unwrap();
    let b = a.try_clone().unwrap();
    assert_eq!(a, b);
    assert_eq!(b.max_size(), 3);
}

#[test]
fn matrix_copy_then_mutate() {
    let a = numbered_matrix(2, 3);
    let mut b = a.clone();
    b[(1, 2)] = 0.0;
    assert_eq!(a[(1, 2)], 6.0);
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn erase_middle_element() {
    let mut v = Vector::from([1.0, 2.0, 3.0]);
    v.erase(1);
    assert_eq!(v.len(), 2);
    assert_eq!(v, Vector::from([1.0, 3.0]));
}

#[test]
fn matrix_fill_resize_scenario() {
    let mut m = Matrix::<f64>::with_dims(2, 3).unwrap();
    let mut k = 0.0;
    for i in 0..2 {
        for j in 0..3 {
            k += 1.0;
            m[(i, j)] = k;
        }
    }
    assert_eq!(m[(1, 2)], 6.0);
    m.resize(3, 3).unwrap();
    assert_eq!(m[(0, 0)], 1.0);
}

#[test]
fn reserve_within_capacity_changes_nothing() {
    let mut v = ramp(8);
    let (len, cap) = (v.len(), v.capacity());
    v.reserve(cap).unwrap();
    v.reserve(0).unwrap();
    assert_eq!((v.len(), v.capacity()), (len, cap));
    assert_eq!(v, ramp(8));
}

#[test]
fn equality_is_structural() {
    let a = Vector::from([1, 2, 3]);
    let mut h = VectorHandle::from(vec![1, 2, 3]);
    let b = Vector::alias(&mut h);
    assert_eq!(a, b);
    assert_ne!(a, Vector::from([1, 2, 3, 4]));
    assert_ne!(Vector::<i32>::new(), Vector::from([0]));
}

#[test]
fn failed_growth_leaves_vector_intact() {
    let mut v = Vector::from_slice_in(&tight_config(4), &[1u8, 2, 3, 4]).unwrap();
    match v.push_back(5) {
        Err(ContainerError::AllocationFailed { source }) => {
            assert!(source.is_allocation_failure());
        }
        other => panic!("expected allocation failure, got {other:?}"),
    }
    assert_eq!(v, [1, 2, 3, 4]);
}

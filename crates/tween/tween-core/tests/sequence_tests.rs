use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use tween_core::{Group, Sequence, Tween, Value};

fn scalar_slot() -> Rc<RefCell<f32>> {
    Rc::new(RefCell::new(f32::NAN))
}

fn scalar_tween(from: f32, to: f32, duration: f32, slot: &Rc<RefCell<f32>>) -> Tween {
    let slot = Rc::clone(slot);
    Tween::new(
        Value::Scalar(from),
        Value::Scalar(to),
        duration,
        move |v| {
            if let Value::Scalar(x) = v {
                *slot.borrow_mut() = *x;
            }
        },
    )
    .expect("matching kinds")
}

/// it should not start an appended step before the previous one completes
#[test]
fn append_is_strictly_ordered() {
    let a = scalar_slot();
    let b = scalar_slot();
    let mut seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &a))
        .append(scalar_tween(0.0, 1.0, 2.0, &b));

    seq.advance(0.5);
    assert_eq!(*a.borrow(), 0.5);
    assert!(b.borrow().is_nan(), "B must not have been touched yet");

    seq.advance(0.5);
    assert_eq!(*a.borrow(), 1.0);

    seq.advance(1.0);
    assert_eq!(*b.borrow(), 0.5);
    assert!(!seq.is_complete());

    seq.advance(1.0);
    assert_eq!(*b.borrow(), 1.0);
    assert!(seq.is_complete());
}

/// it should carry leftover tick time into the next step so totals are exact
#[test]
fn overflow_carries_into_the_next_step() {
    let a = scalar_slot();
    let b = scalar_slot();
    let mut seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &a))
        .append(scalar_tween(0.0, 1.0, 2.0, &b));

    // 1.5 = 1.0 for A plus 0.5 into B.
    seq.advance(1.5);
    assert_eq!(*a.borrow(), 1.0);
    assert_eq!(*b.borrow(), 0.25);

    // Total duration is exactly 3.0: the second 1.5 finishes B dead on.
    let overflow = seq.advance(1.5);
    assert_eq!(*b.borrow(), 1.0);
    assert!(seq.is_complete());
    assert_eq!(overflow, 0.0);

    // Finished sequences pass dt straight through.
    assert_eq!(seq.advance(0.25), 0.25);
}

/// it should run joined tweens in parallel and finish with the longest child
#[test]
fn join_runs_in_parallel() {
    let a = scalar_slot();
    let b = scalar_slot();
    let mut seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &a))
        .join(scalar_tween(0.0, 1.0, 2.0, &b));
    assert_eq!(seq.len(), 1);

    // Both start at once.
    seq.advance(0.5);
    assert_eq!(*a.borrow(), 0.5);
    assert_eq!(*b.borrow(), 0.25);

    // A is clamped to its end value while B keeps going.
    seq.advance(0.5);
    assert_eq!(*a.borrow(), 1.0);
    assert_eq!(*b.borrow(), 0.5);
    seq.advance(0.5);
    assert_eq!(*a.borrow(), 1.0);
    assert!(!seq.is_complete());

    // The composite completes at t = 2.0, the longer child's end.
    seq.advance(0.5);
    assert_eq!(*b.borrow(), 1.0);
    assert!(seq.is_complete());
}

/// it should extend the same group on consecutive joins and close it on append
#[test]
fn consecutive_joins_share_one_group() {
    let s = scalar_slot();
    let seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &s))
        .join(scalar_tween(0.0, 1.0, 1.0, &s))
        .join(scalar_tween(0.0, 1.0, 1.0, &s));
    assert_eq!(seq.len(), 1);

    let seq = seq
        .append(scalar_tween(0.0, 1.0, 1.0, &s))
        .join(scalar_tween(0.0, 1.0, 1.0, &s));
    assert_eq!(seq.len(), 2);
}

/// it should treat a join into an empty sequence as the first step
#[test]
fn join_on_empty_starts_a_step() {
    let a = scalar_slot();
    let mut seq = Sequence::new().join(scalar_tween(0.0, 1.0, 1.0, &a));
    assert_eq!(seq.len(), 1);
    seq.advance(1.0);
    assert_eq!(*a.borrow(), 1.0);
    assert!(seq.is_complete());
}

/// it should fire appended callbacks in order, gated by intervals
#[test]
fn intervals_and_callbacks() {
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let l1 = Rc::clone(&log);
    let l2 = Rc::clone(&log);
    let mut seq = Sequence::new()
        .append_callback(move || l1.borrow_mut().push("first"))
        .append_interval(1.0)
        .append_callback(move || l2.borrow_mut().push("second"));

    seq.advance(0.5);
    assert_eq!(*log.borrow(), vec!["first"]);
    seq.advance(0.5);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
    assert!(seq.is_complete());
}

/// it should fast-forward remaining steps in order on complete()
#[test]
fn complete_fast_forwards_in_order() {
    let a = scalar_slot();
    let b = scalar_slot();
    let fired = Rc::new(Cell::new(0u32));
    let f = Rc::clone(&fired);
    let mut seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &a))
        .append(scalar_tween(0.0, 5.0, 2.0, &b))
        .on_complete(move || f.set(f.get() + 1));

    seq.advance(0.25);
    seq.complete();
    seq.complete(); // idempotent
    assert_eq!(*a.borrow(), 1.0);
    assert_eq!(*b.borrow(), 5.0);
    assert!(seq.is_complete());
    assert_eq!(fired.get(), 1);
}

/// it should freeze all values in place on kill()
#[test]
fn kill_freezes_the_sequence() {
    let a = scalar_slot();
    let b = scalar_slot();
    let mut seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &a))
        .append(scalar_tween(0.0, 1.0, 1.0, &b));
    seq.advance(0.5);
    seq.kill();
    assert!(seq.is_killed());
    assert_eq!(seq.advance(10.0), 10.0);
    assert_eq!(*a.borrow(), 0.5);
    assert!(b.borrow().is_nan());
}

/// it should complete a group whose remaining child was killed early
#[test]
fn killed_child_does_not_stall_a_group() {
    let a = scalar_slot();
    let b = scalar_slot();
    let mut killed = scalar_tween(0.0, 1.0, 5.0, &a);
    killed.kill();
    let mut group = Group::of(killed).with(scalar_tween(0.0, 1.0, 1.0, &b));

    let overflow = group.advance(1.5);
    assert!(group.is_finished());
    // Mixed outcome counts as completion, not a kill.
    assert!(!group.is_killed());
    assert_abs_diff_eq!(overflow, 0.5, epsilon = 1e-6);
    assert!(a.borrow().is_nan());
    assert_eq!(*b.borrow(), 1.0);
}

/// it should scale the whole sequence by its time scale
#[test]
fn sequence_time_scale() {
    let a = scalar_slot();
    let b = scalar_slot();
    let mut seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &a))
        .append(scalar_tween(0.0, 1.0, 1.0, &b))
        .with_time_scale(2.0);
    seq.advance(1.0);
    assert_eq!(*a.borrow(), 1.0);
    assert_eq!(*b.borrow(), 1.0);
    assert!(seq.is_complete());
}

/// it should report the summed duration of its steps
#[test]
fn duration_sums_steps() {
    let s = scalar_slot();
    let seq = Sequence::new()
        .append(scalar_tween(0.0, 1.0, 1.0, &s))
        .join(scalar_tween(0.0, 1.0, 2.0, &s))
        .append(scalar_tween(0.0, 1.0, 1.0, &s));
    assert_abs_diff_eq!(seq.duration(), 3.0, epsilon = 1e-5);
}

/// it should complete an empty sequence on the first advance
#[test]
fn empty_sequence_completes_immediately() {
    let mut seq = Sequence::new();
    assert_eq!(seq.advance(0.5), 0.5);
    assert!(seq.is_complete());
}

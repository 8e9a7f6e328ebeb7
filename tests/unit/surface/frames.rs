use std::{cell::RefCell, rc::Rc};

use super::*;

#[test]
fn due_handles_exclude_late_requests() {
    let mut frames = FrameLoop::new();
    let a = frames.request(Box::new(|_| {}));
    let due = frames.begin_tick(16.0);
    assert_eq!(due, vec![a]);

    // Requested "during" the tick: not part of this batch.
    let b = frames.request(Box::new(|_| {}));
    assert!(frames.take(a).is_some());
    assert!(frames.is_pending(b));
    assert_eq!(frames.now_ms(), 16.0);
}

#[test]
fn cancel_is_one_shot() {
    let mut frames = FrameLoop::new();
    let h = frames.request(Box::new(|_| {}));
    assert!(frames.cancel(h));
    assert!(!frames.cancel(h));
    assert_eq!(frames.pending_len(), 0);
    assert!(frames.begin_tick(16.0).is_empty());
}

#[test]
fn callbacks_receive_tick_time() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut frames = FrameLoop::new();
    let sink = Rc::clone(&seen);
    let h = frames.request(Box::new(move |now| sink.borrow_mut().push(now)));
    frames.begin_tick(10.0);
    let cb = frames.take(h).unwrap();
    cb(frames.now_ms());
    assert_eq!(*seen.borrow(), vec![10.0]);
}

#[test]
fn negative_or_nan_dt_does_not_rewind() {
    let mut frames = FrameLoop::new();
    frames.begin_tick(5.0);
    frames.begin_tick(-3.0);
    frames.begin_tick(f64::NAN);
    assert_eq!(frames.now_ms(), 5.0);
}

use std::{cell::Cell, rc::Rc};

use super::*;

#[test]
fn clones_share_the_document() {
    let host = Host::new();
    let other = host.clone();
    let div = host.document_mut().create_element("div");
    assert!(other.document().contains(div));
    assert!(host.ptr_eq(&other));
    assert!(!host.ptr_eq(&Host::new()));
}

#[test]
fn tick_runs_due_callbacks_once() {
    let host = Host::new();
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    host.request_frame(move |_| c.set(c.get() + 1));

    assert_eq!(host.tick(16.0), 1);
    assert_eq!(host.tick(16.0), 0);
    assert_eq!(count.get(), 1);
    assert_eq!(host.now_ms(), 32.0);
}

#[test]
fn callbacks_may_reschedule_for_next_tick() {
    fn chain(host: Host, left: Rc<Cell<u32>>) {
        let h = host.clone();
        host.request_frame(move |_| {
            left.set(left.get() - 1);
            if left.get() > 0 {
                chain(h, left);
            }
        });
    }

    let host = Host::new();
    let left = Rc::new(Cell::new(3));
    chain(host.clone(), Rc::clone(&left));

    assert_eq!(host.tick(16.0), 1);
    assert_eq!(left.get(), 2);
    assert_eq!(host.run_until_idle(16.0, 100), 2);
    assert_eq!(left.get(), 0);
}

#[test]
fn cancellation_inside_a_tick_is_honored() {
    let host = Host::new();
    let fired = Rc::new(Cell::new(false));

    let f = Rc::clone(&fired);
    // Requested first so it runs first; the victim handle is filled in below.
    let victim = Rc::new(Cell::new(None));
    let v = Rc::clone(&victim);
    let h = host.clone();
    host.request_frame(move |_| {
        if let Some(handle) = v.get() {
            h.cancel_frame(handle);
        }
    });
    let handle = host.request_frame(move |_| f.set(true));
    victim.set(Some(handle));

    assert_eq!(host.tick(16.0), 1);
    assert!(!fired.get());
}

#[test]
fn run_until_idle_respects_cap() {
    fn forever(host: Host) {
        let h = host.clone();
        host.request_frame(move |_| forever(h));
    }
    let host = Host::new();
    forever(host.clone());
    assert_eq!(host.run_until_idle(16.0, 5), 5);
    assert!(host.has_pending_frames());
}

#[test]
fn frame_pending_until_run_or_cancelled() {
    let host = Host::new();
    let ran = host.request_frame(|_| {});
    let dropped = host.request_frame(|_| {});
    assert!(host.is_frame_pending(ran));

    assert!(host.cancel_frame(dropped));
    assert!(!host.is_frame_pending(dropped));
    host.tick(16.0);
    assert!(!host.is_frame_pending(ran));
}

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

use crate::surface::{
    document::Document,
    frames::{FrameHandle, FrameLoop},
};

/// Shared handle to the hosting surface: one [`Document`] plus its frame loop.
///
/// Cloning is cheap and every clone refers to the same surface. The host is single-threaded;
/// the embedding application drives it by calling [`Host::tick`] once per display frame.
#[derive(Clone, Debug, Default)]
pub struct Host {
    inner: Rc<HostInner>,
}

#[derive(Debug, Default)]
struct HostInner {
    document: RefCell<Document>,
    frames: RefCell<FrameLoop>,
}

impl Host {
    /// Host with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host over an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            inner: Rc::new(HostInner {
                document: RefCell::new(document),
                frames: RefCell::new(FrameLoop::new()),
            }),
        }
    }

    /// Borrow the document. Do not hold the guard across calls into shapes.
    pub fn document(&self) -> Ref<'_, Document> {
        self.inner.document.borrow()
    }

    /// Borrow the document mutably. Do not hold the guard across calls into shapes.
    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.inner.document.borrow_mut()
    }

    /// Host clock in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.inner.frames.borrow().now_ms()
    }

    /// Run `cb` on the next tick.
    pub fn request_frame(&self, cb: impl FnOnce(f64) + 'static) -> FrameHandle {
        self.inner.frames.borrow_mut().request(Box::new(cb))
    }

    /// Cancel a pending callback. False when it already ran.
    pub fn cancel_frame(&self, handle: FrameHandle) -> bool {
        self.inner.frames.borrow_mut().cancel(handle)
    }

    /// True while `handle` is scheduled and has not run or been cancelled.
    pub fn is_frame_pending(&self, handle: FrameHandle) -> bool {
        self.inner.frames.borrow().is_pending(handle)
    }

    /// True while any callback is pending.
    pub fn has_pending_frames(&self) -> bool {
        self.inner.frames.borrow().pending_len() > 0
    }

    /// Advance the clock by `dt_ms` and run the callbacks that were due. Returns how many ran.
    pub fn tick(&self, dt_ms: f64) -> usize {
        let due = self.inner.frames.borrow_mut().begin_tick(dt_ms);
        let mut ran = 0;
        for handle in due {
            // Re-borrow per callback: an earlier callback may have cancelled this one.
            let cb = self.inner.frames.borrow_mut().take(handle);
            if let Some(cb) = cb {
                let now = self.now_ms();
                cb(now);
                ran += 1;
            }
        }
        ran
    }

    /// Tick with a fixed frame interval until nothing is scheduled or `max_frames` is reached.
    /// Returns the number of ticks performed.
    pub fn run_until_idle(&self, frame_ms: f64, max_frames: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_frames && self.has_pending_frames() {
            self.tick(frame_ms);
            ticks += 1;
        }
        ticks
    }

    /// True when both handles refer to the same surface.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/host.rs"]
mod tests;

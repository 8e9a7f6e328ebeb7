use std::collections::BTreeMap;

/// Handle returned by [`FrameLoop::request`], usable to cancel the callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// Frame callback; receives the host clock in milliseconds at the tick that runs it.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host frame scheduler with `requestAnimationFrame` semantics.
///
/// A callback runs once, on the first tick after it was requested. Callbacks requested while a
/// tick is running are deferred to the next tick.
#[derive(Default)]
pub struct FrameLoop {
    now_ms: f64,
    next_id: u64,
    pending: BTreeMap<u64, FrameCallback>,
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("now_ms", &self.now_ms)
            .field("next_id", &self.next_id)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn request(&mut self, cb: FrameCallback) -> FrameHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(id, cb);
        FrameHandle(id)
    }

    /// Drop a pending callback. Returns false when it already ran or was cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle.0).is_some()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(&handle.0)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock and return the handles due in this tick, oldest first.
    ///
    /// Callbacks are taken one at a time with [`FrameLoop::take`] so a cancellation issued by an
    /// earlier callback in the same tick still takes effect.
    pub fn begin_tick(&mut self, dt_ms: f64) -> Vec<FrameHandle> {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.now_ms += dt_ms;
        }
        let watermark = self.next_id;
        self.pending
            .range(..watermark)
            .map(|(id, _)| FrameHandle(*id))
            .collect()
    }

    pub fn take(&mut self, handle: FrameHandle) -> Option<FrameCallback> {
        self.pending.remove(&handle.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/frames.rs"]
mod tests;

//! Debounced container-resize handling.

use std::time::{Duration, Instant};

/// Coalesces container size notifications and releases the latest size once
/// it has been stable for `delay`.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<([f32; 2], Instant)>,
    applied: Option<[f32; 2]>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            applied: None,
        }
    }

    /// Record the container size observed at `now`
    pub fn notify(&mut self, size: [f32; 2], now: Instant) {
        let unchanged = match self.pending {
            Some((pending, _)) => pending == size,
            None => self.applied == Some(size),
        };
        if !unchanged {
            self.pending = Some((size, now));
        }
    }

    /// Size to apply, once the settle delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<[f32; 2]> {
        let (size, since) = self.pending?;
        if now.saturating_duration_since(since) < self.delay {
            return None;
        }
        self.pending = None;
        self.applied = Some(size);
        Some(size)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Last size handed out by [`poll`](Self::poll)
    pub fn applied(&self) -> Option<[f32; 2]> {
        self.applied
    }
}

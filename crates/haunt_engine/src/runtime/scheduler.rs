//! Frame scheduling
//!
//! The frame loop never blocks waiting for the display. Each tick asks the
//! host for the next one through a [`FrameScheduler`]; a tick that does not
//! ask ends the loop.

/// Host side of frame scheduling
pub trait FrameScheduler {
    /// Ask for one more tick at the next display refresh
    fn request_frame(&mut self);
}

/// Scheduler that records requests for a host loop to consume
#[derive(Debug, Clone, Default)]
pub struct FrameRequests {
    pending: bool,
    total: u64,
}

impl FrameRequests {
    /// No request pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any
    ///
    /// Several requests before a `take` collapse into one tick.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a tick has been requested and not yet consumed
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests made since creation
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl FrameScheduler for FrameRequests {
    fn request_frame(&mut self) {
        self.pending = true;
        self.total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_pending_request() {
        let mut requests = FrameRequests::new();
        assert!(!requests.take());
        requests.request_frame();
        requests.request_frame();
        assert!(requests.take());
        assert!(!requests.is_pending());
        assert!(!requests.take());
        assert_eq!(requests.total(), 2);
    }
}

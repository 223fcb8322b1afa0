/// At most one pending recomputation per display frame.
///
/// Requests arriving while one is already pending are coalesced, never
/// queued; the pending request runs on the next frame.
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle {
    pending: bool,
    coalesced: u64,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a recomputation on the next frame. Returns `false` when the
    /// request was folded into one already pending.
    pub fn request(&mut self) -> bool {
        if self.pending {
            self.coalesced += 1;
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Consume the pending request, if any, at frame time
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests dropped because one was already pending
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bursts_coalesce_into_one_frame() {
        let mut throttle = FrameThrottle::new();
        assert!(throttle.request());
        assert!(!throttle.request());
        assert!(!throttle.request());
        assert_eq!(throttle.coalesced(), 2);

        assert!(throttle.take());
        assert!(!throttle.take());
        assert!(throttle.request());
    }

    #[test]
    fn test_cancel_drops_pending_request() {
        let mut throttle = FrameThrottle::new();
        throttle.request();
        throttle.cancel();
        assert!(!throttle.is_pending());
        assert!(!throttle.take());
    }
}

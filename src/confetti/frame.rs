//! Cancellable per-frame callback scheduling.

/// Handle for one requested display frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(u64);

/// Self-scheduling frame chain with at most one outstanding request
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameRequest>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the next frame, replacing any request still outstanding
    pub fn request(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    /// Drop the outstanding request, if any
    pub fn cancel(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    /// Consume the outstanding request when its frame arrives
    pub fn take(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_replaces_outstanding() {
        let mut frames = FrameLoop::new();
        let first = frames.request();
        let second = frames.request();

        assert_ne!(first, second);
        assert_eq!(frames.pending(), Some(second));
        assert_eq!(frames.take(), Some(second));
        assert_eq!(frames.take(), None);
    }

    #[test]
    fn test_cancel_clears_request() {
        let mut frames = FrameLoop::new();
        let request = frames.request();

        assert_eq!(frames.cancel(), Some(request));
        assert_eq!(frames.pending(), None);
        assert_eq!(frames.cancel(), None);
    }
}

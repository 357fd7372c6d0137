//! Render throttle for frames whose state is frozen.
//!
//! While the game is paused or on the game-over screen, nothing on screen
//! changes between ticks; rebuilding and diffing an identical framebuffer
//! 60 times a second is wasted work. The throttle lets those static frames
//! through immediately when their fingerprint changes (score, phase,
//! viewport size) and otherwise at most once per interval.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `is_static=false`: always render (no throttling).
    /// - When `is_static=true`: render immediately on fingerprint change,
    ///   otherwise at most once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        if !self.has_rendered || !is_static || fingerprint != self.last_fingerprint {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_always_renders() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1, true));
    }

    #[test]
    fn test_dynamic_frames_never_throttled() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1, false));
        assert!(t.should_render(1, 1, false));
        assert!(t.should_render(2, 1, false));
    }

    #[test]
    fn test_static_frames_throttled_until_interval() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1, true));
        assert!(!t.should_render(100, 1, true));
        assert!(!t.should_render(249, 1, true));
        assert!(t.should_render(250, 1, true));
        assert!(!t.should_render(300, 1, true));
    }

    #[test]
    fn test_fingerprint_change_breaks_through_throttle() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1, true));
        assert!(!t.should_render(10, 1, true));
        assert!(t.should_render(20, 2, true)); // e.g. terminal resized
    }
}

use std::time::{Duration, Instant};

/// Delays work until input has been quiet for `window`.
///
/// Time is passed in so the UI can feed `Instant::now()` and tests can feed
/// synthetic instants.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_touch: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_touch: None,
        }
    }

    /// Record an input event, restarting the window.
    pub fn touch(&mut self, now: Instant) {
        self.last_touch = Some(now);
    }

    /// True exactly once, after the window has elapsed since the last touch.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_touch {
            Some(at) if now.saturating_duration_since(at) >= self.window => {
                self.last_touch = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before `poll` fires, if anything is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_touch
            .map(|at| self.window.saturating_sub(now.saturating_duration_since(at)))
    }

    pub fn is_pending(&self) -> bool {
        self.last_touch.is_some()
    }

    /// Drop any pending event without firing.
    pub fn cancel(&mut self) {
        self.last_touch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn fires_once_after_quiet_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.touch(start);
        assert!(!d.poll(start + Duration::from_millis(299)));
        assert!(d.poll(start + WINDOW));
        assert!(!d.poll(start + Duration::from_secs(5)));
    }

    #[test]
    fn touch_restarts_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.touch(start);
        d.touch(start + Duration::from_millis(200));
        assert!(!d.poll(start + Duration::from_millis(400)));
        assert_eq!(
            d.remaining(start + Duration::from_millis(400)),
            Some(Duration::from_millis(100))
        );
        assert!(d.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut d = Debouncer::new(WINDOW);
        assert!(!d.poll(Instant::now()));
        assert_eq!(d.remaining(Instant::now()), None);
    }

    #[test]
    fn cancel_drops_pending_event() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.touch(start);
        d.cancel();
        assert!(!d.is_pending());
        assert!(!d.poll(start + WINDOW));
    }
}

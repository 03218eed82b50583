use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceHandle(u64);

/// Cancellable single-slot timer. Scheduling supersedes whatever was pending,
/// so only the value from the last call within `delay` ever fires.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    next_id: u64,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    handle: DebounceHandle,
    deadline: Instant,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: 0,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) -> DebounceHandle {
        self.next_id += 1;
        let handle = DebounceHandle(self.next_id);
        self.pending = Some(Pending {
            handle,
            deadline: now + self.delay,
            value,
        });
        handle
    }

    /// Returns false when `handle` already fired or was superseded.
    pub fn cancel(&mut self, handle: DebounceHandle) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.handle == handle) {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn cancel_all(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn fire_due(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }
        self.pending.take().map(|p| p.value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Debouncer;

    #[test]
    fn only_last_value_fires() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(500));
        debounce.schedule("r", start);
        debounce.schedule("ra", start + Duration::from_millis(200));
        debounce.schedule("raf", start + Duration::from_millis(400));

        assert_eq!(debounce.fire_due(start + Duration::from_millis(600)), None);
        assert_eq!(
            debounce.fire_due(start + Duration::from_millis(900)),
            Some("raf")
        );
        assert_eq!(debounce.fire_due(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn stale_handle_does_not_cancel_newer_timer() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(100));
        let first = debounce.schedule(1, start);
        let second = debounce.schedule(2, start);

        assert!(!debounce.cancel(first));
        assert!(debounce.is_pending());
        assert!(debounce.cancel(second));
        assert_eq!(debounce.fire_due(start + Duration::from_secs(1)), None);
    }
}

//! Trailing-edge debouncing of a single value
//!
//! [`Debounced`] keeps two copies of a value: the one most recently set and
//! the one last committed. A commit happens only after the value has been
//! left alone for the configured delay. Nothing is spawned: the holder is a
//! plain state machine over [`tokio::time::Instant`], so dropping it drops
//! whatever was pending.

use std::time::Duration;

use tokio::time::Instant;

/// Delay used by [`Debounced::new`].
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A value whose committed copy lags behind updates by a fixed delay.
///
/// ```
/// use std::time::Duration;
/// use console_lib::debounce::Debounced;
///
/// let mut search = Debounced::with_delay(String::new(), Duration::from_millis(300));
/// search.set("jo".to_string());
/// assert_eq!(search.value(), "jo");
/// assert_eq!(search.debounced(), "");
/// assert!(search.is_pending());
/// ```
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    value: T,
    committed: T,
    delay: Duration,
    deadline: Option<Instant>,
}

impl<T: Clone + PartialEq> Debounced<T> {
    /// Creates a holder with the default 500 ms delay.
    pub fn new(initial: T) -> Self {
        Self::with_delay(initial, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(initial: T, delay: Duration) -> Self {
        Self {
            committed: initial.clone(),
            value: initial,
            delay,
            deadline: None,
        }
    }

    /// The most recently set value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The last committed value.
    pub fn debounced(&self) -> &T {
        &self.committed
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// When the pending value will be committed, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Replaces the value and restarts the delay.
    ///
    /// Setting the value it already holds changes nothing.
    pub fn set(&mut self, value: T) {
        if value == self.value {
            return;
        }
        self.value = value;
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Commits the pending value if its deadline is at or before `now`.
    ///
    /// Returns `true` when the committed value changed.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.commit()
            }
            _ => false,
        }
    }

    /// [`poll_at`](Self::poll_at) against the current time.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Sleeps until the pending value is due, then commits it.
    ///
    /// Returns immediately with `false` when nothing is pending.
    pub async fn settle(&mut self) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        self.poll_at(deadline)
    }

    /// Commits the pending value right away.
    pub fn flush(&mut self) -> bool {
        if self.deadline.take().is_some() {
            self.commit()
        } else {
            false
        }
    }

    /// Discards the pending commit. The committed value is left as it was.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    fn commit(&mut self) -> bool {
        if self.committed == self.value {
            return false;
        }
        self.committed = self.value.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_commits_after_delay() {
        let mut holder = Debounced::new(0);
        holder.set(1);
        let start = Instant::now();

        assert!(!holder.poll_at(start + Duration::from_millis(499)));
        assert_eq!(*holder.debounced(), 0);
        assert!(holder.poll_at(start + Duration::from_millis(500)));
        assert_eq!(*holder.debounced(), 1);
        assert!(!holder.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_commit_last_value_once() {
        let mut holder = Debounced::new(String::new());
        holder.set("j".to_string());
        tokio::time::advance(Duration::from_millis(100)).await;
        holder.set("jo".to_string());
        tokio::time::advance(Duration::from_millis(100)).await;
        holder.set("john".to_string());
        let last_set = Instant::now();

        assert!(!holder.poll());
        assert!(holder.settle().await);
        assert_eq!(Instant::now(), last_set + DEFAULT_DEBOUNCE);
        assert_eq!(holder.debounced(), "john");
        assert!(!holder.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_setting_same_value_does_not_restart_delay() {
        let mut holder = Debounced::with_delay(0, Duration::from_millis(200));
        holder.set(5);
        let deadline = holder.deadline();
        tokio::time::advance(Duration::from_millis(50)).await;
        holder.set(5);
        assert_eq!(holder.deadline(), deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reverting_to_committed_value_reports_no_change() {
        let mut holder = Debounced::new("a");
        holder.set("b");
        holder.set("a");
        assert!(!holder.settle().await);
        assert_eq!(*holder.debounced(), "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let mut holder = Debounced::new(1);
        holder.set(2);
        holder.cancel();
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!holder.poll());
        assert_eq!(*holder.debounced(), 1);
        assert_eq!(*holder.value(), 2);
    }

    #[test]
    fn test_flush_commits_immediately() {
        let mut holder = Debounced::new(1);
        assert!(!holder.flush());
        holder.set(3);
        assert!(holder.flush());
        assert!(!holder.is_pending());
        assert_eq!(*holder.debounced(), 3);
    }
}

//! Keystroke debouncing
//!
//! A burst of text changes settles into a single query once the input has
//! been quiet for the configured interval. The boundary is inclusive: a value
//! that has been pending for exactly the quiet interval is settled.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::trace;

/// Capacity of the settled-query channel returned by [`spawn`]
const SETTLED_CAPACITY: usize = 16;

/// Debounce state machine, driven by explicit timestamps
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a raw text change
    ///
    /// Returns the previous value if it had already settled by `at`.
    /// Empty text is a valid value and is debounced like any other.
    pub fn push(&mut self, text: impl Into<String>, at: Instant) -> Option<String> {
        let settled = self.poll(at);
        self.pending = Some((text.into(), at));
        settled
    }

    /// Take the pending value if it has been quiet for the full interval
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.quiet);

        if due {
            self.pending.take().map(|(text, _)| text)
        } else {
            None
        }
    }

    /// When the pending value will settle, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }

    /// Take the pending value regardless of timing
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Debounce a channel of raw text changes on the tokio runtime
///
/// Each settled value carries the full text at that moment. When `raw`
/// closes, any pending value is flushed and the returned channel closes.
/// Calling `spawn` again on a fresh channel starts an independent sequence.
pub fn spawn(quiet: Duration, mut raw: mpsc::Receiver<String>) -> mpsc::Receiver<String> {
    let (tx, settled_rx) = mpsc::channel(SETTLED_CAPACITY);

    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(quiet);

        loop {
            let deadline = debouncer.deadline();

            let settled = tokio::select! {
                biased;
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    debouncer.poll(Instant::now())
                }
                event = raw.recv() => match event {
                    Some(text) => debouncer.push(text, Instant::now()),
                    None => {
                        if let Some(text) = debouncer.flush() {
                            let _ = tx.send(text).await;
                        }
                        break;
                    }
                },
            };

            if let Some(text) = settled {
                trace!(query = %text, "query settled");
                if tx.send(text).await.is_err() {
                    break;
                }
            }
        }
    });

    settled_rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn test_burst_settles_once_with_last_text() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        for (i, text) in ["a", "ap", "app", "appl", "apple"].iter().enumerate() {
            let at = start + Duration::from_millis(100 * i as u64);
            assert_eq!(debouncer.push(*text, at), None);
        }

        let last = start + Duration::from_millis(400);
        assert_eq!(debouncer.poll(last + Duration::from_millis(499)), None);
        assert_eq!(debouncer.poll(last + QUIET), Some("apple".to_string()));
        assert_eq!(debouncer.poll(last + QUIET * 2), None);
    }

    #[test]
    fn test_boundary_exactly_quiet_settles_twice() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        assert_eq!(debouncer.push("a", start), None);
        assert_eq!(debouncer.push("b", start + QUIET), Some("a".to_string()));
        assert_eq!(debouncer.poll(start + QUIET * 2), Some("b".to_string()));
    }

    #[test]
    fn test_boundary_just_under_quiet_settles_once() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        assert_eq!(debouncer.push("a", start), None);
        let second = start + QUIET - Duration::from_millis(1);
        assert_eq!(debouncer.push("b", second), None);
        assert_eq!(debouncer.poll(second + QUIET), Some("b".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_empty_text_is_forwarded() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.push("apple", start);
        debouncer.push("", start + Duration::from_millis(50));
        assert_eq!(debouncer.poll(start + Duration::from_millis(550)), Some(String::new()));
    }

    #[test]
    fn test_deadline_and_flush() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        assert_eq!(debouncer.deadline(), None);

        debouncer.push("x", start);
        assert_eq!(debouncer.deadline(), Some(start + QUIET));
        assert_eq!(debouncer.flush(), Some("x".to_string()));
        assert_eq!(debouncer.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_burst() {
        let (tx, rx) = mpsc::channel(16);
        let mut settled = spawn(QUIET, rx);

        for text in ["c", "co", "coi", "coit"] {
            tx.send(text.to_string()).await.unwrap();
            sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(settled.recv().await, Some("coit".to_string()));
        drop(tx);
        assert_eq!(settled.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_boundary_inclusive() {
        let (tx, rx) = mpsc::channel(16);
        let mut settled = spawn(QUIET, rx);

        tx.send("a".to_string()).await.unwrap();
        sleep(QUIET).await;
        tx.send("b".to_string()).await.unwrap();

        assert_eq!(settled.recv().await, Some("a".to_string()));
        assert_eq!(settled.recv().await, Some("b".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_boundary_exclusive_side() {
        let (tx, rx) = mpsc::channel(16);
        let mut settled = spawn(QUIET, rx);

        tx.send("a".to_string()).await.unwrap();
        sleep(QUIET - Duration::from_millis(1)).await;
        tx.send("b".to_string()).await.unwrap();

        assert_eq!(settled.recv().await, Some("b".to_string()));
        drop(tx);
        assert_eq!(settled.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_flushes_on_close() {
        let (tx, rx) = mpsc::channel(16);
        let mut settled = spawn(QUIET, rx);

        tx.send("dolores".to_string()).await.unwrap();
        drop(tx);

        assert_eq!(settled.recv().await, Some("dolores".to_string()));
        assert_eq!(settled.recv().await, None);
    }
}

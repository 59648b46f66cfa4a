// Politeness throttle for batch fetching.
//
// Batches hit arbitrary third-party sites one after another. The throttle
// enforces a minimum gap between consecutive fetches: the first call passes
// straight through, later calls sleep for whatever remains of the gap.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Enforces a minimum delay between consecutive fetches.
#[derive(Clone)]
pub struct Throttle {
    inner: Arc<Mutex<ThrottleInner>>,
}

struct ThrottleInner {
    /// Minimum time between fetches
    gap: Duration,
    /// When the last fetch was let through
    last_fetch: Option<Instant>,
}

impl Throttle {
    pub fn new(gap: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ThrottleInner {
                gap,
                last_fetch: None,
            })),
        }
    }

    /// Wait until the gap since the previous fetch has elapsed.
    pub async fn acquire(&self) {
        let mut inner = self.inner.lock().await;

        if let Some(last) = inner.last_fetch {
            let elapsed = last.elapsed();
            if elapsed < inner.gap {
                // Hold the lock while sleeping so concurrent callers queue up
                tokio::time::sleep(inner.gap - elapsed).await;
            }
        }

        inner.last_fetch = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_fetch_is_immediate() {
        let throttle = Throttle::new(Duration::from_millis(500));
        let start = Instant::now();
        throttle.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_second_fetch_waits_for_gap() {
        let throttle = Throttle::new(Duration::from_millis(300));
        throttle.acquire().await;
        let start = Instant::now();
        throttle.acquire().await;
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(250),
            "Expected ~300ms delay, got {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_zero_gap_never_waits() {
        let throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            throttle.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}

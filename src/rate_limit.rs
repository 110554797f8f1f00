//! Pacing between consecutive project searches.
//!
//! GitLab throttles the search API far more aggressively than the rest of
//! the API, so a run never issues two searches back to back. The pause is
//! modelled as its own component so a future concurrent runner can share
//! one pacer across workers instead of sleeping ad hoc.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default pause between two project searches.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(6);

/// Returned when a pause is interrupted by cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

#[derive(Debug, Clone)]
pub struct RequestPacer {
    delay: Duration,
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl RequestPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the configured delay, or until `cancel` fires.
    pub async fn pause(&self, cancel: &CancellationToken) -> Result<(), Interrupted> {
        if cancel.is_cancelled() {
            return Err(Interrupted);
        }
        if self.delay.is_zero() {
            return Ok(());
        }

        debug!("Pausing {:?} before the next request", self.delay);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupted),
            _ = sleep(self.delay) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_pause_waits_full_delay() {
        let pacer = RequestPacer::new(Duration::from_secs(6));
        let cancel = CancellationToken::new();

        let start = Instant::now();
        pacer.pause(&cancel).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(6), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(7), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let pacer = RequestPacer::new(Duration::ZERO);
        let start = Instant::now();
        pacer.pause(&CancellationToken::new()).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_pause() {
        let pacer = RequestPacer::new(Duration::from_secs(60));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        assert_eq!(pacer.pause(&cancel).await, Err(Interrupted));
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let pacer = RequestPacer::default();
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(pacer.pause(&cancel).await, Err(Interrupted));
    }
}

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Retry policy for Wikimedia calls. The pipeline tolerates per-entity
/// failure, so the default is a single retry with a short pause rather than
/// a long backoff ladder.
pub struct RetryPolicy {
    max_retries: usize,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1, 500)
    }
}

impl RetryPolicy {
    pub fn new(max_retries: usize, backoff_ms: u64) -> Self {
        Self {
            max_retries,
            backoff: Duration::from_millis(backoff_ms),
        }
    }

    pub async fn run<F, Fut, T>(&self, operation: &str, mut f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            match f().await {
                Ok(result) => {
                    if attempt > 0 {
                        info!(operation, attempts = attempt + 1, "Operation succeeded after retry");
                    }
                    return Ok(result);
                }
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        warn!(
                            operation,
                            attempts = attempt,
                            error = %e,
                            "Operation failed after max retries"
                        );
                        return Err(e);
                    }
                    warn!(
                        operation,
                        attempt,
                        backoff_ms = self.backoff.as_millis(),
                        error = %e,
                        "Operation failed, retrying"
                    );
                    sleep(self.backoff).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn succeeds_without_retry() {
        let policy = RetryPolicy::new(1, 1);
        let calls = AtomicUsize::new(0);
        let result: Result<u32> = policy
            .run("op", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(7) }
            })
            .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_once_then_succeeds() {
        let policy = RetryPolicy::new(1, 1);
        let calls = AtomicUsize::new(0);
        let result: Result<u32> = policy
            .run("op", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        anyhow::bail!("transient")
                    } else {
                        Ok(9)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let policy = RetryPolicy::new(1, 1);
        let calls = AtomicUsize::new(0);
        let result: Result<u32> = policy
            .run("op", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { anyhow::bail!("still down") }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run `op` up to `retries` times, sleeping `delay` between failed attempts.
///
/// Returns the first success, or the error of the final attempt. A `retries`
/// of zero still makes one attempt.
pub async fn retry_with_delay<T, E, F, Fut>(
    retries: u32,
    delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = retries.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!("Attempt {}/{} failed: {}", attempt, attempts, err);
                if attempt >= attempts {
                    return Err(err);
                }
            }
        }
        attempt += 1;
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_returns_first_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<u32, String> = retry_with_delay(3, Duration::ZERO, move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 2 {
                Err(format!("failure {}", n))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_returns_last_error_after_exhaustion() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), String> = retry_with_delay(3, Duration::ZERO, move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(format!("failure {}", n))
        })
        .await;

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_one_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), &str> = retry_with_delay(0, Duration::ZERO, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("nope")
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_between_attempts_only() {
        let start = tokio::time::Instant::now();
        let _: Result<(), &str> =
            retry_with_delay(3, Duration::from_secs(1), || async { Err("nope") }).await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }
}

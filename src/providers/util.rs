use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Retries an async operation with configurable attempts and delays
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// Either the successful result or the error of the last attempt
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt,
                    retries + 1,
                    err
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Appends a `t=<stamp>` query parameter so caches in between never answer.
pub fn cache_busted(url: &str, stamp: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}t={stamp}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_with_retry_succeeds_after_failures() {
        let calls = &AtomicUsize::new(0);
        let result = with_retry(
            move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 { Err(anyhow!("attempt {n}")) } else { Ok(n) }
            },
            2,
            1,
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_returns_last_error() {
        let calls = &AtomicUsize::new(0);
        let result: Result<(), _> = with_retry(
            move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(anyhow!("attempt {n}"))
            },
            2,
            1,
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "attempt 2");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_cache_busted() {
        assert_eq!(
            cache_busted("https://sheet/pub?gid=0&output=csv", 42),
            "https://sheet/pub?gid=0&output=csv&t=42"
        );
        assert_eq!(cache_busted("https://sheet/rates.csv", 7), "https://sheet/rates.csv?t=7");
    }
}

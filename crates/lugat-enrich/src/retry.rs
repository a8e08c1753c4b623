use std::future::Future;
use std::time::Duration;

/// Run `op` up to `max_attempts` times, sleeping `backoff` between attempts
/// that failed with an error `is_retryable` accepts. The first
/// non-retryable error, and the last error overall, are returned as-is.
pub async fn with_retry<T, E, F, Fut, R>(
    mut op: F,
    max_attempts: u32,
    is_retryable: R,
    backoff: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_retryable(&err) => {
                attempt += 1;
                tokio::time::sleep(backoff).await;
            }
            Err(err) => return Err(err),
        }
    }
}

use std::future::Future;
use std::time::Duration;

use super::client::FetchResult;
use super::error::FetchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Race `operation` against `duration`.
///
/// When the deadline wins, the pending operation is dropped, which aborts the
/// underlying request, and `FetchError::Timeout` is returned.
pub async fn with_timeout<T, F>(operation: F, duration: Duration) -> FetchResult<T>
where
    F: Future<Output = FetchResult<T>>,
{
    match tokio::time::timeout(duration, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = duration.as_millis() as u64, "request timed out");
            Err(FetchError::Timeout(duration))
        }
    }
}

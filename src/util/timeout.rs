//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::RoamError;

/// Wrap a future with a wall-clock deadline; the future is dropped when it fires.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, RoamError>>,
) -> Result<T, RoamError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(RoamError::Timeout(duration.as_millis() as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn elapsed_deadline_is_timeout_error() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, RoamError>(())
        };
        let err = with_timeout(Duration::from_secs(1), slow).await.unwrap_err();
        assert!(matches!(err, RoamError::Timeout(1000)));
    }

    #[tokio::test]
    async fn passes_through_inner_result() {
        let value = with_timeout(Duration::from_secs(1), async { Ok::<_, RoamError>(5) })
            .await
            .unwrap();
        assert_eq!(value, 5);
    }
}

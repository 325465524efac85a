//! API gateway client: one loading flag and one error slot shared by every
//! call a page makes.
//!
//! Overlapping calls race on both slots and the last call to finish decides
//! what is displayed.

use crate::error::ClientError;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

pub struct ApiGateway {
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    timeout: Option<Duration>,
}

/// Clears the loading flag however the call ends, including cancellation.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> LoadingGuard<'a> {
    fn engage(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl ApiGateway {
    pub fn new(timeout: Option<Duration>) -> Self {
        let (loading, _) = watch::channel(false);
        let (error, _) = watch::channel(None);

        Self {
            loading,
            error,
            timeout,
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Human-readable message of the last failed call, if the last call failed.
    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn clear_error(&self) {
        self.error.send_replace(None);
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    /// Run `operation` inside the loading/error lifecycle.
    ///
    /// Non-2xx responses must already be errors by the time they get here;
    /// the gateway does not look at transports.
    pub async fn call<T, F, Fut>(&self, operation: F) -> Result<T, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let _loading = LoadingGuard::engage(&self.loading);
        self.error.send_replace(None);

        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, operation())
                .await
                .unwrap_or(Err(ClientError::Timeout)),
            None => operation().await,
        };

        match &outcome {
            Ok(_) => {
                self.error.send_replace(None);
            }
            Err(err) => {
                tracing::warn!(error = %err, "API call failed");
                self.error.send_replace(Some(err.to_string()));
            }
        }

        outcome
    }
}

impl Default for ApiGateway {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn failure_sets_error_and_releases_loading() {
        let gateway = ApiGateway::default();

        let result: Result<(), _> = gateway
            .call(|| async { Err(ClientError::Network("connection refused".into())) })
            .await;

        assert_eq!(result, Err(ClientError::Network("connection refused".into())));
        assert_eq!(gateway.error().as_deref(), Some("connection refused"));
        assert!(!gateway.is_loading());
    }

    #[tokio::test]
    async fn success_clears_previous_error() {
        let gateway = ApiGateway::default();
        let _ = gateway
            .call(|| async { Err::<(), _>(ClientError::Timeout) })
            .await;
        assert!(gateway.error().is_some());

        let value = gateway.call(|| async { Ok(41 + 1) }).await;

        assert_eq!(value, Ok(42));
        assert_eq!(gateway.error(), None);
        assert!(!gateway.is_loading());
    }

    #[tokio::test]
    async fn loading_is_set_while_operation_runs() {
        let gateway = ApiGateway::default();
        let (release, wait) = oneshot::channel::<()>();

        let call = gateway.call(move || async move {
            let _ = wait.await;
            Ok(())
        });
        let observe = async {
            tokio::task::yield_now().await;
            let seen = gateway.is_loading();
            let _ = release.send(());
            seen
        };

        let (result, seen_loading) = tokio::join!(call, observe);
        assert!(result.is_ok());
        assert!(seen_loading);
        assert!(!gateway.is_loading());
    }

    #[tokio::test]
    async fn concurrent_calls_last_to_finish_wins() {
        let gateway = ApiGateway::default();
        let (finish_a, wait_a) = oneshot::channel::<Result<u32, ClientError>>();
        let (finish_b, wait_b) = oneshot::channel::<Result<u32, ClientError>>();

        let call_a = gateway.call(move || async move { wait_a.await.unwrap_or(Err(ClientError::Timeout)) });
        let call_b = gateway.call(move || async move { wait_b.await.unwrap_or(Err(ClientError::Timeout)) });

        let driver = async {
            tokio::task::yield_now().await;
            let _ = finish_a.send(Err(ClientError::Network("a failed".into())));
            while gateway.error().is_none() {
                tokio::task::yield_now().await;
            }
            // A finished first: its failure shows and the shared flag is
            // already down although B is still in flight.
            let after_a = (gateway.error(), gateway.is_loading());
            let _ = finish_b.send(Ok(7));
            after_a
        };

        let (a, b, after_a) = tokio::join!(call_a, call_b, driver);

        assert!(a.is_err());
        assert_eq!(b, Ok(7));
        assert_eq!(after_a, (Some("a failed".to_string()), false));
        assert_eq!(gateway.error(), None);
        assert!(!gateway.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_times_out() {
        let gateway = ApiGateway::new(Some(Duration::from_secs(5)));

        let result = gateway
            .call(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;

        assert_eq!(result, Err(ClientError::Timeout));
        assert_eq!(gateway.error().as_deref(), Some("Request timed out"));
        assert!(!gateway.is_loading());
    }

    #[tokio::test]
    async fn cancelled_call_releases_loading() {
        let gateway = ApiGateway::default();
        {
            let call = gateway.call(|| std::future::pending::<Result<(), ClientError>>());
            tokio::pin!(call);
            assert!(futures::poll!(call.as_mut()).is_pending());
            assert!(gateway.is_loading());
        }
        assert!(!gateway.is_loading());
    }
}

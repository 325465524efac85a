//! Shared plumbing for talking to one backend service over HTTP.

use crate::error::ClientError;
use crate::services::metrics;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use service_core::observability::{TracedClientExt, TracedRequest};
use std::time::{Duration, Instant};

/// Build the HTTP client shared by every backend service client.
///
/// The client is shared across browser sessions, so it keeps no cookie jar:
/// every call authenticates with the caller's own bearer token.
pub fn build_http_client(request_timeout: Duration) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))
}

#[derive(Clone, Debug)]
pub struct ServiceHttp {
    client: Client,
    base_url: Url,
    service: &'static str,
}

impl ServiceHttp {
    pub fn new(client: Client, base_url: &str, service: &'static str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ClientError::Network(format!("Invalid {} base URL '{}': {}", service, base_url, e))
        })?;

        Ok(Self {
            client,
            base_url,
            service,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Network(format!("{} base URL cannot be a base", self.service)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn get(&self, url: &Url) -> TracedRequest {
        self.client.traced_get(url.as_str())
    }

    pub fn post(&self, url: &Url) -> TracedRequest {
        self.client.traced_post(url.as_str())
    }

    pub fn delete(&self, url: &Url) -> TracedRequest {
        self.client.traced_delete(url.as_str())
    }

    /// Send, record the outcome, and turn non-2xx statuses into errors.
    pub async fn send(&self, operation: &'static str, request: TracedRequest) -> Result<Response, ClientError> {
        let started = Instant::now();
        let result = match request.send().await {
            Ok(response) => error_for_status(response).await,
            Err(e) => {
                tracing::error!(service = self.service, operation, error = %e, "Backend request failed");
                Err(ClientError::from(e))
            }
        };

        let outcome = match &result {
            Ok(_) => "success",
            Err(ClientError::Http { .. }) => "http_error",
            Err(ClientError::Timeout) => "timeout",
            Err(_) => "network_error",
        };
        metrics::record_backend_call(self.service, operation, outcome, started.elapsed());

        result
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: TracedRequest,
    ) -> Result<T, ClientError> {
        let response = self.send(operation, request).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::error!(service = self.service, operation, error = %e, "Unexpected response body");
            ClientError::Network(format!("Invalid response from {}: {}", self.service, e))
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Convert a non-2xx response into `ClientError::Http`, keeping the
/// backend's `message` (or `error`) field when the body carries one.
pub async fn error_for_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|message| !message.trim().is_empty());

    tracing::warn!(status = status.as_u16(), message = ?message, "Backend returned an error status");

    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_segments() {
        let http = ServiceHttp::new(Client::new(), "http://videos.local:5002/", "video-service").unwrap();
        let url = http.url(&["api", "videos", "delete", "my clip.mp4"]).unwrap();
        assert_eq!(url.as_str(), "http://videos.local:5002/api/videos/delete/my%20clip.mp4");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let http = ServiceHttp::new(Client::new(), "http://gateway.local/users", "user-service").unwrap();
        let url = http.url(&["api", "users", "login"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/users/api/users/login");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(ServiceHttp::new(Client::new(), "not a url", "user-service").is_err());
    }
}

#![allow(dead_code)]

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use video_frontend::config::{
    ClientSettings, ServerSettings, ServiceSettings, Settings, TelemetrySettings,
};
use video_frontend::pages::PageContext;
use video_frontend::services::ServiceClients;
use video_frontend::session::SessionProvider;
use video_frontend::AppState;
use wiremock::MockServer;

pub const TEST_USER_ID: &str = "42";
pub const TEST_EMAIL: &str = "viewer@example.com";

/// Unsigned token around `payload`, shaped like the ones the user service issues.
pub fn token_with_payload(payload: &Value) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}

/// Token for the test user expiring `ttl_secs` from now (negative: already expired).
pub fn token_expiring_in(ttl_secs: i64) -> String {
    token_with_payload(&json!({
        "id": TEST_USER_ID.parse::<i64>().unwrap(),
        "email": TEST_EMAIL,
        "exp": Utc::now().timestamp() + ttl_secs,
    }))
}

pub fn valid_token() -> String {
    token_expiring_in(3600)
}

pub fn video_json(n: usize) -> Value {
    json!({
        "id": n,
        "filename": format!("clip-{n}.mp4"),
        "filepath": format!("https://cdn.example.com/videos/clip-{n}.mp4"),
        "title": format!("Clip {n}"),
    })
}

pub fn videos_json(count: usize, total: u64) -> Value {
    json!({
        "videos": (0..count).map(video_json).collect::<Vec<_>>(),
        "total": total,
    })
}

pub fn log_json(n: usize) -> Value {
    json!({
        "user_id": 42,
        "action_type": "VIEW",
        "service_name": "video-service",
        "description": format!("Watched clip-{n}.mp4"),
        "created_at": "2024-05-01T12:00:00Z",
    })
}

/// One mock server standing in for every backend service.
pub struct TestBackend {
    pub server: MockServer,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn settings(&self) -> Settings {
        let uri = self.server.uri();
        Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
                secure_cookies: false,
                session_idle_hours: 24,
            },
            services: ServiceSettings {
                user_url: uri.clone(),
                video_url: uri.clone(),
                storage_url: uri.clone(),
                usage_url: uri.clone(),
                logging_url: uri,
            },
            client: ClientSettings {
                request_timeout_secs: 5,
                upload_timeout_secs: 10,
            },
            telemetry: TelemetrySettings::default(),
        }
    }

    pub fn services(&self) -> Arc<ServiceClients> {
        Arc::new(ServiceClients::from_settings(&self.settings()).expect("Failed to build clients"))
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.services(), Duration::from_secs(5))
    }

    /// Page context with `token` already in the session.
    pub fn context(&self, token: Option<String>) -> PageContext {
        PageContext::new(
            self.services(),
            Arc::new(SessionProvider::with_token(token)),
            Some(Duration::from_secs(5)),
        )
    }

    /// Requests the backend saw for `method` + `path`.
    pub async fn hits(&self, method: &str, path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.to_string() == method && request.url.path() == path)
            .count()
    }
}

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER};
use time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ServerSettings;
use crate::handlers::{
    app::{health_check, index},
    auth::{login_handler, login_page, logout_handler, register_handler, register_page},
    dashboard::{dashboard_handler, upload_handler},
    logs::logs_handler,
    metrics::metrics,
    profile::{delete_all_handler, delete_video_handler, profile_handler},
    video::video_handler,
};
use crate::middleware::{auth_middleware, metrics_middleware};
use crate::upload::MAX_UPLOAD_BYTES;
use crate::AppState;

/// Slack over the upload ceiling for the multipart framing and title field,
/// so a slightly oversized file still reaches validation.
const UPLOAD_BODY_SLACK: usize = 1024 * 1024;

pub fn build_router(state: AppState, server: &ServerSettings) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::hours(server.session_idle_hours)));

    let protected = Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route(
            "/dashboard/upload",
            post(upload_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES as usize + UPLOAD_BODY_SLACK)),
        )
        .route("/profile", get(profile_handler))
        .route("/profile/videos/delete-all", post(delete_all_handler))
        .route("/profile/videos/:filename/delete", post(delete_video_handler))
        .route("/logs", get(logs_handler))
        .route_layer(from_fn(auth_middleware));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/login", get(login_page).post(login_handler))
        .route("/register", get(register_page).post(register_handler))
        .route("/logout", get(logout_handler))
        .route("/video/:filename", get(video_handler))
        .merge(protected)
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

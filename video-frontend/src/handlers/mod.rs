pub mod app;
pub mod auth;
pub mod dashboard;
pub mod logs;
pub mod metrics;
pub mod profile;
pub mod video;
pub mod views;

use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

/// Browser-session key holding the bearer token issued at login.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
}

pub async fn stored_token(session: &Session) -> Option<String> {
    session.get::<String>(TOKEN_KEY).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to read session token");
        None
    })
}

pub async fn remember_token(session: &Session, token: &str) -> Result<(), AppError> {
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to rotate session: {}", e)))?;
    session
        .insert(TOKEN_KEY, token)
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to store session token: {}", e)))
}

pub async fn forget_token(session: &Session) {
    if let Err(e) = session.remove::<String>(TOKEN_KEY).await {
        tracing::warn!(error = %e, "Failed to remove session token");
    }
}

/// Session problems send the user back to the entry page.
pub async fn back_to_entry(session: &Session) -> Response {
    forget_token(session).await;
    Redirect::to("/").into_response()
}

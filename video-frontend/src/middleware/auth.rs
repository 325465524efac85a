use crate::handlers::{forget_token, stored_token};
use crate::session::Session as Identity;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;

/// Send visitors without a usable token to the login page.
///
/// A token that no longer decodes or has expired is dropped from the
/// browser session on the way.
pub async fn auth_middleware(session: Session, request: Request<Body>, next: Next) -> Response {
    let Some(token) = stored_token(&session).await else {
        return Redirect::to("/login").into_response();
    };

    if let Err(err) = Identity::decode(&token, Utc::now().timestamp()) {
        tracing::info!(error = %err, "Stored session token rejected");
        forget_token(&session).await;
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}

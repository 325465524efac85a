use crate::error::ClientError;
use crate::handlers::{remember_token, stored_token};
use crate::models::{LoginRequest, RegisterRequest};
use crate::pages;
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use service_core::error::AppError;
use tower_sessions::Session;

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template, Default)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub email: String,
    pub username: String,
    pub error: Option<String>,
}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::default()
}

pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::default()
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<LoginRequest>,
) -> Result<Response, AppError> {
    let ctx = state.page_context(None);

    match pages::login(&ctx, &payload).await {
        Ok(identity) => {
            let Some(token) = ctx.session.token() else {
                return Err(AppError::InternalError(anyhow::anyhow!("Login produced no token")));
            };
            remember_token(&session, &token).await?;

            tracing::info!(user_id = %identity.subject_id, "User logged in successfully");
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(err) => {
            tracing::info!(error = %err, "Login rejected");
            let template = LoginTemplate {
                email: payload.email,
                error: Some(form_message(&err, "An error occurred during login")),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
    }
}

pub async fn register_handler(
    State(state): State<AppState>,
    Form(payload): Form<RegisterRequest>,
) -> Response {
    let ctx = state.page_context(None);

    match pages::register(&ctx, &payload).await {
        Ok(()) => Redirect::to("/login").into_response(),
        Err(err) => {
            tracing::info!(error = %err, "Registration rejected");
            let template = RegisterTemplate {
                email: payload.email,
                username: payload.username,
                error: Some(form_message(&err, "An error occurred during registration")),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
        }
    }
}

pub async fn logout_handler(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let ctx = state.page_context(stored_token(&session).await);
    pages::logout(&ctx);

    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to flush session on logout");
    }

    Redirect::to("/")
}

/// Inline form text: validation and backend messages as-is, transport
/// failures as a generic line.
fn form_message(err: &ClientError, transport_fallback: &str) -> String {
    match err {
        ClientError::Validation(message) => message.clone(),
        ClientError::Network(_) | ClientError::Timeout => transport_fallback.to_string(),
        other => other.to_string(),
    }
}

use crate::handlers::stored_token;
use askama::Template;
use axum::response::IntoResponse;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub logged_in: bool,
}

pub async fn index(session: Session) -> impl IntoResponse {
    IndexTemplate {
        logged_in: stored_token(&session).await.is_some(),
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

use crate::handlers::stored_token;
use crate::pages::{PlayerState, VideoPage};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "video.html")]
pub struct VideoTemplate {
    pub filename: String,
    pub player: PlayerState,
}

pub async fn video_handler(
    State(state): State<AppState>,
    session: Session,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    let page = VideoPage::new(state.page_context(stored_token(&session).await), filename);
    page.load().await;

    VideoTemplate {
        filename: page.filename().to_string(),
        player: page.player().await,
    }
}

use crate::handlers::views::{BannerView, NavView};
use crate::handlers::{back_to_entry, stored_token, PageQuery};
use crate::models::{UserProfile, VideoSummary};
use crate::pages::{ErrorBanner, ProfilePage};
use crate::pagination::PageCursor;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub nav: NavView,
    pub user: Option<UserProfile>,
    pub joined_on: Option<String>,
    pub videos: Vec<VideoSummary>,
    pub cursor: PageCursor,
    pub banner: Option<BannerView>,
}

async fn render(page: &ProfilePage, banner: Option<ErrorBanner>) -> Response {
    let state = page.snapshot().await;
    ProfileTemplate {
        nav: NavView::new(state.identity, "profile"),
        joined_on: state
            .user
            .as_ref()
            .and_then(UserProfile::joined_on)
            .map(|date| date.format("%Y-%m-%d").to_string()),
        user: state.user,
        videos: state.videos,
        cursor: state.cursor,
        banner: banner.map(BannerView::from),
    }
    .into_response()
}

pub async fn profile_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = ProfilePage::new(state.page_context(stored_token(&session).await));

    if let Err(err) = page.open(query.page).await {
        if err.requires_login() {
            return back_to_entry(&session).await;
        }
    }

    render(&page, page.context().error_banner()).await
}

pub async fn delete_video_handler(
    State(state): State<AppState>,
    session: Session,
    Path(filename): Path<String>,
) -> Response {
    let page = ProfilePage::new(state.page_context(stored_token(&session).await));

    if let Err(err) = page.load().await {
        if err.requires_login() {
            return back_to_entry(&session).await;
        }
    }

    let banner = match page.delete_video(&filename).await {
        Ok(()) => None,
        Err(err) if err.requires_login() => return back_to_entry(&session).await,
        Err(err) => Some(ErrorBanner::new(err.to_string())),
    };

    render(&page, banner).await
}

pub async fn delete_all_handler(State(state): State<AppState>, session: Session) -> Response {
    let page = ProfilePage::new(state.page_context(stored_token(&session).await));

    if let Err(err) = page.load().await {
        if err.requires_login() {
            return back_to_entry(&session).await;
        }
    }

    let banner = match page.delete_all_videos().await {
        Ok(()) => None,
        Err(err) if err.requires_login() => return back_to_entry(&session).await,
        Err(err) => Some(ErrorBanner::new(err.to_string())),
    };

    render(&page, banner).await
}

use crate::handlers::views::{BannerView, NavView};
use crate::handlers::{back_to_entry, stored_token, PageQuery};
use crate::models::LogEntry;
use crate::pages::LogsPage;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "logs.html")]
pub struct LogsTemplate {
    pub nav: NavView,
    pub is_admin: bool,
    pub logs: Vec<LogEntry>,
    pub previous_index: u64,
    pub next_index: u64,
    pub page_number: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub banner: Option<BannerView>,
}

pub async fn logs_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = LogsPage::new(state.page_context(stored_token(&session).await));

    if let Err(err) = page.open(query.page).await {
        if err.requires_login() {
            return back_to_entry(&session).await;
        }
    }

    let banner = page.context().error_banner().map(BannerView::from);
    let snapshot = page.snapshot().await;

    LogsTemplate {
        has_next: snapshot.has_next(),
        has_previous: snapshot.has_previous(),
        page_number: snapshot.page_number(),
        previous_index: snapshot.page_index.saturating_sub(1),
        next_index: snapshot.page_index.saturating_add(1),
        nav: NavView::new(snapshot.identity, "logs"),
        is_admin: snapshot.is_admin,
        logs: snapshot.logs,
        banner,
    }
    .into_response()
}

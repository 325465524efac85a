use crate::handlers::views::{BannerView, NavView, UsageMeter};
use crate::handlers::{back_to_entry, stored_token, PageQuery};
use crate::models::VideoSummary;
use crate::pages::{DashboardPage, DashboardState};
use crate::pagination::PageCursor;
use crate::upload::{UploadStatus, VideoFile, MSG_TOO_LARGE};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: NavView,
    pub videos: Vec<VideoSummary>,
    pub cursor: PageCursor,
    pub storage: Option<UsageMeter>,
    pub bandwidth: Option<UsageMeter>,
    pub upload_blocked: bool,
    pub upload_status: Option<UploadStatus>,
    pub banner: Option<BannerView>,
}

impl DashboardTemplate {
    fn render_state(state: DashboardState, upload_status: Option<UploadStatus>, banner: Option<BannerView>) -> Self {
        let upload_blocked =
            crate::usage::is_upload_blocked(state.storage.as_ref(), state.bandwidth.as_ref());
        Self {
            nav: NavView::new(state.identity, "dashboard"),
            storage: state.storage.as_ref().map(UsageMeter::storage),
            bandwidth: state.bandwidth.as_ref().map(UsageMeter::bandwidth),
            videos: state.videos,
            cursor: state.cursor,
            upload_blocked,
            upload_status,
            banner,
        }
    }
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = DashboardPage::new(state.page_context(stored_token(&session).await));

    if let Err(err) = page.open(query.page).await {
        if err.requires_login() {
            return back_to_entry(&session).await;
        }
    }

    let banner = page.context().error_banner().map(BannerView::from);
    DashboardTemplate::render_state(page.snapshot().await, None, banner).into_response()
}

/// Multipart form with a `title` field and a `video` file part.
pub async fn upload_handler(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Response {
    let page = DashboardPage::new(state.page_context(stored_token(&session).await));

    if let Err(err) = page.load().await {
        if err.requires_login() {
            return back_to_entry(&session).await;
        }
    }

    let status = match read_upload_form(multipart).await {
        Ok((file, title)) => match page.submit_upload(file, &title).await {
            Ok(status) => status,
            Err(err) if err.requires_login() => return back_to_entry(&session).await,
            Err(err) => {
                tracing::error!(error = %err, "Upload could not start");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read upload form");
            let message = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                MSG_TOO_LARGE.to_string()
            } else {
                format!("Failed to read upload: {}", e.body_text())
            };
            Some(UploadStatus::error(message))
        }
    };

    let banner = page.context().error_banner().map(BannerView::from);
    DashboardTemplate::render_state(page.snapshot().await, status, banner).into_response()
}

async fn read_upload_form(mut multipart: Multipart) -> Result<(Option<VideoFile>, String), MultipartError> {
    let mut file = None;
    let mut title = String::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "title" => title = field.text().await?,
            "video" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                // An empty file input still submits a nameless, empty part.
                if !name.is_empty() || !data.is_empty() {
                    file = Some(VideoFile::new(name, media_type, data));
                }
            }
            _ => {}
        }
    }

    Ok((file, title))
}

use crate::error::ClientError;
use crate::models::{BandwidthUsage, StorageUsage, VideoSummary};
use crate::pages::{NavIdentity, PageContext, PageGuard, Ticket};
use crate::pagination::PageCursor;
use crate::upload::{UploadFlow, UploadStatus, VideoFile};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

pub const VIDEOS_PER_PAGE: u64 = 16;

/// `None` usage snapshots render as "loading" placeholders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    pub identity: Option<NavIdentity>,
    pub videos: Vec<VideoSummary>,
    pub cursor: PageCursor,
    pub storage: Option<StorageUsage>,
    pub bandwidth: Option<BandwidthUsage>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            identity: None,
            videos: Vec::new(),
            cursor: PageCursor::new(VIDEOS_PER_PAGE),
            storage: None,
            bandwidth: None,
        }
    }
}

pub struct DashboardPage {
    ctx: PageContext,
    guard: PageGuard,
    state: RwLock<DashboardState>,
    upload: Mutex<UploadFlow>,
}

impl DashboardPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            guard: PageGuard::default(),
            state: RwLock::new(DashboardState::default()),
            upload: Mutex::new(UploadFlow::new()),
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Load the page at `page_index`, superseding any load in flight.
    pub async fn open(&self, page_index: u64) -> Result<(), ClientError> {
        {
            let mut state = self.state.write().await;
            state.cursor.page_index = page_index;
        }
        self.load().await
    }

    /// Fetch videos, storage and bandwidth concurrently. Each result lands in
    /// state as soon as it arrives; failures only reach the error banner.
    pub async fn load(&self) -> Result<(), ClientError> {
        let (session, token) = self.ctx.require_session()?;
        let ticket = self.guard.advance();
        let start = {
            let mut state = self.state.write().await;
            state.identity = Some(NavIdentity::from(&session));
            state.cursor.start()
        };

        tracing::debug!(user_id = %session.subject_id, start, "Loading dashboard");

        tokio::join!(
            self.fetch_videos(ticket, start, &token),
            self.fetch_storage(ticket, &token),
            self.fetch_bandwidth(ticket, &token),
        );

        Ok(())
    }

    pub async fn next_page(&self) -> Result<(), ClientError> {
        let cursor = self.state.read().await.cursor;
        if !cursor.has_next() {
            return Ok(());
        }
        self.open(cursor.next().page_index).await
    }

    pub async fn previous_page(&self) -> Result<(), ClientError> {
        let cursor = self.state.read().await.cursor;
        self.open(cursor.previous().page_index).await
    }

    /// Navigating away; anything still in flight is discarded on arrival.
    pub fn unmount(&self) {
        self.guard.invalidate();
    }

    /// Hand a submit to the upload flow using the current usage snapshots.
    ///
    /// Returns the status line to show. A second submit while one is running
    /// gets the concurrency message and leaves the running upload alone.
    pub async fn submit_upload(
        &self,
        file: Option<VideoFile>,
        title: &str,
    ) -> Result<Option<UploadStatus>, ClientError> {
        let Ok(mut flow) = self.upload.try_lock() else {
            return Ok(Some(UploadFlow::busy_status()));
        };
        let (_, token) = self.ctx.require_session()?;

        if let Some(file) = file {
            flow.select_file(file);
        }
        flow.set_title(title);

        let (storage, bandwidth) = {
            let state = self.state.read().await;
            (state.storage.clone(), state.bandwidth.clone())
        };

        let outcome = flow
            .submit(
                &self.ctx.services.videos,
                &token,
                storage.as_ref(),
                bandwidth.as_ref(),
                move || async move {
                    if let Err(err) = self.load().await {
                        tracing::warn!(error = %err, "Dashboard refresh after upload failed");
                    }
                },
            )
            .await;

        if let Err(err) = outcome {
            tracing::debug!(error = %err, "Upload did not complete");
        }

        Ok(flow.status().cloned())
    }

    /// A failed listing shows as an empty page rather than the previous rows.
    async fn fetch_videos(&self, ticket: Ticket, start: u64, token: &str) {
        let videos = &self.ctx.services.videos;
        let page = self
            .ctx
            .gateway
            .call(|| videos.list_videos(start, Some(token)))
            .await
            .unwrap_or_default();
        if !self.guard.is_current(ticket) {
            tracing::debug!("Dropping superseded video listing");
            return;
        }
        let mut state = self.state.write().await;
        state.videos = page.videos;
        state.cursor.total = page.total;
    }

    async fn fetch_storage(&self, ticket: Ticket, token: &str) {
        let usage = &self.ctx.services.usage;
        let Ok(storage) = self.ctx.gateway.call(|| usage.storage_usage(token)).await else {
            return;
        };
        if self.guard.is_current(ticket) {
            self.state.write().await.storage = Some(storage);
        }
    }

    async fn fetch_bandwidth(&self, ticket: Ticket, token: &str) {
        let usage = &self.ctx.services.usage;
        let Ok(bandwidth) = self.ctx.gateway.call(|| usage.bandwidth_usage(token)).await else {
            return;
        };
        if self.guard.is_current(ticket) {
            self.state.write().await.bandwidth = Some(bandwidth);
        }
    }
}

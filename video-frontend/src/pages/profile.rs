use crate::error::ClientError;
use crate::models::{UserProfile, VideoSummary};
use crate::pages::{NavIdentity, PageContext, PageGuard, Ticket, VIDEOS_PER_PAGE};
use crate::pagination::PageCursor;
use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileState {
    pub identity: Option<NavIdentity>,
    pub user: Option<UserProfile>,
    pub videos: Vec<VideoSummary>,
    pub cursor: PageCursor,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            identity: None,
            user: None,
            videos: Vec::new(),
            cursor: PageCursor::new(VIDEOS_PER_PAGE),
        }
    }
}

/// The signed-in user's account details and their own uploads.
pub struct ProfilePage {
    ctx: PageContext,
    guard: PageGuard,
    state: RwLock<ProfileState>,
}

impl ProfilePage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            guard: PageGuard::default(),
            state: RwLock::new(ProfileState::default()),
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub async fn snapshot(&self) -> ProfileState {
        self.state.read().await.clone()
    }

    pub async fn open(&self, page_index: u64) -> Result<(), ClientError> {
        self.state.write().await.cursor.page_index = page_index;
        self.load().await
    }

    /// Profile and video list are fetched concurrently.
    pub async fn load(&self) -> Result<(), ClientError> {
        let (session, token) = self.ctx.require_session()?;
        let ticket = self.guard.advance();
        self.state.write().await.identity = Some(NavIdentity::from(&session));

        tokio::join!(
            self.fetch_user(ticket, &session.subject_id, &token),
            self.fetch_videos(ticket, &session.subject_id, &token),
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

    pub fn unmount(&self) {
        self.guard.invalidate();
    }

    /// Delete one video, then refetch the list whatever the outcome.
    pub async fn delete_video(&self, filename: &str) -> Result<(), ClientError> {
        let (session, token) = self.ctx.require_session()?;
        let videos = &self.ctx.services.videos;
        let outcome = self
            .ctx
            .gateway
            .call(|| videos.delete_video(filename, &token))
            .await;

        self.refetch_videos(&session.subject_id, &token).await;
        outcome
    }

    pub async fn delete_all_videos(&self) -> Result<(), ClientError> {
        let (session, token) = self.ctx.require_session()?;
        let videos = &self.ctx.services.videos;
        let outcome = self.ctx.gateway.call(|| videos.delete_all_videos(&token)).await;

        self.refetch_videos(&session.subject_id, &token).await;
        outcome
    }

    async fn refetch_videos(&self, user_id: &str, token: &str) {
        let ticket = self.guard.advance();
        self.fetch_videos(ticket, user_id, token).await;
    }

    async fn fetch_user(&self, ticket: Ticket, user_id: &str, token: &str) {
        let users = &self.ctx.services.users;
        let Ok(user) = self.ctx.gateway.call(|| users.get_user(user_id, token)).await else {
            return;
        };
        if self.guard.is_current(ticket) {
            self.state.write().await.user = Some(user);
        }
    }

    async fn fetch_videos(&self, ticket: Ticket, user_id: &str, token: &str) {
        let start = self.state.read().await.cursor.start();
        let videos = &self.ctx.services.videos;
        let page = self
            .ctx
            .gateway
            .call(|| videos.list_user_videos(user_id, start, token))
            .await
            .unwrap_or_default();
        if !self.guard.is_current(ticket) {
            return;
        }
        let mut state = self.state.write().await;
        state.videos = page.videos;
        state.cursor.total = page.total;
    }
}

use crate::error::ClientError;
use crate::models::LogEntry;
use crate::pages::{NavIdentity, PageContext, PageGuard};
use serde::Serialize;
use tokio::sync::RwLock;

/// The logging service pages in fixed blocks of this size.
pub const LOGS_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LogsState {
    pub identity: Option<NavIdentity>,
    pub is_admin: bool,
    pub logs: Vec<LogEntry>,
    pub page_index: u64,
}

impl LogsState {
    /// The backend sends no total, so a full page is the only hint that
    /// another one exists.
    pub fn has_next(&self) -> bool {
        self.logs.len() as u64 >= LOGS_PER_PAGE
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn page_number(&self) -> u64 {
        self.page_index.saturating_add(1)
    }
}

/// Activity log: admins see every user's entries, everyone else their own.
pub struct LogsPage {
    ctx: PageContext,
    guard: PageGuard,
    state: RwLock<LogsState>,
}

impl LogsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            guard: PageGuard::default(),
            state: RwLock::new(LogsState::default()),
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub async fn snapshot(&self) -> LogsState {
        self.state.read().await.clone()
    }

    pub async fn open(&self, page_index: u64) -> Result<(), ClientError> {
        self.state.write().await.page_index = page_index;
        self.load().await
    }

    /// Resolve the role first, then pick the log scope from it.
    pub async fn load(&self) -> Result<(), ClientError> {
        let (session, token) = self.ctx.require_session()?;
        let ticket = self.guard.advance();
        let start = {
            let mut state = self.state.write().await;
            state.identity = Some(NavIdentity::from(&session));
            state.page_index.saturating_mul(LOGS_PER_PAGE)
        };

        let users = &self.ctx.services.users;
        let is_admin = self
            .ctx
            .gateway
            .call(|| users.get_user(&session.subject_id, &token))
            .await
            .map(|user| user.is_admin())
            .unwrap_or(false);

        let logs = &self.ctx.services.logs;
        let fetched = if is_admin {
            self.ctx.gateway.call(|| logs.all_logs(start, &token)).await
        } else {
            self.ctx
                .gateway
                .call(|| logs.user_logs(&session.subject_id, start, &token))
                .await
        };

        if !self.guard.is_current(ticket) {
            return Ok(());
        }

        let mut state = self.state.write().await;
        state.is_admin = is_admin;
        if let Ok(entries) = fetched {
            state.logs = entries;
        }

        Ok(())
    }

    pub async fn next_page(&self) -> Result<(), ClientError> {
        let state = self.snapshot().await;
        if !state.has_next() {
            return Ok(());
        }
        self.open(state.page_index.saturating_add(1)).await
    }

    pub async fn previous_page(&self) -> Result<(), ClientError> {
        let page_index = self.state.read().await.page_index;
        self.open(page_index.saturating_sub(1)).await
    }

    pub fn unmount(&self) {
        self.guard.invalidate();
    }
}

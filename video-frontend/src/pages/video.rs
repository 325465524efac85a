use crate::pages::{PageContext, PageGuard};
use serde::Serialize;
use tokio::sync::RwLock;

/// A failed lookup leaves the player on its loading placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PlayerState {
    #[default]
    Loading,
    Ready {
        url: String,
    },
}

impl PlayerState {
    pub fn url(&self) -> Option<&str> {
        match self {
            PlayerState::Ready { url } => Some(url),
            PlayerState::Loading => None,
        }
    }
}

pub struct VideoPage {
    ctx: PageContext,
    guard: PageGuard,
    filename: String,
    player: RwLock<PlayerState>,
}

impl VideoPage {
    pub fn new(ctx: PageContext, filename: impl Into<String>) -> Self {
        Self {
            ctx,
            guard: PageGuard::default(),
            filename: filename.into(),
            player: RwLock::new(PlayerState::Loading),
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub async fn player(&self) -> PlayerState {
        self.player.read().await.clone()
    }

    /// Resolve the stream URL. Playback does not need a session, but the
    /// token is sent when there is one.
    pub async fn load(&self) {
        let ticket = self.guard.advance();
        let token = self.ctx.session.token();
        let videos = &self.ctx.services.videos;

        match self
            .ctx
            .gateway
            .call(|| videos.stream_url(&self.filename, token.as_deref()))
            .await
        {
            Ok(url) if self.guard.is_current(ticket) => {
                *self.player.write().await = PlayerState::Ready { url };
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(filename = %self.filename, error = %err, "Failed to fetch video URL");
            }
        }
    }

    pub fn unmount(&self) {
        self.guard.invalidate();
    }
}

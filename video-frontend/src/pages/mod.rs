//! Page controllers. Each page owns its view state and drives the backend
//! clients through one shared [`ApiGateway`].

pub mod auth;
pub mod dashboard;
pub mod logs;
pub mod profile;
pub mod video;

pub use auth::{login, logout, register};
pub use dashboard::{DashboardPage, DashboardState, VIDEOS_PER_PAGE};
pub use logs::{LogsPage, LogsState, LOGS_PER_PAGE};
pub use profile::{ProfilePage, ProfileState};
pub use video::{PlayerState, VideoPage};

use crate::error::ClientError;
use crate::gateway::ApiGateway;
use crate::services::ServiceClients;
use crate::session::{Session, SessionProvider};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How long an error banner stays up before hiding itself.
pub const BANNER_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// What every page needs: the backend clients, the session, and a gateway.
#[derive(Clone)]
pub struct PageContext {
    pub services: Arc<ServiceClients>,
    pub session: Arc<SessionProvider>,
    pub gateway: Arc<ApiGateway>,
}

impl PageContext {
    pub fn new(services: Arc<ServiceClients>, session: Arc<SessionProvider>, timeout: Option<Duration>) -> Self {
        Self {
            services,
            session,
            gateway: Arc::new(ApiGateway::new(timeout)),
        }
    }

    /// Session and token, or an error whose `requires_login()` is true.
    pub fn require_session(&self) -> Result<(Session, String), ClientError> {
        self.session.require().inspect_err(|err| {
            tracing::info!(error = %err, "Page requires login");
        })
    }

    /// Banner for whatever the gateway last failed with.
    pub fn error_banner(&self) -> Option<ErrorBanner> {
        self.gateway.error().map(ErrorBanner::new)
    }
}

/// Superseded-response guard.
///
/// Every load takes a [`Ticket`]; navigating or unmounting advances the
/// generation so responses carrying an older ticket are dropped on arrival.
#[derive(Debug, Default)]
pub struct PageGuard {
    generation: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl PageGuard {
    /// Start a new load, superseding any still in flight.
    pub fn advance(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Ticket for work that belongs to the current load.
    pub fn current(&self) -> Ticket {
        Ticket(self.generation.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transient error notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    shown_at: Instant,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at.elapsed() < BANNER_DISPLAY_DURATION
    }

    /// Milliseconds the rendered banner should stay up.
    pub fn display_millis(&self) -> u128 {
        BANNER_DISPLAY_DURATION.as_millis()
    }
}

/// Navigation bar identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavIdentity {
    pub user_id: String,
    pub display_name: String,
    pub initials: String,
}

impl From<&Session> for NavIdentity {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.subject_id.clone(),
            display_name: session.display_name().to_string(),
            initials: session.initials(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_supersedes_older_tickets() {
        let guard = PageGuard::default();
        let first = guard.advance();
        assert!(guard.is_current(first));

        let second = guard.advance();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));

        guard.invalidate();
        assert!(!guard.is_current(second));
        assert!(guard.is_current(guard.current()));
    }

    #[tokio::test(start_paused = true)]
    async fn banner_hides_after_display_duration() {
        let banner = ErrorBanner::new("Failed to fetch videos");
        assert!(banner.is_visible());

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert!(banner.is_visible());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!banner.is_visible());
    }

    #[test]
    fn nav_identity_from_session() {
        let session = Session {
            subject_id: "12".into(),
            email: "jane.doe@example.com".into(),
            expires_at: None,
        };
        let identity = NavIdentity::from(&session);
        assert_eq!(identity.user_id, "12");
        assert_eq!(identity.display_name, "jane.doe");
        assert_eq!(identity.initials, "JA");
    }
}

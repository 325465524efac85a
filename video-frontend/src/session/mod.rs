//! Session store: token persistence plus a provider that derives identity.
//!
//! The identity here comes from decoding the token payload WITHOUT checking
//! its signature. It is advisory only (what to display, where to route);
//! authorization is decided by the backend services on every call.

mod store;

pub use store::{MemoryTokenStore, TokenStore};

use crate::error::ClientError;
use crate::utils::jwt::decode_token_claims;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Identity derived from the current bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub subject_id: String,
    pub email: String,
    pub expires_at: Option<i64>,
}

impl Session {
    /// Decode a token as of `now` (epoch seconds).
    pub fn decode(token: &str, now: i64) -> Result<Self, ClientError> {
        let claims = decode_token_claims(token)?;

        if let Some(exp) = claims.exp {
            if exp < now {
                return Err(ClientError::SessionExpired);
            }
        }

        Ok(Self {
            subject_id: claims.id,
            email: claims.email,
            expires_at: claims.exp,
        })
    }

    /// Local part of the email, used as the display name.
    pub fn display_name(&self) -> &str {
        self.email
            .split('@')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
    }

    pub fn initials(&self) -> String {
        self.display_name().chars().take(2).collect::<String>().to_uppercase()
    }
}

/// One provider per app instance (per browser session in the web layer).
/// Pages read identity through it instead of touching storage directly.
pub struct SessionProvider {
    store: Arc<dyn TokenStore>,
    changes: watch::Sender<Option<Session>>,
}

impl SessionProvider {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let current = store
            .load()
            .and_then(|token| Session::decode(&token, Utc::now().timestamp()).ok());
        let (changes, _) = watch::channel(current);

        Self { store, changes }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()))
    }

    /// Provider seeded with a token already persisted elsewhere.
    pub fn with_token(token: Option<String>) -> Self {
        Self::new(Arc::new(MemoryTokenStore::with_token(token)))
    }

    /// Persist a freshly issued token and announce the new identity.
    pub fn save_token(&self, token: &str) {
        self.store.store(token);
        let session = Session::decode(token, Utc::now().timestamp()).ok();
        tracing::info!(
            user_id = session.as_ref().map(|s| s.subject_id.as_str()).unwrap_or("-"),
            "Session token saved"
        );
        self.changes.send_replace(session);
    }

    /// Raw token for the Authorization header, if any.
    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    pub fn get_session(&self) -> Result<Option<Session>, ClientError> {
        self.get_session_at(Utc::now().timestamp())
    }

    /// Like [`get_session`](Self::get_session) with an explicit clock.
    ///
    /// A token that fails to decode or has expired is dropped from the store
    /// before the error is returned.
    pub fn get_session_at(&self, now: i64) -> Result<Option<Session>, ClientError> {
        let Some(token) = self.store.load() else {
            return Ok(None);
        };

        match Session::decode(&token, now) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!(error = %err, "Discarding unusable session token");
                self.clear_session();
                Err(err)
            }
        }
    }

    /// Session and token for an authenticated page, or the reason there is none.
    pub fn require(&self) -> Result<(Session, String), ClientError> {
        let session = self.get_session()?.ok_or(ClientError::NotLoggedIn)?;
        let token = self.store.load().ok_or(ClientError::NotLoggedIn)?;
        Ok((session, token))
    }

    pub fn clear_session(&self) {
        self.store.remove();
        self.changes.send_if_modified(|current| current.take().is_some());
    }

    /// Receiver notified on every login/logout/expiry.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }
}

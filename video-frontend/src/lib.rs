pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod pagination;
pub mod services;
pub mod session;
pub mod startup;
pub mod upload;
pub mod usage;
pub mod utils;

use pages::PageContext;
use services::ServiceClients;
use session::SessionProvider;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state: the backend clients and the per-call timeout.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceClients>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(services: Arc<ServiceClients>, request_timeout: Duration) -> Self {
        Self {
            services,
            request_timeout,
        }
    }

    /// Page context for one request, seeded with the browser session's token.
    pub fn page_context(&self, token: Option<String>) -> PageContext {
        PageContext::new(
            self.services.clone(),
            Arc::new(SessionProvider::with_token(token)),
            Some(self.request_timeout),
        )
    }
}

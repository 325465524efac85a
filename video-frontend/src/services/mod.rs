pub mod backend;
pub mod log_client;
pub mod metrics;
pub mod usage_client;
pub mod user_client;
pub mod video_client;

pub use backend::{build_http_client, ServiceHttp};
pub use log_client::LogClient;
pub use usage_client::UsageClient;
pub use user_client::UserClient;
pub use video_client::VideoClient;

use crate::config::Settings;
use crate::error::ClientError;

/// Every backend client the pages talk to, sharing one connection pool.
pub struct ServiceClients {
    pub users: UserClient,
    pub videos: VideoClient,
    pub usage: UsageClient,
    pub logs: LogClient,
}

impl ServiceClients {
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let client = build_http_client(settings.client.request_timeout())?;
        let services = &settings.services;

        Ok(Self {
            users: UserClient::new(ServiceHttp::new(client.clone(), &services.user_url, "user-service")?),
            videos: VideoClient::new(
                ServiceHttp::new(client.clone(), &services.video_url, "video-service")?,
                settings.client.upload_timeout(),
            ),
            usage: UsageClient::new(
                ServiceHttp::new(client.clone(), &services.storage_url, "storage-service")?,
                ServiceHttp::new(client.clone(), &services.usage_url, "usage-service")?,
            ),
            logs: LogClient::new(ServiceHttp::new(client, &services.logging_url, "logging-service")?),
        })
    }
}

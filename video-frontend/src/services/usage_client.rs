use crate::error::ClientError;
use crate::models::{BandwidthUsage, StorageUsage};
use crate::services::backend::ServiceHttp;

/// Storage and bandwidth meters live in two different services.
pub struct UsageClient {
    storage: ServiceHttp,
    usage: ServiceHttp,
}

impl UsageClient {
    pub fn new(storage: ServiceHttp, usage: ServiceHttp) -> Self {
        Self { storage, usage }
    }

    /// `GET /api/storage/usage`
    pub async fn storage_usage(&self, token: &str) -> Result<StorageUsage, ClientError> {
        let url = self.storage.url(&["api", "storage", "usage"])?;
        self.storage
            .send_json("storage_usage", self.storage.get(&url).bearer_auth(token))
            .await
    }

    /// `GET /api/usage/daily-usage`
    pub async fn bandwidth_usage(&self, token: &str) -> Result<BandwidthUsage, ClientError> {
        let url = self.usage.url(&["api", "usage", "daily-usage"])?;
        self.usage
            .send_json("bandwidth_usage", self.usage.get(&url).bearer_auth(token))
            .await
    }
}

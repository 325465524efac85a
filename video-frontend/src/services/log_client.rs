use crate::error::ClientError;
use crate::models::{LogEntry, LogPage};
use crate::services::backend::ServiceHttp;

/// Client for the logging service's read endpoints.
pub struct LogClient {
    http: ServiceHttp,
}

impl LogClient {
    pub fn new(http: ServiceHttp) -> Self {
        Self { http }
    }

    /// `GET /api/logs/user/{id}?start=N`
    pub async fn user_logs(
        &self,
        user_id: &str,
        start: u64,
        token: &str,
    ) -> Result<Vec<LogEntry>, ClientError> {
        let url = self.http.url(&["api", "logs", "user", user_id])?;
        let page: LogPage = self
            .http
            .send_json(
                "user_logs",
                self.http.get(&url).query(&[("start", start)]).bearer_auth(token),
            )
            .await?;

        Ok(page.logs)
    }

    /// `GET /api/logs/all?start=N`; the backend only honors this for admins.
    pub async fn all_logs(&self, start: u64, token: &str) -> Result<Vec<LogEntry>, ClientError> {
        let url = self.http.url(&["api", "logs", "all"])?;
        let page: LogPage = self
            .http
            .send_json(
                "all_logs",
                self.http.get(&url).query(&[("start", start)]).bearer_auth(token),
            )
            .await?;

        Ok(page.logs)
    }
}

use crate::error::ClientError;
use crate::models::{StreamUrl, VideoPage};
use crate::services::backend::ServiceHttp;
use crate::upload::{VideoFile, VideoUploader};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Client for the video service: listings, stream URLs, deletes and uploads.
pub struct VideoClient {
    http: ServiceHttp,
    upload_timeout: Duration,
}

impl VideoClient {
    pub fn new(http: ServiceHttp, upload_timeout: Duration) -> Self {
        Self {
            http,
            upload_timeout,
        }
    }

    /// `GET /api/videos/stream?start=N`
    pub async fn list_videos(&self, start: u64, token: Option<&str>) -> Result<VideoPage, ClientError> {
        let url = self.http.url(&["api", "videos", "stream"])?;
        self.http
            .send_json(
                "list_videos",
                self.http
                    .get(&url)
                    .query(&[("start", start)])
                    .maybe_bearer_auth(token),
            )
            .await
    }

    /// `GET /api/videos/user/{id}?start=N`
    pub async fn list_user_videos(
        &self,
        user_id: &str,
        start: u64,
        token: &str,
    ) -> Result<VideoPage, ClientError> {
        let url = self.http.url(&["api", "videos", "user", user_id])?;
        self.http
            .send_json(
                "list_user_videos",
                self.http.get(&url).query(&[("start", start)]).bearer_auth(token),
            )
            .await
    }

    /// `GET /api/videos/stream/{filename}`, resolving the playable URL.
    pub async fn stream_url(&self, filename: &str, token: Option<&str>) -> Result<String, ClientError> {
        let url = self.http.url(&["api", "videos", "stream", filename])?;
        let stream: StreamUrl = self
            .http
            .send_json("stream_url", self.http.get(&url).maybe_bearer_auth(token))
            .await?;

        Ok(stream.url)
    }

    /// `DELETE /api/videos/delete/{filename}`
    pub async fn delete_video(&self, filename: &str, token: &str) -> Result<(), ClientError> {
        let url = self.http.url(&["api", "videos", "delete", filename])?;
        self.http
            .send("delete_video", self.http.delete(&url).bearer_auth(token))
            .await?;

        tracing::info!(filename = %filename, "Video deleted");
        Ok(())
    }

    /// `DELETE /api/videos/delete-all`
    pub async fn delete_all_videos(&self, token: &str) -> Result<(), ClientError> {
        let url = self.http.url(&["api", "videos", "delete-all"])?;
        self.http
            .send("delete_all_videos", self.http.delete(&url).bearer_auth(token))
            .await?;

        tracing::info!("All videos deleted");
        Ok(())
    }

    /// `POST /api/videos/upload` as multipart: a `video` file part and a
    /// `title` text field.
    pub async fn upload_video(&self, file: &VideoFile, title: &str, token: &str) -> Result<(), ClientError> {
        let url = self.http.url(&["api", "videos", "upload"])?;

        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| ClientError::Validation(format!("Invalid media type: {}", e)))?;
        let form = Form::new()
            .part("video", part)
            .text("title", title.to_string());

        self.http
            .send(
                "upload_video",
                self.http
                    .post(&url)
                    .multipart(form)
                    .bearer_auth(token)
                    .timeout(self.upload_timeout),
            )
            .await?;

        tracing::info!(file_name = %file.name, size = file.size(), "Video uploaded");
        Ok(())
    }
}

#[async_trait]
impl VideoUploader for VideoClient {
    async fn upload(&self, file: &VideoFile, title: &str, token: &str) -> Result<(), ClientError> {
        self.upload_video(file, title, token).await
    }
}

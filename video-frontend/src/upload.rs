//! Upload flow: one explicit state value instead of scattered flags.
//!
//! ```text
//! Idle -> FileSelected -> Validating -> Uploading -> Success
//!              ^               |             |
//!              +---------------+             +----> Failed
//! ```
//!
//! Picking a new file from any settled state goes back to `FileSelected`.

use crate::error::ClientError;
use crate::models::{BandwidthUsage, StorageUsage};
use crate::services::metrics;
use async_trait::async_trait;
use axum::body::Bytes;
use serde::Serialize;
use std::future::Future;

/// Largest file accepted for upload.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

pub const MSG_MISSING_INPUT: &str = "Please provide a title and select a video file.";
pub const MSG_TOO_LARGE: &str = "File size exceeds the 50 MB limit. Please choose a smaller file.";
pub const MSG_STORAGE_FULL: &str = "Storage limit reached. Please delete some videos before uploading.";
pub const MSG_BANDWIDTH_SPENT: &str = "Daily bandwidth limit reached. Please try again tomorrow.";
pub const MSG_INVALID_DROP: &str = "Please drop a valid video file.";
pub const MSG_UPLOADING: &str = "Uploading...";
pub const MSG_SUCCESS: &str = "Video uploaded successfully!";
pub const MSG_EXCEEDS_STORAGE: &str =
    "Exceeding storage limit. Please delete some videos or upload a smaller file.";
pub const MSG_EXCEEDS_BANDWIDTH: &str =
    "Exceeding daily bandwidth limit. Please try again tomorrow or upload a smaller file.";
pub const MSG_ALREADY_UPLOADING: &str =
    "Another upload is already in progress. Please wait for it to finish.";

const VIDEO_MEDIA_PREFIX: &str = "video/";

/// A file picked or dropped by the user, held in memory until submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    pub name: String,
    pub media_type: String,
    pub data: Bytes,
}

impl VideoFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_video(&self) -> bool {
        self.media_type.starts_with(VIDEO_MEDIA_PREFIX)
    }
}

/// Drives the color of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTag {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadStatus {
    pub tag: StatusTag,
    pub message: String,
}

impl UploadStatus {
    pub fn new(tag: StatusTag, message: impl Into<String>) -> Self {
        Self {
            tag,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusTag::Error, message)
    }

    /// CSS class for the status line.
    pub fn css_class(&self) -> &'static str {
        match self.tag {
            StatusTag::Info => "text-blue-600",
            StatusTag::Success => "text-green-600",
            StatusTag::Error => "text-red-600",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    FileSelected {
        file: VideoFile,
    },
    Validating {
        file: VideoFile,
    },
    Uploading {
        file: VideoFile,
    },
    Success,
    /// The file is kept so the user can retry without picking it again.
    Failed {
        file: VideoFile,
    },
}

/// Sends a validated upload somewhere. Implemented by the video service
/// client; tests substitute their own.
#[async_trait]
pub trait VideoUploader: Send + Sync {
    async fn upload(&self, file: &VideoFile, title: &str, token: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
pub struct UploadFlow {
    state: UploadState,
    title: String,
    status: Option<UploadStatus>,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> Option<&UploadStatus> {
        self.status.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, UploadState::Uploading { .. })
    }

    pub fn selected_file(&self) -> Option<&VideoFile> {
        match &self.state {
            UploadState::FileSelected { file }
            | UploadState::Validating { file }
            | UploadState::Uploading { file }
            | UploadState::Failed { file } => Some(file),
            UploadState::Idle | UploadState::Success => None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// File input pick.
    pub fn select_file(&mut self, file: VideoFile) {
        if self.is_uploading() {
            return;
        }
        tracing::debug!(file_name = %file.name, size = file.size(), "Upload file selected");
        self.state = UploadState::FileSelected { file };
        self.status = None;
    }

    /// Drag-and-drop; anything that is not a video leaves the state alone.
    pub fn drop_file(&mut self, file: VideoFile) {
        if !file.is_video() {
            tracing::debug!(media_type = %file.media_type, "Rejected dropped file");
            self.status = Some(UploadStatus::new(StatusTag::Error, MSG_INVALID_DROP));
            return;
        }
        self.select_file(file);
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self, storage: Option<&StorageUsage>, bandwidth: Option<&BandwidthUsage>) -> bool {
        self.selected_file().is_some()
            && !self.title.trim().is_empty()
            && !self.is_uploading()
            && !crate::usage::is_upload_blocked(storage, bandwidth)
    }

    /// Run the pre-submit checks in order; the first failure wins.
    ///
    /// A `Failed` flow still holds its file and can be submitted again without
    /// a new pick. On success the flow is left in `Validating` and the file is
    /// returned.
    pub fn validate(
        &mut self,
        storage: Option<&StorageUsage>,
        bandwidth: Option<&BandwidthUsage>,
    ) -> Result<VideoFile, ClientError> {
        let file = match std::mem::take(&mut self.state) {
            UploadState::FileSelected { file } | UploadState::Failed { file } => file,
            UploadState::Uploading { file } => {
                self.state = UploadState::Uploading { file };
                return Err(self.reject(MSG_ALREADY_UPLOADING));
            }
            other => {
                self.state = other;
                return Err(self.reject(MSG_MISSING_INPUT));
            }
        };
        self.state = UploadState::Validating { file: file.clone() };

        let failure = if self.title.trim().is_empty() {
            Some(MSG_MISSING_INPUT)
        } else if file.size() > MAX_UPLOAD_BYTES {
            Some(MSG_TOO_LARGE)
        } else if storage.is_some_and(StorageUsage::is_full) {
            Some(MSG_STORAGE_FULL)
        } else if bandwidth.is_some_and(BandwidthUsage::limit_reached) {
            Some(MSG_BANDWIDTH_SPENT)
        } else {
            None
        };

        match failure {
            Some(message) => {
                self.state = UploadState::FileSelected { file };
                Err(self.reject(message))
            }
            None => Ok(file),
        }
    }

    /// Validate, upload, and on success await `refresh` so dependent usage
    /// snapshots are refetched.
    pub async fn submit<U, R, Fut>(
        &mut self,
        uploader: &U,
        token: &str,
        storage: Option<&StorageUsage>,
        bandwidth: Option<&BandwidthUsage>,
        refresh: R,
    ) -> Result<(), ClientError>
    where
        U: VideoUploader + ?Sized,
        R: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let file = self.validate(storage, bandwidth)?;

        self.state = UploadState::Uploading { file: file.clone() };
        self.status = Some(UploadStatus::new(StatusTag::Info, MSG_UPLOADING));

        match uploader.upload(&file, &self.title, token).await {
            Ok(()) => {
                tracing::info!(file_name = %file.name, "Upload succeeded");
                metrics::record_upload("success");
                self.state = UploadState::Success;
                self.title.clear();
                self.status = Some(UploadStatus::new(StatusTag::Success, MSG_SUCCESS));
                refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(file_name = %file.name, error = %err, "Upload failed");
                metrics::record_upload("failed");
                self.state = UploadState::Failed { file };
                self.status = Some(UploadStatus::new(StatusTag::Error, map_upload_error(&err)));
                Err(err)
            }
        }
    }

    /// Report a submit that could not take the flow because another upload
    /// holds it.
    pub fn busy_status() -> UploadStatus {
        UploadStatus::error(MSG_ALREADY_UPLOADING)
    }

    fn reject(&mut self, message: &str) -> ClientError {
        self.status = Some(UploadStatus::new(StatusTag::Error, message));
        ClientError::Validation(message.to_string())
    }
}

/// User-facing text for a failed upload.
///
/// Backend messages are matched case-insensitively against the known
/// quota/concurrency failures; anything else is passed through with a
/// generic prefix. Errors without a response show their raw text.
pub fn map_upload_error(err: &ClientError) -> String {
    match err {
        ClientError::Http { message, .. } => {
            let message = message.as_deref().unwrap_or("Unknown error");
            let lowered = message.to_lowercase();
            if lowered.contains("exceeding total storage limit") {
                MSG_EXCEEDS_STORAGE.to_string()
            } else if lowered.contains("exceeding daily bandwidth limit") {
                MSG_EXCEEDS_BANDWIDTH.to_string()
            } else if lowered.contains("already uploading") {
                MSG_ALREADY_UPLOADING.to_string()
            } else {
                format!("Failed to upload video: {}", message)
            }
        }
        other => other.to_string(),
    }
}

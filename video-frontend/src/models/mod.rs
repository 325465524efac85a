pub mod log;
pub mod usage;
pub mod user;
pub mod video;

pub use log::{LogEntry, LogPage};
pub use usage::{BandwidthUsage, StorageUsage};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, UserEnvelope, UserProfile};
pub use video::{StreamUrl, VideoPage, VideoSummary};

use serde::{Deserialize, Deserializer};

/// Backends are inconsistent about identifiers: some send numbers, some strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Signed(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}

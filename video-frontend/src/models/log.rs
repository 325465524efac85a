use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One access-log row. Ordering is whatever the logging service returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(deserialize_with = "super::string_or_number")]
    pub user_id: String,
    pub action_type: String,
    pub service_name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
}

impl LogEntry {
    pub fn created_at_display(&self) -> String {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogPage {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_timestamps_and_keeps_unparseable_ones() {
        let mut entry = LogEntry {
            user_id: "1".into(),
            action_type: "UPLOAD".into(),
            service_name: "video-service".into(),
            description: "Uploaded clip.mp4".into(),
            created_at: "2024-05-06T07:08:09Z".into(),
        };
        assert_eq!(entry.created_at_display(), "2024-05-06 07:08:09");

        entry.created_at = "yesterday".into();
        assert_eq!(entry.created_at_display(), "yesterday");
    }
}

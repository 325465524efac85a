use serde::{Deserialize, Serialize};

/// One entry of a video listing. Immutable snapshot of the backend's row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub filename: String,
    pub filepath: String,
    #[serde(default)]
    pub title: String,
}

impl VideoSummary {
    /// Thumbnails sit next to the upload with the container extension swapped.
    pub fn thumbnail_url(&self) -> String {
        self.filepath.replacen(".mp4", ".jpg", 1)
    }

    pub fn watch_path(&self) -> String {
        format!("/video/{}", self.filename)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub videos: Vec<VideoSummary>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamUrl {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_swaps_first_mp4_only() {
        let video = VideoSummary {
            id: "7".into(),
            filename: "clip.mp4".into(),
            filepath: "https://cdn.example.com/u/1/clip.mp4".into(),
            title: "Clip".into(),
        };
        assert_eq!(video.thumbnail_url(), "https://cdn.example.com/u/1/clip.jpg");
        assert_eq!(video.watch_path(), "/video/clip.mp4");
    }

    #[test]
    fn accepts_numeric_ids_and_missing_total() {
        let page: VideoPage = serde_json::from_str(
            r#"{"videos":[{"id":42,"filename":"a.mp4","filepath":"/a.mp4","title":"A"}]}"#,
        )
        .unwrap();
        assert_eq!(page.videos[0].id, "42");
        assert_eq!(page.total, 0);
    }
}

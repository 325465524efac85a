//! Video page: stream URL resolution.

mod common;

use common::{valid_token, TestBackend};
use serde_json::json;
use video_frontend::pages::{PlayerState, VideoPage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Test: the player becomes ready once the URL resolves.
#[tokio::test]
async fn resolves_stream_url() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/stream/clip-1.mp4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "https://cdn.example.com/signed/clip-1.mp4"})),
        )
        .mount(&backend.server)
        .await;

    let page = VideoPage::new(backend.context(Some(valid_token())), "clip-1.mp4");
    page.load().await;

    assert_eq!(
        page.player().await,
        PlayerState::Ready {
            url: "https://cdn.example.com/signed/clip-1.mp4".to_string()
        }
    );
}

/// Test: a failed lookup leaves the player loading.
#[tokio::test]
async fn failure_keeps_player_loading() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/stream/missing.mp4"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Video not found"})))
        .mount(&backend.server)
        .await;

    let page = VideoPage::new(backend.context(None), "missing.mp4");
    page.load().await;

    assert_eq!(page.player().await, PlayerState::Loading);
    assert_eq!(page.context().gateway.error().as_deref(), Some("Video not found"));
}

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use feedstore::FeedStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scroll_feed::{
    app,
    config::AppConfig,
    state::{AppState, SharedState},
};
use tower::ServiceExt; // for oneshot

pub struct TestClient {
    pub router: Router,
    pub state: SharedState,
}

impl TestClient {
    pub fn new() -> Self {
        let config = AppConfig {
            rng_seed: Some(42),
            ..AppConfig::default()
        };
        let state = AppState::with_store(FeedStore::with_rng(StdRng::seed_from_u64(42)), &config);
        let router = app(state.clone());
        Self { router, state }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::GET, uri).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::POST, uri).await
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(uri)
            .method(Method::GET)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    async fn send(&self, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .method(method)
            .body(Body::empty())
            .unwrap();

        // Router は clone が安いので毎回 clone して oneshot する
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body_json: serde_json::Value = if body_bytes.is_empty() {
            serde_json::json!(null)
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or_else(
                |_| serde_json::json!({ "raw": String::from_utf8_lossy(&body_bytes) }),
            )
        };

        (status, body_json)
    }
}

/// `posts` 配列から指定 ID の投稿を探す
pub fn find_post<'a>(feed: &'a serde_json::Value, id: &str) -> &'a serde_json::Value {
    feed["posts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id)
        .unwrap_or_else(|| panic!("post {} not found in {}", id, feed))
}

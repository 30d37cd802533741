use crate::config::AppConfig;
use feedstore::FeedStore;
use paginator::{ManualVisibility, Paginator, PaginatorConfig, SharedStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

pub type SharedState = AppState;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub paginator: Paginator,
    /// クライアントからの「見えた」報告を受け取る監視
    pub visibility: ManualVisibility,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_store(FeedStore::with_rng(rng), config)
    }

    pub fn with_store(store: FeedStore, config: &AppConfig) -> Self {
        let store = Arc::new(RwLock::new(store));
        let visibility = ManualVisibility::new();
        let paginator = Paginator::new(
            Arc::clone(&store),
            Arc::new(visibility.clone()),
            PaginatorConfig {
                fetch_delay: config.fetch_delay,
            },
        );
        Self {
            store,
            paginator,
            visibility,
        }
    }
}

//! 最後の投稿が見えたら次のページを読み込む無限スクロール
//!
//! 状態は Idle / Fetching の2つで、`loading` フラグがそのまま状態を表す。
//! 読み込み中に可視イベントが来ても監視は外さず、フラグで弾くだけ。
//! 読み込みは `fetch_delay` 待ってから必ず1件追加して終わる（キャンセル無し）。

pub mod visibility;

use feedstore::FeedStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::RwLock;

pub use visibility::{ManualVisibility, VisibilityCallback, VisibilityWatcher, WatchHandle};

pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1000);

pub type SharedStore = Arc<RwLock<FeedStore>>;

#[derive(Debug, Clone)]
pub struct PaginatorConfig {
    /// 擬似フェッチの待ち時間
    pub fetch_delay: Duration,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            fetch_delay: DEFAULT_FETCH_DELAY,
        }
    }
}

struct Anchor {
    post_id: String,
    handle: WatchHandle,
}

struct Inner {
    store: SharedStore,
    watcher: Arc<dyn VisibilityWatcher>,
    config: PaginatorConfig,
    loading: AtomicBool,
    anchor: Mutex<Option<Anchor>>,
}

#[derive(Clone)]
pub struct Paginator {
    inner: Arc<Inner>,
}

impl Paginator {
    pub fn new(
        store: SharedStore,
        watcher: Arc<dyn VisibilityWatcher>,
        config: PaginatorConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                watcher,
                config,
                loading: AtomicBool::new(false),
                anchor: Mutex::new(None),
            }),
        }
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.inner.store)
    }

    /// 表示層がスピナーを出すためのフラグ
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// 現在監視している投稿の ID
    pub fn anchor(&self) -> Option<String> {
        self.anchor_slot().as_ref().map(|a| a.post_id.clone())
    }

    /// 「この要素が今の最後の投稿」を登録する。
    /// 同じ ID なら何もしない。違う ID なら古い監視を先に解除してから張り直す。
    pub fn register_anchor(&self, post_id: &str) {
        let mut slot = self.anchor_slot();
        if slot.as_ref().is_some_and(|a| a.post_id == post_id) {
            return;
        }

        if let Some(mut previous) = slot.take() {
            previous.handle.cancel();
            tracing::debug!("Released anchor {}", previous.post_id);
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let on_visible: VisibilityCallback = Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                Paginator { inner }.on_anchor_visible();
            }
        });
        let handle = self.inner.watcher.watch(post_id, on_visible);

        tracing::debug!("Watching anchor {}", post_id);
        *slot = Some(Anchor {
            post_id: post_id.to_string(),
            handle,
        });
    }

    /// アンカー要素が外された。監視を解除し、以後コールバックは来ない。
    pub fn release_anchor(&self) {
        if let Some(mut previous) = self.anchor_slot().take() {
            previous.handle.cancel();
            tracing::debug!("Released anchor {}", previous.post_id);
        }
    }

    /// ストアの最後の投稿をアンカーにする
    pub async fn sync_anchor(&self) {
        let last = self.inner.store.read().await.last_post_id();
        match last {
            Some(post_id) => self.register_anchor(&post_id),
            None => self.release_anchor(),
        }
    }

    /// アンカーが画面に入ったときに呼ばれる。読み込み中なら何もしない。
    pub fn on_anchor_visible(&self) {
        if self
            .inner
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Anchor visible while loading, ignored");
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Cannot start fetch outside of a runtime: {}", e);
                self.inner.loading.store(false, Ordering::Release);
                return;
            }
        };

        tracing::info!(
            "Anchor visible, loading next page in {:?}",
            self.inner.config.fetch_delay
        );
        let this = self.clone();
        runtime.spawn(async move {
            this.complete_fetch().await;
        });
    }

    async fn complete_fetch(&self) {
        tokio::time::sleep(self.inner.config.fetch_delay).await;

        let last = {
            let mut store = self.inner.store.write().await;
            store.append_generated_page();
            store.last_post_id()
        };
        self.inner.loading.store(false, Ordering::Release);

        if let Some(post_id) = last {
            self.register_anchor(&post_id);
        }
    }

    fn anchor_slot(&self) -> MutexGuard<'_, Option<Anchor>> {
        match self.inner.anchor.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

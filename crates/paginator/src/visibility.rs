//! 「この要素が画面に入ったか」を監視する能力の抽象化
//!
//! ページャーはこのトレイトだけに依存する。テストや HTTP アダプタは
//! `ManualVisibility` を使い、外から `report_visible` で発火させる。

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub type VisibilityCallback = Arc<dyn Fn() + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
pub trait VisibilityWatcher: Send + Sync {
    /// `target` の監視を始める。戻り値を cancel（または drop）すると監視は止まる。
    fn watch(&self, target: &str, on_visible: VisibilityCallback) -> WatchHandle;
}

/// 監視の解除ハンドル。解除は一度だけ実行され、drop 時にも解除される。
pub struct WatchHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl WatchHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

struct Registration {
    target: String,
    callback: VisibilityCallback,
    live: Arc<AtomicBool>,
}

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    watches: Mutex<HashMap<u64, Registration>>,
}

/// 呼び出し側が可視になったことを報告する監視実装
#[derive(Clone, Default)]
pub struct ManualVisibility {
    registry: Arc<Registry>,
}

impl ManualVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// `target` を監視している全コールバックを発火させ、発火した数を返す
    pub fn report_visible(&self, target: &str) -> usize {
        // コールバック内から watch/cancel されてもデッドロックしないよう、
        // ロックを外してから呼ぶ
        let fired: Vec<(VisibilityCallback, Arc<AtomicBool>)> = {
            let watches = match self.registry.watches.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            watches
                .values()
                .filter(|r| r.target == target)
                .map(|r| (Arc::clone(&r.callback), Arc::clone(&r.live)))
                .collect()
        };

        let mut count = 0;
        for (callback, live) in fired {
            // 直前に解除されたものは呼ばない
            if live.load(Ordering::Acquire) {
                callback();
                count += 1;
            }
        }
        tracing::debug!("Visibility reported for {} ({} watch fired)", target, count);
        count
    }

    /// 現在有効な監視の数
    pub fn active_watches(&self) -> usize {
        match self.registry.watches.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn watched_targets(&self) -> Vec<String> {
        let watches = match self.registry.watches.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        watches.values().map(|r| r.target.clone()).collect()
    }
}

impl VisibilityWatcher for ManualVisibility {
    fn watch(&self, target: &str, on_visible: VisibilityCallback) -> WatchHandle {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let live = Arc::new(AtomicBool::new(true));

        {
            let mut watches = match self.registry.watches.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            watches.insert(
                id,
                Registration {
                    target: target.to_string(),
                    callback: on_visible,
                    live: Arc::clone(&live),
                },
            );
        }

        let registry = Arc::downgrade(&self.registry);
        WatchHandle::new(move || {
            live.store(false, Ordering::Release);
            if let Some(registry) = registry.upgrade() {
                let mut watches = match registry.watches.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                watches.remove(&id);
            }
        })
    }
}

//! フィードの状態ストア
//!
//! 投稿とストーリーを `Arc<Vec<Arc<_>>>` で保持し、変更のたびに外側の
//! `Vec` を作り直す（copy-on-write）。一致しなかった要素は `Arc` ごと
//! 共有されるので、読み手は `Arc::ptr_eq` で変更の有無を判定できる。
//!
//! 存在しない ID に対する操作はエラーではなく何もしない。

pub mod generate;

use feed_core::{Post, Story};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

pub use generate::generate_post;

pub type Posts = Arc<Vec<Arc<Post>>>;
pub type Stories = Arc<Vec<Arc<Story>>>;

pub struct FeedStore {
    posts: Posts,
    stories: Stories,
    rng: Box<dyn RngCore + Send + Sync>,
}

impl FeedStore {
    pub fn new(stories: Vec<Story>, posts: Vec<Post>, rng: impl RngCore + Send + Sync + 'static) -> Self {
        Self {
            posts: Arc::new(posts.into_iter().map(Arc::new).collect()),
            stories: Arc::new(stories.into_iter().map(Arc::new).collect()),
            rng: Box::new(rng),
        }
    }

    /// シードデータと任意の乱数源で初期化する
    pub fn with_rng(rng: impl RngCore + Send + Sync + 'static) -> Self {
        Self::new(feed_core::seed_stories(), feed_core::seed_posts(), rng)
    }

    /// シードデータ + エントロピー由来の乱数源
    pub fn seeded() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn posts(&self) -> Posts {
        Arc::clone(&self.posts)
    }

    pub fn stories(&self) -> Stories {
        Arc::clone(&self.stories)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn last_post_id(&self) -> Option<String> {
        self.posts.last().map(|p| p.id.clone())
    }

    pub fn toggle_like(&mut self, post_id: &str) -> bool {
        let matched = replace_matching(&mut self.posts, |p| p.id == post_id, |post| {
            if post.liked {
                post.likes = post.likes.saturating_sub(1);
            } else {
                post.likes += 1;
            }
            post.liked = !post.liked;
        });
        if !matched {
            tracing::debug!("toggle_like: post {} not found", post_id);
        }
        matched
    }

    pub fn toggle_save(&mut self, post_id: &str) -> bool {
        let matched = replace_matching(&mut self.posts, |p| p.id == post_id, |post| {
            post.saved = !post.saved;
        });
        if !matched {
            tracing::debug!("toggle_save: post {} not found", post_id);
        }
        matched
    }

    /// 既読は一方向（true に戻すだけ）。既読済みなら何も作り直さない。
    pub fn mark_story_seen(&mut self, story_id: &str) -> bool {
        let matched = replace_matching(
            &mut self.stories,
            |s| s.id == story_id && !s.seen,
            |story| story.seen = true,
        );
        if !matched {
            tracing::debug!("mark_story_seen: story {} not found or already seen", story_id);
        }
        matched
    }

    /// 末尾に生成した投稿を1件追加し、その投稿を返す
    pub fn append_generated_page(&mut self) -> Arc<Post> {
        let post = Arc::new(generate_post(self.posts.len(), &mut self.rng));

        let mut next = Vec::with_capacity(self.posts.len() + 1);
        next.extend(self.posts.iter().cloned());
        next.push(Arc::clone(&post));
        self.posts = Arc::new(next);

        tracing::info!("Appended generated post {} (total {})", post.id, self.posts.len());
        post
    }
}

/// 条件に合う要素だけ複製して書き換え、外側の `Vec` を差し替える。
/// 一致が無ければスナップショットには触れない。
fn replace_matching<T: Clone>(
    items: &mut Arc<Vec<Arc<T>>>,
    matches: impl Fn(&T) -> bool,
    update: impl Fn(&mut T),
) -> bool {
    if !items.iter().any(|item| matches(item)) {
        return false;
    }

    let next = items
        .iter()
        .map(|item| {
            if matches(item) {
                let mut changed = T::clone(item);
                update(&mut changed);
                Arc::new(changed)
            } else {
                Arc::clone(item)
            }
        })
        .collect();
    *items = Arc::new(next);
    true
}

pub mod seed;

use serde::{Deserialize, Serialize};

pub use seed::{seed_posts, seed_stories};

/// ストーリー（画面上部の丸いアバター列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub seen: bool,
}

impl Story {
    pub fn fallback_initial(&self) -> Option<String> {
        fallback_initial(&self.username)
    }
}

/// フィードに並ぶ投稿
///
/// `liked` と `likes` は常に連動する。`likes` を直接書き換えるのは
/// いいねのトグル操作だけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub likes: u32,
    pub comments: u32,
    pub time_ago: String,
    pub liked: bool,
    pub saved: bool,
}

impl Post {
    /// 画像が1枚以上あればカルーセルを表示する
    pub fn has_carousel(&self) -> bool {
        !self.images.is_empty()
    }

    /// 前後ボタンは画像が2枚以上のときだけ
    pub fn has_carousel_controls(&self) -> bool {
        self.images.len() > 1
    }

    pub fn fallback_initial(&self) -> Option<String> {
        fallback_initial(&self.username)
    }
}

fn fallback_initial(username: &str) -> Option<String> {
    username.chars().next().map(|c| c.to_uppercase().collect())
}

/// 表示層に渡すストーリー
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryView {
    #[serde(flatten)]
    pub story: Story,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_initial: Option<String>,
}

impl From<&Story> for StoryView {
    fn from(story: &Story) -> Self {
        Self {
            story: story.clone(),
            fallback_initial: story.fallback_initial(),
        }
    }
}

/// 表示層に渡す投稿
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_initial: Option<String>,
    pub has_carousel: bool,
    pub has_carousel_controls: bool,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            post: post.clone(),
            fallback_initial: post.fallback_initial(),
            has_carousel: post.has_carousel(),
            has_carousel_controls: post.has_carousel_controls(),
        }
    }
}

/// `GET /feed` のレスポンス型
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedView {
    pub stories: Vec<StoryView>,
    pub posts: Vec<PostView>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// `GET /posts` のレスポンス型
#[derive(Debug, Serialize, Deserialize)]
pub struct PostPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub posts: Vec<PostView>,
}

use crate::error::AppError;
use crate::state::{PostsQuery, SharedState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use feed_core::{FeedView, PostPage, PostView, StoryView};
use serde_json::{json, Value};

const DEFAULT_LIMIT: usize = 30;
const MAX_LIMIT: usize = 100;

/// 現在のスナップショットを表示用に組み立てる。
/// 描画のたびに最後の投稿をアンカーとして登録する（読み込み中は張り直さない）。
async fn render(state: &SharedState) -> FeedView {
    let (stories, posts) = {
        let store = state.store.read().await;
        (store.stories(), store.posts())
    };

    let loading = state.paginator.is_loading();
    if !loading {
        if let Some(last) = posts.last() {
            state.paginator.register_anchor(&last.id);
        }
    }

    FeedView {
        stories: stories.iter().map(|s| StoryView::from(s.as_ref())).collect(),
        posts: posts.iter().map(|p| PostView::from(p.as_ref())).collect(),
        loading,
        anchor: state.paginator.anchor(),
    }
}

pub async fn get_feed(State(state): State<SharedState>) -> Json<FeedView> {
    Json(render(&state).await)
}

pub async fn get_posts(
    State(state): State<SharedState>,
    Query(params): Query<PostsQuery>,
) -> Result<Json<PostPage>, AppError> {
    tracing::info!(
        "Received posts request (cursor={:?}, limit={:?})",
        params.cursor,
        params.limit
    );

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(AppError::BadRequest("limit must be positive".to_string()));
    }
    let limit = limit.min(MAX_LIMIT);

    let posts = state.store.read().await.posts();

    let start = match params.cursor.as_deref() {
        None => 0,
        Some(cursor) => posts
            .iter()
            .position(|p| p.id == cursor)
            .map(|i| i + 1)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown cursor: {}", cursor)))?,
    };

    let window: Vec<PostView> = posts
        .iter()
        .skip(start)
        .take(limit)
        .map(|p| PostView::from(p.as_ref()))
        .collect();

    // まだ後ろに投稿が残っているときだけ次のカーソルを返す
    let end = start + window.len();
    let cursor = if end < posts.len() {
        window.last().map(|p| p.post.id.clone())
    } else {
        None
    };

    Ok(Json(PostPage {
        cursor,
        posts: window,
    }))
}

pub async fn toggle_like(
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> Json<FeedView> {
    let matched = state.store.write().await.toggle_like(&post_id);
    tracing::info!("Toggle like on post {} (matched={})", post_id, matched);
    Json(render(&state).await)
}

pub async fn toggle_save(
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> Json<FeedView> {
    let matched = state.store.write().await.toggle_save(&post_id);
    tracing::info!("Toggle save on post {} (matched={})", post_id, matched);
    Json(render(&state).await)
}

pub async fn mark_story_seen(
    State(state): State<SharedState>,
    Path(story_id): Path<String>,
) -> Json<FeedView> {
    let changed = state.store.write().await.mark_story_seen(&story_id);
    tracing::info!("Mark story {} seen (changed={})", story_id, changed);
    Json(render(&state).await)
}

/// クライアントが「この投稿が画面に入った」と報告する
pub async fn report_anchor_visible(
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let fired = state.visibility.report_visible(&post_id);
    tracing::debug!("Visibility report for {} fired {} watch", post_id, fired);

    (
        StatusCode::ACCEPTED,
        Json(json!({ "loading": state.paginator.is_loading() })),
    )
}

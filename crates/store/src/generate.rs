use feed_core::seed::portrait_url;
use feed_core::Post;
use rand::Rng;

const MAX_LIKES: u32 = 200;
const MAX_COMMENTS: u32 = 50;

/// 現在の件数から次の投稿を合成する
///
/// ID・ユーザー名・アバター・時刻ラベルは `current_length` だけで決まり、
/// いいね数 `[0, 200)` とコメント数 `[0, 50)` だけ乱数を使う。
pub fn generate_post<R: Rng + ?Sized>(current_length: usize, rng: &mut R) -> Post {
    let next = current_length + 1;
    let kind = if current_length % 2 == 0 { "women" } else { "men" };

    Post {
        id: next.to_string(),
        username: format!("user{}", next),
        avatar: portrait_url(kind, next),
        content: format!("This is post number {} with some sample content.", next),
        images: Vec::new(),
        likes: rng.gen_range(0..MAX_LIKES),
        comments: rng.gen_range(0..MAX_COMMENTS),
        time_ago: format!("{}h ago", next),
        liked: false,
        saved: false,
    }
}

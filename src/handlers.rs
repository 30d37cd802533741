mod common;
mod feed;

pub use common::{health, root};
pub use feed::{
    get_feed, get_posts, mark_story_seen, report_anchor_visible, toggle_like, toggle_save,
};

//! 起動時に並んでいる固定のストーリーと投稿

use crate::{Post, Story};

const PORTRAITS_BASE: &str = "https://randomuser.me/api/portraits";

pub fn portrait_url(kind: &str, n: usize) -> String {
    format!("{}/{}/{}.jpg", PORTRAITS_BASE, kind, n)
}

fn story(id: &str, username: &str, avatar: String, seen: bool) -> Story {
    Story {
        id: id.to_string(),
        username: username.to_string(),
        avatar,
        seen,
    }
}

pub fn seed_stories() -> Vec<Story> {
    vec![
        story("1", "your_story", portrait_url("women", 1), false),
        story("2", "user1", portrait_url("men", 1), false),
        story("3", "user2", portrait_url("women", 2), true),
        story("4", "user3", portrait_url("men", 2), false),
        story("5", "user4", portrait_url("women", 3), true),
    ]
}

pub fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            username: "traveler".to_string(),
            avatar: portrait_url("women", 4),
            content: "Beautiful sunset at the beach today! 🌅 #vacation #summer".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1507525428034-b723cf961d3e".to_string(),
                "https://images.unsplash.com/photo-1519046904884-53103b34b206".to_string(),
            ],
            likes: 124,
            comments: 23,
            time_ago: "2h ago".to_string(),
            liked: false,
            saved: false,
        },
        Post {
            id: "2".to_string(),
            username: "foodlover".to_string(),
            avatar: portrait_url("men", 3),
            content: "Homemade pasta for dinner tonight! 🍝 #foodie #homecooking".to_string(),
            images: vec!["https://images.unsplash.com/photo-1555949258-eb67b1ef0ceb".to_string()],
            likes: 89,
            comments: 12,
            time_ago: "4h ago".to_string(),
            liked: true,
            saved: true,
        },
        Post {
            id: "3".to_string(),
            username: "fitnessguru".to_string(),
            avatar: portrait_url("women", 5),
            content: "Morning workout complete! 💪 #fitness #healthylifestyle".to_string(),
            images: Vec::new(),
            likes: 215,
            comments: 42,
            time_ago: "6h ago".to_string(),
            liked: false,
            saved: false,
        },
    ]
}

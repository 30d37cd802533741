use crate::integration::helpers::client::{find_post, TestClient};
use axum::http::StatusCode;
use std::time::Duration;

async fn wait_for_fetch() {
    tokio::time::sleep(Duration::from_millis(1010)).await;
}

/// 観点: 最後の投稿が見えたら1秒後に4件目が追加される
#[tokio::test(start_paused = true)]
async fn test_visible_anchor_loads_next_post() {
    let client = TestClient::new();
    client.get("/feed").await;

    let (status, body) = client.post("/anchor/3/visible").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["loading"], true);

    let (_, during) = client.get("/feed").await;
    assert_eq!(during["loading"], true);
    assert_eq!(during["posts"].as_array().unwrap().len(), 3);

    wait_for_fetch().await;

    let (_, after) = client.get("/feed").await;
    assert_eq!(after["loading"], false);
    assert_eq!(after["posts"].as_array().unwrap().len(), 4);
    assert_eq!(after["anchor"], "4");

    let added = find_post(&after, "4");
    assert_eq!(added["username"], "user4");
    assert_eq!(added["liked"], false);
    assert_eq!(added["saved"], false);
    assert!(added["likes"].as_u64().unwrap() < 200);
    assert!(added["comments"].as_u64().unwrap() < 50);
}

/// 観点: 読み込み中に何度報告しても1件しか増えない
#[tokio::test(start_paused = true)]
async fn test_repeated_reports_append_once() {
    let client = TestClient::new();
    client.get("/feed").await;

    client.post("/anchor/3/visible").await;
    client.post("/anchor/3/visible").await;
    client.post("/anchor/3/visible").await;

    wait_for_fetch().await;

    let (_, body) = client.get("/feed").await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 4);
}

/// 観点: アンカー以外の投稿が見えても読み込まない
#[tokio::test(start_paused = true)]
async fn test_non_anchor_report_is_ignored() {
    let client = TestClient::new();
    client.get("/feed").await;

    let (status, body) = client.post("/anchor/1/visible").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["loading"], false);

    wait_for_fetch().await;
    let (_, body) = client.get("/feed").await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 3);
}

/// 観点: いいねと無限スクロールを混ぜても状態が壊れない
#[tokio::test(start_paused = true)]
async fn test_interactions_during_fetch() {
    let client = TestClient::new();
    client.get("/feed").await;

    client.post("/anchor/3/visible").await;
    let (_, body) = client.post("/posts/2/like").await;
    assert_eq!(find_post(&body, "2")["likes"], 88);

    wait_for_fetch().await;

    let (_, body) = client.post("/posts/4/like").await;
    let added = find_post(&body, "4");
    assert_eq!(added["liked"], true);
    assert_eq!(find_post(&body, "2")["liked"], false);
    assert!(client.state.paginator.anchor().is_some());
}

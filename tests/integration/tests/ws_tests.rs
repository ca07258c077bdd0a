//! End-to-end tests over real WebSocket connections
//!
//! Run with:
//! ```bash
//! cargo test -p integration-tests --test ws_tests
//! ```

use std::sync::Arc;
use std::time::Duration;

use integration_tests::{broadcast_frame, move_frame, private_frame, TestServer};
use relay_db::MemoryMessageStore;
use serde_json::json;

#[tokio::test]
async fn test_join_ack_assigns_identity_and_position() {
    let server = TestServer::start().await.unwrap();
    let client = server.connect().await.unwrap();

    assert!((0.0..1000.0).contains(&client.position.x));
    assert!((0.0..1000.0).contains(&client.position.y));

    let health = server.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.online, 1);
}

#[tokio::test]
async fn test_clients_exchange_positions_on_join() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();

    assert_eq!(
        a.next_json().await.unwrap(),
        json!({
            "type": "move",
            "from": b.id.to_string(),
            "position": {"pagex": b.position.x, "pagey": b.position.y}
        })
    );
    assert_eq!(
        b.next_json().await.unwrap(),
        json!({
            "type": "move",
            "from": a.id.to_string(),
            "position": {"pagex": a.position.x, "pagey": a.position.y}
        })
    );
}

#[tokio::test]
async fn test_move_reaches_everyone_including_sender() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();
    a.next_json().await.unwrap();
    b.next_json().await.unwrap();

    a.send_json(&move_frame(120.0, 80.5)).await.unwrap();

    let expected = json!({
        "type": "move",
        "from": a.id.to_string(),
        "position": {"pagex": 120.0, "pagey": 80.5}
    });
    assert_eq!(a.next_json().await.unwrap(), expected);
    assert_eq!(b.next_json().await.unwrap(), expected);
}

#[tokio::test]
async fn test_private_message_is_stored_and_delivered() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();
    let mut c = server.connect().await.unwrap();
    // Join announcements: A sees B and C, B sees A and C, C sees A and B
    for _ in 0..2 {
        a.next_json().await.unwrap();
        b.next_json().await.unwrap();
        c.next_json().await.unwrap();
    }

    a.send_json(&private_frame(b.id, "just for you")).await.unwrap();

    assert_eq!(
        b.next_json().await.unwrap(),
        json!({
            "type": "private",
            "to": b.id.to_string(),
            "from": a.id.to_string(),
            "msg": "just for you"
        })
    );
    c.expect_silence(Duration::from_millis(200)).await.unwrap();

    let records = server.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].from, a.id);
    assert_eq!(records[0].to, b.id);
}

#[tokio::test]
async fn test_failed_persist_returns_error_to_sender() {
    let server = TestServer::start_with(Arc::new(MemoryMessageStore::failing()), None)
        .await
        .unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();
    a.next_json().await.unwrap();
    b.next_json().await.unwrap();

    a.send_json(&private_frame(b.id, "will not arrive")).await.unwrap();

    assert_eq!(
        a.next_json().await.unwrap(),
        json!({
            "type": "error",
            "to": b.id.to_string(),
            "msg": "failed to send your message"
        })
    );
    b.expect_silence(Duration::from_millis(200)).await.unwrap();
    assert!(server.store.is_empty());
}

#[tokio::test]
async fn test_broadcast_reaches_everyone() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();
    a.next_json().await.unwrap();
    b.next_json().await.unwrap();

    b.send_json(&broadcast_frame("hello room")).await.unwrap();

    let expected = json!({"type": "broadcast", "from": b.id.to_string(), "msg": "hello room"});
    assert_eq!(a.next_json().await.unwrap(), expected);
    assert_eq!(b.next_json().await.unwrap(), expected);
}

#[tokio::test]
async fn test_close_announces_leave() {
    let server = TestServer::start().await.unwrap();
    let a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();
    b.next_json().await.unwrap();

    let a_id = a.id;
    a.close().await.unwrap();

    assert_eq!(
        b.next_json().await.unwrap(),
        json!({"type": "leave", "from": a_id.to_string()})
    );
    server.wait_for_online(1).await.unwrap();
}

#[tokio::test]
async fn test_malformed_frames_keep_connection_open() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();

    a.send_json(&json!("just a string")).await.unwrap();
    a.send_json(&json!({"type": "private", "to": "not-an-id"})).await.unwrap();
    a.send_json(&move_frame(1.0, 2.0)).await.unwrap();

    assert_eq!(a.next_json().await.unwrap()["type"], "move");
    assert_eq!(server.health().await.unwrap().online, 1);
}

#[tokio::test]
async fn test_static_files_served_from_configured_dir() {
    let dir = std::env::temp_dir().join(format!("relay-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>relay</h1>").unwrap();

    let server = TestServer::start_with(Arc::new(MemoryMessageStore::new()), Some(dir.clone()))
        .await
        .unwrap();

    let response = server.get("/").await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "<h1>relay</h1>");

    let response = server.get("/missing.js").await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    // Routes still win over the static fallback
    assert_eq!(server.health().await.unwrap().online, 0);

    std::fs::remove_dir_all(&dir).ok();
}

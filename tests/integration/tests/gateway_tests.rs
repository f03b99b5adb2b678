//! Gateway integration tests
//!
//! Each test spins up a real gateway on an ephemeral port and drives it
//! over real WebSockets. No external services are required.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use integration_tests::{TestServer, WsClient};
use serde_json::json;

// ============================================================================
// HTTP endpoints
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_stats_start_empty() {
    let server = TestServer::start().await.expect("Failed to start server");

    let stats = server.stats().await.unwrap();
    assert_eq!(stats["connections"], 0);
    assert_eq!(stats["rooms"], 0);
    assert_eq!(stats["viewers"], 0);
}

// ============================================================================
// Connection gateway
// ============================================================================

#[tokio::test]
async fn test_missing_presentation_id_is_refused() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut client = WsClient::connect_raw(&server, "userId=u1").await.unwrap();
    let (code, reason) = client.recv_close().await.unwrap();
    assert_eq!(code, 4001);
    assert!(reason.contains("connect parameters"));

    // No room state was created for the refused connection
    let stats = server.stats().await.unwrap();
    assert_eq!(stats["connections"], 0);
    assert_eq!(stats["rooms"], 0);
}

#[tokio::test]
async fn test_missing_user_id_is_refused() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut client = WsClient::connect_raw(&server, "presentationId=P1&mode=viewer")
        .await
        .unwrap();
    let (code, _reason) = client.recv_close().await.unwrap();
    assert_eq!(code, 4001);
}

#[tokio::test]
async fn test_viewer_join_receives_presence_then_snapshot() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut viewer = WsClient::connect(&server, "P1", "u1", Some("viewer"), Some("Alice"))
        .await
        .unwrap();

    let viewers = viewer.expect_event("viewers-updated").await.unwrap();
    assert_eq!(viewers["viewers"], json!([{"userId": "u1", "name": "Alice"}]));

    let snapshot = viewer.expect_event("slide-changed").await.unwrap();
    assert_eq!(snapshot["currentSlideIndex"], 0);
}

#[tokio::test]
async fn test_viewer_without_name_is_anonymous() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut viewer = WsClient::connect(&server, "P1", "u1", Some("viewer"), None)
        .await
        .unwrap();

    let viewers = viewer.expect_event("viewers-updated").await.unwrap();
    assert_eq!(viewers["viewers"][0]["name"], "Anonymous");
}

#[tokio::test]
async fn test_editor_join_is_not_presence_tracked() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut editor = WsClient::connect(&server, "P1", "u1", None, None).await.unwrap();
    editor.expect_silence().await.unwrap();

    let stats = server.stats().await.unwrap();
    assert_eq!(stats["connections"], 1);
    assert_eq!(stats["rooms"], 0);
    assert_eq!(stats["viewers"], 0);
}

// ============================================================================
// Full collaboration scenario
// ============================================================================

#[tokio::test]
async fn test_full_collaboration_scenario() {
    let server = TestServer::start().await.expect("Failed to start server");

    // Viewer A connects: room P1 is created, A sees itself in the audience
    // and gets the position snapshot
    let mut a = WsClient::connect(&server, "P1", "user-a", Some("viewer"), Some("Alice"))
        .await
        .unwrap();
    let viewers = a.expect_event("viewers-updated").await.unwrap();
    assert_eq!(viewers["viewers"], json!([{"userId": "user-a", "name": "Alice"}]));
    let snapshot = a.expect_event("slide-changed").await.unwrap();
    assert_eq!(snapshot["currentSlideIndex"], 0);

    // Presenter B connects: no viewer-list change, no presence events
    let mut b = WsClient::connect(&server, "P1", "user-b", Some("presenter"), Some("Bob"))
        .await
        .unwrap();
    b.expect_silence().await.unwrap();
    a.expect_silence().await.unwrap();

    let stats = server.stats().await.unwrap();
    assert_eq!(stats["connections"], 2);
    assert_eq!(stats["rooms"], 1);
    assert_eq!(stats["viewers"], 1);

    // B advances to slide 3: A is told, B is not echoed
    b.send_event("slide-change", json!({"currentSlideIndex": 3}))
        .await
        .unwrap();
    let changed = a.expect_event("slide-changed").await.unwrap();
    assert_eq!(changed["currentSlideIndex"], 3);
    b.expect_silence().await.unwrap();

    // A disconnects: B sees the audience empty out and the room is deleted,
    // while B itself stays attached to the broadcast group
    a.close().await.unwrap();
    let viewers = b.expect_event("viewers-updated").await.unwrap();
    assert_eq!(viewers["viewers"].as_array().unwrap().len(), 0);

    let stats = server.stats().await.unwrap();
    assert_eq!(stats["connections"], 1);
    assert_eq!(stats["rooms"], 0);
    assert_eq!(stats["viewers"], 0);
}

// ============================================================================
// Late joiners
// ============================================================================

#[tokio::test]
async fn test_late_joiner_snapshot_reflects_presenter_position() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut first = WsClient::connect(&server, "P1", "u1", Some("viewer"), None)
        .await
        .unwrap();
    first.expect_event("viewers-updated").await.unwrap();
    first.expect_event("slide-changed").await.unwrap();

    let mut presenter = WsClient::connect(&server, "P1", "host", Some("presenter"), None)
        .await
        .unwrap();
    presenter
        .send_event("slide-change", json!({"currentSlideIndex": 5}))
        .await
        .unwrap();
    let changed = first.expect_event("slide-changed").await.unwrap();
    assert_eq!(changed["currentSlideIndex"], 5);

    // A viewer joining now starts at slide 5, not 0, without waiting for
    // the next slide-change
    let mut late = WsClient::connect(&server, "P1", "u2", Some("viewer"), None)
        .await
        .unwrap();
    let viewers = late.expect_event("viewers-updated").await.unwrap();
    assert_eq!(viewers["viewers"].as_array().unwrap().len(), 2);
    let snapshot = late.expect_event("slide-changed").await.unwrap();
    assert_eq!(snapshot["currentSlideIndex"], 5);
}

#[tokio::test]
async fn test_same_user_joining_twice_appears_twice() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut tab1 = WsClient::connect(&server, "P1", "u1", Some("viewer"), Some("Ann"))
        .await
        .unwrap();
    tab1.expect_event("viewers-updated").await.unwrap();
    tab1.expect_event("slide-changed").await.unwrap();

    let mut tab2 = WsClient::connect(&server, "P1", "u1", Some("viewer"), Some("Ann"))
        .await
        .unwrap();
    let viewers = tab2.expect_event("viewers-updated").await.unwrap();
    assert_eq!(
        viewers["viewers"],
        json!([
            {"userId": "u1", "name": "Ann"},
            {"userId": "u1", "name": "Ann"},
        ])
    );

    // Either tab disconnecting removes every entry for the user id
    tab1.close().await.unwrap();
    tab2.expect_event("slide-changed").await.unwrap(); // own join snapshot
    let viewers = tab2.expect_event("viewers-updated").await.unwrap();
    assert_eq!(viewers["viewers"].as_array().unwrap().len(), 0);
}

// ============================================================================
// Event relay
// ============================================================================

#[tokio::test]
async fn test_update_slide_relays_verbatim_minus_sender() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut sender = WsClient::connect(&server, "P1", "u1", None, None).await.unwrap();
    let mut peer = WsClient::connect(&server, "P1", "u2", None, None).await.unwrap();
    peer.expect_silence().await.unwrap();

    let payload = json!({
        "presentationId": "P1",
        "userId": "u1",
        "slideIndex": 2,
        "content": {"elements": [{"kind": "text", "value": "Hello"}]},
    });
    sender.send_event("update-slide", payload.clone()).await.unwrap();

    let data = peer.expect_event("slide-updated").await.unwrap();
    assert_eq!(data, payload);
    sender.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_relay_does_not_cross_presentations() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut sender = WsClient::connect(&server, "P1", "u1", None, None).await.unwrap();
    let mut other_room = WsClient::connect(&server, "P2", "u2", None, None).await.unwrap();
    other_room.expect_silence().await.unwrap();

    sender
        .send_event("add-slide", json!({"presentationId": "P1", "userId": "u1", "template": "blank"}))
        .await
        .unwrap();

    other_room.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_presentation_update_and_delete_slide_relay() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut sender = WsClient::connect(&server, "P1", "u1", None, None).await.unwrap();
    let mut peer = WsClient::connect(&server, "P1", "u2", None, None).await.unwrap();
    peer.expect_silence().await.unwrap();

    sender
        .send_event(
            "update-presentation",
            json!({"presentationId": "P1", "userId": "u1", "title": "Quarterly", "description": "Q3"}),
        )
        .await
        .unwrap();
    let data = peer.expect_event("presentation-updated").await.unwrap();
    assert_eq!(data["title"], "Quarterly");

    sender
        .send_event(
            "delete-slide",
            json!({"presentationId": "P1", "userId": "u1", "slideIndex": 0}),
        )
        .await
        .unwrap();
    let data = peer.expect_event("slide-deleted").await.unwrap();
    assert_eq!(data["slideIndex"], 0);
}

// ============================================================================
// Fault containment
// ============================================================================

#[tokio::test]
async fn test_malformed_update_slide_is_dropped_silently() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut sender = WsClient::connect(&server, "P1", "u1", None, None).await.unwrap();
    let mut peer = WsClient::connect(&server, "P1", "u2", None, None).await.unwrap();
    peer.expect_silence().await.unwrap();

    // slideIndex is a string: dropped, nobody hears about it
    sender
        .send_event(
            "update-slide",
            json!({"presentationId": "P1", "userId": "u1", "slideIndex": "2", "content": {}}),
        )
        .await
        .unwrap();
    peer.expect_silence().await.unwrap();

    // The connection survived and still relays valid events
    sender
        .send_event("add-slide", json!({"presentationId": "P1", "userId": "u1"}))
        .await
        .unwrap();
    peer.expect_event("slide-added").await.unwrap();
}

#[tokio::test]
async fn test_unknown_event_and_garbage_are_dropped() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut sender = WsClient::connect(&server, "P1", "u1", None, None).await.unwrap();
    let mut peer = WsClient::connect(&server, "P1", "u2", None, None).await.unwrap();
    peer.expect_silence().await.unwrap();

    sender
        .send_event("take-over-room", json!({"presentationId": "P1"}))
        .await
        .unwrap();
    sender.send_text("this is not json").await.unwrap();
    peer.expect_silence().await.unwrap();

    sender
        .send_event("slide-change", json!({"currentSlideIndex": 1}))
        .await
        .unwrap();
    let changed = peer.expect_event("slide-changed").await.unwrap();
    assert_eq!(changed["currentSlideIndex"], 1);
}

#[tokio::test]
async fn test_null_payload_for_presentation_update_is_dropped() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut sender = WsClient::connect(&server, "P1", "u1", None, None).await.unwrap();
    let mut peer = WsClient::connect(&server, "P1", "u2", None, None).await.unwrap();
    peer.expect_silence().await.unwrap();

    sender
        .send_event("update-presentation", serde_json::Value::Null)
        .await
        .unwrap();
    peer.expect_silence().await.unwrap();
}

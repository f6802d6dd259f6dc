//! End-to-end push channel test over a real socket.

use api_rest::{router, AppState};
use dash_core::{CoreConfig, Gateway};
use futures_util::{SinkExt, Stream, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message};

async fn next_event<S>(stream: &mut S) -> Value
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("socket closed")
            .expect("socket error");
        if let Message::Text(text) = message {
            return serde_json::from_str(&text).expect("frame is JSON");
        }
    }
}

#[tokio::test]
async fn test_subscriber_gets_snapshot_then_updates() {
    let gateway = Arc::new(Gateway::from_config(&CoreConfig::default()));
    let app = router(AppState::new(gateway.clone()), false);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let (socket, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    let (mut outbound, mut inbound) = socket.split();

    let first = next_event(&mut inbound).await;
    assert_eq!(first["event"], "doctors:list");
    assert_eq!(first["data"].as_array().unwrap().len(), 8);
    assert_eq!(next_event(&mut inbound).await["event"], "reviews:list");
    assert_eq!(next_event(&mut inbound).await["event"], "medical:list");

    gateway
        .navigate(api_shared::NavigateReq {
            tab: Some("reviews".into()),
        })
        .unwrap();
    let pushed = next_event(&mut inbound).await;
    assert_eq!(pushed, json!({"event": "navigation:change", "data": "reviews"}));

    let add_review = json!({
        "event": "reviews:add",
        "data": {"doctorId": "4", "rating": 5, "comment": "Excellent", "authorName": "Cy"}
    });
    outbound
        .send(Message::Text(add_review.to_string()))
        .await
        .unwrap();

    let reviews = next_event(&mut inbound).await;
    assert_eq!(reviews["event"], "reviews:list");
    assert_eq!(reviews["data"][0]["doctorId"], "4");
    assert_eq!(gateway.list_reviews().len(), 1);
}

use beacon_core::{ClientMessage, JoinRequest, ServerMessage};
use serde_json::json;

use super::spawn_server;
use crate::integration::init_tracing;
use crate::utils::TestClient;

fn join(room: &str) -> ClientMessage {
    ClientMessage::JoinRoom(JoinRequest::new(room, false))
}

#[tokio::test]
async fn test_websocket_pair_flow() {
    init_tracing();

    let base = spawn_server().await;
    let url = format!("{}/ws/pair", base);

    let mut a = TestClient::connect(&url).await.expect("A failed to connect");
    let mut b = TestClient::connect(&url).await.expect("B failed to connect");
    let mut c = TestClient::connect(&url).await.expect("C failed to connect");

    a.send(&join("x")).await.unwrap();
    assert_eq!(a.recv().await.unwrap(), ServerMessage::AllPeers(vec![]));

    // Pair clients may send the room id as a bare string.
    b.send_raw(r#"{"event":"join_room","data":"x"}"#)
        .await
        .unwrap();
    assert_eq!(b.recv().await.unwrap(), ServerMessage::AllPeers(vec![a.id]));

    c.send(&join("x")).await.unwrap();
    assert_eq!(c.recv().await.unwrap(), ServerMessage::RoomFull);

    // The callerID a client claims is replaced by its real id.
    b.send(&ClientMessage::SdpOffer {
        user_to_signal: a.id,
        caller_id: Some(c.id),
        signal: json!({ "type": "offer", "sdp": "v=0" }),
    })
    .await
    .unwrap();
    assert_eq!(
        a.recv().await.unwrap(),
        ServerMessage::SdpOffer {
            signal: json!({ "type": "offer", "sdp": "v=0" }),
            caller_id: b.id,
        }
    );

    a.send(&ClientMessage::SdpAnswer {
        user_to_signal: None,
        caller_id: Some(b.id),
        signal: json!({ "type": "answer", "sdp": "v=0" }),
    })
    .await
    .unwrap();
    assert_eq!(
        b.recv().await.unwrap(),
        ServerMessage::SdpAnswer {
            signal: json!({ "type": "answer", "sdp": "v=0" }),
            id: a.id,
            caller_id: a.id,
        }
    );

    let a_id = a.id;
    a.close().await.unwrap();

    assert_eq!(b.recv().await.unwrap(), ServerMessage::UserLeft(a_id));
    assert_eq!(c.recv().await.unwrap(), ServerMessage::UserLeft(a_id));
}

#[tokio::test]
async fn test_malformed_frames_do_not_close_connection() {
    init_tracing();

    let base = spawn_server().await;
    let mut client = TestClient::connect(&format!("{}/ws/pair", base))
        .await
        .expect("Failed to connect");

    client.send_raw("not json at all").await.unwrap();
    client
        .send_raw(r#"{"event":"join_room","data":{}}"#)
        .await
        .unwrap();
    client
        .send_raw(r#"{"event":"join_room","data":{"roomID":""}}"#)
        .await
        .unwrap();
    client
        .send_raw(r#"{"event":"sending_sdp_offer","data":{"userToSignal":"nobody","signal":1}}"#)
        .await
        .unwrap();

    client.send(&join("room-after-garbage")).await.unwrap();
    assert_eq!(
        client.recv().await.unwrap(),
        ServerMessage::AllPeers(vec![])
    );
}

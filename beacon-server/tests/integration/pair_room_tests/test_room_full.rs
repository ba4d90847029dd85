use beacon_core::ServerMessage;
use beacon_server::PairRoom;

use crate::integration::{create_test_hub, init_tracing};

#[tokio::test]
async fn test_room_full_is_sent_only_to_joiner() {
    init_tracing();

    let mut hub = create_test_hub(Box::new(PairRoom::default()));
    let a = hub.attach().await;
    let b = hub.attach().await;
    let c = hub.attach().await;

    hub.join(a, "x", false).await;
    hub.join(b, "x", false).await;
    hub.drain().await;

    hub.join(c, "x", false).await;
    let signals = hub.drain().await;

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].to, c);
    assert_eq!(signals[0].msg, ServerMessage::RoomFull);
    assert_eq!(hub.members("x").await, vec![a, b]);
}

#[tokio::test]
async fn test_refused_connection_can_join_another_room() {
    init_tracing();

    let mut hub = create_test_hub(Box::new(PairRoom::default()));
    let a = hub.attach().await;
    let b = hub.attach().await;
    let c = hub.attach().await;

    hub.join(a, "x", false).await;
    hub.join(b, "x", false).await;
    hub.join(c, "x", false).await;
    hub.drain().await;

    hub.join(c, "y", false).await;
    hub.snapshot().await;

    assert_eq!(
        hub.signaling.signals_for(&c).await,
        vec![ServerMessage::RoomFull, ServerMessage::AllPeers(vec![])]
    );
    assert_eq!(hub.members("y").await, vec![c]);
}

#[tokio::test]
async fn test_custom_capacity() {
    init_tracing();

    let mut hub = create_test_hub(Box::new(PairRoom::new(3)));
    let peers = [hub.attach().await, hub.attach().await, hub.attach().await];
    let late = hub.attach().await;

    for peer in peers {
        hub.join(peer, "x", false).await;
    }
    hub.join(late, "x", false).await;

    let signals = hub.drain().await;
    assert_eq!(
        signals.last().map(|s| (s.to, s.msg.clone())),
        Some((late, ServerMessage::RoomFull))
    );
    assert_eq!(
        hub.signaling.signals_for(&peers[2]).await,
        vec![ServerMessage::AllPeers(vec![peers[0], peers[1]])]
    );
}

use beacon_core::ServerMessage;

use crate::integration::{create_pair_hub, init_tracing};

#[tokio::test]
async fn test_double_disconnect_is_noop() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;
    let b = hub.attach().await;
    hub.join(a, "x", false).await;
    hub.join(b, "x", false).await;
    hub.drain().await;

    hub.disconnect(a).await;
    hub.disconnect(a).await;

    assert_eq!(hub.drain().await.len(), 1);
    assert_eq!(
        hub.signaling.signals_for(&b).await,
        vec![
            ServerMessage::AllPeers(vec![a]),
            ServerMessage::UserLeft(a)
        ]
    );
}

#[tokio::test]
async fn test_leave_then_disconnect_notifies_once() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;
    let b = hub.attach().await;
    hub.join(a, "x", false).await;
    hub.join(b, "x", false).await;
    hub.drain().await;

    hub.leave(a).await;
    hub.leave(a).await;
    hub.disconnect(a).await;

    let signals = hub.drain().await;
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].msg, ServerMessage::UserLeft(a));

    let snapshot = hub.snapshot().await;
    assert_eq!(snapshot.connections, 1);
    assert_eq!(hub.members("x").await, vec![b]);
}

use beacon_core::RoomId;

use crate::integration::{create_pair_hub, init_tracing};

#[tokio::test]
async fn test_second_join_is_rejected() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;

    hub.join(a, "x", false).await;
    hub.drain().await;

    hub.join(a, "y", false).await;

    assert!(hub.drain().await.is_empty());
    assert_eq!(hub.members("x").await, vec![a]);
    assert!(!hub.snapshot().await.rooms.contains_key(&RoomId::from("y")));
}

#[tokio::test]
async fn test_rejoin_same_room_does_not_duplicate() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;

    hub.join(a, "x", false).await;
    hub.join(a, "x", false).await;

    assert_eq!(hub.drain().await.len(), 1);
    assert_eq!(hub.members("x").await, vec![a]);
}

#[tokio::test]
async fn test_join_after_leave_is_ignored() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;

    hub.join(a, "x", false).await;
    hub.leave(a).await;
    hub.drain().await;

    hub.join(a, "y", false).await;

    assert!(hub.drain().await.is_empty());
    assert!(hub.members("y").await.is_empty());
    assert!(hub.members("x").await.is_empty());
}

#[tokio::test]
async fn test_join_from_unattached_connection_is_dropped() {
    init_tracing();

    let mut hub = create_pair_hub();
    let ghost = beacon_core::ConnectionId::new();

    hub.join(ghost, "x", false).await;

    assert!(hub.drain().await.is_empty());
    assert!(hub.snapshot().await.rooms.is_empty());
}

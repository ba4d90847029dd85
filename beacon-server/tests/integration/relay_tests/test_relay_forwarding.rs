use beacon_core::{RelayPayload, ServerMessage};
use serde_json::json;

use crate::integration::{create_pair_hub, create_star_hub, init_tracing};
use crate::utils::SentSignal;

#[tokio::test]
async fn test_offer_is_forwarded_unchanged() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;
    let b = hub.attach().await;
    hub.join(a, "x", false).await;
    hub.join(b, "x", false).await;
    hub.drain().await;

    let signal = json!({
        "type": "offer",
        "sdp": "v=0\r\no=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n",
        "nested": { "list": [1, "two", null] }
    });
    hub.relay(
        b,
        a,
        RelayPayload::Offer {
            signal: signal.clone(),
        },
    )
    .await;

    assert_eq!(
        hub.drain().await,
        vec![SentSignal {
            to: a,
            msg: ServerMessage::SdpOffer {
                signal,
                caller_id: b
            }
        }]
    );
}

#[tokio::test]
async fn test_answer_names_the_answerer() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;
    let b = hub.attach().await;

    hub.relay(
        a,
        b,
        RelayPayload::Answer {
            signal: json!("answer-sdp"),
        },
    )
    .await;

    assert_eq!(
        hub.drain().await,
        vec![SentSignal {
            to: b,
            msg: ServerMessage::SdpAnswer {
                signal: json!("answer-sdp"),
                id: a,
                caller_id: a
            }
        }]
    );
}

#[tokio::test]
async fn test_file_metadata_exchange() {
    init_tracing();

    let mut hub = create_star_hub();
    let host = hub.attach().await;
    let guest = hub.attach().await;
    hub.join(host, "share", true).await;
    hub.join(guest, "share", false).await;
    hub.drain().await;

    let meta = json!({ "name": "report.pdf", "size": 48213, "type": "application/pdf" });
    hub.relay(
        host,
        guest,
        RelayPayload::FileMetaData {
            meta_data: meta.clone(),
        },
    )
    .await;
    hub.relay(guest, host, RelayPayload::FileMetaDataAck).await;

    assert_eq!(
        hub.drain().await,
        vec![
            SentSignal {
                to: guest,
                msg: ServerMessage::FileMetaData {
                    meta_data: meta,
                    caller_id: host
                }
            },
            SentSignal {
                to: host,
                msg: ServerMessage::FileMetaDataStored { caller_id: guest }
            },
        ]
    );
}

#[tokio::test]
async fn test_relays_keep_sender_order() {
    init_tracing();

    let mut hub = create_pair_hub();
    let a = hub.attach().await;
    let b = hub.attach().await;

    let message_count = 20;
    for i in 0..message_count {
        hub.relay(
            a,
            b,
            RelayPayload::Offer {
                signal: json!({ "seq": i }),
            },
        )
        .await;
    }

    let seqs: Vec<i64> = hub
        .drain()
        .await
        .into_iter()
        .map(|s| match s.msg {
            ServerMessage::SdpOffer { signal, .. } => signal["seq"].as_i64().unwrap(),
            other => panic!("unexpected message {:?}", other),
        })
        .collect();

    assert_eq!(seqs, (0..message_count).collect::<Vec<i64>>());
}

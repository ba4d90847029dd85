use crate::room::HubCommand;
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ClientMessage, ConnectionId, ServerMessage};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let connection = ConnectionId::new();
    info!("New WebSocket connection: {}", connection);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(connection, tx);
    service.send_signal(connection, ServerMessage::Welcome { id: connection });

    if !service.dispatch(HubCommand::Attach { connection }).await {
        service.remove_connection(&connection);
        return;
    }

    let ping_interval = service.heartbeat().ping_interval;
    let ping_timeout = service.heartbeat().ping_timeout;

    let mut send_task = tokio::spawn(async move {
        let mut ping = time::interval_at(Instant::now() + ping_interval, ping_interval);

        loop {
            let msg = tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
                _ = ping.tick() => Message::Ping(Bytes::new()),
            };

            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            loop {
                let msg = match time::timeout(ping_timeout, receiver.next()).await {
                    Ok(Some(Ok(msg))) => msg,
                    Ok(Some(Err(e))) => {
                        debug!("WebSocket error on {}: {}", connection, e);
                        break;
                    }
                    Ok(None) => break,
                    Err(_) => {
                        warn!(
                            "Connection {} silent for {:?}, closing",
                            connection, ping_timeout
                        );
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => match ClientMessage::decode(text.as_str()) {
                        Ok(client_msg) => {
                            let Some(cmd) = HubCommand::from_client(connection, client_msg) else {
                                continue;
                            };
                            if !service.dispatch(cmd).await {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid message from {}: {}", connection, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_connection(&connection);
    service
        .dispatch(HubCommand::Disconnect { connection })
        .await;
    info!("WebSocket disconnected: {}", connection);
}

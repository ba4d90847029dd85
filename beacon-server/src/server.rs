use crate::config::ServerConfig;
use crate::room::{HubSnapshot, PairRoom, StarRoom};
use crate::signaling::{SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
struct Hubs {
    pair: SignalingService,
    star: SignalingService,
}

#[derive(Debug, Serialize)]
pub struct HubStats {
    pub connections: usize,
    pub rooms: usize,
    pub members: usize,
}

impl From<&HubSnapshot> for HubStats {
    fn from(snapshot: &HubSnapshot) -> Self {
        Self {
            connections: snapshot.connections,
            rooms: snapshot.rooms.len(),
            members: snapshot.rooms.values().map(|room| room.members.len()).sum(),
        }
    }
}

/// Ответ `/health`. Хаб, не ответивший на снимок, считается упавшим.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub pair: Option<HubStats>,
    pub star: Option<HubStats>,
}

impl HealthReport {
    pub fn new(pair: Option<&HubSnapshot>, star: Option<&HubSnapshot>) -> Self {
        let mut report = Self {
            status: "ok",
            pair: pair.map(HubStats::from),
            star: star.map(HubStats::from),
        };
        if !report.is_healthy() {
            report.status = "degraded";
        }
        report
    }

    pub fn is_healthy(&self) -> bool {
        self.pair.is_some() && self.star.is_some()
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Собирает HTTP приложение: WebSocket хабы обеих моделей комнат и `/health`.
/// Хабы запускаются сразу, поэтому вызывать нужно внутри tokio runtime.
pub fn router(config: &ServerConfig) -> Result<Router> {
    let pair = SignalingService::spawn(
        Box::new(PairRoom::new(config.pair_capacity)),
        config.command_buffer,
        config.heartbeat.clone(),
    );
    let star = SignalingService::spawn(
        Box::new(StarRoom),
        config.command_buffer,
        config.heartbeat.clone(),
    );

    let cors = cors_layer(config.frontend_base_url.as_deref())?;

    let health_routes = Router::new().route("/health", get(health)).with_state(Hubs {
        pair: pair.clone(),
        star: star.clone(),
    });

    Ok(Router::new()
        .merge(health_routes)
        .merge(Router::new().route("/ws/pair", get(ws_handler)).with_state(pair))
        .merge(Router::new().route("/ws/star", get(ws_handler)).with_state(star))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let app = router(&config)?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "Signaling server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("signaling server stopped with an error")?;

    info!("Signaling server stopped");
    Ok(())
}

fn cors_layer(frontend_base_url: Option<&str>) -> Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let Some(origin) = frontend_base_url else {
        return Ok(cors.allow_origin(Any));
    };

    let origin_header = HeaderValue::from_str(origin.trim_end_matches('/'))
        .with_context(|| format!("invalid frontend origin '{}'", origin))?;
    Ok(cors.allow_origin(origin_header))
}

async fn health(State(hubs): State<Hubs>) -> (StatusCode, Json<HealthReport>) {
    let pair = hubs.pair.snapshot().await;
    let star = hubs.star.snapshot().await;

    let report = HealthReport::new(pair.as_ref(), star.as_ref());
    (report.status_code(), Json(report))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

use anyhow::{Result, bail};
use beacon::server::{HeartbeatConfig, ServerConfig, serve};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Room rendezvous and signaling relay for browser peers.
///
/// Serves two WebSocket endpoints: `/ws/pair` for two-party rooms and
/// `/ws/star` for rooms where one initiator negotiates with every joiner.
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Frontend origin allowed by CORS (any origin when unset)
    #[arg(long, env = "FRONTEND_BASE_URL")]
    frontend_base_url: Option<String>,

    /// Maximum members of a two-party room
    #[arg(
        long,
        env = "PAIR_ROOM_CAPACITY",
        default_value_t = 2,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pair_capacity: u16,

    /// Pending commands per hub before connections wait
    #[arg(
        long,
        env = "COMMAND_BUFFER",
        default_value_t = 256,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    command_buffer: u32,

    /// Seconds between server pings
    #[arg(
        long,
        env = "PING_INTERVAL_SECS",
        default_value_t = 25,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ping_interval_secs: u64,

    /// Seconds of client silence before the connection is dropped
    #[arg(
        long,
        env = "PING_TIMEOUT_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ping_timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig> {
        if self.ping_timeout_secs <= self.ping_interval_secs {
            bail!(
                "ping timeout ({}s) must be longer than ping interval ({}s)",
                self.ping_timeout_secs,
                self.ping_interval_secs
            );
        }

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            frontend_base_url: self.frontend_base_url.filter(|url| !url.trim().is_empty()),
            pair_capacity: usize::from(self.pair_capacity),
            command_buffer: self.command_buffer as usize,
            heartbeat: HeartbeatConfig {
                ping_interval: Duration::from_secs(self.ping_interval_secs),
                ping_timeout: Duration::from_secs(self.ping_timeout_secs),
            },
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config()?;

    info!(
        "Starting beacon on {} (pair capacity {}, CORS origin {})",
        config.bind_addr,
        config.pair_capacity,
        config.frontend_base_url.as_deref().unwrap_or("*")
    );

    serve(config).await
}

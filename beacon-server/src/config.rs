use crate::room::DEFAULT_PAIR_CAPACITY;
use std::net::SocketAddr;
use std::time::Duration;

/// Пинг соединения и допустимое время тишины от клиента.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    pub ping_interval: Duration,
    pub ping_timeout: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(25),
            ping_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Разрешённый CORS origin фронтенда. `None` разрешает любой.
    pub frontend_base_url: Option<String>,
    pub pair_capacity: usize,
    pub command_buffer: usize,
    pub heartbeat: HeartbeatConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            frontend_base_url: None,
            pair_capacity: DEFAULT_PAIR_CAPACITY,
            command_buffer: 256,
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

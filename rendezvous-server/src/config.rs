use rendezvous_core::IceServerConfig;
use std::net::SocketAddr;
use std::time::Duration;

/// Runtime settings of the signaling server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    /// Rooms idle for longer than this are swept.
    pub room_timeout: Duration,
    pub sweep_interval: Duration,
    pub cors: bool,
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            room_timeout: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
            cors: true,
            ice_servers: vec![default_stun_server()],
        }
    }
}

pub const DEFAULT_STUN_URL: &str = "stun:stun.l.google.com:19302";

pub fn default_stun_server() -> IceServerConfig {
    IceServerConfig {
        urls: vec![DEFAULT_STUN_URL.to_owned()],
        username: None,
        credential: None,
    }
}

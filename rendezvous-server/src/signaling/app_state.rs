use crate::registry::Registry;
use rendezvous_core::IceServerConfig;
use std::sync::Arc;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
    pub ice_servers: Arc<Vec<IceServerConfig>>,
}

impl AppState {
    pub fn new(registry: Registry, ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            registry,
            ice_servers: Arc::new(ice_servers),
        }
    }
}

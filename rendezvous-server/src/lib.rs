//! In-memory rendezvous service for WebRTC-style peers.
//!
//! A host creates a named room, peers join it by posting their offer, the
//! host answers each peer and the peers poll for that answer. The
//! [`Registry`] owns the rooms; every [`Room`] guards its own peer slots.

mod config;
mod error;
mod registry;
mod room;
mod server;
pub mod signaling;
mod sweeper;

pub use config::*;
pub use error::*;
pub use registry::*;
pub use room::*;
pub use server::serve;
pub use signaling::{ApiError, ApiResult, AppState, router};
pub use sweeper::spawn_sweeper;

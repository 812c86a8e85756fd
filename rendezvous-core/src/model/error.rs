use serde::{Deserialize, Serialize};

/// Coarse classification of every failure the signaling core can report.
///
/// Transports map these to their own status signals; `NotReady` is the only
/// kind a client should retry without changing its input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Unauthorized,
    CapacityExceeded,
    NotReady,
    InvalidInput,
}

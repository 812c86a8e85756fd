use rendezvous_core::{ErrorKind, PeerId};
use thiserror::Error;

/// Every way a registry or room operation can fail.
///
/// A failed operation never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("peer '{0}' is not in this room")]
    PeerNotFound(PeerId),

    #[error("room '{0}' already exists")]
    RoomExists(String),

    #[error("peer '{0}' already exists in the room")]
    PeerExists(PeerId),

    #[error("invalid secret")]
    InvalidSecret,

    #[error("invalid room password")]
    InvalidPassword,

    #[error("room is full")]
    RoomFull,

    #[error("no available slot")]
    NoAvailableSlot,

    #[error("no answer yet")]
    NotReady,

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl SignalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignalError::RoomNotFound(_)
            | SignalError::PeerNotFound(_)
            | SignalError::NoAvailableSlot => ErrorKind::NotFound,
            SignalError::RoomExists(_) | SignalError::PeerExists(_) => ErrorKind::AlreadyExists,
            SignalError::InvalidSecret | SignalError::InvalidPassword => ErrorKind::Unauthorized,
            SignalError::RoomFull => ErrorKind::CapacityExceeded,
            SignalError::NotReady => ErrorKind::NotReady,
            SignalError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Only a missing answer can resolve itself without new input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SignalError::NotReady)
    }
}

pub type SignalResult<T> = Result<T, SignalError>;

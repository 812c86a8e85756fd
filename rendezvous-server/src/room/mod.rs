mod peer_slot;
mod room;

pub use peer_slot::new_secret;
pub use room::*;

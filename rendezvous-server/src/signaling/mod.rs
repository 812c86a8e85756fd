mod api_error;
mod app_state;
pub mod handlers;
mod routes;

pub use api_error::*;
pub use app_state::*;
pub use routes::*;


pub use requests::*;

mod clock;
mod registry;

pub use clock::*;
pub use registry::*;

// Shared utilities module
pub mod errors;
pub mod hash;
pub mod logging;

pub use errors::*;
pub use logging::*;

pub mod session;
pub mod snapshot;

#[cfg(not(target_arch = "wasm32"))]
pub mod import;

pub use session::*;
pub use snapshot::*;

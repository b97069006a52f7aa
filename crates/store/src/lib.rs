pub mod contracts;
pub mod events;
pub mod store;

pub use events::*;
pub use store::*;

pub mod geo;
pub mod ids;
pub mod pin;
pub mod sample;

// Model crate: plain data shapes only; no state management here.
pub use geo::*;
pub use pin::*;

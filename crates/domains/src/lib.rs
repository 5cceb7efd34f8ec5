//! domains/src/lib.rs
//!
//! Feed elements, filters, store queries and the ports every other crate
//! in the workspace builds on.

pub mod error;
pub mod filters;
pub mod models;
pub mod ports;
pub mod store;

// Re-exporting for easier access in other crates
pub use error::*;
pub use filters::*;
pub use models::*;
pub use ports::*;
pub use store::*;

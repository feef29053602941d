//! Error handling
//!
//! Defines error types and the boolean reporting adapter.

pub mod handlers;
pub mod types;

pub use handlers::report;
pub use types::*;

//! Registered actions
//!
//! The catalog describes each action for the host; dispatch runs one.

pub mod catalog;
pub mod dispatch;

pub use catalog::{ActionDescriptor, CATALOG, ParamDescriptor, ParamSource, Protocol, find_action};
pub use dispatch::{ActionRequest, run_action, run_action_with};

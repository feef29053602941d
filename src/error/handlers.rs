//! Error handlers
//!
//! Collapses action results into the boolean contract callers expect.

use crate::error::types::TransferResult;
use log::error;

/// Log a failed action once at error level and fold the result into a bool.
pub fn report(operation: &str, result: TransferResult<bool>) -> bool {
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{} failed: {}", operation, e);
            false
        }
    }
}

//! Transfer result types
//!
//! Defines result structures returned by transfer operations.

use crate::error::TransferResult;

/// Outcome of an existence check that keeps "could not check" apart from
/// "confirmed absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
    Unknown,
}

impl Presence {
    pub fn is_present(self) -> bool {
        self == Presence::Present
    }
}

impl From<&TransferResult<bool>> for Presence {
    fn from(result: &TransferResult<bool>) -> Self {
        match result {
            Ok(true) => Presence::Present,
            Ok(false) => Presence::Absent,
            Err(_) => Presence::Unknown,
        }
    }
}

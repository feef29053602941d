//! Credential validation
//!
//! Cheap local checks run before any connection is attempted.

use super::credentials::Credentials;
use crate::utils::validation::is_valid_input;

/// Validates that a username is present and free of control characters.
pub fn validate_credentials(creds: &Credentials) -> Result<(), String> {
    if !is_valid_input(&creds.username) {
        return Err(format!("Invalid username: {:?}", creds.username));
    }

    if creds.password.contains(['\r', '\n', '\0']) {
        return Err(format!(
            "Password for {} contains control characters",
            creds.username
        ));
    }

    Ok(())
}

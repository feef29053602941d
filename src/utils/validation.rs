//! Input validation utilities
//!
//! Remote path normalization, local path joining and key file checks.

use std::path::{Path, PathBuf};

use crate::error::TransferError;

/// Validate that input is not empty and doesn't contain control characters
pub fn is_valid_input(input: &str) -> bool {
    !input.trim().is_empty() && !input.contains(['\r', '\n', '\0'])
}

/// Ensure a remote directory has both a leading and a trailing slash.
pub fn normalize_remote_dir(dir: &str) -> String {
    let mut normalized = String::with_capacity(dir.len() + 2);
    if !dir.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(dir);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Absolute remote path of `file` inside `dir`.
pub fn remote_file_path(dir: &str, file: &str) -> String {
    format!("{}{}", normalize_remote_dir(dir), file)
}

pub fn local_file_path(dir: &str, file: &str) -> PathBuf {
    Path::new(dir).join(file)
}

/// Reject private key files whose extension is not a PEM variant.
pub fn validate_pem_key_path(path: &str) -> Result<(), TransferError> {
    let is_pem = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.to_ascii_lowercase().contains("pem"));

    if is_pem {
        Ok(())
    } else {
        Err(TransferError::InvalidKeyFile(path.to_string()))
    }
}

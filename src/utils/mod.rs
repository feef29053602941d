//! Utility functions
//!
//! Provides logging, validation, and network utilities.

pub mod logging;
pub mod network;
pub mod validation;

pub use network::{FTP_DEFAULT_PORT, HostEndpoint, SFTP_DEFAULT_PORT, parse_host};
pub use validation::{
    local_file_path, normalize_remote_dir, remote_file_path, validate_pem_key_path,
};

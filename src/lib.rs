pub mod actions;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transfer;
pub mod utils;

pub use auth::Credentials;
pub use error::TransferError;
pub use transfer::{FtpFileTransfer, Presence, SftpFileTransfer};

//! Transfer actions
//!
//! SFTP and FTP façades. Each call owns exactly one connection.

pub mod ftp;
pub mod local;
pub mod results;
pub mod sftp;

pub use ftp::FtpFileTransfer;
pub use local::LocalFile;
pub use results::Presence;
pub use sftp::SftpFileTransfer;

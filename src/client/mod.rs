//! Protocol clients
//!
//! The transfer actions talk to servers only through these traits. The real
//! implementations wrap `ssh2` (SFTP) and `suppaftp` (FTP); tests plug in
//! in-memory doubles.

pub mod ftp;
pub mod session;
pub mod sftp;

use std::io::{Read, Write};

use crate::auth::Credentials;
use crate::error::TransferResult;
use crate::utils::network::HostEndpoint;

pub use ftp::{FILE_ACTION_OK, FILE_UNAVAILABLE, FtpStreamConnector, FtpStreamSession};
pub use session::{SessionGuard, with_session};
pub use sftp::{SshConnector, SshSftpSession};

/// A connected session that can be torn down.
pub trait RemoteSession {
    fn disconnect(&mut self) -> TransferResult<()>;
}

/// Opens one authenticated session per call.
pub trait Connector {
    type Params;
    type Session: RemoteSession;

    fn connect(&self, params: &Self::Params) -> TransferResult<Self::Session>;
}

/// Opens the local destination of a download. Called only after the remote
/// file has been opened, so a failed download leaves an existing file alone.
pub type OpenSink<'a> = dyn FnMut() -> TransferResult<Box<dyn Write>> + 'a;

/// Operations the SFTP actions need from a session.
pub trait SftpSession: RemoteSession {
    /// Change the remote working directory. Fails if `dir` is not a directory.
    /// Callers pass absolute paths; relative ones resolve against the login
    /// directory.
    fn change_dir(&mut self, dir: &str) -> TransferResult<()>;

    /// Upload into the working directory, overwriting any existing file.
    fn upload(&mut self, remote_name: &str, source: &mut dyn Read) -> TransferResult<u64>;

    fn exists(&mut self, path: &str) -> TransferResult<bool>;

    fn remove(&mut self, path: &str) -> TransferResult<()>;

    fn download(&mut self, path: &str, open_sink: &mut OpenSink<'_>) -> TransferResult<u64>;
}

/// Parameters for a plain FTP connection; password auth only.
#[derive(Debug, Clone)]
pub struct FtpParams {
    pub endpoint: HostEndpoint,
    pub credentials: Credentials,
}

/// Operations the FTP actions need from a session.
pub trait FtpSession: RemoteSession {
    fn put(&mut self, path: &str, source: &mut dyn Read) -> TransferResult<u64>;

    /// RETR streamed into the sink; `open_sink` runs once the data connection
    /// is open.
    fn get(&mut self, path: &str, open_sink: &mut OpenSink<'_>) -> TransferResult<u64>;

    /// SIZE query. A missing file surfaces as `UnexpectedReply` with
    /// [`FILE_UNAVAILABLE`].
    fn size(&mut self, path: &str) -> TransferResult<u64>;

    /// DELE command. Returns the server's reply code.
    fn delete(&mut self, path: &str) -> TransferResult<u32>;
}

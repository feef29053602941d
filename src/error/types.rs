//! Error types
//!
//! Defines the error taxonomy shared by the SFTP and FTP actions.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Every way a single transfer action can fail.
#[derive(Debug)]
pub enum TransferError {
    /// TCP connect or socket failure before any protocol exchange
    Connection(io::Error),
    /// SSH / SFTP failure reported by the ssh2 client
    Ssh(ssh2::Error),
    /// FTP failure reported by the suppaftp client
    Ftp(suppaftp::FtpError),
    AuthenticationFailed(String),
    NotADirectory(String),
    /// Upload finished but the file was not found afterwards
    ValidationFailed(String),
    UnexpectedReply { code: u32, message: String },
    LocalIo { path: PathBuf, source: io::Error },
    InvalidKeyFile(String),
    UnknownAction(String),
    MissingParameter(String),
}

impl TransferError {
    pub fn local_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TransferError::LocalIo {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Connection(e) => write!(f, "Connection failed: {}", e),
            TransferError::Ssh(e) => write!(f, "SSH error: {}", e),
            TransferError::Ftp(e) => write!(f, "FTP error: {}", e),
            TransferError::AuthenticationFailed(u) => {
                write!(f, "Authentication failed for user: {}", u)
            }
            TransferError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            TransferError::ValidationFailed(p) => {
                write!(f, "File validation failed, not found after upload: {}", p)
            }
            TransferError::UnexpectedReply { code, message } => {
                write!(f, "Unexpected reply {}: {}", code, message)
            }
            TransferError::LocalIo { path, source } => {
                write!(f, "Local file error on {}: {}", path.display(), source)
            }
            TransferError::InvalidKeyFile(p) => {
                write!(f, "Private key must be a PEM file: {}", p)
            }
            TransferError::UnknownAction(a) => write!(f, "Unknown action: {}", a),
            TransferError::MissingParameter(p) => write!(f, "Missing parameter: {}", p),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Connection(e) => Some(e),
            TransferError::Ssh(e) => Some(e),
            TransferError::Ftp(e) => Some(e),
            TransferError::LocalIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Socket errors become `Connection`. An `io::Error` that carries a
/// `TransferError` (see [`LocalFile`](crate::transfer::LocalFile)) is unwrapped
/// so local failures keep their own label after passing through `io::copy`.
impl From<io::Error> for TransferError {
    fn from(error: io::Error) -> Self {
        if !error
            .get_ref()
            .is_some_and(|inner| inner.is::<TransferError>())
        {
            return TransferError::Connection(error);
        }

        match error.into_inner().map(|inner| inner.downcast::<TransferError>()) {
            Some(Ok(tagged)) => *tagged,
            Some(Err(inner)) => TransferError::Connection(io::Error::other(inner)),
            None => TransferError::Connection(io::Error::other("I/O error")),
        }
    }
}

impl From<ssh2::Error> for TransferError {
    fn from(error: ssh2::Error) -> Self {
        TransferError::Ssh(error)
    }
}

impl From<suppaftp::FtpError> for TransferError {
    fn from(error: suppaftp::FtpError) -> Self {
        TransferError::Ftp(error)
    }
}

pub type TransferResult<T> = Result<T, TransferError>;

//! Plain FTP transfer actions
//!
//! Password credentials only. Unlike SFTP, `send` does not re-check the
//! upload.

use log::{debug, info};
use std::io::Write;

use super::local::LocalFile;
use super::results::Presence;
use crate::auth::Credentials;
use crate::client::{
    Connector, FILE_ACTION_OK, FILE_UNAVAILABLE, FtpParams, FtpSession, FtpStreamConnector,
    with_session,
};
use crate::error::{TransferError, TransferResult, report};
use crate::utils::{FTP_DEFAULT_PORT, local_file_path, parse_host, remote_file_path};

pub struct FtpFileTransfer<C = FtpStreamConnector> {
    connector: C,
}

impl FtpFileTransfer<FtpStreamConnector> {
    pub fn new() -> Self {
        Self::with_connector(FtpStreamConnector::new())
    }
}

impl Default for FtpFileTransfer<FtpStreamConnector> {
    fn default() -> Self {
        Self::new()
    }
}

fn params(host: &str, creds: &Credentials) -> FtpParams {
    FtpParams {
        endpoint: parse_host(host, FTP_DEFAULT_PORT),
        credentials: creds.clone(),
    }
}

impl<C> FtpFileTransfer<C>
where
    C: Connector<Params = FtpParams>,
    C::Session: FtpSession,
{
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    pub fn send(
        &self,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
    ) -> bool {
        report(
            "FTP send",
            self.try_send(source_dir, file, dest_dir, host, creds)
                .map(|_| true),
        )
    }

    pub fn try_send(
        &self,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
    ) -> TransferResult<u64> {
        let params = params(host, creds);
        let local = local_file_path(source_dir, file);
        let remote = remote_file_path(dest_dir, file);

        info!("FTP connecting to {}", params.endpoint);
        with_session(&self.connector, &params, |session| {
            let mut source = LocalFile::open(&local)?;
            debug!(
                "Uploading {} to ftp://{}{}",
                local.display(),
                params.endpoint,
                remote
            );
            session.put(&remote, &mut source)
        })
    }

    /// Download into `dest_path`; an existing local file is only replaced
    /// once the server has opened the remote file for reading.
    pub fn download(
        &self,
        file: &str,
        source_dir: &str,
        host: &str,
        dest_path: &str,
        creds: &Credentials,
    ) -> bool {
        report(
            "FTP download",
            self.try_download(file, source_dir, host, dest_path, creds)
                .map(|_| true),
        )
    }

    pub fn try_download(
        &self,
        file: &str,
        source_dir: &str,
        host: &str,
        dest_path: &str,
        creds: &Credentials,
    ) -> TransferResult<u64> {
        let params = params(host, creds);
        let remote = remote_file_path(source_dir, file);

        info!("FTP connecting to {}", params.endpoint);
        with_session(&self.connector, &params, |session| {
            debug!(
                "Downloading ftp://{}{} to {}",
                params.endpoint, remote, dest_path
            );
            let mut open_sink = || -> TransferResult<Box<dyn Write>> {
                Ok(Box::new(LocalFile::create(dest_path)?))
            };
            session.get(&remote, &mut open_sink)
        })
    }

    pub fn exists(&self, file: &str, dest_dir: &str, host: &str, creds: &Credentials) -> bool {
        report("FTP exists", self.try_exists(file, dest_dir, host, creds))
    }

    pub fn check(&self, file: &str, dest_dir: &str, host: &str, creds: &Credentials) -> Presence {
        Presence::from(&self.try_exists(file, dest_dir, host, creds))
    }

    /// SIZE-based existence check. A 550 reply means the file is absent; any
    /// other failure is an error.
    pub fn try_exists(
        &self,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
    ) -> TransferResult<bool> {
        let params = params(host, creds);
        let remote = remote_file_path(dest_dir, file);

        info!("FTP connecting to {}", params.endpoint);
        with_session(&self.connector, &params, |session| {
            match session.size(&remote) {
                Ok(size) => {
                    debug!("File {} exists ({} bytes)", remote, size);
                    Ok(true)
                }
                Err(TransferError::UnexpectedReply {
                    code: FILE_UNAVAILABLE,
                    ..
                }) => {
                    debug!("File {} does not exist", remote);
                    Ok(false)
                }
                Err(e) => Err(e),
            }
        })
    }

    /// Delete `dest_dir/file`; only a 250 reply counts as deleted.
    pub fn delete(&self, file: &str, dest_dir: &str, host: &str, creds: &Credentials) -> bool {
        report("FTP delete", self.try_delete(file, dest_dir, host, creds))
    }

    pub fn try_delete(
        &self,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
    ) -> TransferResult<bool> {
        let params = params(host, creds);
        let remote = remote_file_path(dest_dir, file);

        info!("FTP connecting to {}", params.endpoint);
        with_session(&self.connector, &params, |session| {
            let code = session.delete(&remote)?;
            if code == FILE_ACTION_OK {
                debug!("File {} deleted", remote);
                Ok(true)
            } else {
                debug!("File {} not deleted, server replied {}", remote, code);
                Ok(false)
            }
        })
    }
}

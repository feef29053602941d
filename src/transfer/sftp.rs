//! SFTP transfer actions
//!
//! Each action opens one session, runs one command (plus an existence check
//! where noted), and disconnects before returning. The `try_*` methods
//! return the full error; the plain methods log it once and return `false`.

use log::{debug, info};
use std::io::Write;

use super::local::LocalFile;
use super::results::Presence;
use crate::auth::{ConnectionParams, Credentials, KeyMaterial};
use crate::client::{Connector, SftpSession, SshConnector, with_session};
use crate::error::{TransferError, TransferResult, report};
use crate::utils::{
    SFTP_DEFAULT_PORT, local_file_path, normalize_remote_dir, parse_host, remote_file_path,
    validate_pem_key_path,
};

pub struct SftpFileTransfer<C = SshConnector> {
    connector: C,
}

impl SftpFileTransfer<SshConnector> {
    pub fn new() -> Self {
        Self::with_connector(SshConnector::new())
    }
}

impl Default for SftpFileTransfer<SshConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SftpFileTransfer<C>
where
    C: Connector<Params = ConnectionParams>,
    C::Session: SftpSession,
{
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    /// Upload `source_dir/file` into `dest_dir` using password auth and
    /// confirm the file exists afterwards.
    pub fn send(
        &self,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
    ) -> bool {
        report(
            "SFTP send",
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
    ) -> TransferResult<()> {
        let params = ConnectionParams::with_password(parse_host(host, SFTP_DEFAULT_PORT), creds);
        self.upload(&params, source_dir, file, dest_dir)
    }

    /// Like [`send`](Self::send), offering both the password and the PEM key
    /// at `private_key_path` decrypted with `key_passphrase.password`.
    #[allow(clippy::too_many_arguments)]
    pub fn send_with_key_auth(
        &self,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
        private_key_path: &str,
        key_passphrase: &Credentials,
    ) -> bool {
        report(
            "SFTP send with key auth",
            self.try_send_with_key_auth(
                source_dir,
                file,
                dest_dir,
                host,
                creds,
                private_key_path,
                key_passphrase,
            )
            .map(|_| true),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn try_send_with_key_auth(
        &self,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
        private_key_path: &str,
        key_passphrase: &Credentials,
    ) -> TransferResult<()> {
        let key = KeyMaterial::new(private_key_path, key_passphrase.password.as_str());
        let params =
            ConnectionParams::with_password_or_key(parse_host(host, SFTP_DEFAULT_PORT), creds, key);
        self.upload(&params, source_dir, file, dest_dir)
    }

    /// Upload authenticating with the private key alone. `creds` supplies the
    /// username and the key passphrase.
    pub fn send_with_private_key_only(
        &self,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
        host: &str,
        private_key_path: &str,
        creds: &Credentials,
    ) -> bool {
        report(
            "SFTP send with private key",
            self.try_send_with_private_key_only(
                source_dir,
                file,
                dest_dir,
                host,
                private_key_path,
                creds,
            )
            .map(|_| true),
        )
    }

    pub fn try_send_with_private_key_only(
        &self,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
        host: &str,
        private_key_path: &str,
        creds: &Credentials,
    ) -> TransferResult<()> {
        validate_pem_key_path(private_key_path)?;

        let key = KeyMaterial::new(private_key_path, creds.password.as_str());
        let params = ConnectionParams::with_key_only(
            parse_host(host, SFTP_DEFAULT_PORT),
            &creds.username,
            key,
        );
        self.upload(&params, source_dir, file, dest_dir)
    }

    pub fn exists(&self, file: &str, dest_dir: &str, host: &str, creds: &Credentials) -> bool {
        report(
            "SFTP exists",
            self.try_exists(file, dest_dir, host, creds),
        )
    }

    /// Existence check that reports `Unknown` instead of `false` when the
    /// server could not be asked.
    pub fn check(&self, file: &str, dest_dir: &str, host: &str, creds: &Credentials) -> Presence {
        Presence::from(&self.try_exists(file, dest_dir, host, creds))
    }

    pub fn try_exists(
        &self,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
    ) -> TransferResult<bool> {
        let params = ConnectionParams::with_password(parse_host(host, SFTP_DEFAULT_PORT), creds);
        let remote = remote_file_path(dest_dir, file);

        info!("SFTP connecting to {}", params.endpoint);
        with_session(&self.connector, &params, |session| {
            let found = session.exists(&remote)?;
            if found {
                debug!("File exists: {}", remote);
            } else {
                debug!("File does not exist: {}", remote);
            }
            Ok(found)
        })
    }

    /// Delete `dest_dir/file`. A missing file yields `false` without an error.
    pub fn delete(&self, file: &str, dest_dir: &str, host: &str, creds: &Credentials) -> bool {
        report(
            "SFTP delete",
            self.try_delete(file, dest_dir, host, creds),
        )
    }

    pub fn try_delete(
        &self,
        file: &str,
        dest_dir: &str,
        host: &str,
        creds: &Credentials,
    ) -> TransferResult<bool> {
        let params = ConnectionParams::with_password(parse_host(host, SFTP_DEFAULT_PORT), creds);
        let remote = remote_file_path(dest_dir, file);

        info!("SFTP connecting to {}", params.endpoint);
        with_session(&self.connector, &params, |session| {
            if !session.exists(&remote)? {
                debug!("File does not exist: {}", remote);
                return Ok(false);
            }
            session.remove(&remote)?;
            debug!("File deleted: {}", remote);
            Ok(true)
        })
    }

    /// Download `source_dir/file` into the local file `dest_path`. The local
    /// file is created or truncated only once the remote file is open.
    pub fn download(
        &self,
        file: &str,
        source_dir: &str,
        host: &str,
        dest_path: &str,
        creds: &Credentials,
    ) -> bool {
        report(
            "SFTP download",
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
        let params = ConnectionParams::with_password(parse_host(host, SFTP_DEFAULT_PORT), creds);
        let remote = remote_file_path(source_dir, file);

        info!("SFTP connecting to {}", params.endpoint);
        with_session(&self.connector, &params, |session| {
            debug!("Downloading {} from {} to {}", remote, params.endpoint, dest_path);
            let mut open_sink = || -> TransferResult<Box<dyn Write>> {
                Ok(Box::new(LocalFile::create(dest_path)?))
            };
            session.download(&remote, &mut open_sink)
        })
    }

    fn upload(
        &self,
        params: &ConnectionParams,
        source_dir: &str,
        file: &str,
        dest_dir: &str,
    ) -> TransferResult<()> {
        info!(
            "SFTP connecting to {} ({})",
            params.endpoint,
            params.auth.label()
        );

        let remote_dir = normalize_remote_dir(dest_dir);
        with_session(&self.connector, params, |session| {
            debug!("Changing remote directory to {}", remote_dir);
            session.change_dir(&remote_dir)?;

            let mut source = LocalFile::open(local_file_path(source_dir, file))?;
            let written = session.upload(file, &mut source)?;
            debug!("Uploaded {} ({} bytes)", file, written);

            let remote = remote_file_path(dest_dir, file);
            if !session.exists(&remote)? {
                return Err(TransferError::ValidationFailed(remote));
            }
            Ok(())
        })
    }
}

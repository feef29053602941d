//! Action dispatch
//!
//! Maps a named action request onto the matching façade call.

use log::info;
use serde::Deserialize;
use std::collections::HashMap;

use super::catalog::{ActionDescriptor, find_action};
use crate::auth::{ConnectionParams, Credentials};
use crate::client::{Connector, FtpParams, FtpSession, SftpSession};
use crate::error::{TransferError, TransferResult};
use crate::transfer::{FtpFileTransfer, SftpFileTransfer};

/// One invocation of a catalog action.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub host: String,
    pub credentials: Credentials,
    #[serde(default)]
    pub key_credentials: Option<Credentials>,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl ActionRequest {
    fn param(&self, name: &str) -> TransferResult<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| TransferError::MissingParameter(name.to_string()))
    }

    /// Check the request against its catalog entry before any connection.
    pub fn validate(&self) -> TransferResult<&'static ActionDescriptor> {
        let descriptor = find_action(&self.action)
            .ok_or_else(|| TransferError::UnknownAction(self.action.clone()))?;

        for name in descriptor.named_params() {
            self.param(name)?;
        }
        if descriptor.needs_key_credentials() && self.key_credentials.is_none() {
            return Err(TransferError::MissingParameter("key_credentials".into()));
        }

        Ok(descriptor)
    }
}

/// Run `request` against real SFTP and FTP servers.
pub fn run_action(request: &ActionRequest) -> TransferResult<bool> {
    run_action_with(&SftpFileTransfer::new(), &FtpFileTransfer::new(), request)
}

/// Run `request` against the given façades.
pub fn run_action_with<S, F>(
    sftp: &SftpFileTransfer<S>,
    ftp: &FtpFileTransfer<F>,
    request: &ActionRequest,
) -> TransferResult<bool>
where
    S: Connector<Params = ConnectionParams>,
    S::Session: SftpSession,
    F: Connector<Params = FtpParams>,
    F::Session: FtpSession,
{
    let descriptor = request.validate()?;
    info!("Running action {} against {}", descriptor.name, request.host);

    let host = request.host.as_str();
    let creds = &request.credentials;
    let p = |name: &'static str| request.param(name);

    match descriptor.name {
        "sftp.send" => sftp
            .try_send(p("source_dir")?, p("file")?, p("dest_dir")?, host, creds)
            .map(|_| true),
        "sftp.send_with_key_auth" => {
            let key_creds = request
                .key_credentials
                .as_ref()
                .ok_or_else(|| TransferError::MissingParameter("key_credentials".into()))?;
            sftp.try_send_with_key_auth(
                p("source_dir")?,
                p("file")?,
                p("dest_dir")?,
                host,
                creds,
                p("private_key_path")?,
                key_creds,
            )
            .map(|_| true)
        }
        "sftp.send_with_private_key_only" => sftp
            .try_send_with_private_key_only(
                p("source_dir")?,
                p("file")?,
                p("dest_dir")?,
                host,
                p("private_key_path")?,
                creds,
            )
            .map(|_| true),
        "sftp.exists" => sftp.try_exists(p("file")?, p("dest_dir")?, host, creds),
        "sftp.delete" => sftp.try_delete(p("file")?, p("dest_dir")?, host, creds),
        "sftp.download" => sftp
            .try_download(p("file")?, p("source_dir")?, host, p("dest_path")?, creds)
            .map(|_| true),
        "ftp.send" => ftp
            .try_send(p("source_dir")?, p("file")?, p("dest_dir")?, host, creds)
            .map(|_| true),
        "ftp.download" => ftp
            .try_download(p("file")?, p("source_dir")?, host, p("dest_path")?, creds)
            .map(|_| true),
        "ftp.exists" => ftp.try_exists(p("file")?, p("dest_dir")?, host, creds),
        "ftp.delete" => ftp.try_delete(p("file")?, p("dest_dir")?, host, creds),
        other => Err(TransferError::UnknownAction(other.to_string())),
    }
}

//! SFTP client backed by ssh2

use log::{debug, info};
use ssh2::{ErrorCode, Session, Sftp};
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};

use super::{Connector, OpenSink, RemoteSession, SftpSession};
use crate::auth::{AuthMethod, ConnectionParams, KeyMaterial};
use crate::error::{TransferError, TransferResult};

/// LIBSSH2_FX_NO_SUCH_FILE
const SFTP_NO_SUCH_FILE: i32 = 2;

/// Opens ssh2 sessions with the library's default timeouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct SshConnector;

impl SshConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for SshConnector {
    type Params = ConnectionParams;
    type Session = SshSftpSession;

    fn connect(&self, params: &ConnectionParams) -> TransferResult<SshSftpSession> {
        let endpoint = &params.endpoint;
        let tcp = TcpStream::connect((endpoint.host.as_str(), endpoint.port))?;

        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;

        authenticate(&session, params)?;
        info!(
            "SFTP authenticated to {} as {} via {}",
            endpoint,
            params.username,
            params.auth.label()
        );

        let sftp = session.sftp()?;
        Ok(SshSftpSession {
            sftp,
            session,
            cwd: None,
        })
    }
}

fn authenticate(session: &Session, params: &ConnectionParams) -> TransferResult<()> {
    let user = params.username.as_str();

    match &params.auth {
        AuthMethod::Password(password) => session.userauth_password(user, password)?,
        AuthMethod::PasswordOrKey { password, key } => {
            if let Err(e) = session.userauth_password(user, password) {
                debug!("Password auth for {} rejected ({}), trying key", user, e);
                userauth_key(session, user, key)?;
            }
        }
        AuthMethod::KeyOnly(key) => userauth_key(session, user, key)?,
    }

    if session.authenticated() {
        Ok(())
    } else {
        Err(TransferError::AuthenticationFailed(params.username.clone()))
    }
}

fn userauth_key(session: &Session, user: &str, key: &KeyMaterial) -> Result<(), ssh2::Error> {
    session.userauth_pubkey_file(
        user,
        None,
        Path::new(&key.private_key_path),
        key.passphrase(),
    )
}

/// One authenticated SFTP channel plus the emulated working directory.
pub struct SshSftpSession {
    sftp: Sftp,
    session: Session,
    cwd: Option<PathBuf>,
}

impl SshSftpSession {
    fn resolve(&self, name: &str) -> PathBuf {
        match &self.cwd {
            Some(cwd) => cwd.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl RemoteSession for SshSftpSession {
    fn disconnect(&mut self) -> TransferResult<()> {
        self.session.disconnect(None, "closing", None)?;
        Ok(())
    }
}

impl SftpSession for SshSftpSession {
    fn change_dir(&mut self, dir: &str) -> TransferResult<()> {
        let target = self.sftp.realpath(&self.resolve(dir))?;
        if !self.sftp.stat(&target)?.is_dir() {
            return Err(TransferError::NotADirectory(dir.to_string()));
        }
        debug!("Remote working directory: {}", target.display());
        self.cwd = Some(target);
        Ok(())
    }

    fn upload(&mut self, remote_name: &str, source: &mut dyn Read) -> TransferResult<u64> {
        let target = self.resolve(remote_name);
        let mut remote = self.sftp.create(&target)?;
        let written = io::copy(source, &mut remote)?;
        debug!("Uploaded {} bytes to {}", written, target.display());
        Ok(written)
    }

    fn exists(&mut self, path: &str) -> TransferResult<bool> {
        match self.sftp.stat(Path::new(path)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::SFTP(SFTP_NO_SUCH_FILE) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self, path: &str) -> TransferResult<()> {
        self.sftp.unlink(Path::new(path))?;
        Ok(())
    }

    fn download(&mut self, path: &str, open_sink: &mut OpenSink<'_>) -> TransferResult<u64> {
        let mut remote = self.sftp.open(Path::new(path))?;
        let mut sink = open_sink()?;
        let read = io::copy(&mut remote, &mut sink)?;
        sink.flush()?;
        debug!("Downloaded {} bytes from {}", read, path);
        Ok(read)
    }
}

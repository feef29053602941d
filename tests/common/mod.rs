//! Shared helpers for integration tests.
//!
//! In-memory SFTP and FTP servers that plug into the façades through the
//! `Connector` traits.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use file_transfer_actions::auth::{AuthMethod, ConnectionParams};
use file_transfer_actions::client::{
    Connector, FILE_ACTION_OK, FILE_UNAVAILABLE, FtpParams, FtpSession, OpenSink, RemoteSession,
    SftpSession,
};
use file_transfer_actions::error::{TransferError, TransferResult};
use tempfile::TempDir;

/// Remote filesystem shared by a fake server and the test asserting on it.
#[derive(Debug, Default)]
pub struct MemoryFs {
    dirs: HashSet<String>,
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFs {
    pub fn with_dirs(dirs: &[&str]) -> Arc<Mutex<MemoryFs>> {
        let mut fs = MemoryFs::default();
        fs.dirs.insert("/".to_string());
        for dir in dirs {
            fs.dirs.insert(canonical_dir(dir));
        }
        Arc::new(Mutex::new(fs))
    }

    pub fn put(&mut self, path: &str, content: &[u8]) {
        self.files.insert(path.to_string(), content.to_vec());
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

fn canonical_dir(dir: &str) -> String {
    let trimmed = dir.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Login directory of the fake SFTP server; relative paths resolve here.
pub const SFTP_HOME: &str = "/home/alice";

fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

fn refused() -> TransferError {
    TransferError::Connection(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

/// Counters shared between a fake connector and the sessions it opened.
#[derive(Debug, Default)]
pub struct Stats {
    pub connects: usize,
    pub disconnects: usize,
    pub last_auth: Option<String>,
}

// ───── SFTP ─────

pub struct MemorySftpConnector {
    pub fs: Arc<Mutex<MemoryFs>>,
    pub stats: Arc<Mutex<Stats>>,
    pub refuse: bool,
    /// Accept uploads but never store them
    pub drop_uploads: bool,
    pub password: String,
}

impl MemorySftpConnector {
    pub fn new(fs: Arc<Mutex<MemoryFs>>) -> Self {
        Self {
            fs,
            stats: Arc::new(Mutex::new(Stats::default())),
            refuse: false,
            drop_uploads: false,
            password: "secret".to_string(),
        }
    }

    pub fn connects(&self) -> usize {
        self.stats.lock().unwrap().connects
    }

    pub fn disconnects(&self) -> usize {
        self.stats.lock().unwrap().disconnects
    }

    pub fn last_auth(&self) -> Option<String> {
        self.stats.lock().unwrap().last_auth.clone()
    }
}

impl Connector for MemorySftpConnector {
    type Params = ConnectionParams;
    type Session = MemorySftpSession;

    fn connect(&self, params: &ConnectionParams) -> TransferResult<MemorySftpSession> {
        if self.refuse {
            return Err(refused());
        }

        let accepted = match &params.auth {
            AuthMethod::Password(password) => *password == self.password,
            AuthMethod::PasswordOrKey { password, key } => {
                *password == self.password || !key.private_key_path.is_empty()
            }
            AuthMethod::KeyOnly(key) => !key.private_key_path.is_empty(),
        };
        if !accepted {
            return Err(TransferError::AuthenticationFailed(params.username.clone()));
        }

        let mut stats = self.stats.lock().unwrap();
        stats.connects += 1;
        stats.last_auth = Some(params.auth.label().to_string());

        Ok(MemorySftpSession {
            fs: Arc::clone(&self.fs),
            stats: Arc::clone(&self.stats),
            cwd: "/".to_string(),
            drop_uploads: self.drop_uploads,
        })
    }
}

pub struct MemorySftpSession {
    fs: Arc<Mutex<MemoryFs>>,
    stats: Arc<Mutex<Stats>>,
    cwd: String,
    drop_uploads: bool,
}

impl RemoteSession for MemorySftpSession {
    fn disconnect(&mut self) -> TransferResult<()> {
        self.stats.lock().unwrap().disconnects += 1;
        Ok(())
    }
}

impl SftpSession for MemorySftpSession {
    fn change_dir(&mut self, dir: &str) -> TransferResult<()> {
        let dir = if dir.starts_with('/') {
            canonical_dir(dir)
        } else {
            canonical_dir(&join(SFTP_HOME, dir))
        };
        if !self.fs.lock().unwrap().dirs.contains(&dir) {
            return Err(TransferError::NotADirectory(dir));
        }
        self.cwd = dir;
        Ok(())
    }

    fn upload(&mut self, remote_name: &str, source: &mut dyn Read) -> TransferResult<u64> {
        let mut content = Vec::new();
        source.read_to_end(&mut content)?;
        let written = content.len() as u64;
        if !self.drop_uploads {
            let path = join(&self.cwd, remote_name);
            self.fs.lock().unwrap().put(&path, &content);
        }
        Ok(written)
    }

    fn exists(&mut self, path: &str) -> TransferResult<bool> {
        Ok(self.fs.lock().unwrap().contains(path))
    }

    fn remove(&mut self, path: &str) -> TransferResult<()> {
        match self.fs.lock().unwrap().files.remove(path) {
            Some(_) => Ok(()),
            None => Err(TransferError::UnexpectedReply {
                code: 2,
                message: format!("no such file {}", path),
            }),
        }
    }

    fn download(&mut self, path: &str, open_sink: &mut OpenSink<'_>) -> TransferResult<u64> {
        let content = self.fs.lock().unwrap().get(path).ok_or_else(|| {
            TransferError::UnexpectedReply {
                code: 2,
                message: format!("no such file {}", path),
            }
        })?;
        let mut sink = open_sink()?;
        sink.write_all(&content)?;
        sink.flush()?;
        Ok(content.len() as u64)
    }
}

// ───── FTP ─────

pub struct MemoryFtpConnector {
    pub fs: Arc<Mutex<MemoryFs>>,
    pub stats: Arc<Mutex<Stats>>,
    pub refuse: bool,
    /// Reply code DELE returns for an existing file
    pub delete_reply: u32,
    /// Reply code SIZE fails with regardless of the file
    pub size_failure: Option<u32>,
}

impl MemoryFtpConnector {
    pub fn new(fs: Arc<Mutex<MemoryFs>>) -> Self {
        Self {
            fs,
            stats: Arc::new(Mutex::new(Stats::default())),
            refuse: false,
            delete_reply: FILE_ACTION_OK,
            size_failure: None,
        }
    }

    pub fn connects(&self) -> usize {
        self.stats.lock().unwrap().connects
    }

    pub fn disconnects(&self) -> usize {
        self.stats.lock().unwrap().disconnects
    }
}

impl Connector for MemoryFtpConnector {
    type Params = FtpParams;
    type Session = MemoryFtpSession;

    fn connect(&self, params: &FtpParams) -> TransferResult<MemoryFtpSession> {
        if self.refuse {
            return Err(refused());
        }
        if params.credentials.password.is_empty() {
            return Err(TransferError::AuthenticationFailed(
                params.credentials.username.clone(),
            ));
        }

        let mut stats = self.stats.lock().unwrap();
        stats.connects += 1;
        stats.last_auth = Some("password".to_string());

        Ok(MemoryFtpSession {
            fs: Arc::clone(&self.fs),
            stats: Arc::clone(&self.stats),
            delete_reply: self.delete_reply,
            size_failure: self.size_failure,
        })
    }
}

pub struct MemoryFtpSession {
    fs: Arc<Mutex<MemoryFs>>,
    stats: Arc<Mutex<Stats>>,
    delete_reply: u32,
    size_failure: Option<u32>,
}

fn unavailable(path: &str) -> TransferError {
    TransferError::UnexpectedReply {
        code: FILE_UNAVAILABLE,
        message: format!("{}: No such file or directory", path),
    }
}

impl RemoteSession for MemoryFtpSession {
    fn disconnect(&mut self) -> TransferResult<()> {
        self.stats.lock().unwrap().disconnects += 1;
        Ok(())
    }
}

impl FtpSession for MemoryFtpSession {
    fn put(&mut self, path: &str, source: &mut dyn Read) -> TransferResult<u64> {
        let mut content = Vec::new();
        source.read_to_end(&mut content)?;
        self.fs.lock().unwrap().put(path, &content);
        Ok(content.len() as u64)
    }

    fn get(&mut self, path: &str, open_sink: &mut OpenSink<'_>) -> TransferResult<u64> {
        let content = self
            .fs
            .lock()
            .unwrap()
            .get(path)
            .ok_or_else(|| unavailable(path))?;
        let mut sink = open_sink()?;
        sink.write_all(&content)?;
        sink.flush()?;
        Ok(content.len() as u64)
    }

    fn size(&mut self, path: &str) -> TransferResult<u64> {
        if let Some(code) = self.size_failure {
            return Err(TransferError::UnexpectedReply {
                code,
                message: "SIZE failed".to_string(),
            });
        }
        self.fs
            .lock()
            .unwrap()
            .get(path)
            .map(|content| content.len() as u64)
            .ok_or_else(|| unavailable(path))
    }

    fn delete(&mut self, path: &str) -> TransferResult<u32> {
        let mut fs = self.fs.lock().unwrap();
        if !fs.contains(path) {
            return Ok(FILE_UNAVAILABLE);
        }
        if self.delete_reply == FILE_ACTION_OK {
            fs.files.remove(path);
        }
        Ok(self.delete_reply)
    }
}

// ───── Local files ─────

/// A temporary local directory holding files to upload.
pub struct LocalDir {
    dir: TempDir,
}

impl LocalDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn with_file(name: &str, content: &[u8]) -> Self {
        let local = Self::new();
        std::fs::write(local.dir.path().join(name), content).expect("write fixture file");
        local
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// A port on localhost with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

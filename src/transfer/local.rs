//! Local side of a transfer

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{TransferError, TransferResult};

/// A local file whose I/O errors carry the path, so a failed read or write
/// inside a copy loop is reported as a local error and not a network one.
#[derive(Debug)]
pub struct LocalFile {
    file: File,
    path: PathBuf,
}

impl LocalFile {
    pub fn open(path: impl AsRef<Path>) -> TransferResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TransferError::local_io(path, e))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Create or truncate. Call only once the remote side is readable.
    pub fn create(path: impl AsRef<Path>) -> TransferResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TransferError::local_io(path, e))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tag(&self, error: io::Error) -> io::Error {
        io::Error::new(error.kind(), TransferError::local_io(&self.path, error))
    }
}

impl Read for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf).map_err(|e| self.tag(e))
    }
}

impl Write for LocalFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf).map_err(|e| self.tag(e))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush().map_err(|e| self.tag(e))
    }
}

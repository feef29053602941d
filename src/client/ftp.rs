//! Plain FTP client backed by suppaftp

use log::{debug, info};
use std::io::{self, Read, Write};
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};

use super::{Connector, FtpParams, FtpSession, OpenSink, RemoteSession};
use crate::error::{TransferError, TransferResult};

/// 250 Requested file action okay, completed
pub const FILE_ACTION_OK: u32 = 250;
/// 550 Requested action not taken, file unavailable
pub const FILE_UNAVAILABLE: u32 = 550;

fn reply_error(e: FtpError) -> TransferError {
    let message = e.to_string();
    match e {
        FtpError::UnexpectedResponse(response) => TransferError::UnexpectedReply {
            code: response.status.code(),
            message,
        },
        FtpError::ConnectionError(io) => TransferError::from(io),
        other => TransferError::Ftp(other),
    }
}

/// Carries a local failure through a suppaftp callback; `reply_error`
/// unwraps it again.
fn local_error(e: TransferError) -> FtpError {
    FtpError::ConnectionError(io::Error::other(e))
}

/// Opens unencrypted FTP control connections.
#[derive(Debug, Default, Clone, Copy)]
pub struct FtpStreamConnector;

impl FtpStreamConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for FtpStreamConnector {
    type Params = FtpParams;
    type Session = FtpStreamSession;

    fn connect(&self, params: &FtpParams) -> TransferResult<FtpStreamSession> {
        let endpoint = &params.endpoint;
        let mut stream =
            FtpStream::connect((endpoint.host.as_str(), endpoint.port)).map_err(reply_error)?;

        let login = stream.login(
            params.credentials.username.as_str(),
            params.credentials.password.as_str(),
        );
        if let Err(e) = login {
            let _ = stream.quit();
            return Err(match reply_error(e) {
                TransferError::UnexpectedReply { .. } => {
                    TransferError::AuthenticationFailed(params.credentials.username.clone())
                }
                other => other,
            });
        }

        if let Err(e) = stream.transfer_type(FileType::Binary) {
            debug!("Server at {} rejected binary transfer type", endpoint);
            let _ = stream.quit();
            return Err(reply_error(e));
        }

        info!(
            "FTP logged in to {} as {}",
            endpoint, params.credentials.username
        );
        Ok(FtpStreamSession { stream })
    }
}

pub struct FtpStreamSession {
    stream: FtpStream,
}

impl RemoteSession for FtpStreamSession {
    fn disconnect(&mut self) -> TransferResult<()> {
        self.stream.quit().map_err(reply_error)
    }
}

impl FtpSession for FtpStreamSession {
    fn put(&mut self, path: &str, mut source: &mut dyn Read) -> TransferResult<u64> {
        let written = self
            .stream
            .put_file(path, &mut source)
            .map_err(reply_error)?;
        debug!("Stored {} bytes at {}", written, path);
        Ok(written)
    }

    fn get(&mut self, path: &str, open_sink: &mut OpenSink<'_>) -> TransferResult<u64> {
        let read = self
            .stream
            .retr(path, |reader| {
                let mut sink = open_sink().map_err(local_error)?;
                let copied = io::copy(reader, &mut sink).map_err(FtpError::ConnectionError)?;
                sink.flush().map_err(FtpError::ConnectionError)?;
                Ok(copied)
            })
            .map_err(reply_error)?;
        debug!("Retrieved {} bytes from {}", read, path);
        Ok(read)
    }

    fn size(&mut self, path: &str) -> TransferResult<u64> {
        let size = self.stream.size(path).map_err(reply_error)?;
        Ok(size as u64)
    }

    fn delete(&mut self, path: &str) -> TransferResult<u32> {
        match self.stream.rm(path) {
            Ok(()) => Ok(FILE_ACTION_OK),
            Err(e) => match reply_error(e) {
                TransferError::UnexpectedReply { code, .. } => Ok(code),
                other => Err(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::utils::HostEndpoint;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;
    use std::thread;

    /// Answers each control command with the next canned reply.
    fn scripted_server(replies: &'static [&'static str]) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let mut reader = BufReader::new(stream);
            writer.write_all(b"220 ready\r\n").unwrap();

            let mut line = String::new();
            for reply in replies {
                line.clear();
                if reader.read_line(&mut line).unwrap_or(0) == 0 {
                    return;
                }
                writer.write_all(reply.as_bytes()).unwrap();
            }
        });
        port
    }

    fn params(port: u16) -> FtpParams {
        FtpParams {
            endpoint: HostEndpoint {
                host: "127.0.0.1".to_string(),
                port,
            },
            credentials: Credentials::new("bob", "bob123"),
        }
    }

    #[test]
    fn rejected_login_is_authentication_failure() {
        let port = scripted_server(&["331 password\r\n", "530 denied\r\n", "221 bye\r\n"]);

        match FtpStreamConnector::new().connect(&params(port)) {
            Err(TransferError::AuthenticationFailed(user)) => assert_eq!(user, "bob"),
            Err(e) => panic!("expected AuthenticationFailed, got {e}"),
            Ok(_) => panic!("login should fail"),
        }
    }

    #[test]
    fn rejected_binary_mode_is_not_an_authentication_failure() {
        let port = scripted_server(&[
            "331 password\r\n",
            "230 logged in\r\n",
            "500 type not supported\r\n",
            "221 bye\r\n",
        ]);

        match FtpStreamConnector::new().connect(&params(port)) {
            Err(TransferError::UnexpectedReply { code, .. }) => assert_eq!(code, 500),
            Err(e) => panic!("expected UnexpectedReply, got {e}"),
            Ok(_) => panic!("TYPE I should fail"),
        }
    }

    #[test]
    fn local_errors_survive_the_callback_round_trip() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let local = TransferError::local_io("/tmp/out.bin", denied);
        assert!(matches!(
            reply_error(local_error(local)),
            TransferError::LocalIo { .. }
        ));
    }
}

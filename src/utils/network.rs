//! Network utilities
//!
//! Host string parsing for "host[:port]" endpoints.

use std::fmt;

pub const SFTP_DEFAULT_PORT: u16 = 22;
pub const FTP_DEFAULT_PORT: u16 = 21;

/// A remote host and the port to reach it on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEndpoint {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for HostEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse a "host[:port]" string.
///
/// Without a colon the protocol's `default_port` is used. With a colon the
/// second segment is parsed as the port, and anything unparsable resolves
/// to port 0 rather than an error.
pub fn parse_host(host: &str, default_port: u16) -> HostEndpoint {
    let mut parts = host.split(':');
    let server = parts.next().unwrap_or_default().to_string();

    let port = match parts.next() {
        Some(port) => port.trim().parse::<u16>().unwrap_or(0),
        None => default_port,
    };

    HostEndpoint { host: server, port }
}

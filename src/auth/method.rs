//! Authentication methods and connection parameters

use super::credentials::{Credentials, KeyMaterial};
use crate::utils::network::HostEndpoint;

/// Which methods a connection offers the server.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    Password(String),
    /// Password and private key; either one succeeding is enough
    PasswordOrKey { password: String, key: KeyMaterial },
    KeyOnly(KeyMaterial),
}

impl AuthMethod {
    pub fn label(&self) -> &'static str {
        match self {
            AuthMethod::Password(_) => "password",
            AuthMethod::PasswordOrKey { .. } => "password+publickey",
            AuthMethod::KeyOnly(_) => "publickey",
        }
    }
}

/// Everything needed to open one connection.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub endpoint: HostEndpoint,
    pub username: String,
    pub auth: AuthMethod,
}

impl ConnectionParams {
    pub fn with_password(endpoint: HostEndpoint, creds: &Credentials) -> Self {
        Self {
            endpoint,
            username: creds.username.clone(),
            auth: AuthMethod::Password(creds.password.clone()),
        }
    }

    pub fn with_password_or_key(
        endpoint: HostEndpoint,
        creds: &Credentials,
        key: KeyMaterial,
    ) -> Self {
        Self {
            endpoint,
            username: creds.username.clone(),
            auth: AuthMethod::PasswordOrKey {
                password: creds.password.clone(),
                key,
            },
        }
    }

    pub fn with_key_only(endpoint: HostEndpoint, username: &str, key: KeyMaterial) -> Self {
        Self {
            endpoint,
            username: username.to_string(),
            auth: AuthMethod::KeyOnly(key),
        }
    }
}

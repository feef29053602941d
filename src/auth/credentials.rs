//! Credential types
//!
//! Credentials are supplied per call and never cached.

use serde::Deserialize;
use std::fmt;

/// Username and password pair handed in by the caller.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Private key file plus the passphrase that decrypts it.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub private_key_path: String,
    pub passphrase: String,
}

impl KeyMaterial {
    pub fn new(private_key_path: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            private_key_path: private_key_path.into(),
            passphrase: passphrase.into(),
        }
    }

    /// Passphrase as the ssh client expects it; empty means unencrypted.
    pub fn passphrase(&self) -> Option<&str> {
        if self.passphrase.is_empty() {
            None
        } else {
            Some(&self.passphrase)
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key_path", &self.private_key_path)
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

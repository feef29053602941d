//! Configuration management for the action runner
//!
//! An action request is read from a TOML file and can be overridden from
//! the environment, e.g. `FILE_TRANSFER__HOST=sftp.local:2222` or
//! `FILE_TRANSFER__CREDENTIALS__PASSWORD=...`.

use config::{Config, ConfigError, Environment, File, FileFormat};

use crate::actions::ActionRequest;
use crate::auth::validate_credentials;

pub const ENV_PREFIX: &str = "FILE_TRANSFER";
pub const DEFAULT_CONFIG_PATH: &str = "action.toml";

/// Load an action request from `path` (optional) with environment overrides.
pub fn load_request(path: &str) -> Result<ActionRequest, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let request: ActionRequest = settings.try_deserialize()?;
    validate(&request)?;
    Ok(request)
}

/// Parse an action request from TOML text, without environment overrides.
pub fn request_from_toml(content: &str) -> Result<ActionRequest, ConfigError> {
    let settings = Config::builder()
        .add_source(File::from_str(content, FileFormat::Toml))
        .build()?;

    let request: ActionRequest = settings.try_deserialize()?;
    validate(&request)?;
    Ok(request)
}

/// Validation for values the catalog cannot check
fn validate(request: &ActionRequest) -> Result<(), ConfigError> {
    if request.action.trim().is_empty() {
        return Err(ConfigError::Message("action cannot be empty".into()));
    }

    if request.host.trim().is_empty() {
        return Err(ConfigError::Message("host cannot be empty".into()));
    }

    validate_credentials(&request.credentials).map_err(ConfigError::Message)?;

    if let Some(key_credentials) = &request.key_credentials {
        if key_credentials.password.contains(['\r', '\n', '\0']) {
            return Err(ConfigError::Message(
                "key_credentials password contains control characters".into(),
            ));
        }
    }

    Ok(())
}

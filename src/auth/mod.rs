//! Authentication material
//!
//! Credentials, key material, and the auth method offered per connection.

pub mod credentials;
pub mod method;
pub mod validator;

pub use credentials::{Credentials, KeyMaterial};
pub use method::{AuthMethod, ConnectionParams};
pub use validator::validate_credentials;

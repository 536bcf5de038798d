use crate::error::VitrineError;
use base64::Engine;
use std::fs;
use std::path::Path;
use tracing::info;

pub const ADMIN_USERNAME: &str = "admin";

/// Admin credentials, decoded once at startup and injected into the router
/// state. The password is held and compared in plaintext; comparison is a
/// plain string equality, not constant-time and not hashed.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read the Base64-encoded admin password from `path`. Any failure here
    /// is startup-fatal; the server must not come up without a credential.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        if !path.exists() {
            return Err(VitrineError::SecretFileMissing(path.to_path_buf()));
        }
        let encoded = fs::read_to_string(path)?;
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
        let password = String::from_utf8(decoded)?;
        info!(path = %path.display(), "admin credential loaded");
        Ok(Self::new(ADMIN_USERNAME, password))
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

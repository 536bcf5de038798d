use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Runtime configuration. Every field can be overridden through a
/// `VITRINE_*` environment variable (e.g. `VITRINE_SECRET_KEY`,
/// `VITRINE_PORT`); everything else falls back to the compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Session-signing secret. Must be at least 32 bytes; checked at startup.
    pub secret_key: String,
    /// File holding the Base64-encoded admin password.
    pub secret_file: PathBuf,
    pub database_url: String,
    /// Directory uploads are written beneath (`<static_dir>/img/...`).
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            secret_key: "this-is-a-very-secret-key-change-me-in-production".to_string(),
            secret_file: PathBuf::from("secret.txt"),
            database_url: "sqlite:instance/products.db".to_string(),
            static_dir: PathBuf::from("static"),
            max_upload_bytes: 16 * 1024 * 1024,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("VITRINE_"))
            .extract()
            .expect("invalid VITRINE_* environment configuration")
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);

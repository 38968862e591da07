use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory backing the file store; one file per storage key.
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    /// Storage key holding the admin request list.
    pub requests_key: String,
    /// Storage key of the session-scoped "opening animation shown" flag.
    pub opening_key: String,
    /// Province slug used when a caller does not name one.
    pub default_province: String,
    pub weather_base_url: String,
    pub weather_timeout_secs: u64,
}

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

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub weights_path: PathBuf,
    pub image_dir: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub image_request_timeout_secs: u64,
    pub image_user_agent: String,
    pub image_max_concurrent: usize,
    pub image_max_retries: u32,
    pub image_retry_backoff_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("weights_path", &self.weights_path)
            .field("image_dir", &self.image_dir)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "image_request_timeout_secs",
                &self.image_request_timeout_secs,
            )
            .field("image_user_agent", &self.image_user_agent)
            .field("image_max_concurrent", &self.image_max_concurrent)
            .field("image_max_retries", &self.image_max_retries)
            .field("image_retry_backoff_ms", &self.image_retry_backoff_ms)
            .finish()
    }
}

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod trends;
pub mod weights;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use trends::{region_defaults, source_display_name, ConflictMode, TrendObservation};
pub use weights::{load_weights_file, ChannelWeight, ScoreWeights, WeightsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read weights file {path}: {source}")]
    WeightsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse weights file: {0}")]
    WeightsFileParse(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

use thiserror::Error;

/// Configuration problems detected while reading the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed.
    #[error("Invalid value for environment variable {0}")]
    InvalidEnvVar(String),
}

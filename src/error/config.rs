use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {name}: {value:?}")]
    InvalidVar { name: String, value: String },
}

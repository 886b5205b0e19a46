use crate::error::config::ConfigError;

pub struct Config {
    pub user_agent: String,
    pub database_url: String,
    pub valkey_url: String,
    pub esi_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            user_agent: require("USER_AGENT")?,
            database_url: require("DATABASE_URL")?,
            valkey_url: require("VALKEY_URL")?,
            esi_base_url: std::env::var("ESI_BASE_URL")
                .unwrap_or_else(|_| crate::esi::DEFAULT_BASE_URL.to_string()),
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

mod database_config;
mod raw_config;
mod security_config;

use url::Url;

pub use self::{
    database_config::DatabaseConfig, raw_config::RawConfig, security_config::SecurityConfig,
};

/// Main server config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Version of the lockbox binary.
    pub version: String,
    /// External/public URL through which the service is being accessed.
    pub public_url: Url,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (access tokens, master key).
    pub security: SecurityConfig,
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            public_url: raw_config.public_url,
            db: raw_config.db,
            security: raw_config.security,
        }
    }
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, RawConfig};

    #[test]
    fn conversion_from_raw_config() {
        let config = Config::from(RawConfig::default());

        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.public_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.db.name, "lockbox");
        assert_eq!(config.security.session_cookie_name, "jwt");
        assert!(config.security.master_key.is_none());
    }
}

use crate::config::{DatabaseConfig, SecurityConfig};
use figment::{Figment, Metadata, Profile, Provider, providers, providers::Format, value};
use serde_derive::{Deserialize, Serialize};
use url::Url;

/// Raw configuration structure that is used to read the configuration from
/// the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawConfig {
    /// Defines a TCP port to listen on.
    pub port: u16,
    /// External/public URL through which the service is being accessed.
    pub public_url: Url,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (access tokens, master key).
    pub security: SecurityConfig,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the
    /// default values and `LOCKBOX_`-prefixed environment variables.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Figment::from(RawConfig::default())
            .merge(providers::Toml::file(path))
            .merge(providers::Env::prefixed("LOCKBOX_").split("__"))
            .extract()?)
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        let port = 8000;
        Self {
            port,
            public_url: Url::parse(&format!("http://localhost:{port}"))
                .expect("Cannot parse public URL parameter."),
            db: DatabaseConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Provider for RawConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("Lockbox main configuration")
    }

    fn data(&self) -> Result<value::Map<Profile, value::Dict>, figment::Error> {
        providers::Serialized::defaults(Self::default()).data()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DatabaseConfig, RawConfig, SecurityConfig};
    use insta::assert_toml_snapshot;
    use url::Url;

    #[test]
    fn serialization_and_default() {
        assert_toml_snapshot!(RawConfig::default(), @r###"
        port = 8000
        public_url = 'http://localhost:8000/'

        [db]
        name = 'lockbox'
        host = 'localhost'
        port = 5432
        username = 'postgres'

        [security]
        session_cookie_name = 'jwt'
        "###);
    }

    #[test]
    fn deserialization() {
        let config: RawConfig = toml::from_str(
            r#"
        port = 8000
        public_url = 'https://vault.lockbox.dev/'

        [db]
        name = 'lockbox'
        username = 'postgres'
        password = 'password'
        host = 'localhost'
        port = 5432

        [security]
        session_cookie_name = 'jwt'
        jwt_secret = '3024bf8975b03b84e405f36a7bacd1c1'
        master_key = 'a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2'
    "#,
        )
        .unwrap();

        assert_eq!(
            config,
            RawConfig {
                port: 8000,
                public_url: Url::parse("https://vault.lockbox.dev/").unwrap(),
                db: DatabaseConfig {
                    password: Some("password".to_string()),
                    ..Default::default()
                },
                security: SecurityConfig {
                    jwt_secret: Some("3024bf8975b03b84e405f36a7bacd1c1".to_string()),
                    master_key: Some(
                        "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2"
                            .to_string()
                    ),
                    ..Default::default()
                },
            }
        );
    }
}

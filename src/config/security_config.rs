use serde_derive::{Deserialize, Serialize};

/// Configuration for the authentication and encryption functionality.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SecurityConfig {
    /// Name of the session cookie that can carry the access token.
    pub session_cookie_name: String,
    /// Secret key used to sign the JWT access tokens. Required to serve
    /// any authenticated route.
    pub jwt_secret: Option<String>,
    /// Hex-encoded master key used to wrap per-secret data keys. Must
    /// decode to 16, 24, or 32 bytes; validated at startup.
    pub master_key: Option<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "jwt".to_string(),
            jwt_secret: None,
            master_key: None,
        }
    }
}

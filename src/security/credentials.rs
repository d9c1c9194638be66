use actix_web::cookie::Cookie;

/// Credentials a request can carry to prove who the caller is.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Bearer access token issued by signup/signin.
    Jwt(String),
    /// The same token delivered through the session cookie.
    SessionCookie(Cookie<'static>),
}

impl Credentials {
    /// Returns the raw token regardless of the transport it arrived on.
    pub fn token(&self) -> &str {
        match self {
            Credentials::Jwt(token) => token,
            Credentials::SessionCookie(cookie) => cookie.value(),
        }
    }
}

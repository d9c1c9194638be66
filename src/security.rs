mod api_ext;
mod credentials;
mod jwt;

pub use self::credentials::Credentials;

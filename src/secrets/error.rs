use crate::users::UserId;
use uuid::Uuid;

/// Closed set of failures the secrets engine can produce. Callers branch
/// on the variant to pick a response, never on message text. None of these
/// conditions is transient, so nothing is ever retried inside the engine.
#[derive(thiserror::Error, Debug)]
pub enum SecretsError {
    /// The requesting user does not own the secret.
    #[error("user {user_id} does not have permission to access secret {secret_id}")]
    NoPermission { user_id: UserId, secret_id: Uuid },
    /// A secret's type is immutable for its lifetime.
    #[error("secret type cannot be changed")]
    TypeChangeForbidden,
    #[error("secret {0} not found")]
    NotFound(Uuid),
    /// Payload bytes could not be encoded or decoded.
    #[error("failed to encode or decode secret payload")]
    Codec(#[source] anyhow::Error),
    /// AEAD failure: tampering, corruption, or a wrong key.
    #[error("failed to encrypt or decrypt secret data")]
    Crypto(#[source] anyhow::Error),
    /// Opaque failure reported by the storage port.
    #[error("storage operation failed")]
    Storage(#[source] anyhow::Error),
    /// The export archive could not be assembled.
    #[error("failed to assemble secrets archive")]
    Archive(#[source] anyhow::Error),
}

impl SecretsError {
    pub fn codec(err: impl Into<anyhow::Error>) -> Self {
        Self::Codec(err.into())
    }

    pub fn crypto(err: impl Into<anyhow::Error>) -> Self {
        Self::Crypto(err.into())
    }

    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        Self::Storage(err.into())
    }

    pub fn archive(err: impl Into<anyhow::Error>) -> Self {
        Self::Archive(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::SecretsError;
    use uuid::uuid;

    #[test]
    fn permission_error_identifies_user_and_secret() {
        let err = SecretsError::NoPermission {
            user_id: uuid!("00000000-0000-0000-0000-000000000001").into(),
            secret_id: uuid!("00000000-0000-0000-0000-000000000042"),
        };

        assert_eq!(
            err.to_string(),
            "user 00000000-0000-0000-0000-000000000001 does not have permission \
             to access secret 00000000-0000-0000-0000-000000000042"
        );
    }

    #[test]
    fn not_found_error_identifies_secret() {
        let err = SecretsError::NotFound(uuid!("00000000-0000-0000-0000-000000000042"));
        assert_eq!(
            err.to_string(),
            "secret 00000000-0000-0000-0000-000000000042 not found"
        );
    }
}

use crate::{
    secrets::{Secret, SecretType, SecretsError},
    users::UserId,
};
use futures::future::BoxFuture;
use uuid::Uuid;

/// Port to the persistence layer backing the secrets engine. The engine
/// talks to storage exclusively through this seam, so tests can observe
/// and fail individual calls without a database. Calls are treated as
/// opaque, potentially failing remote operations and are never retried.
pub trait SecretsStorage: Send + Sync {
    /// Persists a new secret and returns the complete stored record.
    fn create_secret<'a>(
        &'a self,
        user_id: UserId,
        secret_type: SecretType,
        description: &'a str,
        encrypted_data: &'a [u8],
        encrypted_key: &'a [u8],
    ) -> BoxFuture<'a, Result<Secret, SecretsError>>;

    /// Looks a secret up by id.
    fn find_secret_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Secret, SecretsError>>;

    /// Replaces a secret's description and ciphertext. The wrapped key
    /// column is left untouched.
    fn update_secret<'a>(
        &'a self,
        id: Uuid,
        description: &'a str,
        encrypted_data: &'a [u8],
    ) -> BoxFuture<'a, Result<(), SecretsError>>;

    /// Removes a secret.
    fn delete_secret(&self, id: Uuid) -> BoxFuture<'_, Result<(), SecretsError>>;

    /// Lists all secrets that belong to a user, in stable storage order.
    fn list_user_secrets(&self, user_id: UserId)
    -> BoxFuture<'_, Result<Vec<Secret>, SecretsError>>;
}

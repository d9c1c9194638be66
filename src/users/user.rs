use crate::users::UserId;
use serde::Serialize;
use time::OffsetDateTime;

/// Represents a registered vault user.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing)]
    pub id: UserId,
    pub email: String,
    /// Argon2 hash of the user password, never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl AsRef<User> for User {
    fn as_ref(&self) -> &User {
        self
    }
}

use crate::{secrets::SecretType, users::UserId};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted secret record. Only the envelope encryptor can make sense of
/// `encrypted_data` and `encrypted_key`; neither is ever serialized to
/// clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Unique identifier for the secret, assigned by storage.
    pub id: Uuid,
    /// The user who owns this secret, set at creation and immutable.
    #[serde(skip)]
    pub user_id: UserId,
    /// Payload kind, immutable for the lifetime of the secret.
    pub secret_type: SecretType,
    /// Free-text label chosen by the user.
    pub description: String,
    /// Marshalled payload encrypted under the secret's data key.
    #[serde(skip)]
    pub encrypted_data: Vec<u8>,
    /// The data key, wrapped under the master key. The only form of the
    /// data key that is ever persisted.
    #[serde(skip)]
    pub encrypted_key: Vec<u8>,
    /// When the secret was first created.
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    /// When the secret payload or description was last updated.
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::Secret;
    use crate::secrets::SecretType;
    use insta::assert_json_snapshot;
    use time::OffsetDateTime;
    use uuid::uuid;

    #[test]
    fn serialization_skips_sensitive_fields() -> anyhow::Result<()> {
        let secret = Secret {
            id: uuid!("00000000-0000-0000-0000-000000000042"),
            user_id: uuid!("00000000-0000-0000-0000-000000000001").into(),
            secret_type: SecretType::Credentials,
            description: "my mail account".to_string(),
            encrypted_data: vec![1, 2, 3],
            encrypted_key: vec![4, 5, 6],
            // January 1, 2000 11:00:00
            created_at: OffsetDateTime::from_unix_timestamp(946720800)?,
            updated_at: OffsetDateTime::from_unix_timestamp(946720800)?,
        };

        assert_json_snapshot!(secret, @r###"
        {
          "id": "00000000-0000-0000-0000-000000000042",
          "secretType": "credentials",
          "description": "my mail account",
          "createdAt": 946720800,
          "updatedAt": 946720800
        }
        "###);

        Ok(())
    }
}

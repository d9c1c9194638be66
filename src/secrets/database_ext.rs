use crate::{
    database::Database,
    secrets::{Secret, SecretType, SecretsError, SecretsStorage},
    users::UserId,
};
use futures::future::BoxFuture;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct RawSecret {
    id: Uuid,
    user_id: Uuid,
    secret_type: String,
    description: String,
    encrypted_data: Vec<u8>,
    encrypted_key: Vec<u8>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<RawSecret> for Secret {
    type Error = anyhow::Error;

    fn try_from(raw: RawSecret) -> Result<Self, Self::Error> {
        Ok(Secret {
            id: raw.id,
            user_id: raw.user_id.into(),
            secret_type: SecretType::from_str(&raw.secret_type)?,
            description: raw.description,
            encrypted_data: raw.encrypted_data,
            encrypted_key: raw.encrypted_key,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

/// Extends the primary database with secrets CRUD methods.
impl Database {
    /// Inserts a new secret row. Creation is a single statement, so a
    /// partially written record can never be observed.
    pub async fn insert_secret(
        &self,
        user_id: UserId,
        secret_type: SecretType,
        description: &str,
        encrypted_data: &[u8],
        encrypted_key: &[u8],
    ) -> anyhow::Result<Secret> {
        let id = Uuid::now_v7();
        let now = OffsetDateTime::now_utc();
        sqlx::query(
            r#"
INSERT INTO secrets (id, user_id, secret_type, description, encrypted_data, encrypted_key, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(*user_id)
        .bind(secret_type.as_str())
        .bind(description)
        .bind(encrypted_data)
        .bind(encrypted_key)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Secret {
            id,
            user_id,
            secret_type,
            description: description.to_string(),
            encrypted_data: encrypted_data.to_vec(),
            encrypted_key: encrypted_key.to_vec(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a single secret by id.
    pub async fn get_secret(&self, id: Uuid) -> anyhow::Result<Option<Secret>> {
        sqlx::query_as::<_, RawSecret>(
            r#"
SELECT id, user_id, secret_type, description, encrypted_data, encrypted_key, created_at, updated_at
FROM secrets
WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Secret::try_from)
        .transpose()
    }

    /// Replaces a secret's description and ciphertext; the wrapped key
    /// column is never part of the update. Returns the number of affected
    /// rows.
    pub async fn update_secret_content(
        &self,
        id: Uuid,
        description: &str,
        encrypted_data: &[u8],
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
UPDATE secrets
SET description = $1, encrypted_data = $2, updated_at = $3
WHERE id = $4
            "#,
        )
        .bind(description)
        .bind(encrypted_data)
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Removes a secret by id.
    pub async fn remove_secret(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM secrets WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists all secrets for a user in creation order.
    pub async fn get_user_secrets(&self, user_id: UserId) -> anyhow::Result<Vec<Secret>> {
        sqlx::query_as::<_, RawSecret>(
            r#"
SELECT id, user_id, secret_type, description, encrypted_data, encrypted_key, created_at, updated_at
FROM secrets
WHERE user_id = $1
ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(*user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Secret::try_from)
        .collect()
    }
}

impl SecretsStorage for Database {
    fn create_secret<'a>(
        &'a self,
        user_id: UserId,
        secret_type: SecretType,
        description: &'a str,
        encrypted_data: &'a [u8],
        encrypted_key: &'a [u8],
    ) -> BoxFuture<'a, Result<Secret, SecretsError>> {
        Box::pin(async move {
            self.insert_secret(user_id, secret_type, description, encrypted_data, encrypted_key)
                .await
                .map_err(SecretsError::storage)
        })
    }

    fn find_secret_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Secret, SecretsError>> {
        Box::pin(async move {
            self.get_secret(id)
                .await
                .map_err(SecretsError::storage)?
                .ok_or(SecretsError::NotFound(id))
        })
    }

    fn update_secret<'a>(
        &'a self,
        id: Uuid,
        description: &'a str,
        encrypted_data: &'a [u8],
    ) -> BoxFuture<'a, Result<(), SecretsError>> {
        Box::pin(async move {
            let affected_rows = self
                .update_secret_content(id, description, encrypted_data)
                .await
                .map_err(SecretsError::storage)?;
            if affected_rows == 0 {
                return Err(SecretsError::NotFound(id));
            }

            Ok(())
        })
    }

    fn delete_secret(&self, id: Uuid) -> BoxFuture<'_, Result<(), SecretsError>> {
        Box::pin(async move { self.remove_secret(id).await.map_err(SecretsError::storage) })
    }

    fn list_user_secrets(
        &self,
        user_id: UserId,
    ) -> BoxFuture<'_, Result<Vec<Secret>, SecretsError>> {
        Box::pin(async move {
            self.get_user_secrets(user_id)
                .await
                .map_err(SecretsError::storage)
        })
    }
}

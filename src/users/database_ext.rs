use crate::{
    database::Database,
    users::{User, UserId},
};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct RawUser {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: OffsetDateTime,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        User {
            id: raw.id.into(),
            email: raw.email,
            password_hash: raw.password_hash,
            created_at: raw.created_at,
        }
    }
}

/// Extends the primary database with user management methods.
impl Database {
    /// Retrieves a user from the `users` table by id.
    pub async fn get_user(&self, id: UserId) -> anyhow::Result<Option<User>> {
        Ok(sqlx::query_as::<_, RawUser>(
            r#"SELECT id, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::from))
    }

    /// Retrieves a user from the `users` table by email.
    pub async fn get_user_by_email<T: AsRef<str>>(&self, email: T) -> anyhow::Result<Option<User>> {
        Ok(sqlx::query_as::<_, RawUser>(
            r#"SELECT id, email, password_hash, created_at FROM users WHERE email = $1"#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.pool)
        .await?
        .map(User::from))
    }

    /// Inserts a new user; fails if a user with the same email exists.
    pub async fn insert_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let id = Uuid::now_v7();
        let created_at = OffsetDateTime::now_utc();
        sqlx::query(
            r#"INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: id.into(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::database::Database;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn can_insert_and_retrieve_users(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::create(pool).await?;

        assert!(db.get_user_by_email("dev@lockbox.dev").await?.is_none());

        let user = db.insert_user("dev@lockbox.dev", "$argon2id$hash").await?;
        assert_eq!(user.email, "dev@lockbox.dev");
        assert_eq!(user.password_hash, "$argon2id$hash");

        let by_id = db.get_user(user.id).await?.unwrap();
        assert_eq!(by_id, user);

        let by_email = db.get_user_by_email("dev@lockbox.dev").await?.unwrap();
        assert_eq!(by_email, user);

        Ok(())
    }

    #[sqlx::test]
    async fn rejects_duplicate_emails(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::create(pool).await?;

        db.insert_user("dev@lockbox.dev", "$argon2id$hash-1").await?;
        assert!(
            db.insert_user("dev@lockbox.dev", "$argon2id$hash-2")
                .await
                .is_err()
        );

        Ok(())
    }

    #[sqlx::test]
    async fn get_user_returns_none_for_unknown_id(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::create(pool).await?;
        assert!(db.get_user(uuid::Uuid::now_v7().into()).await?.is_none());

        Ok(())
    }
}

use anyhow::Context;
use sqlx::{Pool, Postgres};

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: Pool<Postgres>,
}

/// Common methods for the primary database, extensions are implemented
/// separately in every module.
impl Database {
    /// Migrates the database schema and creates a "connection" to it.
    pub async fn create(pool: Pool<Postgres>) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .with_context(|| "Failed to migrate database")?;

        Ok(Database { pool })
    }
}

impl AsRef<Database> for Database {
    fn as_ref(&self) -> &Self {
        self
    }
}

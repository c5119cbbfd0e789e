use async_trait::async_trait;
use sqlx::PgPool;

use super::{parse_id, StoreError, UserStore};
use crate::models::{User, UserFields};

const COLUMNS: &str = "id, name, email, age, schema_version";

/// PostgreSQL-backed store over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE classes the server raises for bad input rather than its own
/// failure: 22 (data exception, e.g. a NUL byte in `TEXT`) and 23
/// (integrity constraint violation).
fn is_rejected_sqlstate(code: &str) -> bool {
    code.starts_with("22") || code.starts_with("23")
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().is_some_and(|code| is_rejected_sqlstate(&code)) => {
                StoreError::Rejected(db.message().to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, fields: UserFields) -> Result<User, StoreError> {
        let user = User::new(fields);

        let inserted = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .bind(user.schema_version)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users"))
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let id = parse_id(id)?;

        let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update_by_id(&self, id: &str, changes: UserFields) -> Result<Option<User>, StoreError> {
        let id = parse_id(id)?;

        // COALESCE keeps the stored value for every field the caller left out
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 age = COALESCE($4, age)
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.age)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let id = parse_id(id)?;

        let user = sqlx::query_as::<_, User>(&format!("DELETE FROM users WHERE id = $1 RETURNING {COLUMNS}"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

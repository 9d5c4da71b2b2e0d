use super::user_models::User;
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Read-only view over the user directory. Account creation and credential
/// management live in the external identity service; this core only needs
/// to resolve counterpart users.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Everyone except the requesting user: the candidate set for the
    /// sidebar and its unseen counts.
    pub async fn find_all_except(&self, user_id: Uuid) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id != $1 ORDER BY username ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

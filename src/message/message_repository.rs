use crate::{
    error::{AppError, Result},
    message::{
        message_models::{Message, NewMessage},
        message_store::MessageStore,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed `MessageStore`.
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageStore for MessageRepository {
    async fn create(&self, new: NewMessage) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, receiver_id, text, image)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(new.sender_id)
        .bind(new.receiver_id)
        .bind(new.text)
        .bind(new.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn find_conversation(&self, user_id: Uuid, other_user_id: Uuid) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages
             WHERE (sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1)
             ORDER BY created_at ASC",
        )
        .bind(user_id)
        .bind(other_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn find_recent(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages
             WHERE (sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1)
             ORDER BY created_at DESC
             LIMIT $3",
        )
        .bind(user_id)
        .bind(other_user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn mark_conversation_seen(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE messages
             SET seen = true
             WHERE sender_id = $1 AND receiver_id = $2 AND seen = false",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn mark_one_seen(&self, message_id: Uuid) -> Result<()> {
        let result = sqlx::query("UPDATE messages SET seen = true WHERE id = $1")
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Message not found".to_string()));
        }

        Ok(())
    }

    async fn count_unseen_from(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages
             WHERE sender_id = $1 AND receiver_id = $2 AND seen = false",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

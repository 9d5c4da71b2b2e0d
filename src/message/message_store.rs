use crate::error::Result;
use crate::message::message_models::{Message, NewMessage};
use uuid::Uuid;

/// Durable message store. The service layer only talks to this trait so the
/// pipelines can run against an in-memory store in tests; `MessageRepository`
/// is the PostgreSQL implementation.
#[async_trait::async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a new message with `seen = false` and a fresh id/timestamp.
    async fn create(&self, new: NewMessage) -> Result<Message>;

    /// Every message exchanged between the pair, in either direction,
    /// ordered by `created_at` ascending. No limit.
    async fn find_conversation(&self, user_id: Uuid, other_user_id: Uuid) -> Result<Vec<Message>>;

    /// The most recent `limit` messages between the pair, newest first.
    async fn find_recent(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>>;

    /// Marks every message from `sender_id` to `receiver_id` as seen.
    /// Idempotent; already-seen messages are untouched.
    async fn mark_conversation_seen(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<u64>;

    /// Marks a single message as seen. Fails with `NotFound` if no message
    /// has that id.
    async fn mark_one_seen(&self, message_id: Uuid) -> Result<()>;

    /// Count of unseen messages sent from `sender_id` to `receiver_id`.
    async fn count_unseen_from(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<i64>;
}

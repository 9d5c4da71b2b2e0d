use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    media::MediaStore,
    message::{
        message_dto::SendMessageRequest,
        message_models::{Message, NewMessage},
        message_store::MessageStore,
    },
    summary::{build_summary_prompt, render_transcript, Summarizer},
    websocket::{types::WsEvent, PresenceRegistry},
};

/// Orchestrates the message pipelines: durable store, media store,
/// summarization engine, presence registry.
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn MessageStore>,
    media: Arc<dyn MediaStore>,
    summarizer: Arc<dyn Summarizer>,
    presence: PresenceRegistry,
    summary_window: i64,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn MessageStore>,
        media: Arc<dyn MediaStore>,
        summarizer: Arc<dyn Summarizer>,
        presence: PresenceRegistry,
        summary_window: i64,
    ) -> Self {
        Self {
            store,
            media,
            summarizer,
            presence,
            summary_window,
        }
    }

    /// Delivery pipeline: resolve the image (if any), persist, then push to
    /// the receiver's channel when one exists.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        payload: SendMessageRequest,
    ) -> Result<Message> {
        // The upload must complete before the URL is known; an upload
        // failure aborts the send with nothing persisted.
        let image = match payload.image.as_deref() {
            Some(data_uri) => Some(self.media.upload_image(data_uri).await?),
            None => None,
        };

        let message = self
            .store
            .create(NewMessage {
                sender_id,
                receiver_id,
                text: payload.text,
                image,
            })
            .await?;

        // The message is durable at this point. Push outcome never affects
        // the result; an offline receiver finds the message on next open.
        let delivered = self
            .presence
            .send_to_user(&receiver_id, WsEvent::NewMessage(message.clone()));
        if !delivered {
            tracing::debug!("Receiver {} has no active channel, push skipped", receiver_id);
        }

        Ok(message)
    }

    /// Every message between the two users, ascending by creation time,
    /// with the bundled read receipt: all of the counterpart's messages to
    /// the requester become seen. Returns the pre-update snapshot.
    pub async fn open_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<Message>> {
        let messages = self.store.find_conversation(user_id, other_user_id).await?;
        self.store
            .mark_conversation_seen(other_user_id, user_id)
            .await?;

        Ok(messages)
    }

    pub async fn mark_seen(&self, message_id: Uuid) -> Result<()> {
        self.store.mark_one_seen(message_id).await
    }

    /// Per-candidate unseen counts, computed concurrently and joined before
    /// returning. Candidates with nothing unseen are absent from the map;
    /// any single failed count fails the whole aggregation.
    pub async fn unseen_counts(
        &self,
        user_id: Uuid,
        candidates: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>> {
        let counts = try_join_all(candidates.iter().map(|&candidate| {
            let store = self.store.clone();
            async move {
                let count = store.count_unseen_from(candidate, user_id).await?;
                Ok::<_, AppError>((candidate, count))
            }
        }))
        .await?;

        Ok(counts
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .collect())
    }

    /// Summary pipeline: most recent window of the conversation, reversed
    /// to chronological order, rendered as a transcript and handed to the
    /// engine. The engine's text comes back verbatim.
    pub async fn summarize_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<String> {
        let mut recent = self
            .store
            .find_recent(user_id, other_user_id, self.summary_window)
            .await?;
        recent.reverse();

        let transcript = render_transcript(user_id, &recent);
        let prompt = build_summary_prompt(&transcript);

        self.summarizer.summarize(&prompt).await
    }
}

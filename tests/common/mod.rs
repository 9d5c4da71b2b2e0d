#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use quickchat::error::{AppError, Result};
use quickchat::media::MediaStore;
use quickchat::message::{ChatService, Message, MessageStore, NewMessage};
use quickchat::summary::Summarizer;
use quickchat::websocket::PresenceRegistry;

/// In-memory implementation of the durable store contract. Timestamps are
/// strictly increasing so ordering assertions are deterministic.
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<Message>>,
    base: DateTime<Utc>,
    clock: AtomicI64,
}

impl InMemoryMessageStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            messages: Mutex::new(Vec::new()),
            base: Utc::now(),
            clock: AtomicI64::new(0),
        })
    }

    /// Snapshot of everything persisted, in insertion order.
    pub fn all(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn create(&self, new: NewMessage) -> Result<Message> {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            text: new.text,
            image: new.image,
            seen: false,
            created_at: self.base + Duration::seconds(tick),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn find_conversation(&self, user_id: Uuid, other_user_id: Uuid) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                (m.sender_id == user_id && m.receiver_id == other_user_id)
                    || (m.sender_id == other_user_id && m.receiver_id == user_id)
            })
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn find_recent(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>> {
        let mut messages = self.find_conversation(user_id, other_user_id).await?;
        messages.reverse();
        messages.truncate(limit.max(0) as usize);
        Ok(messages)
    }

    async fn mark_conversation_seen(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<u64> {
        let mut messages = self.messages.lock().unwrap();
        let mut updated = 0;
        for message in messages.iter_mut() {
            if message.sender_id == sender_id && message.receiver_id == receiver_id && !message.seen
            {
                message.seen = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn mark_one_seen(&self, message_id: Uuid) -> Result<()> {
        let mut messages = self.messages.lock().unwrap();
        match messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.seen = true;
                Ok(())
            }
            None => Err(AppError::NotFound("Message not found".to_string())),
        }
    }

    async fn count_unseen_from(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<i64> {
        let count = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.sender_id == sender_id && m.receiver_id == receiver_id && !m.seen)
            .count();
        Ok(count as i64)
    }
}

/// Media store fake that records how often it was asked to upload.
pub struct RecordingMediaStore {
    calls: AtomicUsize,
    response: std::result::Result<String, String>,
}

impl RecordingMediaStore {
    pub fn returning(url: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            response: Ok(url.to_string()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            response: Err(message.to_string()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MediaStore for RecordingMediaStore {
    async fn upload_image(&self, _data_uri: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(url) => Ok(url.clone()),
            Err(message) => Err(AppError::Upload(message.clone())),
        }
    }
}

/// Summarization engine fake that captures every prompt it receives.
pub struct FakeSummarizer {
    prompts: Mutex<Vec<String>>,
    response: std::result::Result<String, String>,
}

impl FakeSummarizer {
    pub fn returning(text: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            response: Ok(text.to_string()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            response: Err(message.to_string()),
        })
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(AppError::Summarization(message.clone())),
        }
    }
}

/// A `ChatService` wired to fakes, with handles kept for assertions.
pub struct TestChat {
    pub service: ChatService,
    pub store: Arc<InMemoryMessageStore>,
    pub media: Arc<RecordingMediaStore>,
    pub summarizer: Arc<FakeSummarizer>,
    pub presence: PresenceRegistry,
}

pub fn chat_fixture() -> TestChat {
    chat_fixture_with(
        RecordingMediaStore::returning("https://media.example/uploads/abc123.png"),
        FakeSummarizer::returning("A short summary."),
        100,
    )
}

pub fn chat_fixture_with(
    media: Arc<RecordingMediaStore>,
    summarizer: Arc<FakeSummarizer>,
    summary_window: i64,
) -> TestChat {
    let store = InMemoryMessageStore::new();
    let presence = PresenceRegistry::new();
    let service = ChatService::new(
        store.clone(),
        media.clone(),
        summarizer.clone(),
        presence.clone(),
        summary_window,
    );

    TestChat {
        service,
        store,
        media,
        summarizer,
        presence,
    }
}

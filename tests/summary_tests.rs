mod common;

use common::{chat_fixture, chat_fixture_with, FakeSummarizer, RecordingMediaStore};
use quickchat::error::AppError;
use quickchat::message::SendMessageRequest;
use quickchat::summary::MEDIA_PLACEHOLDER;
use uuid::Uuid;

fn text_request(text: &str) -> SendMessageRequest {
    SendMessageRequest {
        text: Some(text.to_string()),
        image: None,
    }
}

/// The engine's text comes back verbatim as the summary.
#[tokio::test]
async fn test_summary_returns_engine_text_verbatim() {
    let chat = chat_fixture_with(
        RecordingMediaStore::returning("unused"),
        FakeSummarizer::returning("They agreed to meet on Friday."),
        100,
    );
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    chat.service
        .send_message(alice, bob, text_request("friday works?"))
        .await
        .unwrap();

    let summary = chat
        .service
        .summarize_conversation(bob, alice)
        .await
        .unwrap();
    assert_eq!(summary, "They agreed to meet on Friday.");
}

/// The prompt contains the conversation in chronological order with
/// viewer-relative speaker labels.
#[tokio::test]
async fn test_prompt_transcript_is_chronological_and_labeled() {
    let chat = chat_fixture();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    chat.service
        .send_message(alice, bob, text_request("lunch?"))
        .await
        .unwrap();
    chat.service
        .send_message(bob, alice, text_request("sure"))
        .await
        .unwrap();
    chat.service
        .send_message(alice, bob, text_request("noon then"))
        .await
        .unwrap();

    chat.service
        .summarize_conversation(alice, bob)
        .await
        .unwrap();

    let prompt = chat.summarizer.last_prompt().expect("engine was invoked");
    assert!(prompt.ends_with("Chat:\nYou: lunch?\nFriend: sure\nYou: noon then"));
}

/// Only the most recent window of a long conversation reaches the engine,
/// still in chronological order.
#[tokio::test]
async fn test_summary_window_bounds_the_transcript() {
    let chat = chat_fixture_with(
        RecordingMediaStore::returning("unused"),
        FakeSummarizer::returning("summary"),
        3,
    );
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    for i in 0..8 {
        chat.service
            .send_message(alice, bob, text_request(&format!("msg {}", i)))
            .await
            .unwrap();
    }

    chat.service
        .summarize_conversation(alice, bob)
        .await
        .unwrap();

    let prompt = chat.summarizer.last_prompt().expect("engine was invoked");
    assert!(prompt.ends_with("Chat:\nYou: msg 5\nYou: msg 6\nYou: msg 7"));
    assert!(!prompt.contains("msg 4"));
}

/// Textless media messages show up in the prompt as the placeholder, never
/// as raw URLs.
#[tokio::test]
async fn test_media_messages_render_placeholder_in_prompt() {
    let chat = chat_fixture();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    chat.service
        .send_message(
            alice,
            bob,
            SendMessageRequest {
                text: None,
                image: Some("data:image/png;base64,aGVsbG8=".to_string()),
            },
        )
        .await
        .unwrap();

    chat.service
        .summarize_conversation(bob, alice)
        .await
        .unwrap();

    let prompt = chat.summarizer.last_prompt().expect("engine was invoked");
    assert!(prompt.contains(&format!("Friend: {}", MEDIA_PLACEHOLDER)));
    assert!(!prompt.contains("https://media.example"));
}

/// An engine failure surfaces as a summarization error, untouched by the
/// storage path.
#[tokio::test]
async fn test_engine_failure_surfaces_as_summarization_error() {
    let chat = chat_fixture_with(
        RecordingMediaStore::returning("unused"),
        FakeSummarizer::failing("engine unavailable"),
        100,
    );
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    chat.service
        .send_message(alice, bob, text_request("hi"))
        .await
        .unwrap();

    let result = chat.service.summarize_conversation(bob, alice).await;
    assert!(matches!(result, Err(AppError::Summarization(_))));
}

/// An empty conversation still goes to the engine with an empty transcript;
/// whatever the engine says comes back.
#[tokio::test]
async fn test_empty_conversation_still_invokes_engine() {
    let chat = chat_fixture_with(
        RecordingMediaStore::returning("unused"),
        FakeSummarizer::returning("There is nothing to summarize."),
        100,
    );

    let summary = chat
        .service
        .summarize_conversation(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();

    assert_eq!(summary, "There is nothing to summarize.");
    assert_eq!(chat.summarizer.call_count(), 1);
    let prompt = chat.summarizer.last_prompt().unwrap();
    assert!(prompt.ends_with("Chat:\n"));
}

/// Summarizing does not consume read receipts or alter stored messages.
#[tokio::test]
async fn test_summary_leaves_seen_state_untouched() {
    let chat = chat_fixture();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    chat.service
        .send_message(alice, bob, text_request("unread"))
        .await
        .unwrap();

    chat.service
        .summarize_conversation(bob, alice)
        .await
        .unwrap();

    assert!(chat.store.all().iter().all(|m| !m.seen));
    let counts = chat.service.unseen_counts(bob, &[alice]).await.unwrap();
    assert_eq!(counts.get(&alice), Some(&1));
}

use crate::message::message_models::Message;
use uuid::Uuid;

/// Stand-in content for messages that carry media instead of text.
pub const MEDIA_PLACEHOLDER: &str = "[Image/Media]";

/// Renders a conversation as one `"<Speaker>: <content>"` line per message,
/// in the order given. The speaker label is relative to `viewer`: their own
/// messages read "You", the counterpart's read "Friend". A message with no
/// text (or empty text) renders the media placeholder.
pub fn render_transcript(viewer: Uuid, messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| {
            let speaker = if msg.sender_id == viewer { "You" } else { "Friend" };
            let content = msg
                .text
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(MEDIA_PLACEHOLDER);
            format!("{}: {}", speaker, content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The fixed instruction prompt handed to the summarization engine.
pub fn build_summary_prompt(transcript: &str) -> String {
    format!(
        "You are an assistant analyzing a chat conversation.\n\
         Please:\n\
         1. Summarize the overall conversation in 3-4 sentences.\n\
         2. Extract key points or decisions made.\n\
         3. If there are any action items, list them clearly.\n\
         Chat:\n{}",
        transcript
    )
}

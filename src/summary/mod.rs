pub mod summarizer;
pub mod transcript;

pub use summarizer::{GeminiClient, Summarizer};
pub use transcript::{build_summary_prompt, render_transcript, MEDIA_PLACEHOLDER};

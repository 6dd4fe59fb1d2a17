use crate::build_prompt::build_prompt;
use crate::compress::compress_context;
use crate::config::Config;
use crate::generate::generate_answer;
use crate::retrieve_chunks::{join_chunks, Retriever, RETRIEVAL_WIDTH};
use crate::session::Session;

/// Shown in place of an answer when the language model cannot be reached.
pub const SERVICE_UNAVAILABLE_REPLY: &str =
    "Sorry, the assistant is unavailable right now. Please try again in a moment.";

/// Result of a single question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Answered from compressed context.
    Answered(String),
    /// Answered, but the context went to the model uncompressed.
    CompressionFallback(String),
    /// No answer was produced.
    Failed(String),
}

impl TurnOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            TurnOutcome::Answered(text) | TurnOutcome::CompressionFallback(text) => Some(text),
            TurnOutcome::Failed(_) => None,
        }
    }
}

/// Retrieval, compression and generation wired together. Built once at
/// startup and shared read-only between turns.
pub struct Assistant {
    cfg: Config,
    retriever: Box<dyn Retriever>,
}

impl Assistant {
    pub fn new(cfg: Config, retriever: Box<dyn Retriever>) -> Self {
        Self { cfg, retriever }
    }

    /// Records the question, answers it and records the answer. A failed turn
    /// leaves the question as the last transcript entry.
    pub fn answer(&self, session: &mut Session, question: &str) -> TurnOutcome {
        if question.trim().is_empty() {
            return TurnOutcome::Failed("empty question".to_string());
        }
        session.push_user(question);
        let outcome = self.respond(question);
        if let Some(text) = outcome.answer() {
            session.push_assistant(text);
        }
        outcome
    }

    /// Answers without touching any transcript.
    pub fn respond(&self, question: &str) -> TurnOutcome {
        let chunks = match self.retriever.retrieve(question, RETRIEVAL_WIDTH) {
            Ok(chunks) => chunks,
            Err(err) => {
                tracing::error!(error = %err, "retrieval failed");
                return TurnOutcome::Failed(err.to_string());
            }
        };
        tracing::debug!(chunks = chunks.len(), "retrieved context");

        let context = join_chunks(&chunks);
        let compression = compress_context(&self.cfg, &context, question);
        let prompt = build_prompt(compression.text(), question);
        tracing::debug!(prompt_chars = prompt.len(), "sending prompt");

        match generate_answer(&self.cfg, &prompt) {
            Ok(answer) if compression.is_fallback() => TurnOutcome::CompressionFallback(answer),
            Ok(answer) => TurnOutcome::Answered(answer),
            Err(err) => {
                tracing::error!(error = %err, "language model call failed");
                TurnOutcome::Failed(err.to_string())
            }
        }
    }
}

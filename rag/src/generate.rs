use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::RagError;
use crate::http::post_json;
use crate::session::ChatMessage;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Sends `prompt` as a single user message and returns the model's reply.
pub fn generate_answer(cfg: &Config, prompt: &str) -> Result<String, RagError> {
    let messages = [ChatMessage::user(prompt)];
    let url = format!("{}/chat/completions", cfg.groq_url.trim_end_matches('/'));
    let req = ChatRequest {
        model: &cfg.chat_model,
        messages: &messages,
        stream: false,
    };
    let bearer = format!("Bearer {}", cfg.groq_api_key);
    let res = post_json::<ChatResponse, _>(&url, &[("authorization", bearer.as_str())], &req)?;
    res.choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or(RagError::EmptyResponse("language model"))
}

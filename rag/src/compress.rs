use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::http::post_json_raw;

#[derive(Serialize)]
struct CompressRequest<'a> {
    context: &'a str,
    prompt: &'a str,
    model: &'a str,
    scaledown: ScaledownOptions<'a>,
}

#[derive(Serialize)]
struct ScaledownOptions<'a> {
    rate: &'a str,
}

#[derive(Deserialize)]
struct CompressResponse {
    compressed_prompt: Option<String>,
}

/// Context to hand to the model after asking for compression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Compression {
    Compressed(String),
    Fallback { context: String, reason: String },
}

impl Compression {
    pub fn text(&self) -> &str {
        match self {
            Compression::Compressed(text) => text,
            Compression::Fallback { context, .. } => context,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Compression::Fallback { .. })
    }
}

/// Asks the compression service to shrink `context` for `question`. Never
/// fails: anything other than a 200 carrying `compressed_prompt` falls back
/// to the original context.
pub fn compress_context(cfg: &Config, context: &str, question: &str) -> Compression {
    let fallback = |reason: String| {
        tracing::warn!(%reason, "context compression unavailable, sending original context");
        Compression::Fallback {
            context: context.to_string(),
            reason,
        }
    };

    if cfg.scaledown_api_key.trim().is_empty() {
        return fallback("no compression API key configured".to_string());
    }

    let req = CompressRequest {
        context,
        prompt: question,
        model: &cfg.chat_model,
        scaledown: ScaledownOptions { rate: "auto" },
    };
    let headers = [("x-api-key", cfg.scaledown_api_key.as_str())];
    let raw = match post_json_raw(&cfg.scaledown_url, &headers, &req) {
        Ok(raw) => raw,
        Err(err) => return fallback(err.to_string()),
    };
    if raw.status != 200 {
        return fallback(format!("status {}", raw.status));
    }
    match serde_json::from_str::<CompressResponse>(&raw.body) {
        Ok(CompressResponse {
            compressed_prompt: Some(text),
        }) => {
            tracing::debug!(
                before = context.len(),
                after = text.len(),
                "context compressed"
            );
            Compression::Compressed(text)
        }
        Ok(_) => fallback("response has no compressed_prompt".to_string()),
        Err(err) => fallback(format!("malformed response: {}", err)),
    }
}

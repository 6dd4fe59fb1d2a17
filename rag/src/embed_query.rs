use crate::config::Config;
use crate::embed_chunks::embed_texts;
use crate::error::RagError;

/// Embeds a single question. An empty vector is treated as no answer, since
/// searching with it would silently retrieve nothing.
pub fn embed_query(cfg: &Config, text: &str) -> Result<Vec<f32>, RagError> {
    embed_texts(cfg, &[text.to_string()])?
        .into_iter()
        .next()
        .filter(|v| !v.is_empty())
        .ok_or(RagError::EmptyResponse("embedding service"))
}

use std::sync::Arc;

use crate::config::Config;
use crate::embed_query::embed_query;
use crate::error::RagError;
use crate::index::{DocumentIndex, RetrievedChunk};

/// Number of passages pulled into every prompt.
pub const RETRIEVAL_WIDTH: usize = 3;

/// Similarity search over some document store.
pub trait Retriever: Send + Sync {
    fn retrieve(&self, question: &str, k: usize) -> Result<Vec<RetrievedChunk>, RagError>;
}

/// Embeds the question and searches the loaded index with it.
pub struct IndexRetriever {
    cfg: Config,
    index: Arc<DocumentIndex>,
}

impl IndexRetriever {
    pub fn new(cfg: Config, index: Arc<DocumentIndex>) -> Self {
        if index.embed_model != cfg.embed_model {
            tracing::warn!(
                index_model = %index.embed_model,
                configured = %cfg.embed_model,
                "index was built with a different embedding model"
            );
        }
        Self { cfg, index }
    }
}

impl Retriever for IndexRetriever {
    fn retrieve(&self, question: &str, k: usize) -> Result<Vec<RetrievedChunk>, RagError> {
        if self.index.is_empty() {
            return Ok(vec![]);
        }
        let query_vec = embed_query(&self.cfg, question)?;
        Ok(self.index.search(&query_vec, k))
    }
}

/// Joins passages the way they are sent to the compressor and the model.
pub fn join_chunks(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_uses_newlines_in_order() {
        let chunks = vec![
            RetrievedChunk { text: "Fees are $500/semester.".into() },
            RetrievedChunk { text: "Hostel fee is $100/month.".into() },
        ];
        assert_eq!(
            join_chunks(&chunks),
            "Fees are $500/semester.\nHostel fee is $100/month."
        );
        assert_eq!(join_chunks(&[]), "");
    }
}

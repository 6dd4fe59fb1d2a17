mod build_prompt;
mod chunk_text;
mod compress;
mod config;
mod embed_chunks;
mod embed_query;
mod error;
mod generate;
mod http;
mod index;
mod pipeline;
mod retrieve_chunks;
mod scan_files;
mod session;

use std::path::Path;
use std::sync::Arc;

pub use build_prompt::build_prompt;
pub use compress::{compress_context, Compression};
pub use config::{Config, DEFAULT_CHAT_MODEL};
pub use error::{HttpError, IndexError, RagError};
pub use generate::generate_answer;
pub use index::{DocumentIndex, IndexedChunk, RetrievedChunk, INDEX_FILE};
pub use pipeline::{Assistant, TurnOutcome, SERVICE_UNAVAILABLE_REPLY};
pub use retrieve_chunks::{join_chunks, IndexRetriever, Retriever, RETRIEVAL_WIDTH};
pub use session::{ChatMessage, Role, Session, Transcript};

use chunk_text::chunk_text;
use embed_chunks::embed_texts;
use scan_files::scan_files;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub files: usize,
    pub chunks: usize,
}

/// Scans `source`, embeds every chunk and writes the index to `cfg.index_dir`.
pub fn build_index(cfg: &Config, source: &Path) -> Result<IndexStats, RagError> {
    let docs = scan_files(cfg, source);
    let mut stats = IndexStats::default();
    let mut chunks = Vec::new();

    for doc in docs {
        let texts = chunk_text(&doc.text, cfg);
        if texts.is_empty() {
            continue;
        }
        let vectors = embed_texts(cfg, &texts)?;
        tracing::debug!(path = %doc.path.display(), chunks = texts.len(), "embedded document");
        stats.files += 1;
        chunks.extend(
            texts
                .into_iter()
                .zip(vectors)
                .map(|(text, vector)| IndexedChunk { text, vector }),
        );
    }

    stats.chunks = chunks.len();
    let index = DocumentIndex::new(cfg.embed_model.clone(), chunks);
    index.save(&cfg.index_dir)?;
    tracing::info!(
        files = stats.files,
        chunks = stats.chunks,
        dir = %cfg.index_dir.display(),
        "index written"
    );
    Ok(stats)
}

/// Loads the persisted index and wires up the production assistant.
pub fn load_assistant(cfg: &Config) -> Result<Assistant, RagError> {
    let index = Arc::new(DocumentIndex::load(&cfg.index_dir)?);
    let retriever = IndexRetriever::new(cfg.clone(), index);
    Ok(Assistant::new(cfg.clone(), Box::new(retriever)))
}

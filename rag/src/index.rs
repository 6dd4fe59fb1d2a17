use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::IndexError;

pub const INDEX_FILE: &str = "index.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub text: String,
    pub vector: Vec<f32>,
}

/// A text passage returned by similarity search. Only the text is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrievedChunk {
    pub text: String,
}

/// Chunk store plus embeddings, loaded once and then only read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentIndex {
    pub embed_model: String,
    pub dimension: usize,
    pub chunks: Vec<IndexedChunk>,
}

impl DocumentIndex {
    pub fn new(embed_model: impl Into<String>, chunks: Vec<IndexedChunk>) -> Self {
        let dimension = chunks.first().map(|c| c.vector.len()).unwrap_or(0);
        Self {
            embed_model: embed_model.into(),
            dimension,
            chunks,
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        let path = index_path(dir);
        let raw = fs::read_to_string(&path).map_err(|source| IndexError::Io {
            path: path.clone(),
            source,
        })?;
        let index: DocumentIndex =
            serde_json::from_str(&raw).map_err(|source| IndexError::Json { path, source })?;
        index.validate()?;
        tracing::info!(
            dir = %dir.display(),
            chunks = index.len(),
            dimension = index.dimension,
            model = %index.embed_model,
            "loaded document index"
        );
        Ok(index)
    }

    pub fn save(&self, dir: &Path) -> Result<(), IndexError> {
        self.validate()?;
        fs::create_dir_all(dir).map_err(|source| IndexError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = index_path(dir);
        let raw = serde_json::to_string(self).map_err(|source| IndexError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, raw).map_err(|source| IndexError::Io { path, source })
    }

    /// Top `k` chunks by cosine similarity, best first. Equal scores keep
    /// index order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<RetrievedChunk> {
        if query.is_empty() || k == 0 {
            return vec![];
        }
        let mut scored: Vec<(usize, f32)> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| (i, cosine(query, &chunk.vector)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
            .into_iter()
            .take(k)
            .map(|(i, score)| {
                tracing::trace!(position = i, score, "retrieved chunk");
                RetrievedChunk {
                    text: self.chunks[i].text.clone(),
                }
            })
            .collect()
    }

    fn validate(&self) -> Result<(), IndexError> {
        for (position, chunk) in self.chunks.iter().enumerate() {
            if chunk.vector.len() != self.dimension {
                return Err(IndexError::Dimension {
                    position,
                    expected: self.dimension,
                    found: chunk.vector.len(),
                });
            }
            if chunk.vector.iter().any(|x| !x.is_finite()) {
                return Err(IndexError::NonFinite { position });
            }
        }
        Ok(())
    }
}

fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE)
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::MIN;
    }
    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    let score = dot / (na.sqrt() * nb.sqrt());
    // NaN or inf must never outrank a real match.
    if score.is_finite() { score } else { f32::MIN }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, vector: &[f32]) -> IndexedChunk {
        IndexedChunk {
            text: text.to_string(),
            vector: vector.to_vec(),
        }
    }

    fn sample() -> DocumentIndex {
        DocumentIndex::new(
            "test-embed",
            vec![
                chunk("Fees are $500/semester.", &[1.0, 0.0, 0.0]),
                chunk("Hostel fee is $100/month.", &[0.0, 1.0, 0.0]),
                chunk("Exams are held in May.", &[0.0, 0.0, 1.0]),
                chunk("Hostel curfew is 10pm.", &[0.0, 0.9, 0.1]),
            ],
        )
    }

    #[test]
    fn search_ranks_by_similarity() {
        let hits = sample().search(&[0.0, 1.0, 0.0], 2);
        let texts: Vec<_> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Hostel fee is $100/month.", "Hostel curfew is 10pm."]);
    }

    #[test]
    fn search_returns_what_is_available_when_k_exceeds_len() {
        let index = DocumentIndex::new(
            "test-embed",
            vec![
                chunk("Fees are $500/semester.", &[1.0, 0.0]),
                chunk("Hostel fee is $100/month.", &[0.0, 1.0]),
            ],
        );
        assert_eq!(index.search(&[0.5, 0.5], 3).len(), 2);
        assert!(DocumentIndex::new("m", vec![]).search(&[1.0], 3).is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let index = DocumentIndex::new(
            "m",
            vec![chunk("first", &[1.0, 0.0]), chunk("second", &[1.0, 0.0])],
        );
        let hits = index.search(&[1.0, 0.0], 3);
        assert_eq!(hits[0].text, "first");
        assert_eq!(hits[1].text, "second");
    }

    #[test]
    fn save_and_load_keep_chunk_order() {
        let dir = tempfile::tempdir().unwrap();
        let index = sample();
        index.save(dir.path()).unwrap();
        let loaded = DocumentIndex::load(dir.path()).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn load_rejects_inconsistent_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let raw = r#"{"embed_model":"m","dimension":2,"chunks":[{"text":"a","vector":[1.0]}]}"#;
        fs::write(dir.path().join(INDEX_FILE), raw).unwrap();
        let err = DocumentIndex::load(dir.path()).unwrap_err();
        assert!(matches!(err, IndexError::Dimension { expected: 2, found: 1, .. }));
    }

    #[test]
    fn load_rejects_overflowing_vector_values() {
        let dir = tempfile::tempdir().unwrap();
        // 1e39 does not fit in f32 and parses as infinity
        let raw = r#"{"embed_model":"m","dimension":2,"chunks":[
            {"text":"ok","vector":[1.0,1.0]},
            {"text":"bad","vector":[1e39,1e39]}]}"#;
        fs::write(dir.path().join(INDEX_FILE), raw).unwrap();
        let err = DocumentIndex::load(dir.path()).unwrap_err();
        assert!(matches!(err, IndexError::NonFinite { position: 1 }));
    }

    #[test]
    fn non_finite_scores_rank_last() {
        let chunks = (0..40)
            .map(|i| {
                let v = if i % 3 == 0 { [f32::INFINITY, f32::INFINITY] } else { [1.0, 1.0] };
                chunk(&format!("c{i}"), &v)
            })
            .collect();
        let index = DocumentIndex::new("m", chunks);
        let hits = index.search(&[1.0, 1.0], 3);
        let texts: Vec<_> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["c1", "c2", "c4"]);
    }

    #[test]
    fn load_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentIndex::load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, IndexError::Io { .. }));
    }
}

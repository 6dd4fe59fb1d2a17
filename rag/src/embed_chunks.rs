use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::RagError;
use crate::http::post_json;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Serialize)]
struct EmbedLegacyRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Embeds every text in order, one vector per input.
pub fn embed_texts(cfg: &Config, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError> {
    if texts.is_empty() {
        return Ok(vec![]);
    }
    let url = format!("{}/api/embed", cfg.ollama_url);
    let req = EmbedRequest {
        model: &cfg.embed_model,
        input: texts,
    };
    match post_json::<Value, _>(&url, &[], &req) {
        Ok(res) => {
            let vectors = parse_embeddings(&res)?;
            if vectors.len() != texts.len() {
                return Err(RagError::Embedding(format!(
                    "{} vectors for {} inputs",
                    vectors.len(),
                    texts.len()
                )));
            }
            Ok(vectors)
        }
        Err(err) => {
            // Older servers only expose the single-prompt endpoint.
            tracing::debug!(error = %err, "batch embed failed, using legacy endpoint");
            let url = format!("{}/api/embeddings", cfg.ollama_url);
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                let req = EmbedLegacyRequest {
                    model: &cfg.embed_model,
                    prompt: text,
                };
                let res = post_json::<Value, _>(&url, &[], &req)?;
                let vector = parse_embeddings(&res)?
                    .into_iter()
                    .next()
                    .ok_or(RagError::EmptyResponse("embedding service"))?;
                out.push(vector);
            }
            Ok(out)
        }
    }
}

fn parse_embeddings(value: &Value) -> Result<Vec<Vec<f32>>, RagError> {
    if let Some(embeddings) = value.get("embeddings") {
        return parse_embeddings_value(embeddings);
    }
    if let Some(embedding) = value.get("embedding") {
        return parse_embeddings_value(embedding);
    }
    Err(RagError::Embedding("no embeddings in response".to_string()))
}

fn parse_embeddings_value(value: &Value) -> Result<Vec<Vec<f32>>, RagError> {
    let arr = value
        .as_array()
        .ok_or_else(|| RagError::Embedding("invalid embeddings format".to_string()))?;
    if arr.is_empty() {
        return Ok(vec![]);
    }
    if arr[0].is_array() {
        return arr.iter().map(parse_vec).collect();
    }
    Ok(vec![parse_vec(value)?])
}

fn parse_vec(value: &Value) -> Result<Vec<f32>, RagError> {
    let arr = value
        .as_array()
        .ok_or_else(|| RagError::Embedding("embedding is not an array".to_string()))?;
    arr.iter()
        .map(|v| {
            v.as_f64()
                .map(|n| n as f32)
                .ok_or_else(|| RagError::Embedding("embedding value is not a number".to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_batch_and_single_shapes() {
        let batch = json!({"embeddings": [[1.0, 0.0], [0.5, 0.5]]});
        assert_eq!(parse_embeddings(&batch).unwrap(), vec![vec![1.0, 0.0], vec![0.5, 0.5]]);

        let single = json!({"embedding": [0.25, 0.75]});
        assert_eq!(parse_embeddings(&single).unwrap(), vec![vec![0.25, 0.75]]);
    }

    #[test]
    fn rejects_non_numeric_values() {
        let bad = json!({"embeddings": [["x"]]});
        assert!(parse_embeddings(&bad).is_err());
        assert!(parse_embeddings(&json!({"data": []})).is_err());
    }
}

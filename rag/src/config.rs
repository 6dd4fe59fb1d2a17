use std::env;
use std::path::PathBuf;

pub const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Clone, Debug)]
pub struct Config {
    pub index_dir: PathBuf,
    pub source_dir: String,
    pub include_exts: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub max_file_bytes: u64,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub ollama_url: String,
    pub embed_model: String,
    pub groq_url: String,
    pub groq_api_key: String,
    pub chat_model: String,
    pub scaledown_url: String,
    pub scaledown_api_key: String,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env if present so API keys work without exporting them by hand.
        let _ = dotenvy::dotenv();
        let include_exts = env::var("UNICHAT_INCLUDE_EXTS")
            .unwrap_or_else(|_| ".txt,.md,.markdown,.html,.csv".to_string());
        Self {
            index_dir: PathBuf::from(
                env::var("UNICHAT_INDEX_DIR").unwrap_or_else(|_| "faq_index".to_string()),
            ),
            source_dir: env::var("UNICHAT_SOURCE_DIR").unwrap_or_else(|_| "./docs".to_string()),
            include_exts: split_list(&include_exts, ','),
            exclude_dirs: split_list(
                &env::var("UNICHAT_EXCLUDE_DIRS")
                    .unwrap_or_else(|_| ".git,target,node_modules,faq_index".to_string()),
                ',',
            ),
            max_file_bytes: env::var("UNICHAT_MAX_FILE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500_000),
            chunk_size: env::var("UNICHAT_CHUNK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            chunk_overlap: env::var("UNICHAT_CHUNK_OVERLAP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            ollama_url: env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string()),
            embed_model: env::var("OLLAMA_EMBED_MODEL").unwrap_or_else(|_| "nomic-embed-text".to_string()),
            groq_url: env::var("GROQ_URL").unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            chat_model: env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            scaledown_url: env::var("SCALEDOWN_URL")
                .unwrap_or_else(|_| "https://api.scaledown.xyz/compress/raw/".to_string()),
            scaledown_api_key: env::var("SCALEDOWN_API_KEY").unwrap_or_default(),
            log_file: PathBuf::from(
                env::var("UNICHAT_LOG_FILE").unwrap_or_else(|_| "unichat.log".to_string()),
            ),
        }
    }
}

impl Default for Config {
    /// Same values as `from_env` with no variables set and no `.env` file.
    fn default() -> Self {
        Self {
            index_dir: PathBuf::from("faq_index"),
            source_dir: "./docs".to_string(),
            include_exts: split_list(".txt,.md,.markdown,.html,.csv", ','),
            exclude_dirs: split_list(".git,target,node_modules,faq_index", ','),
            max_file_bytes: 500_000,
            chunk_size: 500,
            chunk_overlap: 50,
            ollama_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            groq_url: "https://api.groq.com/openai/v1".to_string(),
            groq_api_key: String::new(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            scaledown_url: "https://api.scaledown.xyz/compress/raw/".to_string(),
            scaledown_api_key: String::new(),
            log_file: PathBuf::from("unichat.log"),
        }
    }
}

fn split_list(raw: &str, sep: char) -> Vec<String> {
    raw.split(sep)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blank_entries() {
        assert_eq!(split_list(" .md, ,.txt,", ','), vec![".md", ".txt"]);
    }

    #[test]
    fn default_targets_the_hosted_model() {
        let cfg = Config::default();
        assert_eq!(cfg.chat_model, "llama-3.1-8b-instant");
        assert!(cfg.chunk_overlap < cfg.chunk_size);
    }
}

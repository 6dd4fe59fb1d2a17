use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;

/// A source document picked up for indexing.
#[derive(Debug)]
pub struct SourceDoc {
    pub path: PathBuf,
    pub text: String,
}

pub fn scan_files(cfg: &Config, base: &Path) -> Vec<SourceDoc> {
    let mut results = Vec::new();

    let walker = WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !cfg.exclude_dirs.iter().any(|d| d == &name)
        });

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_included_ext(path, &cfg.include_exts) {
            continue;
        }
        if let Ok(meta) = fs::metadata(path) {
            if meta.len() > cfg.max_file_bytes {
                tracing::debug!(path = %path.display(), bytes = meta.len(), "skipping large file");
                continue;
            }
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable document");
                continue;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        results.push(SourceDoc {
            path: path.to_path_buf(),
            text,
        });
    }

    results
}

fn has_included_ext(path: &Path, exts: &[String]) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    exts.iter().any(|ext| lower.ends_with(&ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_included_non_empty_files_and_skips_excluded_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fees.md"), "Fees are $500/semester.").unwrap();
        fs::write(dir.path().join("blank.txt"), "   \n").unwrap();
        fs::write(dir.path().join("logo.png"), "not text").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("notes.txt"), "hidden").unwrap();

        let docs = scan_files(&Config::default(), dir.path());
        assert_eq!(docs.len(), 1);
        assert!(docs[0].path.ends_with("fees.md"));
    }
}

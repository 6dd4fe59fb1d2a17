use crate::config::Config;

/// Splits `text` into chunks of at most `chunk_size` characters.
///
/// Paragraphs (runs of non-blank lines) are packed whole, so a question and
/// its answer land in the same chunk. Only a paragraph longer than
/// `chunk_size` is cut, into windows overlapping by `chunk_overlap`.
pub fn chunk_text(text: &str, cfg: &Config) -> Vec<String> {
    let size = cfg.chunk_size;
    let paragraphs = paragraphs(text);

    if size == 0 {
        let whole = paragraphs.join("\n\n");
        return if whole.is_empty() { vec![] } else { vec![whole] };
    }
    let overlap = if cfg.chunk_overlap >= size { size / 4 } else { cfg.chunk_overlap };

    let mut packer = Packer::default();
    for para in paragraphs {
        let len = para.chars().count();
        if len > size {
            packer.flush();
            packer.chunks.extend(windows(&para, size, overlap));
        } else {
            packer.push(para, len, size);
        }
    }
    packer.flush();
    packer.chunks
}

#[derive(Default)]
struct Packer {
    chunks: Vec<String>,
    current: String,
    current_len: usize,
}

impl Packer {
    fn push(&mut self, para: String, len: usize, size: usize) {
        if self.current_len > 0 && self.current_len + 2 + len > size {
            self.flush();
        }
        if self.current_len > 0 {
            self.current.push_str("\n\n");
            self.current_len += 2;
        }
        self.current.push_str(&para);
        self.current_len += len;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.chunks.push(std::mem::take(&mut self.current));
        }
        self.current_len = 0;
    }
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !lines.is_empty() {
                out.push(lines.join("\n").trim().to_string());
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        out.push(lines.join("\n").trim().to_string());
    }
    out
}

fn windows(para: &str, size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = para.chars().collect();
    let mut out = Vec::new();
    let mut start = 0usize;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
        if end == chars.len() {
            break;
        }
        start = end - overlap;
    }
    out
}

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info};

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for file reading operations
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Async reader for sentence-per-line files
pub struct SentenceFileReader {
    config: ReaderConfig,
}

impl SentenceFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a sentence-per-line file. Each line is one sentence, trimmed of
    /// surrounding whitespace; blank lines are kept so indices stay aligned.
    pub async fn read_sentences<P: AsRef<Path>>(&self, file_path: P) -> Result<(Vec<String>, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of file: {}", path.display());

        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open file {}", path.display()))?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .await
            .with_context(|| format!("UTF-8 decoding error in {}", path.display()))?;

        let sentences: Vec<String> = split_universal_lines(&content)
            .into_iter()
            .map(|line| line.trim().to_string())
            .collect();

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: sentences.len() as u64,
            bytes_read: content.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            stats.file_path, stats.lines_read, stats.bytes_read, stats.duration_ms
        );

        Ok((sentences, stats))
    }
}

/// Split text into lines on `\n`, `\r\n` and a lone `\r`.
/// A break at the very end does not start another line.
pub fn split_universal_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                // WHY: \r\n is one break, not an empty line between two
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Read a sentence-per-line file with default configuration
pub async fn read_sentence_lines<P: AsRef<Path>>(file_path: P) -> Result<Vec<String>> {
    let reader = SentenceFileReader::new(ReaderConfig::default());
    let (sentences, _stats) = reader.read_sentences(file_path).await?;
    Ok(sentences)
}

/// Read a whole UTF-8 document into memory
pub async fn read_document<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {} as UTF-8", path.display()))?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

// Naming and writing of sentence-per-line files

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

/// Suffix reserved for split output; files carrying it are never split again.
pub const OUTPUT_SUFFIX: &str = "_1SentPerLine.txt";

/// Derive the output path for a source file: `<stem><suffix>` in the same directory.
pub fn generate_output_path(source_path: &Path, suffix: &str) -> PathBuf {
    let mut output_path = source_path.to_path_buf();
    let file_stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_path.set_file_name(format!("{file_stem}{suffix}"));
    output_path
}

/// Whether a file name denotes an already-split output file.
pub fn is_split_output(file_name: &str, suffix: &str) -> bool {
    file_name.ends_with(suffix)
}

/// Render sentences one per line. Newlines go only between sentences.
pub fn render_sentences(sentences: &[String]) -> String {
    sentences.join("\n")
}

/// Write sentences to `output_path` as UTF-8, without a trailing newline.
pub async fn write_sentence_file(output_path: &Path, sentences: &[String]) -> Result<()> {
    let file = File::create(output_path)
        .await
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(render_sentences(sentences).as_bytes()).await?;
    writer
        .flush()
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    info!("Wrote {} sentences to {}", sentences.len(), output_path.display());
    Ok(())
}

// Naive dot-space sentence segmentation and the split run that writes the
// sentence-per-line file next to its source.

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::discovery::{select_split_input, InputSelection};
use crate::output::{generate_output_path, write_sentence_file, OUTPUT_SUFFIX};
use crate::reader::read_document;

/// Literal boundary between two sentences. Abbreviations such as "e.g. "
/// are split as well; downstream gold standards are indexed against that.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Configuration for a split run
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Suffix that replaces `.txt` in the output file name
    pub output_suffix: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            output_suffix: OUTPUT_SUFFIX.to_string(),
        }
    }
}

/// Result of a split run. Precondition failures are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    Written {
        input: PathBuf,
        output: PathBuf,
        sentence_count: usize,
    },
    /// Zero or several eligible input files; nothing was written.
    InputNotUnique {
        dir: PathBuf,
        output_suffix: String,
        candidates: Vec<PathBuf>,
    },
}

impl SplitOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, SplitOutcome::Written { .. })
    }
}

impl fmt::Display for SplitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitOutcome::Written { input, output, sentence_count } => write!(
                f,
                "Done: '{}' -> '{}' ({} sentences)",
                file_name(input),
                file_name(output),
                sentence_count
            ),
            SplitOutcome::InputNotUnique { dir, output_suffix, candidates } => {
                write!(
                    f,
                    "Error: expected exactly one .txt file in {} (excluding *{}), found {}",
                    dir.display(),
                    output_suffix,
                    candidates.len()
                )?;
                for candidate in candidates {
                    write!(f, "\n  {}", file_name(candidate))?;
                }
                Ok(())
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Join all physical lines with a single space.
///
/// `\r\n`, `\n`, `\r` and the Unicode line separators each count as one
/// break. A break at the very end of the text contributes no separator.
pub fn join_lines(text: &str) -> String {
    let mut joined = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
        }
        if is_line_break(ch) {
            if chars.peek().is_some() {
                joined.push(' ');
            }
        } else {
            joined.push(ch);
        }
    }

    joined
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split a document into sentences on the literal `". "` delimiter.
///
/// Every surviving part except the last gets its consumed period back; the
/// last part is emitted as-is, whatever punctuation it ends with. Parts that
/// are empty after trimming are dropped.
///
/// ```
/// use goldprep::splitter::split_on_dot_space;
/// assert_eq!(split_on_dot_space("A. B. C"), vec!["A.", "B.", "C"]);
/// ```
pub fn split_on_dot_space(text: &str) -> Vec<String> {
    let joined = join_lines(text);
    let parts: Vec<&str> = joined.trim().split(SENTENCE_DELIMITER).collect();
    let last = parts.len().saturating_sub(1);

    parts
        .iter()
        .enumerate()
        .filter_map(|(i, part)| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            // WHY: only the final part keeps its own terminal punctuation
            if i < last {
                Some(format!("{part}."))
            } else {
                Some(part.to_string())
            }
        })
        .collect()
}

/// Split the single eligible `.txt` file in `dir` into a sentence-per-line
/// file next to it.
pub async fn run_split(dir: &Path, config: &SplitConfig) -> Result<SplitOutcome> {
    let input = match select_split_input(dir, &config.output_suffix).await? {
        InputSelection::Single(path) => path,
        InputSelection::NotUnique(candidates) => {
            info!("Refusing to split: {} eligible input files", candidates.len());
            return Ok(SplitOutcome::InputNotUnique {
                dir: dir.to_path_buf(),
                output_suffix: config.output_suffix.clone(),
                candidates,
            });
        }
    };

    let output = generate_output_path(&input, &config.output_suffix);
    info!("Splitting {} into {}", input.display(), output.display());

    let text = read_document(&input).await?;
    let sentences = split_on_dot_space(&text);
    debug!("Segmented {} sentences", sentences.len());

    write_sentence_file(&output, &sentences).await?;

    Ok(SplitOutcome::Written {
        input,
        output,
        sentence_count: sentences.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_delimiter_yields_trimmed_input() {
        assert_eq!(split_on_dot_space("  Just one sentence here  "), vec!["Just one sentence here"]);
        assert_eq!(split_on_dot_space("Ends with a period."), vec!["Ends with a period."]);
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(split_on_dot_space("A. B. C"), vec!["A.", "B.", "C"]);
    }

    #[test]
    fn test_abbreviation_is_split() {
        assert_eq!(
            split_on_dot_space("See e.g. this. Another one."),
            vec!["See e.g.", "this.", "Another one."]
        );
    }

    #[test]
    fn test_last_sentence_keeps_its_punctuation() {
        assert_eq!(split_on_dot_space("Is it? Yes. Really!"), vec!["Is it? Yes.", "Really!"]);
        assert_eq!(split_on_dot_space("One. Two"), vec!["One.", "Two"]);
    }

    #[test]
    fn test_line_breaks_are_joined() {
        let text = "The server\nstarts. The client\r\nconnects.\n";
        assert_eq!(split_on_dot_space(text), vec!["The server starts.", "The client connects."]);
    }

    #[test]
    fn test_line_break_after_period_is_a_boundary() {
        assert_eq!(split_on_dot_space("First.\nSecond."), vec!["First.", "Second."]);
    }

    #[test]
    fn test_empty_parts_are_dropped() {
        assert_eq!(split_on_dot_space("A. . B"), vec!["A.", "B"]);
        assert_eq!(split_on_dot_space("A.  . B"), vec!["A.", "B"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(split_on_dot_space("").is_empty());
        assert!(split_on_dot_space(" \n\t \r\n ").is_empty());
    }

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines("a\nb"), "a b");
        assert_eq!(join_lines("a\r\nb\rc"), "a b c");
        assert_eq!(join_lines("a\n\nb"), "a  b");
        assert_eq!(join_lines("a\n"), "a");
        assert_eq!(join_lines("a\u{2028}b"), "a b");
    }

    #[test]
    fn test_rejoined_output_resplits_identically() {
        let sentences = split_on_dot_space("Alpha uses Redis. Beta calls Kafka. Gamma logs e.g. errors");
        let rejoined = sentences.join("\n");
        let resplit: Vec<String> = rejoined.split('\n').map(str::to_string).collect();
        assert_eq!(resplit, sentences);
    }

    #[tokio::test]
    async fn test_run_split_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("doc.txt"), "One. Two. Three").unwrap();

        let outcome = run_split(temp_dir.path(), &SplitConfig::default()).await.unwrap();
        let output = temp_dir.path().join("doc_1SentPerLine.txt");
        assert_eq!(
            outcome,
            SplitOutcome::Written {
                input: temp_dir.path().join("doc.txt"),
                output: output.clone(),
                sentence_count: 3,
            }
        );
        assert_eq!(std::fs::read_to_string(output).unwrap(), "One.\nTwo.\nThree");
        assert_eq!(
            outcome.to_string(),
            "Done: 'doc.txt' -> 'doc_1SentPerLine.txt' (3 sentences)"
        );
    }

    #[tokio::test]
    async fn test_run_split_with_custom_suffix() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "One. Two").unwrap();
        std::fs::write(temp_dir.path().join("b.txt"), "Three").unwrap();
        let config = SplitConfig { output_suffix: "_lines.txt".to_string() };

        let outcome = run_split(temp_dir.path(), &config).await.unwrap();
        let message = outcome.to_string();
        assert!(message.contains("(excluding *_lines.txt), found 2"), "message: {message}");
        assert!(!message.contains(OUTPUT_SUFFIX));

        std::fs::remove_file(temp_dir.path().join("b.txt")).unwrap();
        let outcome = run_split(temp_dir.path(), &config).await.unwrap();
        assert!(outcome.is_written());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("a_lines.txt")).unwrap(),
            "One.\nTwo"
        );

        // The output no longer counts as input on the next run.
        let outcome = run_split(temp_dir.path(), &config).await.unwrap();
        assert!(outcome.is_written());
    }

    #[tokio::test]
    async fn test_run_split_without_input() {
        let temp_dir = TempDir::new().unwrap();

        let outcome = run_split(temp_dir.path(), &SplitConfig::default()).await.unwrap();
        assert!(!outcome.is_written());
        assert!(outcome.to_string().starts_with("Error: expected exactly one .txt file"));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}

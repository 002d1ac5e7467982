// Cross-checks gold-standard annotation rows against the sentence-per-line file

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::annotation::{AnnotationRow, RowReference};
use crate::discovery::{find_sentence_file, SentenceFileQuery, SENTENCE_FILE_MARKER, TEXT_DIR_MARKER};
use crate::reader::read_sentence_lines;

/// Name of the annotation file expected in the working directory
pub const GOLDSTANDARD_CSV: &str = "goldstandard_NER.csv";

pub const INVALID_ROW_FORMAT: &str = "[INVALID ROW FORMAT]";
pub const OUT_OF_BOUNDS: &str = "[OUT OF BOUNDS]";

const ENTRY_SEPARATOR_WIDTH: usize = 50;

/// Configuration for a validation run
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    pub csv_file_name: String,
    pub text_dir_marker: String,
    pub sentence_file_marker: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            csv_file_name: GOLDSTANDARD_CSV.to_string(),
            text_dir_marker: TEXT_DIR_MARKER.to_string(),
            sentence_file_marker: SENTENCE_FILE_MARKER.to_string(),
        }
    }
}

impl ValidatorConfig {
    fn sentence_file_query(&self) -> SentenceFileQuery {
        SentenceFileQuery {
            dir_marker: self.text_dir_marker.clone(),
            file_marker: self.sentence_file_marker.clone(),
        }
    }
}

/// What an invalid row is reported against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum SentenceRef {
    /// The sentence actually found at the referenced index
    Mismatch(String),
    OutOfBounds,
    InvalidRowFormat,
}

impl fmt::Display for SentenceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceRef::Mismatch(sentence) => f.write_str(sentence),
            SentenceRef::OutOfBounds => f.write_str(OUT_OF_BOUNDS),
            SentenceRef::InvalidRowFormat => f.write_str(INVALID_ROW_FORMAT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidEntry {
    pub row: AnnotationRow,
    pub sentence: SentenceRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub sentence_count: usize,
    pub rows_checked: usize,
    pub invalid_entries: Vec<InvalidEntry>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    valid: bool,
    sentence_count: usize,
    rows_checked: usize,
    invalid_entries: &'a [InvalidEntry],
    invalid_component_names: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_entries.is_empty()
    }

    /// Distinct component names of invalid rows, sorted.
    pub fn invalid_component_names(&self) -> Vec<String> {
        self.invalid_entries
            .iter()
            .filter_map(|entry| entry.row.component_name())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Human-readable report as printed by `validate-ner`.
    pub fn render(&self) -> String {
        if self.is_valid() {
            return "VALID".to_string();
        }

        let separator = "-".repeat(ENTRY_SEPARATOR_WIDTH);
        let mut lines = vec![
            format!("INVALID ENTRIES FOUND: ({}/{})", self.invalid_entries.len(), self.sentence_count),
            String::new(),
        ];
        for entry in &self.invalid_entries {
            lines.push(format!("CSV Entry: {}", entry.row));
            lines.push(format!("Sentence: {}", entry.sentence));
            lines.push(separator.clone());
        }
        lines.push("Distinct invalid component names:".to_string());
        lines.extend(self.invalid_component_names());

        lines.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            valid: self.is_valid(),
            sentence_count: self.sentence_count,
            rows_checked: self.rows_checked,
            invalid_entries: &self.invalid_entries,
            invalid_component_names: self.invalid_component_names(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

/// Resolve a 0-based index against the sentence list. Negative indices
/// count back from the end, so `-1` is the last sentence.
fn resolve_sentence(sentences: &[String], sentence_index: i64) -> Option<&String> {
    let len = i64::try_from(sentences.len()).ok()?;
    let position = if sentence_index < 0 {
        len.checked_add(sentence_index)?
    } else {
        sentence_index
    };
    usize::try_from(position).ok().and_then(|i| sentences.get(i))
}

/// Check one row against the sentence list. `None` means the row is valid.
///
/// A row passes only when its 0-based index is below `sentences.len() - 1`
/// and its component name is a case-insensitive substring of the sentence
/// the index resolves to, so a row pointing at the final sentence never
/// passes. Rows naming sentence 0 or below resolve from the end of the list.
pub fn check_row(row: &AnnotationRow, sentences: &[String]) -> Option<SentenceRef> {
    let (sentence_index, component_name) = match row.reference() {
        RowReference::Valid { sentence_index, component_name } => (sentence_index, component_name),
        RowReference::MissingField(_) | RowReference::UnparsableIndex(_) => {
            return Some(SentenceRef::InvalidRowFormat);
        }
    };

    let Some(sentence) = resolve_sentence(sentences, sentence_index) else {
        return Some(SentenceRef::OutOfBounds);
    };

    // WHY: the bound is len - 1, not len; existing gold standards were checked
    // against this boundary, so the final sentence is always reported.
    let in_range = sentence_index < sentences.len() as i64 - 1;
    if in_range && sentence.to_lowercase().contains(&component_name.to_lowercase()) {
        None
    } else {
        Some(SentenceRef::Mismatch(sentence.clone()))
    }
}

/// Validate every CSV row read from `reader` against `sentences`.
/// Malformed rows are recorded, never fatal; CSV syntax errors are.
pub fn validate_rows<R: std::io::Read>(reader: R, sentences: &[String]) -> Result<ValidationReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers().context("Failed to read CSV header")?.clone();

    let mut rows_checked = 0;
    let mut invalid_entries = Vec::new();

    for record in csv_reader.records() {
        let record = record.context("Failed to read CSV record")?;
        rows_checked += 1;

        let row = AnnotationRow::from_record(&headers, &record);
        if let Some(sentence) = check_row(&row, sentences) {
            debug!(row = %row, reported = %sentence, "Invalid annotation row");
            invalid_entries.push(InvalidEntry { row, sentence });
        }
    }

    Ok(ValidationReport {
        sentence_count: sentences.len(),
        rows_checked,
        invalid_entries,
    })
}

/// Validate a CSV file against a sentence-per-line file.
pub async fn validate_annotations(csv_path: &Path, sentence_path: &Path) -> Result<ValidationReport> {
    let sentences = read_sentence_lines(sentence_path).await?;
    let csv_content = tokio::fs::read(csv_path)
        .await
        .with_context(|| format!("Failed to read {}", csv_path.display()))?;

    let report = validate_rows(csv_content.as_slice(), &sentences)
        .with_context(|| format!("Failed to parse {}", csv_path.display()))?;
    info!(
        "Checked {} rows against {} sentences: {} invalid",
        report.rows_checked,
        report.sentence_count,
        report.invalid_entries.len()
    );
    Ok(report)
}

/// Result of a validation run. Missing inputs are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    TextFileNotFound,
    CsvFileNotFound(PathBuf),
    Checked {
        sentence_file: PathBuf,
        report: ValidationReport,
    },
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::TextFileNotFound => f.write_str("Text file not found."),
            ValidationOutcome::CsvFileNotFound(_) => f.write_str("CSV file not found."),
            ValidationOutcome::Checked { report, .. } => f.write_str(&report.render()),
        }
    }
}

/// Locate the sentence file below `dir` and validate the gold-standard CSV in `dir` against it.
pub async fn run_validation(dir: &Path, config: &ValidatorConfig) -> Result<ValidationOutcome> {
    let Some(sentence_file) = find_sentence_file(dir, &config.sentence_file_query()).await? else {
        return Ok(ValidationOutcome::TextFileNotFound);
    };

    let csv_path = dir.join(&config.csv_file_name);
    if tokio::fs::metadata(&csv_path).await.is_err() {
        info!("CSV file missing: {}", csv_path.display());
        return Ok(ValidationOutcome::CsvFileNotFound(csv_path));
    }

    let report = validate_annotations(&csv_path, &sentence_file).await?;
    Ok(ValidationOutcome::Checked { sentence_file, report })
}

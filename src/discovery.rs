use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::output::is_split_output;

/// Directory-name marker for folders that hold the source text
pub const TEXT_DIR_MARKER: &str = "text";

/// File-name marker for sentence-per-line files
pub const SENTENCE_FILE_MARKER: &str = "1sentperline";

/// Result of looking for the splitter's input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelection {
    Single(PathBuf),
    /// Zero or more than one candidate, in lexical order
    NotUnique(Vec<PathBuf>),
}

/// Lists the `*.txt` regular files directly inside `dir` that do not carry
/// the reserved output suffix. Sorted by name.
pub async fn find_split_candidates(dir: &Path, output_suffix: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.txt", glob::Pattern::escape(&dir.to_string_lossy()));
    debug!("Looking for split input with pattern: {}", pattern);

    let mut candidates = Vec::new();
    for entry in glob(&pattern).context("Failed to create glob pattern")? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Glob iteration error: {}", e);
                continue;
            }
        };

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_split_output(file_name, output_suffix) {
            debug!("Skipping split output: {}", path.display());
            continue;
        }

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => candidates.push(path),
            Ok(_) => debug!("Skipping non-file: {}", path.display()),
            Err(e) => warn!("Cannot access {}: {}", path.display(), e),
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Picks the splitter input: exactly one candidate, or the full candidate
/// list when the choice is not unique.
pub async fn select_split_input(dir: &Path, output_suffix: &str) -> Result<InputSelection> {
    let mut candidates = find_split_candidates(dir, output_suffix).await?;
    info!("Found {} split input candidates in {}", candidates.len(), dir.display());

    if candidates.len() == 1 {
        Ok(InputSelection::Single(candidates.remove(0)))
    } else {
        Ok(InputSelection::NotUnique(candidates))
    }
}

/// Markers used to locate the sentence-per-line file
#[derive(Debug, Clone)]
pub struct SentenceFileQuery {
    pub dir_marker: String,
    pub file_marker: String,
}

impl Default for SentenceFileQuery {
    fn default() -> Self {
        Self {
            dir_marker: TEXT_DIR_MARKER.to_string(),
            file_marker: SENTENCE_FILE_MARKER.to_string(),
        }
    }
}

/// Finds the first sentence-per-line file below `root`.
///
/// Only descendants of `root` are searched. Directories are visited
/// depth-first in pre-order with children sorted by name; a directory whose
/// name contains the dir marker (case-insensitive) has its own files checked,
/// in name order, before any subdirectory is entered. A file matches when its
/// lower-cased name contains the file marker and ends in `.txt`.
pub async fn find_sentence_file(root: &Path, query: &SentenceFileQuery) -> Result<Option<PathBuf>> {
    let root = root.to_path_buf();
    let query = query.clone();

    let found = tokio::task::spawn_blocking(move || walk_for_sentence_file(&root, &query))
        .await
        .context("Directory walk task failed")?;

    match &found {
        Some(path) => info!("Found sentence file: {}", path.display()),
        None => info!("No sentence file found"),
    }
    Ok(found)
}

fn walk_for_sentence_file(root: &Path, query: &SentenceFileQuery) -> Option<PathBuf> {
    let dir_marker = query.dir_marker.to_lowercase();
    let file_marker = query.file_marker.to_lowercase();

    // WHY: sorted pre-order walk so the same tree always yields the same file;
    // min_depth(1) keeps the working directory itself out of the candidates
    let directories = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir());

    for dir in directories {
        let dir_name = dir.file_name().to_string_lossy().to_lowercase();
        if !dir_name.contains(&dir_marker) {
            continue;
        }
        debug!("Scanning text directory: {}", dir.path().display());

        // WHY: a text directory's own files win over anything in its subdirectories
        let files = WalkDir::new(dir.path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file());

        for file in files {
            let file_name = file.file_name().to_string_lossy().to_lowercase();
            if file_name.contains(&file_marker) && file_name.ends_with(".txt") {
                return Some(file.into_path());
            }
        }
    }

    None
}

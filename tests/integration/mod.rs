// Integration test utilities shared across test binaries

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary working directory laid out like an annotation project
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a file below the root, creating parent directories as needed
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write a sentence-per-line file into a `text` folder
    pub fn create_sentence_file(&self, sentences: &[&str]) -> PathBuf {
        self.create_file("text/architecture_1SentPerLine.txt", &sentences.join("\n"))
    }

    /// Write the gold-standard CSV into the root
    pub fn create_goldstandard(&self, rows: &[(&str, &str)]) -> PathBuf {
        let mut content = String::from("sentence,componentName\n");
        for (sentence, component) in rows {
            content.push_str(&format!("{sentence},{component}\n"));
        }
        self.create_file("goldstandard_NER.csv", &content)
    }

    /// Names of the regular files directly inside the root, sorted
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.root_path)
            .expect("Failed to read fixture root")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

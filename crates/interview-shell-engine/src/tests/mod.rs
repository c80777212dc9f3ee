use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::io::MANIFEST_FILE;
use crate::models::{Pattern, PatternKind, ReadmeFile};

/// Create a temporary patterns directory
pub fn create_test_patterns_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file (and its parent directories) with content
pub fn create_test_file(root: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = root.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Create a bundle directory holding `manifest` as its `pattern.toml`
pub fn write_bundle(root: &TempDir, dir: &str, manifest: &str) -> PathBuf {
    create_test_file(root, &format!("{dir}/{MANIFEST_FILE}"), manifest);
    root.path().join(dir)
}

/// A component pattern with no instructions
pub fn sample_pattern(id: &str) -> Pattern {
    Pattern {
        id: id.to_string(),
        name: format!("Pattern {id}"),
        description: String::new(),
        version: "1.0.0".to_string(),
        author: None,
        estimated_time: None,
        tags: Vec::new(),
        kind: PatternKind::Component,
        readmes: Vec::new(),
        implementation_details: None,
        review_files: Vec::new(),
        entry: None,
        root: PathBuf::new(),
    }
}

/// A pattern with one instruction page per title
pub fn pattern_with_readmes(id: &str, kind: PatternKind, titles: &[&str]) -> Pattern {
    Pattern {
        kind,
        readmes: titles
            .iter()
            .map(|title| ReadmeFile {
                title: title.to_string(),
                content: format!("# {title}"),
            })
            .collect(),
        ..sample_pattern(id)
    }
}

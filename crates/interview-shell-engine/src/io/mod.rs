pub mod manifest;

use crate::models::Pattern;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

pub use manifest::{MANIFEST_FILE, PatternManifest};

/// Directory names never searched for bundles.
const IGNORED_DIRS: &[&str] = &["node_modules", "target"];

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid patterns directory: {0}")]
    InvalidPatternsDir(String),
    #[error("Failed to parse manifest at {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid pattern id {id:?} in {path}: ids may only use letters, digits, '-' and '_'")]
    InvalidId { id: String, path: PathBuf },
    #[error("Manifest in {bundle} refers to {path}, which is outside the bundle")]
    OutsideBundle { path: RelativePathBuf, bundle: PathBuf },
    #[error("Duplicate pattern id {id:?} in {path}, already provided by {first}")]
    DuplicateId {
        id: String,
        path: PathBuf,
        first: PathBuf,
    },
}

/// A bundle directory that was found but could not be used.
#[derive(Debug)]
pub struct SkippedBundle {
    pub path: PathBuf,
    pub error: PatternError,
}

/// Result of scanning a patterns directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Valid patterns in scan order (sorted by bundle path).
    pub patterns: Vec<Pattern>,
    pub skipped: Vec<SkippedBundle>,
}

impl Discovery {
    pub fn find(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|pattern| pattern.id == id)
    }
}

/// Read a file relative to `root` and return its content
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, PatternError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(PatternError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(PatternError::Io)
}

/// Write content to a file relative to `root`, creating parent directories
pub fn write_file(
    relative_path: &RelativePath,
    root: &Path,
    content: &str,
) -> Result<(), PatternError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(PatternError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(PatternError::Io)
}

/// Find every bundle directory (one holding a `pattern.toml`) under `patterns_root`.
///
/// A bundle's own subdirectories are not searched. Unreadable subdirectories are
/// logged and skipped; only a missing or unreadable root is an error.
pub fn scan_pattern_dirs(patterns_root: &Path) -> Result<Vec<PathBuf>, PatternError> {
    validate_patterns_dir(patterns_root)?;

    let mut bundles = Vec::new();
    scan_directory_recursive(patterns_root, &mut bundles)?;
    bundles.sort();
    Ok(bundles)
}

fn scan_directory_recursive(dir: &Path, bundles: &mut Vec<PathBuf>) -> Result<(), PatternError> {
    if dir.join(MANIFEST_FILE).is_file() {
        bundles.push(dir.to_path_buf());
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(PatternError::Io)?;

    for entry in entries {
        let path = entry.map_err(PatternError::Io)?.path();

        if path.is_dir()
            && !is_ignored_dir(&path)
            && let Err(e) = scan_directory_recursive(&path, bundles)
        {
            log::warn!("Skipping unreadable directory {}: {e}", path.display());
        }
    }

    Ok(())
}

fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || IGNORED_DIRS.contains(&name))
}

/// Load a single bundle directory into a [`Pattern`].
pub fn load_pattern(bundle_dir: &Path) -> Result<Pattern, PatternError> {
    let content = read_file(RelativePath::new(MANIFEST_FILE), bundle_dir)?;
    PatternManifest::parse(&content, bundle_dir)?.into_pattern(bundle_dir)
}

/// Scan `patterns_root` and load every bundle found.
///
/// Broken bundles and bundles repeating an earlier id are skipped with a
/// warning rather than failing the whole scan.
pub fn discover_patterns(patterns_root: &Path) -> Result<Discovery, PatternError> {
    let mut discovery = Discovery::default();

    for bundle_dir in scan_pattern_dirs(patterns_root)? {
        let loaded = load_pattern(&bundle_dir).and_then(|pattern| {
            match discovery.find(&pattern.id) {
                Some(first) => Err(PatternError::DuplicateId {
                    id: pattern.id,
                    path: bundle_dir.clone(),
                    first: first.root.clone(),
                }),
                None => Ok(pattern),
            }
        });

        match loaded {
            Ok(pattern) => {
                log::debug!("Loaded pattern '{}' from {}", pattern.id, bundle_dir.display());
                discovery.patterns.push(pattern);
            }
            Err(error) => {
                log::warn!("Skipping pattern bundle {}: {error}", bundle_dir.display());
                discovery.skipped.push(SkippedBundle {
                    path: bundle_dir,
                    error,
                });
            }
        }
    }

    log::info!(
        "Discovered {} pattern(s) in {} ({} skipped)",
        discovery.patterns.len(),
        patterns_root.display(),
        discovery.skipped.len()
    );
    Ok(discovery)
}

pub fn validate_patterns_dir(path: &Path) -> Result<(), PatternError> {
    if !path.exists() || !path.is_dir() {
        return Err(PatternError::InvalidPatternsDir(
            "patterns directory not found".to_string(),
        ));
    }

    Ok(())
}

use std::fs;
use std::path::Path;

use relative_path::{RelativePath, RelativePathBuf};
use serde::Deserialize;

use super::{PatternError, read_file};
use crate::models::{ImplementationDetails, Pattern, PatternKind, ReadmeFile, ReviewFile};

/// File that marks a directory as a pattern bundle.
pub const MANIFEST_FILE: &str = "pattern.toml";

const DEFAULT_VERSION: &str = "1.0.0";

/// On-disk form of `pattern.toml`.
///
/// ```toml
/// id = "todo-list"
/// name = "Todo List"
/// kind = "coding-challenge"
/// tags = ["react", "state"]
///
/// [[readmes]]
/// title = "Overview"
/// path = "README.md"
///
/// [implementation_details]
/// steps = ["Install dependencies", "Run the tests"]
/// test_cases_file = "cases.txt"
/// ```
#[derive(Debug, Deserialize)]
pub struct PatternManifest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub author: Option<String>,
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "type")]
    pub kind: PatternKind,
    /// Explicit instruction pages. When absent every `*.md` beside the manifest is used.
    pub readmes: Option<Vec<ReadmeEntry>>,
    pub implementation_details: Option<ImplementationManifest>,
    #[serde(default)]
    pub review_files: Vec<ReviewFile>,
    pub entry: Option<RelativePathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ReadmeEntry {
    pub title: Option<String>,
    pub path: RelativePathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ImplementationManifest {
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub test_cases: Option<String>,
    pub test_cases_file: Option<RelativePathBuf>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl PatternManifest {
    pub fn parse(content: &str, bundle_dir: &Path) -> Result<Self, PatternError> {
        toml::from_str(content).map_err(|source| PatternError::Manifest {
            path: bundle_dir.join(MANIFEST_FILE),
            source,
        })
    }

    /// Resolves file references against `bundle_dir` and builds the [`Pattern`].
    pub fn into_pattern(self, bundle_dir: &Path) -> Result<Pattern, PatternError> {
        if !is_valid_id(&self.id) {
            return Err(PatternError::InvalidId {
                id: self.id,
                path: bundle_dir.to_path_buf(),
            });
        }

        let entries = match self.readmes {
            Some(entries) => entries,
            None => markdown_entries(bundle_dir)?,
        };
        let readmes = entries
            .into_iter()
            .map(|entry| {
                let path = inside_bundle(&entry.path, bundle_dir)?;
                let content = read_file(&path, bundle_dir)?;
                let title = entry
                    .title
                    .unwrap_or_else(|| title_from_path(&entry.path));
                Ok(ReadmeFile { title, content })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        let implementation_details = self
            .implementation_details
            .map(|details| details.resolve(bundle_dir))
            .transpose()?;

        let entry = self
            .entry
            .map(|entry| inside_bundle(&entry, bundle_dir))
            .transpose()?;

        Ok(Pattern {
            id: self.id,
            name: self.name,
            description: self.description,
            version: self.version,
            author: self.author,
            estimated_time: self.estimated_time,
            tags: self.tags,
            kind: self.kind,
            readmes,
            implementation_details,
            review_files: self.review_files,
            entry,
            root: bundle_dir.to_path_buf(),
        })
    }
}

impl ImplementationManifest {
    fn resolve(self, bundle_dir: &Path) -> Result<ImplementationDetails, PatternError> {
        let test_cases = match (self.test_cases, self.test_cases_file) {
            (Some(inline), _) => Some(inline),
            (None, Some(file)) => {
                let file = inside_bundle(&file, bundle_dir)?;
                Some(read_file(&file, bundle_dir)?)
            }
            (None, None) => None,
        };
        Ok(ImplementationDetails {
            steps: self.steps,
            tips: self.tips,
            test_cases,
        })
    }
}

/// Normalizes a manifest file reference, rejecting one that climbs out of the bundle.
fn inside_bundle(path: &RelativePath, bundle_dir: &Path) -> Result<RelativePathBuf, PatternError> {
    let normalized = path.normalize();
    if normalized.starts_with("..") {
        return Err(PatternError::OutsideBundle {
            path: path.to_relative_path_buf(),
            bundle: bundle_dir.to_path_buf(),
        });
    }
    Ok(normalized)
}

/// Pattern ids end up in route fragments and exported file names.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `01-getting_started.md` -> "01 getting started", `README.md` -> "Readme".
pub fn title_from_path(path: &RelativePathBuf) -> String {
    let stem = path.file_stem().unwrap_or("Untitled");
    let words = stem.replace(['-', '_'], " ").to_lowercase();
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Untitled".to_string(),
    }
}

/// Markdown files directly inside the bundle, sorted by file name.
fn markdown_entries(bundle_dir: &Path) -> Result<Vec<ReadmeEntry>, PatternError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(bundle_dir)? {
        let path = entry?.path();
        if path.is_file()
            && path.extension().is_some_and(|ext| ext == "md")
            && let Some(name) = path.file_name().and_then(|name| name.to_str())
        {
            names.push(name.to_string());
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| ReadmeEntry {
            title: None,
            path: RelativePathBuf::from(name),
        })
        .collect())
}

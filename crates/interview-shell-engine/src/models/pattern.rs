use std::path::PathBuf;

use relative_path::RelativePathBuf;
use serde::Deserialize;

/// How a pattern is presented once launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// An embedded interactive component, opened from the bundle's `entry`.
    #[default]
    #[serde(alias = "react")]
    Component,
    /// A coding exercise: instructions first, then implementation details.
    CodingChallenge,
    /// A live review of files the candidate opens in their own editor.
    CodeReview,
}

impl PatternKind {
    pub fn label(self) -> &'static str {
        match self {
            PatternKind::Component => "Interactive",
            PatternKind::CodingChallenge => "Coding challenge",
            PatternKind::CodeReview => "Code review",
        }
    }
}

/// One page of instructional material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeFile {
    pub title: String,
    pub content: String,
}

/// Quick-start material shown after the instructions of a coding challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplementationDetails {
    pub steps: Vec<String>,
    pub tips: Vec<String>,
    pub test_cases: Option<String>,
}

/// A file the candidate is asked to open during a code review.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewFile {
    pub path: String,
    #[serde(default)]
    pub description: String,
}

/// A discovered interview pattern bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: Option<String>,
    pub estimated_time: Option<String>,
    pub tags: Vec<String>,
    pub kind: PatternKind,
    pub readmes: Vec<ReadmeFile>,
    pub implementation_details: Option<ImplementationDetails>,
    pub review_files: Vec<ReviewFile>,
    /// Component entry point, relative to `root`.
    pub entry: Option<RelativePathBuf>,
    /// Bundle directory the pattern was loaded from.
    pub root: PathBuf,
}

impl Pattern {
    pub fn has_instructions(&self) -> bool {
        !self.readmes.is_empty()
    }

    pub fn instruction_count(&self) -> usize {
        self.readmes.len()
    }

    /// "1 instruction", "3 instructions", or `None` for a pattern without any.
    pub fn instruction_label(&self) -> Option<String> {
        match self.readmes.len() {
            0 => None,
            1 => Some("1 instruction".to_string()),
            n => Some(format!("{n} instructions")),
        }
    }

    pub fn version_label(&self) -> String {
        format!("v{}", self.version)
    }

    /// Absolute path of the component entry, if the bundle declares one.
    pub fn entry_path(&self) -> Option<PathBuf> {
        self.entry.as_ref().map(|entry| entry.to_path(&self.root))
    }
}

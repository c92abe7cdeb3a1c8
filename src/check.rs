use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{bail, Context};
use regex::Regex;
use thiserror::Error;

use crate::{
    content::{header, CONTENT_EXTENSION},
    metadata::Metadata,
};

pub const QUICK_FIXES: &[&str] = &[
    "Use \"YYYY-MM-DD\" format for dates (e.g. \"2024-11-13\")",
    "Use single quotes for strings with double quotes",
    "Check indentation (use spaces, not tabs)",
    "Ensure all required fields are present",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    #[error("{0}")]
    Unparseable(String),
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid date format: {0:?}. Use \"YYYY-MM-DD\" format.")]
    InvalidDate(String),
    #[error("Quote conflict detected in summary. Use single quotes for strings with double quotes.")]
    QuoteConflict,
}

#[derive(Debug)]
pub struct FileReport {
    pub file_name: String,
    pub outcome: Result<(), Finding>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug)]
pub struct CheckSummary {
    pub reports: Vec<FileReport>,
    pub valid: usize,
    pub total: usize,
}

impl CheckSummary {
    pub fn all_valid(&self) -> bool {
        self.valid == self.total
    }
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// A summary must not mix quote styles or leave a double quote unpaired.
pub fn has_quote_conflict(summary: &str) -> bool {
    let doubles = summary.matches('"').count();
    (doubles > 0 && summary.contains('\'')) || doubles % 2 == 1
}

fn validate_metadata(metadata: &Metadata) -> Result<(), Finding> {
    let missing: Vec<&'static str> = [
        ("title", &metadata.title),
        ("publishedAt", &metadata.published_at),
        ("summary", &metadata.summary),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        return Err(Finding::MissingFields(missing));
    }

    if !date_pattern().is_match(&metadata.published_at) {
        return Err(Finding::InvalidDate(metadata.published_at.clone()));
    }

    if has_quote_conflict(&metadata.summary) {
        return Err(Finding::QuoteConflict);
    }

    Ok(())
}

pub fn validate_text(text: &str) -> Result<(), Finding> {
    let (metadata, _) = header::parse(text).map_err(|e| Finding::Unparseable(e.to_string()))?;
    validate_metadata(&metadata)
}

pub fn validate_file(path: &Path) -> FileReport {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let outcome = fs::read_to_string(path)
        .map_err(|e| Finding::Unparseable(e.to_string()))
        .and_then(|text| validate_text(&text));

    FileReport { file_name, outcome }
}

/// Validate every content document in `dir`, in file-name order.
pub fn check_directory(dir: &Path) -> anyhow::Result<CheckSummary> {
    if !dir.is_dir() {
        bail!("content directory {dir:?} not found");
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("while listing {dir:?}"))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .is_some_and(|n| n.to_string_lossy().ends_with(CONTENT_EXTENSION))
        })
        .collect();
    if files.is_empty() {
        bail!("no {CONTENT_EXTENSION} files found in {dir:?}");
    }
    files.sort();

    let reports: Vec<FileReport> = files.iter().map(|p| validate_file(p)).collect();
    let valid = reports.iter().filter(|r| r.is_valid()).count();
    let total = reports.len();

    Ok(CheckSummary {
        reports,
        valid,
        total,
    })
}

//! Front-matter header parsing.
//!
//! A document opens with a `---` line, followed by YAML key-value pairs and a
//! closing `---` line. Everything after the closing line is the body. A
//! document without the opening line has an empty header.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::metadata::Metadata;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("header opened with `---` is never closed")]
    Unterminated,
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("header is not a set of key-value pairs")]
    NotAMapping,
}

impl HeaderError {
    /// Syntax errors come with authoring guidance (dates, quotes, indentation).
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, HeaderError::Yaml(_))
    }
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(r"\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)(.*)\z")
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    })
}

fn opens_header(text: &str) -> bool {
    text.lines()
        .next()
        .is_some_and(|line| line.trim_end() == "---")
}

/// Split raw text into the header source (if any) and the body.
pub fn split(text: &str) -> Result<(Option<&str>, &str), HeaderError> {
    if !opens_header(text) {
        return Ok((None, text));
    }
    let caps = header_pattern()
        .captures(text)
        .ok_or(HeaderError::Unterminated)?;
    let header = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    Ok((Some(header), body))
}

/// Parse a document into its metadata record and body.
///
/// Keys missing from the header default to empty strings.
pub fn parse(text: &str) -> Result<(Metadata, &str), HeaderError> {
    let (header, body) = split(text)?;
    let metadata = match header {
        Some(source) => metadata_from(&parse_mapping(source)?),
        None => Metadata::default(),
    };

    Ok((metadata, body))
}

fn parse_mapping(source: &str) -> Result<Mapping, HeaderError> {
    if source.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(source)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(HeaderError::NotAMapping),
    }
}

fn metadata_from(header: &Mapping) -> Metadata {
    Metadata {
        title: field(header, "title"),
        published_at: field(header, "publishedAt"),
        summary: field(header, "summary"),
        image: field(header, "image"),
        tag: field(header, "tag"),
        verification_link: field(header, "verificationLink"),
    }
}

// scalars only; nested values and null read as empty
fn field(header: &Mapping, key: &str) -> String {
    match header.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

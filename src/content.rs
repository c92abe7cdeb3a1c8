//! Content ingestion.
//!
//! Reads `.mdx` documents from a collection directory, parses their
//! front matter and hands back posts sorted newest first. Loading never
//! fails past the document boundary: a broken document becomes a fallback
//! post, an unreadable directory becomes an empty listing, and both are
//! reported through a [`DiagnosticSink`].

use std::path::{Path, PathBuf};

use log::debug;

use crate::metadata::Post;

mod diagnostics;
pub mod header;
mod utils;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink};

/// Extension of content documents.
pub const CONTENT_EXTENSION: &str = ".mdx";

pub fn load_document(path: &Path) -> Post {
    load_document_with(path, &mut LogSink)
}

pub fn load_document_with(path: &Path, sink: &mut dyn DiagnosticSink) -> Post {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            sink.emit(Diagnostic::DocumentUnreadable {
                path: path.to_owned(),
                error: e.to_string(),
            });
            return utils::fallback_post(path);
        }
    };

    match header::parse(&raw) {
        Ok((metadata, body)) => Post {
            metadata,
            slug: utils::slug_of(path),
            content: body.to_string(),
        },
        Err(e) => {
            let syntax = e.is_syntax_error();
            sink.emit(Diagnostic::HeaderInvalid {
                path: path.to_owned(),
                error: e.to_string(),
            });
            if syntax {
                sink.emit(Diagnostic::SyntaxGuidance {
                    path: path.to_owned(),
                });
            }
            utils::fallback_post(path)
        }
    }
}

/// Resolve `segments` under `base` into a collection directory.
pub fn collection_dir<S: AsRef<str>>(base: &Path, segments: &[S]) -> PathBuf {
    segments
        .iter()
        .fold(base.to_path_buf(), |dir, segment| dir.join(segment.as_ref()))
}

pub fn load_directory<S: AsRef<str>>(base: &Path, segments: &[S]) -> Vec<Post> {
    load_directory_with(base, segments, &mut LogSink)
}

/// List the titled posts of a collection, newest first.
pub fn load_directory_with<S: AsRef<str>>(
    base: &Path,
    segments: &[S],
    sink: &mut dyn DiagnosticSink,
) -> Vec<Post> {
    let dir = collection_dir(base, segments);

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            sink.emit(Diagnostic::DirectoryUnreadable {
                path: dir,
                error: e.to_string(),
            });
            return vec![];
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(CONTENT_EXTENSION))
        .collect();
    // read_dir order is platform dependent
    names.sort();
    debug!("Loading {} documents from {dir:?}", names.len());

    let mut posts: Vec<Post> = names
        .iter()
        .map(|name| load_document_with(&dir.join(name), &mut *sink))
        .filter(Post::is_listed)
        .collect();
    posts.sort_by(utils::sort_post);

    posts
}

/// Look up a post by slug; `None` is the caller's not-found condition.
pub fn find_by_slug<'a>(posts: &'a [Post], slug: &str) -> Option<&'a Post> {
    posts.iter().find(|post| post.slug == slug)
}

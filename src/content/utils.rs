use std::{borrow::Borrow, cmp::Ordering, path::Path};

use chrono::NaiveDate;

use crate::metadata::{Metadata, Post, ERROR_TAG};

/// Date given to fallback posts.
const PLACEHOLDER_DATE: &str = "2024-01-01";

pub(super) fn slug_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub(super) fn published_date(post: &Post) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&post.metadata.published_at, "%Y-%m-%d").ok()
}

/// Newest first. Posts whose date does not parse go last; ties keep their order.
pub(super) fn sort_post<T: Borrow<Post>>(a: &T, b: &T) -> Ordering {
    match (published_date(a.borrow()), published_date(b.borrow())) {
        (Some(ref a_date), Some(ref b_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(super) fn fallback_post(path: &Path) -> Post {
    Post {
        metadata: Metadata {
            title: String::new(),
            published_at: PLACEHOLDER_DATE.to_string(),
            summary: format!(
                "{} could not be read or has a syntax error. Please check the file and its YAML front matter.",
                path.display()
            ),
            image: String::new(),
            tag: ERROR_TAG.to_string(),
            verification_link: String::new(),
        },
        slug: slug_of(path),
        content: format!(
            concat!(
                "## Loading Error\n\n",
                "This file could not be read or has a syntax error in its front matter. ",
                "Please check the YAML syntax at the top of the file.\n\n",
                "**Common issues:**\n",
                "- Invalid date format (use \"YYYY-MM-DD\")\n",
                "- Quote conflicts in text\n",
                "- Incorrect indentation\n\n",
                "**File:** {}",
            ),
            path.display()
        ),
    }
}

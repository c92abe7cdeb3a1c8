use std::path::PathBuf;

use crate::{content, metadata::Post};

/// Where content lives. Built once from the command line and passed down.
#[derive(Debug, Clone)]
pub struct Context {
    pub content_root: PathBuf,
    pub collection: Vec<String>,
}

impl Context {
    pub fn new(content_root: PathBuf, collection: &str) -> Self {
        Self {
            content_root,
            collection: split_segments(collection),
        }
    }

    pub fn collection_dir(&self) -> PathBuf {
        content::collection_dir(&self.content_root, self.collection.as_slice())
    }

    pub fn posts(&self) -> Vec<Post> {
        content::load_directory(&self.content_root, self.collection.as_slice())
    }
}

fn split_segments(collection: &str) -> Vec<String> {
    collection
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_is_split_on_slashes() {
        let ctx = Context::new(PathBuf::from("/site"), "src/app//achievement/certificates/");
        assert_eq!(ctx.collection, ["src", "app", "achievement", "certificates"]);
        assert_eq!(
            ctx.collection_dir(),
            PathBuf::from("/site/src/app/achievement/certificates")
        );
    }
}

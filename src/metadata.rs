use serde::Serialize;

/// Tag carried by posts substituted for documents that failed to load.
pub const ERROR_TAG: &str = "Error";

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    pub published_at: String,
    pub summary: String,
    pub image: String,
    pub tag: String,
    pub verification_link: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub metadata: Metadata,
    pub slug: String,
    pub content: String,
}

impl Post {
    /// Whether the post shows up in directory listings.
    pub fn is_listed(&self) -> bool {
        !self.metadata.title.is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        self.metadata.tag == ERROR_TAG
    }
}

use serde::{Deserialize, Serialize};

/// A configured feed: where to fetch it and the tag prefixed to its subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub tag: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tag: tag.into(),
        }
    }
}

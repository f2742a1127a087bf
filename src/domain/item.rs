use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One feed entry as handed to the pipeline.
///
/// `id` is the key into the seen-item store. It is the entry's permalink
/// when the feed provides one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub tag: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            title: None,
            link: None,
            summary: None,
            published_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    /// The link shown in the notification, falling back to the identifier.
    pub fn display_link(&self) -> &str {
        self.link.as_deref().unwrap_or(&self.id)
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_with_title() {
        let mut item = Item::new("https://example.com/a", "[ex]");
        item.title = Some("My Article".into());
        assert_eq!(item.display_title(), "My Article");
    }

    #[test]
    fn test_display_title_without_title() {
        let item = Item::new("https://example.com/a", "[ex]");
        assert_eq!(item.display_title(), "(Untitled)");
    }

    #[test]
    fn test_display_link_falls_back_to_id() {
        let mut item = Item::new("urn:uuid:1234", "[ex]");
        assert_eq!(item.display_link(), "urn:uuid:1234");

        item.link = Some("https://example.com/a".into());
        assert_eq!(item.display_link(), "https://example.com/a");
    }

    #[test]
    fn test_summary_empty_when_missing() {
        let item = Item::new("https://example.com/a", "[ex]");
        assert_eq!(item.summary(), "");
    }
}

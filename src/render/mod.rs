//! Turns feed items into notification payloads.
//!
//! Rendering is total: when the summary cannot be converted to text the raw
//! summary is used instead and the failure is only logged.

pub mod formatter;

use std::sync::Arc;

use crate::domain::Item;

pub use formatter::{Formatter, Html2TextFormatter};

/// Subject and body of one outgoing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

#[derive(Clone)]
pub struct Renderer {
    formatter: Arc<dyn Formatter + Send + Sync>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Arc::new(Html2TextFormatter::default()))
    }
}

impl Renderer {
    pub fn new(formatter: Arc<dyn Formatter + Send + Sync>) -> Self {
        Self { formatter }
    }

    pub fn render(&self, item: &Item) -> Notification {
        let subject = format!("{} {}", item.tag, item.display_title());

        let summary = item.summary();
        let text = match self.formatter.to_text(summary) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(item = %item.id, error = %e, "can not convert body to text, using raw summary");
                summary.to_string()
            }
        };

        let mut body = format!("link: {}\n", item.display_link());
        if let Some(published) = item.published_at {
            body.push_str(&format!("date: {}\n", published.to_rfc2822()));
        }
        body.push('\n');
        body.push_str(text.trim_end());
        body.push('\n');

        Notification { subject, body }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::app::{FeedmailError, Result};

    struct FailingFormatter;

    impl Formatter for FailingFormatter {
        fn to_text(&self, _markup: &str) -> Result<String> {
            Err(FeedmailError::Format("malformed markup".into()))
        }
    }

    fn item() -> Item {
        let mut item = Item::new("https://example.com/post", "[blog]");
        item.title = Some("Hello".into());
        item.link = Some("https://example.com/post".into());
        item.summary = Some("<p>Some <i>text</i></p>".into());
        item
    }

    #[test]
    fn test_subject_is_tag_then_title() {
        let notification = Renderer::default().render(&item());
        assert_eq!(notification.subject, "[blog] Hello");
    }

    #[test]
    fn test_body_has_link_and_text() {
        let notification = Renderer::default().render(&item());

        assert!(notification.body.starts_with("link: https://example.com/post\n"));
        assert!(notification.body.contains("Some"));
        assert!(!notification.body.contains("<p>"));
    }

    #[test]
    fn test_body_includes_date_when_known() {
        let mut item = item();
        item.published_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let notification = Renderer::default().render(&item);
        assert!(notification.body.contains("date: Mon, "));
        assert!(notification.body.contains("Jan 2024 00:00:00 +0000"));
    }

    #[test]
    fn test_falls_back_to_raw_summary() {
        let renderer = Renderer::new(Arc::new(FailingFormatter));
        let notification = renderer.render(&item());

        assert!(notification.body.contains("<p>Some <i>text</i></p>"));
        assert_eq!(notification.subject, "[blog] Hello");
    }

    #[test]
    fn test_body_never_empty() {
        let renderer = Renderer::new(Arc::new(FailingFormatter));
        let bare = Item::new("urn:x", "[t]");

        let notification = renderer.render(&bare);
        assert!(!notification.body.trim().is_empty());
        assert_eq!(notification.subject, "[t] (Untitled)");
    }
}

use crate::app::{FeedmailError, Result};

pub const DEFAULT_WIDTH: usize = 80;

/// Converts an item's markup into plain text.
pub trait Formatter {
    fn to_text(&self, markup: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct Html2TextFormatter {
    width: usize,
}

impl Html2TextFormatter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Default for Html2TextFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Formatter for Html2TextFormatter {
    fn to_text(&self, markup: &str) -> Result<String> {
        html2text::from_read(markup.as_bytes(), self.width)
            .map_err(|e| FeedmailError::Format(e.to_string()))
    }
}

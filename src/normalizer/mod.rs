use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{FeedmailError, Result};
use crate::domain::{FeedSource, Item};

#[derive(Debug, Clone)]
pub struct FeedMeta {
    pub title: Option<String>,
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parses a feed document into items, keeping document order.
    ///
    /// Either the whole document parses or nothing is returned.
    pub fn normalize(&self, source: &FeedSource, body: &[u8]) -> Result<(FeedMeta, Vec<Item>)> {
        let feed = parser::parse(body).map_err(|e| FeedmailError::FeedParse(e.to_string()))?;

        let meta = FeedMeta {
            title: feed.title.map(|t| decode_html_entities(&t.content).to_string()),
        };

        let items: Vec<Item> = feed
            .entries
            .into_iter()
            .map(|entry| {
                let link = entry.links.first().map(|l| l.href.clone());
                let id = match &link {
                    Some(href) if !href.is_empty() => href.clone(),
                    _ => entry.id.clone(),
                };

                let mut item = Item::new(id, &source.tag);

                item.title = entry.title.map(|t| decode_html_entities(&t.content).to_string());
                item.link = link;
                item.summary = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body));
                item.published_at = entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.with_timezone(&Utc));

                item
            })
            .collect();

        Ok((meta, items))
    }
}

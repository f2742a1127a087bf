//! Fetch, deduplicate, notify, record.
//!
//! Feeds are processed one after another in configured order, and items in the
//! order the feed lists them. An item is recorded as seen only after its
//! notification was accepted, so any failure along the way leads to a retry
//! on the next run rather than a lost item.

use std::fmt;

use tracing::{debug, error, info};

use crate::app::{AppContext, Result};
use crate::domain::{FeedSource, Item};

/// What happened to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Already in the seen store; nothing sent.
    AlreadySeen,
    /// Sent and recorded.
    Sent,
    /// The seen store could not be queried; skipped to avoid a duplicate.
    LookupFailed,
    /// The notifier rejected the message; left unrecorded for the next run.
    SendFailed,
    /// Sent, but recording failed; it will be sent again next run.
    MarkFailed,
}

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds_processed: usize,
    pub feeds_failed: usize,
    pub sent: usize,
    pub already_seen: usize,
    pub lookup_failures: usize,
    pub send_failures: usize,
    pub mark_failures: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::AlreadySeen => self.already_seen += 1,
            ItemOutcome::Sent => self.sent += 1,
            ItemOutcome::LookupFailed => self.lookup_failures += 1,
            ItemOutcome::SendFailed => self.send_failures += 1,
            ItemOutcome::MarkFailed => self.mark_failures += 1,
        }
    }

    /// Items that will be sent again next run because they were not recorded.
    pub fn pending(&self) -> usize {
        self.lookup_failures + self.send_failures + self.mark_failures
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} feeds ok, {} failed, {} sent, {} already seen, {} lookup errors, {} send errors, {} mark errors",
            self.feeds_processed,
            self.feeds_failed,
            self.sent,
            self.already_seen,
            self.lookup_failures,
            self.send_failures,
            self.mark_failures
        )
    }
}

pub struct Pipeline<'a> {
    ctx: &'a AppContext,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Processes every configured feed.
    pub async fn run_configured(&self) -> RunSummary {
        let sources = self.ctx.config.feed_sources();
        self.run(&sources).await
    }

    /// Processes `sources` in order. Feed and item failures are logged and
    /// never end the run early.
    pub async fn run(&self, sources: &[FeedSource]) -> RunSummary {
        let mut summary = RunSummary::default();

        for source in sources {
            info!(url = %source.url, tag = %source.tag, "Fetching {}", source.url);

            let items = match self.fetch(source).await {
                Ok(items) => items,
                Err(e) => {
                    error!(url = %source.url, tag = %source.tag, error = %e, "error fetching feed");
                    summary.feeds_failed += 1;
                    continue;
                }
            };

            for item in &items {
                let outcome = self.process_item(item).await;
                summary.record(outcome);
            }
            summary.feeds_processed += 1;
        }

        info!("Run complete: {}", summary);
        summary
    }

    async fn fetch(&self, source: &FeedSource) -> Result<Vec<Item>> {
        let body = self.ctx.fetcher.fetch(&source.url).await?;
        let (meta, items) = self.ctx.normalizer.normalize(source, &body)?;

        debug!(
            url = %source.url,
            title = meta.title.as_deref().unwrap_or(""),
            items = items.len(),
            "fetched feed"
        );
        Ok(items)
    }

    /// Runs one item through lookup, send and record.
    pub async fn process_item(&self, item: &Item) -> ItemOutcome {
        info!(tag = %item.tag, "- {}", item.display_title());
        debug!(item = %item.id, title = item.display_title(), "checking item");

        match self.ctx.store.contains(&item.id) {
            Ok(true) => {
                debug!(item = %item.id, "already sent");
                return ItemOutcome::AlreadySeen;
            }
            Ok(false) => debug!(item = %item.id, "not sent yet"),
            Err(e) => {
                error!(item = %item.id, tag = %item.tag, error = %e, "error looking up item in the seen store, skipping");
                return ItemOutcome::LookupFailed;
            }
        }

        let notification = self.ctx.renderer.render(item);
        if let Err(e) = self.ctx.notifier.send(&notification).await {
            error!(
                item = %item.id,
                tag = %item.tag,
                title = item.display_title(),
                error = %e,
                "error sending notification"
            );
            return ItemOutcome::SendFailed;
        }

        if let Err(e) = self.ctx.store.mark_seen(&item.id) {
            error!(
                item = %item.id,
                tag = %item.tag,
                title = item.display_title(),
                error = %e,
                "error marking item as seen, it will be sent again"
            );
            return ItemOutcome::MarkFailed;
        }

        ItemOutcome::Sent
    }
}

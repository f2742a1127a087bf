//! # feedmail
//!
//! Polls a list of RSS/Atom feeds and mails every entry that has not been
//! mailed before.
//!
//! ## Architecture
//!
//! ```text
//! Config → Fetcher → Normalizer → SeenStore? → Renderer → Notifier → SeenStore
//! ```
//!
//! An entry is recorded in the seen store only after its mail was accepted,
//! so failures lead to a retry on the next run, never to a lost entry.
//!
//! ## Quick Start
//!
//! ```bash
//! # ./configuration.toml holds the mail settings and the feed list
//! feedmail
//!
//! # verbose, logging to a file
//! feedmail --debug --logfile feedmail.log
//! ```

/// Run context and error handling.
///
/// The [`AppContext`](app::AppContext) struct owns everything a run needs:
/// configuration, seen store, fetcher, renderer, notifier.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `./configuration.toml`.
pub mod config;

/// Core domain models.
///
/// - [`FeedSource`](domain::FeedSource): a configured feed URL and its tag
/// - [`Item`](domain::Item): one feed entry, keyed by its permalink
pub mod domain;

/// HTTP fetching of feed documents.
pub mod fetcher;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0
/// into [`Item`](domain::Item) structs.
pub mod normalizer;

/// Notification delivery.
///
/// - [`Notifier`](notifier::Notifier): async trait for senders
/// - [`SmtpNotifier`](notifier::SmtpNotifier): lettre-based SMTP implementation
pub mod notifier;

/// The fetch, deduplicate, notify, record loop.
pub mod pipeline;

/// Item to notification rendering.
pub mod render;

/// Seen-item ledger.
///
/// - [`SeenStore`](store::SeenStore): trait for the ledger
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

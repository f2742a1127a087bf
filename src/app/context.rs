use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::normalizer::Normalizer;
use crate::notifier::{Notifier, SmtpNotifier};
use crate::render::Renderer;
use crate::store::{SeenStore, SqliteStore};

/// Everything one run needs, acquired at startup and released by [`AppContext::shutdown`].
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn SeenStore + Send + Sync>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub notifier: Arc<dyn Notifier + Send + Sync>,
    pub normalizer: Normalizer,
    pub renderer: Renderer,
}

impl AppContext {
    /// Opens the seen store, then connects to the mail server.
    ///
    /// The store comes first so that a broken ledger stops the run before any
    /// network traffic happens.
    pub async fn open(config: Config) -> Result<Self> {
        let store = SqliteStore::new(&config.store.path)?;
        tracing::debug!(path = %config.store.path.display(), seen = store.len()?, "opened seen store");
        let store: Arc<dyn SeenStore + Send + Sync> = Arc::new(store);

        let notifier = match SmtpNotifier::connect(&config.mail).await {
            Ok(notifier) => notifier,
            Err(e) => {
                Self::close_store(store.as_ref());
                return Err(e);
            }
        };

        let fetcher = HttpFetcher::new()?;

        Ok(Self::from_parts(
            config,
            store,
            Arc::new(fetcher),
            Arc::new(notifier),
        ))
    }

    pub fn from_parts(
        config: Config,
        store: Arc<dyn SeenStore + Send + Sync>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
            notifier,
            normalizer: Normalizer::new(),
            renderer: Renderer::default(),
        }
    }

    /// Closes the seen store. The mail connection is released when the context drops.
    pub fn shutdown(self) {
        Self::close_store(self.store.as_ref());
    }

    fn close_store(store: &(dyn SeenStore + Send + Sync)) {
        if let Err(e) = store.close() {
            tracing::error!(error = %e, "error closing the seen store");
        }
    }
}

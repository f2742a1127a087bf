pub mod smtp;

use async_trait::async_trait;

use crate::app::Result;
use crate::render::Notification;

pub use smtp::SmtpNotifier;

/// Delivers rendered notifications.
///
/// A failed `send` affects only that notification; the caller decides what to
/// do with the item.
#[async_trait]
pub trait Notifier {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

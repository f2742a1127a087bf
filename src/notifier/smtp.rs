use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::app::{FeedmailError, Result};
use crate::config::{MailConfig, TlsMode};
use crate::notifier::Notifier;
use crate::render::Notification;

pub const SENDER_NAME: &str = "feedmail";
pub const SENDER_ADDRESS: &str = "feedmail@localhost";

/// Fixed sender and configured recipient for every message of a run.
#[derive(Debug, Clone)]
pub struct Addressing {
    sender: Mailbox,
    recipient: Mailbox,
}

impl Addressing {
    pub fn new(recipient: &str) -> Result<Self> {
        let sender = Mailbox::new(Some(SENDER_NAME.to_string()), SENDER_ADDRESS.parse::<Address>()?);
        let recipient = Mailbox::new(Some(recipient.to_string()), recipient.parse::<Address>()?);
        Ok(Self { sender, recipient })
    }

    pub fn message(&self, notification: &Notification) -> Result<Message> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())?;
        Ok(message)
    }
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    addressing: Addressing,
}

impl SmtpNotifier {
    /// Builds the transport and checks that the server answers.
    ///
    /// The pooled connection opened here is reused for every message of the
    /// run and released when the notifier is dropped.
    pub async fn connect(config: &MailConfig) -> Result<Self> {
        let addressing = Addressing::new(&config.recipient)?;

        let tls = match config.tls {
            TlsMode::None => Tls::None,
            TlsMode::Opportunistic => Tls::Opportunistic(TlsParameters::new(config.host.clone())?),
            TlsMode::Required => Tls::Required(TlsParameters::new(config.host.clone())?),
            TlsMode::Wrapper => Tls::Wrapper(TlsParameters::new(config.host.clone())?),
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls);
        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ));
        }
        let transport = builder.build();

        if !transport.test_connection().await? {
            return Err(FeedmailError::Other(format!(
                "mail server {}:{} did not accept the connection",
                config.host, config.port
            )));
        }
        tracing::debug!(host = %config.host, port = config.port, "connected to mail server");

        Ok(Self {
            transport,
            addressing,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let message = self.addressing.message(notification)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

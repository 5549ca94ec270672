use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::{error, info};

use crate::config::MailConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A submitted contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub sender_email: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid sender address {address:?}: {source}")]
    SenderAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("could not configure mail relay: {0}")]
    Relay(#[from] lettre::transport::smtp::Error),
    #[error("{0}")]
    Transport(#[source] BoxError),
}

#[async_trait]
pub trait Notify: Send + Sync {
    async fn send(&self, contact: &ContactMessage) -> Result<(), NotifyError>;
}

/// Sends contact messages to the owner over `T`.
pub struct Notifier<T> {
    transport: T,
    owner: Mailbox,
}

impl Notifier<AsyncSmtpTransport<Tokio1Executor>> {
    /// STARTTLS relay with login. Built without a connection pool, so every
    /// send opens its own session and closes it with QUIT.
    pub fn smtp(config: &MailConfig) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(
            config.owner.email.to_string(),
            config.password.expose_secret().to_string(),
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();
        Ok(Self::with_transport(transport, config.owner.clone()))
    }
}

impl<T> Notifier<T> {
    pub fn with_transport(transport: T, owner: Mailbox) -> Self {
        Self { transport, owner }
    }
}

pub fn compose(contact: &ContactMessage, owner: &Mailbox) -> Result<Message, NotifyError> {
    let address = contact
        .sender_email
        .trim()
        .parse::<Address>()
        .map_err(|source| NotifyError::SenderAddress {
            address: contact.sender_email.clone(),
            source,
        })?;

    let message = Message::builder()
        .from(Mailbox::new(None, address))
        .to(owner.clone())
        .subject(format!("Portfolio Contact from {}", contact.name))
        .header(ContentType::TEXT_PLAIN)
        .body(format!(
            "Sender: {} <{}>\n\nMessage:\n{}",
            contact.name, contact.sender_email, contact.body
        ))?;
    Ok(message)
}

#[async_trait]
impl<T> Notify for Notifier<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    async fn send(&self, contact: &ContactMessage) -> Result<(), NotifyError> {
        let message = compose(contact, &self.owner)?;
        match self.transport.send(message).await {
            Ok(_) => {
                info!("contact message sent: from={}", contact.sender_email);
                Ok(())
            }
            Err(e) => {
                error!("contact message failed: from={} err={}", contact.sender_email, e);
                Err(NotifyError::Transport(Box::new(e)))
            }
        }
    }
}

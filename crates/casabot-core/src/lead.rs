//! Lead capture: one-shot contact details delivered to the broker by mail.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::info;

use crate::config::MailConfig;
use crate::error::MailError;

/// Subject line of every lead notification.
pub const LEAD_SUBJECT: &str = "New Solmar Estates Lead from AI Chatbot";

/// Placeholder written into the mail body when no phone number was given.
pub const PHONE_PLACEHOLDER: &str = "N/A";

/// A prospective customer's contact details. Ephemeral: exists only long
/// enough to be rendered into one outgoing message.
#[derive(Debug, Clone)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Lead {
    /// Name and email are required; phone is optional and an empty string
    /// counts as absent.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Result<Self, MailError> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(MailError::MissingField("name"));
        }
        if email.trim().is_empty() {
            return Err(MailError::MissingField("email"));
        }
        Ok(Self {
            name,
            email,
            phone: phone.filter(|p| !p.trim().is_empty()),
        })
    }

    /// Render the plain-text notification body.
    pub fn render_body(&self) -> String {
        format!(
            "New lead submitted:\n\nName: {}\nEmail: {}\nPhone: {}",
            self.name,
            self.email,
            self.phone.as_deref().unwrap_or(PHONE_PLACEHOLDER),
        )
    }
}

/// Trait for lead delivery backends.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    /// Deliver one lead. Either the message is fully sent or the call
    /// fails with no partial side effect; there is no queue and no retry.
    async fn notify(&self, lead: &Lead) -> Result<(), MailError>;
}

/// Lead notifier over implicit-TLS SMTP.
pub struct SmtpNotifier {
    config: MailConfig,
}

impl SmtpNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LeadNotifier for SmtpNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), MailError> {
        let message = lettre::Message::builder()
            .from(self.config.sender.parse()?)
            .to(self.config.broker_email.parse()?)
            .subject(LEAD_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(lead.render_body())?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.sender.clone(),
                self.config.password.clone(),
            ))
            .build();

        transport.send(message).await?;
        info!("Lead notification sent to {}", self.config.broker_email);
        Ok(())
    }
}

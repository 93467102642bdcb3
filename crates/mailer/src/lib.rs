use async_trait::async_trait;
use configuration::SmtpConfig;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
pub mod error;

pub use error::MailerError;

/// Content id of the inline heatmap part, referenced as `cid:zone-grid` in the HTML.
pub const CHART_CONTENT_ID: &str = "zone-grid";

/// Anything that can deliver a fully built message.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn deliver(&self, message: Message) -> Result<(), MailerError>;
}

/// Authenticated SMTP relay, upgraded to TLS with STARTTLS.
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .credentials(Credentials::new(
                config.login().to_string(),
                config.password.clone(),
            ))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl ReportTransport for SmtpRelay {
    async fn deliver(&self, message: Message) -> Result<(), MailerError> {
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Sends the HTML report from a fixed sender identity.
pub struct ReportMailer<T = SmtpRelay> {
    transport: T,
    sender: Mailbox,
}

impl ReportMailer<SmtpRelay> {
    /// Creates a mailer backed by the configured SMTP relay.
    ///
    /// Returns `None` if the host, sender or password is missing from the
    /// configuration, allowing the report to be produced without email.
    pub fn new(config: &SmtpConfig) -> Option<Self> {
        if !config.is_complete() {
            tracing::warn!("Mailer is not configured (missing SMTP host, sender or password).");
            return None;
        }

        let sender = match parse_mailbox(&config.sender) {
            Ok(sender) => sender,
            Err(e) => {
                tracing::error!(error = %e, "Configured sender address is invalid.");
                return None;
            }
        };

        match SmtpRelay::new(config) {
            Ok(transport) => Some(Self { transport, sender }),
            Err(e) => {
                tracing::error!(error = %e, host = %config.host, "Failed to set up the SMTP relay.");
                None
            }
        }
    }
}

impl<T: ReportTransport> ReportMailer<T> {
    pub fn with_transport(transport: T, sender: Mailbox) -> Self {
        Self { transport, sender }
    }

    /// Builds the report email.
    ///
    /// With a chart the body is `multipart/related`: the HTML part followed by
    /// the PNG as an inline part with content id [`CHART_CONTENT_ID`].
    pub fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        html: String,
        chart_png: Option<Vec<u8>>,
    ) -> Result<Message, MailerError> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(MailerError::EmptyRecipient);
        }
        let to = parse_mailbox(recipient)?;

        let builder = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(subject);

        let message = match chart_png {
            Some(png) => {
                let chart = Attachment::new_inline(CHART_CONTENT_ID.to_string())
                    .body(png, ContentType::parse("image/png")?);
                builder.multipart(
                    MultiPart::related()
                        .singlepart(SinglePart::html(html))
                        .singlepart(chart),
                )?
            }
            None => builder.singlepart(SinglePart::html(html))?,
        };

        Ok(message)
    }

    /// Builds and delivers the report. Delivery problems are returned, never panicked on.
    pub async fn send_report(
        &self,
        recipient: &str,
        subject: &str,
        html: String,
        chart_png: Option<Vec<u8>>,
    ) -> Result<(), MailerError> {
        let message = self.build_message(recipient, subject, html, chart_png)?;
        self.transport.deliver(message).await?;
        tracing::info!(recipient, "Report sent successfully.");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailerError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| MailerError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

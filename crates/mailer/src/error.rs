use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Email delivery failed: {0}")]
    EmailDeliveryFailure(#[from] lettre::transport::smtp::Error),

    #[error("Invalid email address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Please enter a valid email address.")]
    EmptyRecipient,

    #[error("Failed to assemble the email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Invalid attachment content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("Mailer is not configured. Missing SMTP host, sender or password.")]
    NotConfigured,
}

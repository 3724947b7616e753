use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::invoice::{ChannelKind, EmailChannel, EmailRequest, InvoiceError};
use crate::infrastructure::config::SmtpConfig;

/// Transactional email channel over SMTP.
///
/// The message carries the templated text only; the rendered document never
/// travels as an attachment. The send is acknowledged asynchronously through
/// the returned future.
pub struct SmtpEmailChannel {
  config: SmtpConfig,
  transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailChannel {
  pub fn new(config: SmtpConfig) -> Result<Self, InvoiceError> {
    let creds = Credentials::new(config.user.clone(), config.password.clone());
    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
      .map_err(|e| InvoiceError::Config(format!("cannot create SMTP relay: {}", e)))?
      .port(config.port)
      .credentials(creds)
      .build();

    Ok(Self { config, transport })
  }

  fn from_mailbox(&self) -> Result<Mailbox, InvoiceError> {
    format!("{} <{}>", self.config.from_name, self.config.from_email)
      .parse()
      .map_err(|e| InvoiceError::Config(format!("invalid from address: {}", e)))
  }

  fn to_mailbox(&self, request: &EmailRequest) -> Result<Mailbox, InvoiceError> {
    let rendered = if request.to_name.trim().is_empty() {
      request.to_email.clone()
    } else {
      format!("{} <{}>", request.to_name.trim(), request.to_email)
    };
    rendered.parse().map_err(|e| {
      InvoiceError::channel(
        ChannelKind::Email,
        format!("invalid recipient '{}': {}", request.to_email, e),
      )
    })
  }
}

#[async_trait]
impl EmailChannel for SmtpEmailChannel {
  async fn send(&self, request: &EmailRequest) -> Result<(), InvoiceError> {
    let message = Message::builder()
      .from(self.from_mailbox()?)
      .to(self.to_mailbox(request)?)
      .subject(request.subject.clone())
      .header(ContentType::TEXT_PLAIN)
      .body(request.body.clone())
      .map_err(|e| {
        InvoiceError::channel(ChannelKind::Email, format!("cannot build message: {}", e))
      })?;

    self.transport.send(message).await.map_err(|e| {
      InvoiceError::channel(ChannelKind::Email, format!("send failed: {}", e))
    })?;

    tracing::info!(to = %request.to_email, subject = %request.subject, "invoice email sent");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn channel() -> SmtpEmailChannel {
    SmtpEmailChannel::new(SmtpConfig {
      host: "smtp.example.com".to_string(),
      port: 587,
      user: "mailer".to_string(),
      password: "secret".to_string(),
      from_name: "BillBuddy".to_string(),
      from_email: "billing@example.com".to_string(),
    })
    .unwrap()
  }

  fn request(to_name: &str, to_email: &str) -> EmailRequest {
    EmailRequest {
      to_name: to_name.to_string(),
      to_email: to_email.to_string(),
      subject: "Invoice #5".to_string(),
      body: "Please find attached your invoice #5.".to_string(),
    }
  }

  #[tokio::test]
  async fn test_recipient_mailbox_includes_name_when_present() {
    let mailbox = channel().to_mailbox(&request("Asha", "asha@example.com")).unwrap();
    assert_eq!(mailbox.to_string(), "Asha <asha@example.com>");
  }

  #[tokio::test]
  async fn test_recipient_mailbox_without_name_is_bare_address() {
    let mailbox = channel().to_mailbox(&request("", "asha@example.com")).unwrap();
    assert_eq!(mailbox.to_string(), "asha@example.com");
  }

  #[tokio::test]
  async fn test_unparseable_recipient_is_a_channel_error() {
    let result = channel().to_mailbox(&request("Asha", "not an address"));
    assert!(matches!(
      result,
      Err(InvoiceError::ChannelDelivery {
        channel: ChannelKind::Email,
        ..
      })
    ));
  }
}

use futures_util::join;
use std::sync::Arc;

use super::entities::{Invoice, InvoiceTotals};
use super::errors::{ChannelKind, InvoiceError};
use super::ports::{
  ArtifactStore, DocumentRenderer, EmailChannel, EmailRequest, MessagingChannel,
};
use super::value_objects::InvoiceNumber;

/// Channels requested for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSelection {
  Messaging,
  Email,
  Both,
}

impl ChannelSelection {
  pub fn includes_messaging(&self) -> bool {
    matches!(self, ChannelSelection::Messaging | ChannelSelection::Both)
  }

  pub fn includes_email(&self) -> bool {
    matches!(self, ChannelSelection::Email | ChannelSelection::Both)
  }
}

/// Per-channel result. Channels are independent outcomes by design; there is
/// no joint transaction and no rollback across them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
  /// Assisted delivery: the chat deep link was opened for the user.
  Opened { deep_link: String },
  /// The transactional email was handed to the transport.
  Sent,
  Failed { reason: String },
  NotRequested,
}

impl ChannelOutcome {
  pub fn is_failure(&self) -> bool {
    matches!(self, ChannelOutcome::Failed { .. })
  }
}

/// What one dispatch attempt produced. The artifact link is the only part of
/// the rendered artifact that outlives the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
  pub invoice_number: InvoiceNumber,
  pub artifact_link: String,
  pub messaging: ChannelOutcome,
  pub email: ChannelOutcome,
}

/// Orchestrates one dispatch: render, upload, then fan out to the requested
/// channels.
///
/// Ordering is strict up to the fan-out: rendering precedes upload, and no
/// channel fires before a durable link exists. A render or upload failure is
/// terminal for the whole dispatch and no delivery is attempted. Once the
/// link exists the two channels run concurrently and independently.
///
/// There is no retry and no cancellation; the user re-triggers a failed
/// dispatch manually.
pub struct DispatchService {
  renderer: Arc<dyn DocumentRenderer>,
  store: Arc<dyn ArtifactStore>,
  messaging: Arc<dyn MessagingChannel>,
  email: Arc<dyn EmailChannel>,
}

impl DispatchService {
  pub fn new(
    renderer: Arc<dyn DocumentRenderer>,
    store: Arc<dyn ArtifactStore>,
    messaging: Arc<dyn MessagingChannel>,
    email: Arc<dyn EmailChannel>,
  ) -> Self {
    Self {
      renderer,
      store,
      messaging,
      email,
    }
  }

  pub async fn dispatch(
    &self,
    invoice: &Invoice,
    channels: ChannelSelection,
  ) -> Result<DispatchReport, InvoiceError> {
    tracing::info!(number = %invoice.number, ?channels, "dispatch started: rendering");
    let document = self.renderer.render(invoice)?;

    let path_hint = artifact_path(invoice.number);
    tracing::info!(number = %invoice.number, %path_hint, "dispatch uploading");
    let artifact_link = self.store.upload(&document, &path_hint).await?;

    let totals = invoice.totals();
    let chat_body = compose_chat_message(invoice, &totals, &artifact_link);

    let messaging_attempt = async {
      if !channels.includes_messaging() {
        return ChannelOutcome::NotRequested;
      }
      self.attempt_messaging(invoice, &chat_body).await
    };

    let email_attempt = async {
      if !channels.includes_email() {
        return ChannelOutcome::NotRequested;
      }
      self.attempt_email(invoice).await
    };

    let (messaging, email) = join!(messaging_attempt, email_attempt);

    let report = DispatchReport {
      invoice_number: invoice.number,
      artifact_link,
      messaging,
      email,
    };
    tracing::info!(
      number = %invoice.number,
      messaging = ?report.messaging,
      email = ?report.email,
      "dispatch finished"
    );
    Ok(report)
  }

  async fn attempt_messaging(&self, invoice: &Invoice, body: &str) -> ChannelOutcome {
    if !invoice.customer.has_phone() {
      return ChannelOutcome::Failed {
        reason: InvoiceError::channel(ChannelKind::Messaging, "customer has no phone number")
          .to_string(),
      };
    }

    match self
      .messaging
      .open_chat(invoice.customer.phone.trim(), body)
      .await
    {
      Ok(receipt) => ChannelOutcome::Opened {
        deep_link: receipt.deep_link,
      },
      Err(err) => {
        tracing::warn!(number = %invoice.number, error = %err, "messaging delivery failed");
        ChannelOutcome::Failed {
          reason: err.to_string(),
        }
      }
    }
  }

  async fn attempt_email(&self, invoice: &Invoice) -> ChannelOutcome {
    if !invoice.customer.has_email() {
      return ChannelOutcome::Failed {
        reason: InvoiceError::channel(ChannelKind::Email, "customer has no email address")
          .to_string(),
      };
    }

    match self.email.send(&compose_email(invoice)).await {
      Ok(()) => ChannelOutcome::Sent,
      Err(err) => {
        tracing::warn!(number = %invoice.number, error = %err, "email delivery failed");
        ChannelOutcome::Failed {
          reason: err.to_string(),
        }
      }
    }
  }
}

/// One artifact per invoice number. Re-dispatching invoice N overwrites the
/// same storage path.
fn artifact_path(number: InvoiceNumber) -> String {
  format!("invoices/invoice_{}.pdf", number.value())
}

fn compose_chat_message(invoice: &Invoice, totals: &InvoiceTotals, link: &str) -> String {
  format!(
    "Hi {}, your invoice #{} of total {} is ready. Download here: {}",
    invoice.customer.name.trim(),
    invoice.number,
    invoice.config.currency.format(totals.total),
    link
  )
}

fn compose_email(invoice: &Invoice) -> EmailRequest {
  EmailRequest {
    to_name: invoice.customer.name.clone(),
    to_email: invoice.customer.email.trim().to_string(),
    subject: format!("Invoice #{}", invoice.number),
    body: format!("Please find attached your invoice #{}.", invoice.number),
  }
}

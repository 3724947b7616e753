use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{BrandingProfile, Invoice};
use super::errors::InvoiceError;

/// Self-contained rendered document, ready for storage and sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
  pub filename: String,
  pub bytes: Vec<u8>,
}

/// Outcome of an assisted messaging invocation.
///
/// Success means the chat deep link was opened for the user, not that the
/// message was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingReceipt {
  pub deep_link: String,
}

/// Templated transactional email fields. The template carries text only;
/// the rendered document travels as a link, never as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
  pub to_name: String,
  pub to_email: String,
  pub subject: String,
  pub body: String,
}

/// Append-only store of invoice snapshots, keyed by account and number.
///
/// The core never updates or deletes records; every commit appends.
#[async_trait]
pub trait InvoiceArchive: Send + Sync {
  async fn append(&self, snapshot: Invoice) -> Result<Uuid, InvoiceError>;

  /// The highest-numbered snapshot persisted for the account, if any.
  async fn latest_for_account(&self, account_id: Uuid) -> Result<Option<Invoice>, InvoiceError>;
}

#[async_trait]
pub trait BrandingRepository: Send + Sync {
  async fn load(&self, account_id: Uuid) -> Result<Option<BrandingProfile>, InvoiceError>;
}

/// Pure projection of an invoice into a portable binary document.
///
/// Rendering is CPU work, not a suspension point, so the port is synchronous.
pub trait DocumentRenderer: Send + Sync {
  fn render(&self, invoice: &Invoice) -> Result<RenderedDocument, InvoiceError>;
}

/// Durable artifact storage. Uploading the same `path_hint` twice overwrites:
/// re-dispatching invoice N always targets the same storage path.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
  async fn upload(
    &self,
    document: &RenderedDocument,
    path_hint: &str,
  ) -> Result<String, InvoiceError>;
}

/// Assisted chat delivery: the adapter builds a channel-specific deep link
/// from the raw phone entry and opens it for the user to confirm the send.
#[async_trait]
pub trait MessagingChannel: Send + Sync {
  async fn open_chat(&self, phone: &str, body: &str) -> Result<MessagingReceipt, InvoiceError>;
}

#[async_trait]
pub trait EmailChannel: Send + Sync {
  async fn send(&self, request: &EmailRequest) -> Result<(), InvoiceError>;
}

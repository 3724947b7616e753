use std::sync::Arc;
use uuid::Uuid;

use super::entities::{BrandingProfile, Invoice};
use super::errors::InvoiceError;
use super::ports::{BrandingRepository, InvoiceArchive};
use super::value_objects::InvoiceNumber;

/// Editing context for one invoice session.
///
/// Replaces ambient global state: the current invoice draft and its account
/// are passed explicitly to every operation, so the pipeline is testable
/// without a live authentication session.
#[derive(Debug, Clone)]
pub struct InvoiceSession {
  pub account_id: Uuid,
  pub invoice: Invoice,
}

pub struct InvoiceService {
  archive: Arc<dyn InvoiceArchive>,
  branding_repo: Arc<dyn BrandingRepository>,
}

impl InvoiceService {
  pub fn new(archive: Arc<dyn InvoiceArchive>, branding_repo: Arc<dyn BrandingRepository>) -> Self {
    Self {
      archive,
      branding_repo,
    }
  }

  /// Suggests the next invoice number for a new session of this account.
  ///
  /// The suggestion is derived from the highest persisted number and is not
  /// atomically reserved: two sessions querying before either commits will
  /// receive the same number. The guarantee is a monotonic suggestion, not
  /// exclusive allocation.
  ///
  /// When the archive query fails this fails closed. Defaulting to `1`
  /// would collide with existing history.
  pub async fn next_invoice_number(&self, account_id: Uuid) -> Result<InvoiceNumber, InvoiceError> {
    let latest = self.archive.latest_for_account(account_id).await?;
    let number = match latest {
      Some(last) => last.number.next(),
      None => InvoiceNumber::first(),
    };
    tracing::debug!(%account_id, %number, "assigned next invoice number");
    Ok(number)
  }

  /// Opens an editing session: loads the account branding once and creates a
  /// provisional in-memory invoice carrying the suggested number.
  pub async fn start_session(&self, account_id: Uuid) -> Result<InvoiceSession, InvoiceError> {
    let branding = self
      .branding_repo
      .load(account_id)
      .await?
      .unwrap_or_else(BrandingProfile::default);
    let number = self.next_invoice_number(account_id).await?;

    Ok(InvoiceSession {
      account_id,
      invoice: Invoice::new(account_id, number, branding),
    })
  }

  /// Appends the current state of the invoice as a new durable snapshot.
  ///
  /// This is the explicit commit boundary: callers decide when an edit is
  /// worth persisting, and every commit writes a fresh record.
  pub async fn commit_snapshot(&self, invoice: &Invoice) -> Result<Uuid, InvoiceError> {
    let id = self.archive.append(invoice.clone()).await?;
    tracing::debug!(
      account_id = %invoice.account_id,
      number = %invoice.number,
      snapshot_id = %id,
      "invoice snapshot committed"
    );
    Ok(id)
  }
}

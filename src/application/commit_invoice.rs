use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{
  Currency, CustomerDetails, DiscountRate, GstRate, InvoiceConfig, InvoiceError, InvoiceService,
  InvoiceSession, InvoiceTotals, LineItem,
};

/// One row of the editor, exactly as typed. Rate and quantity stay free-form
/// text here; malformed values are absorbed into zero during conversion.
#[derive(Debug, Deserialize)]
pub struct LineItemEntryDto {
  pub name: String,
  pub rate: String,
  pub quantity: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerDetailsDto {
  pub name: String,
  pub address: String,
  pub phone: String,
  pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitInvoiceCommand {
  pub items: Vec<LineItemEntryDto>,
  pub gst_percent: Decimal,
  pub discount_percent: Decimal,
  pub round_off: bool,
  pub currency: String,
  pub customer: CustomerDetailsDto,
}

#[derive(Debug, Serialize)]
pub struct CommitInvoiceResponse {
  pub snapshot_id: Uuid,
  pub invoice_number: u32,
  pub totals: InvoiceTotals,
}

/// The explicit commit boundary: applies the edited form state to the session
/// invoice and appends one durable snapshot. Called once per deliberate
/// commit; writes are never coalesced.
pub struct CommitInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CommitInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    session: &mut InvoiceSession,
    command: CommitInvoiceCommand,
  ) -> Result<CommitInvoiceResponse, InvoiceError> {
    let currency = Currency::from_str(&command.currency)?;
    let gst = GstRate::new(command.gst_percent)?;
    let discount = DiscountRate::new(command.discount_percent)?;

    let items: Vec<LineItem> = command
      .items
      .into_iter()
      .map(|entry| LineItem::from_entry(entry.name, &entry.rate, &entry.quantity))
      .collect();

    session.invoice.update_config(InvoiceConfig {
      gst,
      discount,
      round_off: command.round_off,
      currency,
    });
    session.invoice.replace_items(items);
    session.invoice.update_customer(CustomerDetails {
      name: command.customer.name,
      address: command.customer.address,
      phone: command.customer.phone,
      email: command.customer.email,
    });

    let snapshot_id = self
      .invoice_service
      .commit_snapshot(&session.invoice)
      .await?;

    Ok(CommitInvoiceResponse {
      snapshot_id,
      invoice_number: session.invoice.number.value(),
      totals: session.invoice.totals(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{BrandingProfile, BrandingRepository};
  use crate::infrastructure::persistence::memory::InMemoryInvoiceArchive;
  use async_trait::async_trait;
  use rust_decimal_macros::dec;

  struct NoBranding;

  #[async_trait]
  impl BrandingRepository for NoBranding {
    async fn load(&self, _account_id: Uuid) -> Result<Option<BrandingProfile>, InvoiceError> {
      Ok(None)
    }
  }

  fn command() -> CommitInvoiceCommand {
    CommitInvoiceCommand {
      items: vec![
        LineItemEntryDto {
          name: "Widget".to_string(),
          rate: "100".to_string(),
          quantity: "2".to_string(),
        },
        LineItemEntryDto {
          name: "Gadget".to_string(),
          rate: "50".to_string(),
          quantity: "1".to_string(),
        },
      ],
      gst_percent: dec!(18),
      discount_percent: dec!(10),
      round_off: true,
      currency: "₹".to_string(),
      customer: CustomerDetailsDto {
        name: "Asha".to_string(),
        address: "12 MG Road".to_string(),
        phone: "9876543210".to_string(),
        email: "asha@example.com".to_string(),
      },
    }
  }

  async fn fixture() -> (CommitInvoiceUseCase, Arc<InMemoryInvoiceArchive>, InvoiceSession) {
    let archive = Arc::new(InMemoryInvoiceArchive::new());
    let service = Arc::new(InvoiceService::new(archive.clone(), Arc::new(NoBranding)));
    let session = service.start_session(Uuid::new_v4()).await.unwrap();
    (CommitInvoiceUseCase::new(service), archive, session)
  }

  #[tokio::test]
  async fn test_commit_persists_snapshot_and_reports_totals() {
    let (use_case, archive, mut session) = fixture().await;

    let response = use_case.execute(&mut session, command()).await.unwrap();

    assert_eq!(response.invoice_number, 1);
    assert_eq!(response.totals.subtotal, dec!(250));
    assert_eq!(response.totals.total, dec!(270));
    assert_eq!(archive.snapshot_count().await, 1);
  }

  #[tokio::test]
  async fn test_malformed_rate_is_absorbed_not_rejected() {
    let (use_case, _archive, mut session) = fixture().await;

    let mut cmd = command();
    cmd.items[0].rate = "not a number".to_string();
    let response = use_case.execute(&mut session, cmd).await.unwrap();

    // Only the Gadget row contributes.
    assert_eq!(response.totals.subtotal, dec!(50));
  }

  #[tokio::test]
  async fn test_negative_gst_is_rejected_at_the_boundary() {
    let (use_case, archive, mut session) = fixture().await;

    let mut cmd = command();
    cmd.gst_percent = dec!(-1);
    let result = use_case.execute(&mut session, cmd).await;

    assert!(matches!(result, Err(InvoiceError::Validation(_))));
    assert_eq!(archive.snapshot_count().await, 0);
  }

  #[tokio::test]
  async fn test_repeated_commits_keep_the_assigned_number() {
    let (use_case, archive, mut session) = fixture().await;
    let assigned = session.invoice.number;

    use_case.execute(&mut session, command()).await.unwrap();
    let mut second = command();
    second.customer.name = "Ravi".to_string();
    let response = use_case.execute(&mut session, second).await.unwrap();

    assert_eq!(response.invoice_number, assigned.value());
    assert_eq!(archive.snapshot_count().await, 2);
  }
}

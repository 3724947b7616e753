use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService, InvoiceSession};

#[derive(Debug, Deserialize)]
pub struct StartSessionCommand {
  pub account_id: Uuid,
}

/// Opens an editing session for an authenticated account: branding is loaded
/// once, and the provisional invoice carries the suggested next number.
pub struct StartSessionUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl StartSessionUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: StartSessionCommand,
  ) -> Result<InvoiceSession, InvoiceError> {
    self.invoice_service.start_session(command.account_id).await
  }
}

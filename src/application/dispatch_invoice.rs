use std::sync::Arc;

use crate::domain::invoice::{
  ChannelSelection, DispatchReport, DispatchService, InvoiceError, InvoiceSession,
};

#[derive(Debug, Clone, Copy)]
pub struct DispatchInvoiceCommand {
  pub channels: ChannelSelection,
}

/// Triggers one dispatch of the session's current invoice state over the
/// selected channels. There is no retry: a failed dispatch is re-triggered
/// by running this use case again.
pub struct DispatchInvoiceUseCase {
  dispatch_service: Arc<DispatchService>,
}

impl DispatchInvoiceUseCase {
  pub fn new(dispatch_service: Arc<DispatchService>) -> Self {
    Self { dispatch_service }
  }

  pub async fn execute(
    &self,
    session: &InvoiceSession,
    command: DispatchInvoiceCommand,
  ) -> Result<DispatchReport, InvoiceError> {
    self
      .dispatch_service
      .dispatch(&session.invoice, command.channels)
      .await
  }
}

//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Use cases convert raw editor input into
//! domain values and coordinate domain services and ports to fulfill one
//! user action each.

pub mod commit_invoice;
pub mod dispatch_invoice;
pub mod export_spreadsheet;
pub mod start_session;

pub use commit_invoice::{
  CommitInvoiceCommand, CommitInvoiceResponse, CommitInvoiceUseCase, CustomerDetailsDto,
  LineItemEntryDto,
};
pub use dispatch_invoice::{DispatchInvoiceCommand, DispatchInvoiceUseCase};
pub use export_spreadsheet::{ExportSpreadsheetUseCase, SpreadsheetExport};
pub use start_session::{StartSessionCommand, StartSessionUseCase};

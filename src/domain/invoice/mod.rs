pub mod dispatch;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use dispatch::{ChannelOutcome, ChannelSelection, DispatchReport, DispatchService};
pub use entities::{
  BrandingProfile, CustomerDetails, Invoice, InvoiceConfig, InvoiceTotals, LineItem, LogoImage,
};
pub use errors::{ChannelKind, InvoiceError};
pub use ports::{
  ArtifactStore, BrandingRepository, DocumentRenderer, EmailChannel, EmailRequest, InvoiceArchive,
  MessagingChannel, MessagingReceipt, RenderedDocument,
};
pub use services::{InvoiceService, InvoiceSession};
pub use value_objects::{Currency, DiscountRate, GstRate, InvoiceNumber, ValueObjectError};

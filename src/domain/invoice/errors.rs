use std::fmt;
use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Delivery channel identifier, used to attribute per-channel failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
  Messaging,
  Email,
}

impl fmt::Display for ChannelKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChannelKind::Messaging => write!(f, "messaging"),
      ChannelKind::Email => write!(f, "email"),
    }
  }
}

/// Error taxonomy for the invoice pipeline.
///
/// Malformed numeric input never appears here: it is absorbed at parse time
/// (the offending row contributes zero). Everything below is an I/O-boundary
/// failure surfaced to the caller. Nothing is retried automatically and
/// nothing is fatal to the process; failures are scoped to the single
/// operation that raised them.
#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Persistence failure: {0}")]
  Persistence(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Document rendering failed: {0}")]
  Render(String),

  #[error("Artifact upload failed: {0}")]
  Upload(String),

  #[error("{channel} delivery failed: {reason}")]
  ChannelDelivery { channel: ChannelKind, reason: String },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl InvoiceError {
  pub fn channel(channel: ChannelKind, reason: impl Into<String>) -> Self {
    InvoiceError::ChannelDelivery {
      channel,
      reason: reason.into(),
    }
  }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid currency: {0}")]
  InvalidCurrency(String),
  #[error("Invalid GST rate: {0}")]
  InvalidGstRate(String),
  #[error("Invalid discount rate: {0}")]
  InvalidDiscountRate(String),
}

// Invoice Number - per-account sequence position, assigned once
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvoiceNumber(u32);

impl InvoiceNumber {
  pub fn new(value: u32) -> Result<Self, ValueObjectError> {
    if value == 0 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number must be positive".to_string(),
      ));
    }
    Ok(Self(value))
  }

  /// The number used for the very first invoice of an account.
  pub fn first() -> Self {
    Self(1)
  }

  pub fn next(&self) -> Self {
    Self(self.0 + 1)
  }

  pub fn value(&self) -> u32 {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Currency - the three units the editor offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Currency {
  #[default]
  Inr,
  Usd,
  Eur,
}

impl Currency {
  pub fn as_str(&self) -> &'static str {
    match self {
      Currency::Inr => "INR",
      Currency::Usd => "USD",
      Currency::Eur => "EUR",
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      Currency::Inr => "₹",
      Currency::Usd => "$",
      Currency::Eur => "€",
    }
  }

  /// Formats a monetary amount with the currency symbol and two decimals.
  pub fn format(&self, amount: Decimal) -> String {
    format!("{}{:.2}", self.symbol(), amount)
  }
}

impl FromStr for Currency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "₹" => Ok(Currency::Inr),
      "$" => Ok(Currency::Usd),
      "€" => Ok(Currency::Eur),
      other => match other.to_uppercase().as_str() {
        "INR" => Ok(Currency::Inr),
        "USD" => Ok(Currency::Usd),
        "EUR" => Ok(Currency::Eur),
        _ => Err(ValueObjectError::InvalidCurrency(format!(
          "Unsupported currency: {}",
          s
        ))),
      },
    }
  }
}

// GST Rate - percentage applied to the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GstRate(Decimal);

impl GstRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO {
      return Err(ValueObjectError::InvalidGstRate(
        "GST rate cannot be negative".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_multiplier(&self) -> Decimal {
    self.0 / Decimal::from(100)
  }
}

// Discount Rate - percentage subtracted from the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO {
      return Err(ValueObjectError::InvalidDiscountRate(
        "Discount rate cannot be negative".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_multiplier(&self) -> Decimal {
    self.0 / Decimal::from(100)
  }
}

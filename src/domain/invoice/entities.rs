use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::value_objects::{Currency, DiscountRate, GstRate, InvoiceNumber};

/// Parses a free-form numeric entry from the editor.
///
/// A value that is empty or not a valid decimal contributes zero instead of
/// failing the whole computation. Negative values are accepted and propagate
/// arithmetically (credit-adjustment lines).
fn parse_numeric_entry(raw: &str) -> Decimal {
  Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

// Line Item - one row of the invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub name: String,
  pub rate: Decimal,
  pub quantity: Decimal,
}

impl LineItem {
  pub fn new(name: impl Into<String>, rate: Decimal, quantity: Decimal) -> Self {
    Self {
      name: name.into(),
      rate,
      quantity,
    }
  }

  /// Builds a line item from raw editor text, absorbing malformed numbers.
  pub fn from_entry(name: impl Into<String>, rate: &str, quantity: &str) -> Self {
    Self {
      name: name.into(),
      rate: parse_numeric_entry(rate),
      quantity: parse_numeric_entry(quantity),
    }
  }

  /// Computed, never stored independently of rate and quantity.
  pub fn amount(&self) -> Decimal {
    self.rate * self.quantity
  }
}

// Invoice Config - tax, discount and rounding rules for the whole invoice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InvoiceConfig {
  pub gst: GstRate,
  pub discount: DiscountRate,
  pub round_off: bool,
  pub currency: Currency,
}

// Customer Details - free-form contact data, presence checked only at delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CustomerDetails {
  pub name: String,
  pub address: String,
  pub phone: String,
  pub email: String,
}

impl CustomerDetails {
  pub fn has_phone(&self) -> bool {
    !self.phone.trim().is_empty()
  }

  pub fn has_email(&self) -> bool {
    !self.email.trim().is_empty()
  }
}

// Logo Image - resolved once per session, embedded inline at render time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoImage {
  pub reference: String,
  #[serde(with = "base64_bytes")]
  pub data: Vec<u8>,
}

// Branding Profile - owned by the account, read-only during editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrandingProfile {
  pub business_name: String,
  pub logo: Option<LogoImage>,
}

impl BrandingProfile {
  /// Title for the rendered document header.
  pub fn header_title(&self) -> &str {
    if self.business_name.trim().is_empty() {
      "Invoice"
    } else {
      &self.business_name
    }
  }
}

// Invoice - the aggregate root
//
// `number` is assigned exactly once at session start and never changes
// afterwards, even as content is edited. There is no draft/final
// distinction: every committed edit is persisted as a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub account_id: Uuid,
  pub number: InvoiceNumber,
  pub items: Vec<LineItem>,
  pub config: InvoiceConfig,
  pub customer: CustomerDetails,
  pub branding: BrandingProfile,
  pub created_at: DateTime<Utc>,
}

impl Invoice {
  pub fn new(account_id: Uuid, number: InvoiceNumber, branding: BrandingProfile) -> Self {
    Self {
      id: Uuid::new_v4(),
      account_id,
      number,
      items: Vec::new(),
      config: InvoiceConfig::default(),
      customer: CustomerDetails::default(),
      branding,
      created_at: Utc::now(),
    }
  }

  pub fn replace_items(&mut self, items: Vec<LineItem>) {
    self.items = items;
  }

  pub fn update_config(&mut self, config: InvoiceConfig) {
    self.config = config;
  }

  pub fn update_customer(&mut self, customer: CustomerDetails) {
    self.customer = customer;
  }

  pub fn totals(&self) -> InvoiceTotals {
    InvoiceTotals::calculate(&self.items, &self.config)
  }
}

// Invoice Totals - calculated, not persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
  pub subtotal: Decimal,
  pub gst_amount: Decimal,
  pub discount_amount: Decimal,
  pub total: Decimal,
}

impl InvoiceTotals {
  /// Recomputes the full figure set from scratch on every call.
  ///
  /// Item counts are small, so nothing is maintained incrementally. When
  /// `round_off` is set the total is rounded to the nearest whole unit of
  /// currency, half-up (midpoint away from zero).
  pub fn calculate(items: &[LineItem], config: &InvoiceConfig) -> Self {
    let subtotal = items
      .iter()
      .fold(Decimal::ZERO, |acc, item| acc + item.amount());

    let gst_amount = subtotal * config.gst.as_multiplier();
    let discount_amount = subtotal * config.discount.as_multiplier();

    let mut total = subtotal + gst_amount - discount_amount;
    if config.round_off {
      total = total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    }

    Self {
      subtotal,
      gst_amount,
      discount_amount,
      total,
    }
  }
}

mod base64_bytes {
  use base64::{Engine as _, engine::general_purpose::STANDARD};
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
      .decode(encoded.as_bytes())
      .map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn config(gst: Decimal, discount: Decimal, round_off: bool) -> InvoiceConfig {
    InvoiceConfig {
      gst: GstRate::new(gst).unwrap(),
      discount: DiscountRate::new(discount).unwrap(),
      round_off,
      currency: Currency::Inr,
    }
  }

  #[test]
  fn test_line_item_amount() {
    let item = LineItem::new("Widget", dec!(100), dec!(2));
    assert_eq!(item.amount(), dec!(200));
  }

  #[test]
  fn test_line_item_from_entry_absorbs_malformed_input() {
    let item = LineItem::from_entry("Broken", "abc", "2");
    assert_eq!(item.rate, dec!(0));
    assert_eq!(item.quantity, dec!(2));
    assert_eq!(item.amount(), dec!(0));

    let blank = LineItem::from_entry("Blank", "", "");
    assert_eq!(blank.amount(), dec!(0));
  }

  #[test]
  fn test_line_item_negative_values_propagate() {
    // Credit-adjustment lines are deliberately not rejected.
    let credit = LineItem::from_entry("Refund", "-50", "1");
    assert_eq!(credit.amount(), dec!(-50));
  }

  #[test]
  fn test_totals_worked_example() {
    let items = vec![
      LineItem::new("Widget", dec!(100), dec!(2)),
      LineItem::new("Gadget", dec!(50), dec!(1)),
    ];
    let totals = InvoiceTotals::calculate(&items, &config(dec!(18), dec!(10), true));

    assert_eq!(totals.subtotal, dec!(250));
    assert_eq!(totals.gst_amount, dec!(45.00));
    assert_eq!(totals.discount_amount, dec!(25.00));
    assert_eq!(totals.total, dec!(270));
  }

  #[test]
  fn test_totals_empty_items() {
    let totals = InvoiceTotals::calculate(&[], &config(dec!(5), dec!(0), false));
    assert_eq!(totals.subtotal, dec!(0));
    assert_eq!(totals.gst_amount, dec!(0));
    assert_eq!(totals.total, dec!(0));
  }

  #[test]
  fn test_totals_malformed_rows_contribute_zero() {
    let items = vec![
      LineItem::from_entry("Valid", "10", "3"),
      LineItem::from_entry("Broken", "oops", "4"),
    ];
    let totals = InvoiceTotals::calculate(&items, &config(dec!(0), dec!(0), false));
    assert_eq!(totals.subtotal, dec!(30));
  }

  #[test]
  fn test_total_monotonic_in_gst() {
    let items = vec![LineItem::new("Widget", dec!(100), dec!(1))];
    let low = InvoiceTotals::calculate(&items, &config(dec!(5), dec!(0), false));
    let high = InvoiceTotals::calculate(&items, &config(dec!(12), dec!(0), false));
    assert!(high.total >= low.total);
  }

  #[test]
  fn test_total_antitonic_in_discount() {
    let items = vec![LineItem::new("Widget", dec!(100), dec!(1))];
    let low = InvoiceTotals::calculate(&items, &config(dec!(0), dec!(5), false));
    let high = InvoiceTotals::calculate(&items, &config(dec!(0), dec!(20), false));
    assert!(high.total <= low.total);
  }

  #[test]
  fn test_round_off_yields_whole_units_half_up() {
    // 33.33 * 1 with 5% GST = 34.9965, rounds up to 35.
    let items = vec![LineItem::new("Widget", dec!(33.33), dec!(1))];
    let rounded = InvoiceTotals::calculate(&items, &config(dec!(5), dec!(0), true));
    assert_eq!(rounded.total, dec!(35));
    assert_eq!(rounded.total.fract(), dec!(0));

    // An exact .5 midpoint rounds away from zero.
    let midpoint = vec![LineItem::new("Widget", dec!(10.5), dec!(1))];
    let up = InvoiceTotals::calculate(&midpoint, &config(dec!(0), dec!(0), true));
    assert_eq!(up.total, dec!(11));

    // Without rounding the arithmetic is exact.
    let exact = InvoiceTotals::calculate(&items, &config(dec!(5), dec!(0), false));
    assert_eq!(exact.total, dec!(34.9965));
  }

  #[test]
  fn test_invoice_number_survives_content_edits() {
    let number = InvoiceNumber::new(9).unwrap();
    let mut invoice = Invoice::new(Uuid::new_v4(), number, BrandingProfile::default());

    invoice.replace_items(vec![LineItem::new("Widget", dec!(1), dec!(1))]);
    invoice.update_customer(CustomerDetails {
      name: "Asha".to_string(),
      ..Default::default()
    });

    assert_eq!(invoice.number, number);
  }

  #[test]
  fn test_branding_header_title_falls_back() {
    assert_eq!(BrandingProfile::default().header_title(), "Invoice");
    let branded = BrandingProfile {
      business_name: "Acme Traders".to_string(),
      logo: None,
    };
    assert_eq!(branded.header_title(), "Acme Traders");
  }

  #[test]
  fn test_logo_bytes_roundtrip_through_snapshot_json() {
    let profile = BrandingProfile {
      business_name: "Acme Traders".to_string(),
      logo: Some(LogoImage {
        reference: "https://example.com/logo.jpg".to_string(),
        data: vec![0xff, 0xd8, 0xff, 0xe0],
      }),
    };
    let json = serde_json::to_string(&profile).unwrap();
    let back: BrandingProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, profile);
  }
}

use crate::domain::invoice::{Invoice, InvoiceError};

/// Downloadable tabular export of the current item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetExport {
  pub filename: String,
  pub bytes: Vec<u8>,
}

/// Local convenience export, independent of the dispatch pipeline. Produces
/// one CSV row per line item with the computed amount.
pub struct ExportSpreadsheetUseCase;

impl ExportSpreadsheetUseCase {
  pub fn new() -> Self {
    Self
  }

  pub fn execute(&self, invoice: &Invoice) -> Result<SpreadsheetExport, InvoiceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
      .write_record(["Item", "Rate", "Quantity", "Amount"])
      .map_err(|e| InvoiceError::Internal(e.to_string()))?;

    for item in &invoice.items {
      writer
        .write_record([
          item.name.as_str(),
          &item.rate.to_string(),
          &item.quantity.to_string(),
          &format!("{:.2}", item.amount()),
        ])
        .map_err(|e| InvoiceError::Internal(e.to_string()))?;
    }

    let bytes = writer
      .into_inner()
      .map_err(|e| InvoiceError::Internal(e.to_string()))?;

    Ok(SpreadsheetExport {
      filename: format!("invoice_{}.csv", invoice.number),
      bytes,
    })
  }
}

impl Default for ExportSpreadsheetUseCase {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{BrandingProfile, InvoiceNumber, LineItem};
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  fn invoice_with_items(items: Vec<LineItem>) -> Invoice {
    let mut invoice = Invoice::new(
      Uuid::new_v4(),
      InvoiceNumber::new(3).unwrap(),
      BrandingProfile::default(),
    );
    invoice.replace_items(items);
    invoice
  }

  #[test]
  fn test_export_writes_header_and_computed_amounts() {
    let invoice = invoice_with_items(vec![
      LineItem::new("Widget", dec!(100), dec!(2)),
      LineItem::new("Gadget", dec!(49.5), dec!(1)),
    ]);

    let export = ExportSpreadsheetUseCase::new().execute(&invoice).unwrap();
    let content = String::from_utf8(export.bytes).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(export.filename, "invoice_3.csv");
    assert_eq!(lines[0], "Item,Rate,Quantity,Amount");
    assert_eq!(lines[1], "Widget,100,2,200.00");
    assert_eq!(lines[2], "Gadget,49.5,1,49.50");
  }

  #[test]
  fn test_export_of_malformed_entry_shows_zero_amount() {
    let invoice = invoice_with_items(vec![LineItem::from_entry("Broken", "oops", "4")]);

    let export = ExportSpreadsheetUseCase::new().execute(&invoice).unwrap();
    let content = String::from_utf8(export.bytes).unwrap();

    assert!(content.lines().any(|line| line == "Broken,0,4,0.00"));
  }

  #[test]
  fn test_export_of_empty_invoice_has_header_only() {
    let invoice = invoice_with_items(Vec::new());

    let export = ExportSpreadsheetUseCase::new().execute(&invoice).unwrap();
    let content = String::from_utf8(export.bytes).unwrap();

    assert_eq!(content.trim(), "Item,Rate,Quantity,Amount");
  }
}

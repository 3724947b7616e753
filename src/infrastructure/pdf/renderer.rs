use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::{
  BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
  PdfDocumentReference, PdfLayerReference, Point,
};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::domain::invoice::{
  Currency, DocumentRenderer, Invoice, InvoiceError, RenderedDocument,
};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN_LEFT: f64 = 14.0;
const MARGIN_RIGHT: f64 = 196.0;
const BOTTOM_MARGIN: f64 = 20.0;
const LINE_STEP: f64 = 7.0;

const LOGO_LEFT: f64 = 150.0;
const LOGO_WIDTH: f64 = 40.0;
const LOGO_TOP_OFFSET: f64 = 10.0;

const COL_NAME: f64 = 14.0;
const COL_RATE: f64 = 110.0;
const COL_QTY: f64 = 140.0;
const COL_AMOUNT: f64 = 168.0;

/// Builtin PDF fonts carry WinAnsi encoding only; the rupee glyph is not in
/// it, so the document substitutes an ASCII marker. Other surfaces keep the
/// real symbol.
fn pdf_currency_symbol(currency: Currency) -> &'static str {
  match currency {
    Currency::Inr => "Rs.",
    Currency::Usd => "$",
    Currency::Eur => "€",
  }
}

fn pdf_money(currency: Currency, amount: Decimal) -> String {
  format!("{}{:.2}", pdf_currency_symbol(currency), amount)
}

fn render_err(e: printpdf::Error) -> InvoiceError {
  InvoiceError::Render(e.to_string())
}

/// Self-contained A4 invoice document: header with business name and inline
/// logo, customer block, ruled line-item table, totals. A pure projection of
/// the invoice; nothing is mutated and nothing external is referenced.
pub struct PdfRenderer;

impl PdfRenderer {
  pub fn new() -> Self {
    Self
  }
}

impl Default for PdfRenderer {
  fn default() -> Self {
    Self::new()
  }
}

/// Writing position on the current page, starting a fresh page when the
/// cursor runs off the bottom.
struct PageCursor<'a> {
  doc: &'a PdfDocumentReference,
  layer: PdfLayerReference,
  y: f64,
}

impl<'a> PageCursor<'a> {
  fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
    Self {
      doc,
      layer,
      y: PAGE_HEIGHT - 22.0,
    }
  }

  fn advance(&mut self, step: f64) {
    self.y -= step;
    if self.y < BOTTOM_MARGIN {
      let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
      self.layer = self.doc.get_page(page).get_layer(layer);
      self.y = PAGE_HEIGHT - 22.0;
    }
  }

  fn text(&self, text: &str, size: f64, x: f64, font: &IndirectFontRef) {
    self.layer.use_text(text, size as f32, Mm(x as f32), Mm(self.y as f32), font);
  }

  fn rule(&self) {
    let line = Line {
      points: vec![
        (Point::new(Mm(MARGIN_LEFT as f32), Mm((self.y + 2.0) as f32)), false),
        (Point::new(Mm(MARGIN_RIGHT as f32), Mm((self.y + 2.0) as f32)), false),
      ],
      is_closed: false,
    };
    self.layer.set_outline_thickness(0.4);
    self.layer.add_line(line);
  }
}

fn embed_logo(layer: &PdfLayerReference, data: &[u8]) -> Result<(), InvoiceError> {
  let decoder = JpegDecoder::new(Cursor::new(data))
    .map_err(|e| InvoiceError::Render(format!("logo reference invalid: {}", e)))?;
  let image = Image::try_from(decoder)
    .map_err(|e| InvoiceError::Render(format!("logo reference invalid: {}", e)))?;

  // Scale the bitmap to the reserved strip in the top-right corner.
  let dpi = 300.0;
  let native_width_mm = image.image.width.0 as f64 * 25.4 / dpi;
  let native_height_mm = image.image.height.0 as f64 * 25.4 / dpi;
  let scale = LOGO_WIDTH / native_width_mm;

  image.add_to_layer(
    layer.clone(),
    ImageTransform {
      translate_x: Some(Mm(LOGO_LEFT as f32)),
      translate_y: Some(Mm((PAGE_HEIGHT - LOGO_TOP_OFFSET - native_height_mm * scale) as f32)),
      scale_x: Some(scale as f32),
      scale_y: Some(scale as f32),
      dpi: Some(dpi as f32),
      ..Default::default()
    },
  );
  Ok(())
}

impl DocumentRenderer for PdfRenderer {
  fn render(&self, invoice: &Invoice) -> Result<RenderedDocument, InvoiceError> {
    let (doc, page, layer) = PdfDocument::new(
      format!("Invoice {}", invoice.number),
      Mm(PAGE_WIDTH as f32),
      Mm(PAGE_HEIGHT as f32),
      "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
    let bold = doc
      .add_builtin_font(BuiltinFont::HelveticaBold)
      .map_err(render_err)?;

    let first_layer = doc.get_page(page).get_layer(layer);

    if let Some(logo) = &invoice.branding.logo {
      embed_logo(&first_layer, &logo.data)?;
    }

    let mut cursor = PageCursor::new(&doc, first_layer);
    cursor.text(invoice.branding.header_title(), 18.0, MARGIN_LEFT, &bold);
    cursor.advance(8.0);

    // Customer block. Missing fields render blank rather than erroring.
    cursor.text(
      &format!("Invoice No: {}", invoice.number),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(LINE_STEP);
    cursor.text(
      &format!("Customer: {}", invoice.customer.name),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(6.0);
    cursor.text(
      &format!("Address: {}", invoice.customer.address),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(6.0);
    cursor.text(
      &format!("Phone: {}", invoice.customer.phone),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(6.0);
    cursor.text(
      &format!("Email: {}", invoice.customer.email),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(LINE_STEP + 2.0);

    // Item table.
    cursor.text("Item Name", 12.0, COL_NAME, &bold);
    cursor.text("Rate", 12.0, COL_RATE, &bold);
    cursor.text("Qty", 12.0, COL_QTY, &bold);
    cursor.text("Amount", 12.0, COL_AMOUNT, &bold);
    cursor.advance(2.0);
    cursor.rule();
    cursor.advance(LINE_STEP - 2.0);

    for item in &invoice.items {
      cursor.text(&item.name, 11.0, COL_NAME, &regular);
      cursor.text(&format!("{}", item.rate), 11.0, COL_RATE, &regular);
      cursor.text(&format!("{}", item.quantity), 11.0, COL_QTY, &regular);
      cursor.text(&format!("{:.2}", item.amount()), 11.0, COL_AMOUNT, &regular);
      cursor.advance(LINE_STEP);
    }

    cursor.rule();
    cursor.advance(LINE_STEP);

    // Totals block.
    let currency = invoice.config.currency;
    let totals = invoice.totals();
    cursor.text(
      &format!("Subtotal: {}", pdf_money(currency, totals.subtotal)),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(LINE_STEP);
    cursor.text(
      &format!(
        "GST ({}%): {}",
        invoice.config.gst.value(),
        pdf_money(currency, totals.gst_amount)
      ),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(LINE_STEP);
    cursor.text(
      &format!(
        "Discount ({}%): {}",
        invoice.config.discount.value(),
        pdf_money(currency, totals.discount_amount)
      ),
      12.0,
      MARGIN_LEFT,
      &regular,
    );
    cursor.advance(LINE_STEP);
    cursor.text(
      &format!("Total: {}", pdf_money(currency, totals.total)),
      12.0,
      MARGIN_LEFT,
      &bold,
    );

    drop(cursor);
    let bytes = doc
      .save_to_bytes()
      .map_err(|e| InvoiceError::Render(e.to_string()))?;

    Ok(RenderedDocument {
      filename: format!("invoice_{}.pdf", invoice.number),
      bytes,
    })
  }
}

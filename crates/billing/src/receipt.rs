//! Fixed-layout PDF receipt rendering.
//!
//! One invoice renders to a single A4 page drawn directly with the
//! builtin Helvetica faces: header, metadata block, line-item table,
//! totals, footer. Pure presentation; the caller assembles
//! [`ReceiptData`] from the invoice and its joined lookups.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tavolo_core::error::CoreError;
use tavolo_core::money::format_currency;
use tavolo_db::models::invoice::{Invoice, InvoiceLineItem};

use crate::error::BillingError;

/// Everything the receipt displays: the invoice row, its line items,
/// and the two joined lookups (tenant contact, plan description).
#[derive(Debug, Clone)]
pub struct ReceiptData {
    pub invoice: Invoice,
    pub line_items: Vec<InvoiceLineItem>,
    pub tenant_name: String,
    pub contact_email: Option<String>,
    pub plan_description: String,
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 7.0;

// Table column x positions.
const COL_DESCRIPTION: f32 = MARGIN_MM;
const COL_QUANTITY: f32 = 120.0;
const COL_UNIT_PRICE: f32 = 140.0;
const COL_AMOUNT: f32 = 172.0;

/// Render one invoice as a PDF document, returned as raw bytes.
pub fn render_receipt(data: &ReceiptData) -> Result<Vec<u8>, BillingError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Receipt {}", data.invoice.invoice_number),
        Mm(PAGE_WIDTH_MM.into()),
        Mm(PAGE_HEIGHT_MM.into()),
        "receipt",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT_MM - 25.0;

    // --- Header ---
    draw_text(&layer, &bold, 22.0, MARGIN_MM, y, "TAVOLO");
    y -= 8.0;
    draw_text(&layer, &regular, 12.0, MARGIN_MM, y, "Billing receipt");
    y -= 6.0;
    draw_rule(&layer, &regular, y);
    y -= 10.0;

    // --- Metadata block ---
    let invoice = &data.invoice;
    draw_text(
        &layer,
        &bold,
        12.0,
        MARGIN_MM,
        y,
        &format!("Invoice {}", invoice.invoice_number),
    );
    y -= LINE_HEIGHT_MM;

    let issued = invoice.created_at.format("%b %-d, %Y").to_string();
    let status_line = match invoice.paid_at {
        Some(ts) => format!("Status: paid on {}", ts.format("%b %-d, %Y")),
        None => format!("Status: {}", invoice.status),
    };
    let mut metadata = vec![
        format!("Issued: {issued}"),
        format!("Billing period: {}", billing_period_text(invoice)),
        format!("Billed to: {}", data.tenant_name),
    ];
    if let Some(email) = &data.contact_email {
        metadata.push(format!("Email: {email}"));
    }
    metadata.push(format!("Plan: {}", data.plan_description));
    metadata.push(status_line);

    for line in &metadata {
        draw_text(&layer, &regular, 10.0, MARGIN_MM, y, line);
        y -= LINE_HEIGHT_MM;
    }

    y -= 2.0;
    draw_rule(&layer, &regular, y);
    y -= 10.0;

    // --- Line-item table ---
    draw_text(&layer, &bold, 10.0, COL_DESCRIPTION, y, "Description");
    draw_text(&layer, &bold, 10.0, COL_QUANTITY, y, "Qty");
    draw_text(&layer, &bold, 10.0, COL_UNIT_PRICE, y, "Unit price");
    draw_text(&layer, &bold, 10.0, COL_AMOUNT, y, "Amount");
    y -= LINE_HEIGHT_MM;

    for item in &data.line_items {
        draw_text(&layer, &regular, 10.0, COL_DESCRIPTION, y, &item.description);
        draw_text(
            &layer,
            &regular,
            10.0,
            COL_QUANTITY,
            y,
            &item.quantity.to_string(),
        );
        draw_text(
            &layer,
            &regular,
            10.0,
            COL_UNIT_PRICE,
            y,
            &format_currency(item.unit_price_cents, &invoice.currency),
        );
        draw_text(
            &layer,
            &regular,
            10.0,
            COL_AMOUNT,
            y,
            &format_currency(item.amount_cents, &invoice.currency),
        );
        y -= LINE_HEIGHT_MM;
    }

    y -= 2.0;
    draw_rule(&layer, &regular, y);
    y -= 10.0;

    // --- Totals ---
    draw_text(&layer, &bold, 12.0, COL_UNIT_PRICE, y, "Total");
    draw_text(
        &layer,
        &bold,
        12.0,
        COL_AMOUNT,
        y,
        &format_currency(invoice.amount_cents, &invoice.currency),
    );

    // --- Footer ---
    draw_text(
        &layer,
        &regular,
        9.0,
        MARGIN_MM,
        18.0,
        "Thank you for partnering with Tavolo.",
    );

    doc.save_to_bytes().map_err(pdf_error)
}

fn billing_period_text(invoice: &Invoice) -> String {
    format!(
        "{} to {}",
        invoice.period_start.format("%b %-d, %Y"),
        invoice.period_end.format("%b %-d, %Y")
    )
}

fn draw_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f32,
    x: f32,
    y: f32,
    text: &str,
) {
    layer.use_text(text, size.into(), Mm(x.into()), Mm(y.into()), font);
}

fn draw_rule(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32) {
    let dashes = "-".repeat(96);
    draw_text(layer, font, 8.0, MARGIN_MM, y, &dashes);
}

fn pdf_error(e: impl std::fmt::Display) -> BillingError {
    BillingError::Core(CoreError::Internal(format!("PDF rendering failed: {e}")))
}

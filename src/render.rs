//! Printable plain-text invoice document

use bigdecimal::BigDecimal;
use tracing::warn;

use crate::invoice::filter::parse_invoice_date;
use crate::tax::gst::round_money;
use crate::tax::words::amount_in_words;
use crate::types::*;

const WIDTH: usize = 96;

fn money(amount: &BigDecimal) -> String {
    format!("Rs. {}", round_money(amount))
}

/// Render an invoice exactly as stored, with the company header taken from
/// `settings`.
///
/// A total that cannot be spelled out (negative, or beyond `u64` rupees) is
/// printed as a figure on the words line instead.
pub fn render_invoice(invoice: &Invoice, settings: &CompanySettings) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(settings.name.clone());
    lines.push(settings.address.clone());
    lines.push(format!("{} - {}", settings.city, settings.pincode));
    if !settings.gstin.trim().is_empty() {
        lines.push(format!("GSTIN: {}", settings.gstin));
    }
    lines.push(format!("Phone: {}", settings.phone));
    lines.push(format!("Email: {}", settings.email));
    lines.push(format!("Website: {}", settings.website));
    lines.push("=".repeat(WIDTH));

    lines.push("TAX INVOICE".to_string());
    lines.push(format!("Invoice #: {}", invoice.id));
    let date = parse_invoice_date(&invoice.date)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| invoice.date.clone());
    lines.push(format!("Date: {}", date));
    lines.push(String::new());

    lines.push(format!("Invoice To: {}", invoice.customer_name));
    if invoice.has_customer_phone() {
        lines.push(format!("Phone: {}", invoice.customer_phone));
    }
    lines.push(format!("Vehicle: {}", invoice.vehicle_model));
    lines.push(format!("Number: {}", invoice.vehicle_number));
    lines.push("-".repeat(WIDTH));

    lines.push(format!(
        "{:<3} {:<24} {:<8} {:>4} {:>12} {:>12} {:>5} {:>10} {:>12}",
        "#", "Description", "HSN", "Qty", "Rate", "Taxable", "GST%", "GST", "Total"
    ));
    for (index, item) in invoice.services.iter().enumerate() {
        lines.push(format!(
            "{:<3} {:<24} {:<8} {:>4} {:>12} {:>12} {:>5} {:>10} {:>12}",
            index + 1,
            item.description,
            item.hsn_code,
            item.quantity,
            round_money(&item.rate).to_string(),
            round_money(&item.taxable_value).to_string(),
            item.gst_percent.normalized().to_string(),
            round_money(&item.gst_amount).to_string(),
            round_money(&item.line_total).to_string(),
        ));
        if let Some(details) = &item.details {
            lines.push(format!("    {}", details));
        }
    }
    lines.push("-".repeat(WIDTH));

    lines.push(format!("Subtotal: {}", money(&invoice.subtotal)));
    if invoice.tax_type.is_inter_state() {
        lines.push(format!("IGST: {}", money(&invoice.igst)));
    } else {
        lines.push(format!("CGST: {}", money(&invoice.cgst)));
        lines.push(format!("SGST: {}", money(&invoice.sgst)));
    }
    lines.push(format!("Total: {}", money(&invoice.total)));
    let words = match amount_in_words(&invoice.total) {
        Ok(words) => format!("Rupees {}", words),
        Err(e) => {
            warn!(invoice_id = %invoice.id, error = %e, "Total printed without words");
            money(&invoice.total)
        }
    };
    lines.push(format!("Amount in words: {}", words));
    lines.push(String::new());
    lines.push("Thank you for choosing our service!".to_string());

    lines.join("\n")
}

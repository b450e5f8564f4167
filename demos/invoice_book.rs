//! Invoice book usage example

use chrono::NaiveDate;
use service_invoice_core::utils::JsonFileStorage;
use service_invoice_core::{
    CompanySettings, InvoiceBook, InvoiceDraft, InvoiceQuery, ServiceLineItem, StorageConfig,
    TaxType,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🧾 Service Invoice Core - Invoice Book Example\n");

    // Storage location comes from INVOICE_* variables or ./invoicing.toml
    let config = StorageConfig::load()?;
    println!("📁 Data directory: {}\n", config.data_dir.display());
    let mut book = InvoiceBook::new(JsonFileStorage::from_config(&config));

    // 1. Company settings
    let settings = CompanySettings {
        gstin: "33ABCDE1234F1Z5".to_string(),
        ..book.settings().await?
    };
    book.save_settings(&settings).await?;

    // 2. Create invoices
    println!("💰 Creating invoices...");
    let drafts = [
        (
            InvoiceDraft::new("Ravi Kumar", "Maruti Swift", "TN09AB1234")
                .with_phone("9876543210")
                .add_service(ServiceLineItem::from_form("AC gas refill", "998729", "1", "1800", "18", None)),
            NaiveDate::from_ymd_opt(2024, 3, 1),
        ),
        (
            InvoiceDraft::new("Priya S", "Hyundai i20", "KA01CD5678")
                .with_tax_type(TaxType::InterState)
                .add_service(ServiceLineItem::from_form("Compressor overhaul", "998714", "1", "6500", "18", None)),
            NaiveDate::from_ymd_opt(2024, 3, 4),
        ),
    ];

    let mut created = Vec::new();
    for (draft, date) in drafts {
        let date = date.ok_or("invalid demo date")?;
        let invoice = book.create_invoice_on(draft, date).await?;
        println!("  ✓ {} {} ₹{}", invoice.id, invoice.vehicle_number, invoice.total);
        created.push(invoice);
    }
    println!();

    // 3. Search
    println!("🔍 Invoices for TN09 in March 2024:");
    let from = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid demo date")?;
    let to = NaiveDate::from_ymd_opt(2024, 3, 31).ok_or("invalid demo date")?;
    for invoice in book.search(&InvoiceQuery::vehicle("tn09").with_range(from, to)).await? {
        println!("  • {} {} {}", invoice.date, invoice.customer_name, invoice.vehicle_number);
    }
    println!();

    // 4. Printable document
    println!("🖨️ Printable invoice:\n");
    println!("{}\n", book.render(&created[0].id).await?);

    // 5. Clean up
    for invoice in &created {
        book.delete_invoice(&invoice.id).await?;
    }
    println!("🎉 Invoice book example completed successfully!");
    Ok(())
}

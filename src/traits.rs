//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;
use crate::utils::validation::*;

/// Storage abstraction for invoice records
///
/// Invoices are kept as one ordered list. Every mutation replaces whole
/// records; there are no partial updates.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// All invoices in insertion order
    async fn list_all(&self) -> InvoiceResult<Vec<Invoice>>;

    /// Overwrite the whole list
    async fn save_all(&mut self, invoices: &[Invoice]) -> InvoiceResult<()>;

    /// Add an invoice to the end of the list
    async fn append(&mut self, invoice: &Invoice) -> InvoiceResult<()>;

    /// Replace the invoice with the given ID, keeping its position
    async fn replace(&mut self, id: &str, invoice: &Invoice) -> InvoiceResult<()>;

    /// Remove the invoice with the given ID
    async fn remove(&mut self, id: &str) -> InvoiceResult<()>;

    /// Get an invoice by ID
    async fn get(&self, id: &str) -> InvoiceResult<Option<Invoice>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|invoice| invoice.id == id))
    }
}

/// Storage for the single company settings record
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Saved settings, or `None` if nothing has been saved yet
    async fn load_settings(&self) -> InvoiceResult<Option<CompanySettings>>;

    /// Overwrite the saved settings
    async fn save_settings(&mut self, settings: &CompanySettings) -> InvoiceResult<()>;
}

/// Trait for implementing custom invoice validation rules
pub trait InvoiceValidator: Send + Sync {
    /// Validate a draft before it becomes an invoice
    fn validate_draft(&self, draft: &InvoiceDraft) -> InvoiceResult<()>;

    /// Validate settings before they are saved
    fn validate_settings(&self, settings: &CompanySettings) -> InvoiceResult<()>;
}

/// Default validator mirroring the required fields of the invoice form
pub struct DefaultInvoiceValidator;

impl InvoiceValidator for DefaultInvoiceValidator {
    fn validate_draft(&self, draft: &InvoiceDraft) -> InvoiceResult<()> {
        validate_required("Customer name", &draft.customer_name)?;
        validate_required("Vehicle model", &draft.vehicle_model)?;
        validate_required("Vehicle number", &draft.vehicle_number)?;

        for (index, item) in draft.services.iter().enumerate() {
            validate_line_item(index, item)?;
        }

        Ok(())
    }

    fn validate_settings(&self, settings: &CompanySettings) -> InvoiceResult<()> {
        validate_required("Company name", &settings.name)?;
        settings.rates().validate()?;
        Ok(())
    }
}

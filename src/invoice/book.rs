//! Invoice book that coordinates stored invoices, settings and rendering

use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::invoice::filter::InvoiceQuery;
use crate::render::render_invoice;
use crate::share::ShareRequest;
use crate::traits::*;
use crate::types::*;

/// Main entry point for invoicing operations
pub struct InvoiceBook<S: InvoiceStore + SettingsStore> {
    storage: S,
    validator: Box<dyn InvoiceValidator>,
    /// Rendered documents keyed by invoice ID
    render_cache: HashMap<String, String>,
}

impl<S: InvoiceStore + SettingsStore> InvoiceBook<S> {
    /// Create a new invoice book with the given storage backend
    pub fn new(storage: S) -> Self {
        Self::with_validator(storage, Box::new(DefaultInvoiceValidator))
    }

    /// Create a new invoice book with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn InvoiceValidator>) -> Self {
        Self {
            storage,
            validator,
            render_cache: HashMap::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Settings operations
    /// Saved company settings, or the defaults if none were saved
    pub async fn settings(&self) -> InvoiceResult<CompanySettings> {
        Ok(self.storage.load_settings().await?.unwrap_or_default())
    }

    /// Replace the company settings
    pub async fn save_settings(&mut self, settings: &CompanySettings) -> InvoiceResult<()> {
        if let Err(e) = self.validator.validate_settings(settings) {
            warn!(error = %e, "Rejected company settings");
            return Err(e);
        }

        self.storage.save_settings(settings).await?;
        self.render_cache.clear();

        info!(company = %settings.name, "Company settings saved");
        Ok(())
    }

    // Invoice operations
    /// Create an invoice dated today
    pub async fn create_invoice(&mut self, draft: InvoiceDraft) -> InvoiceResult<Invoice> {
        self.create_invoice_on(draft, Utc::now().date_naive()).await
    }

    /// Create an invoice with an explicit date. Totals are computed with the
    /// currently saved rates.
    pub async fn create_invoice_on(
        &mut self,
        draft: InvoiceDraft,
        date: NaiveDate,
    ) -> InvoiceResult<Invoice> {
        self.check_draft(&draft)?;

        let settings = self.settings().await?;
        let id = Uuid::now_v7().to_string();
        let invoice = Invoice::from_draft(
            id,
            date.format("%Y-%m-%d").to_string(),
            draft,
            &settings.rates(),
        );

        self.storage.append(&invoice).await?;

        info!(
            invoice_id = %invoice.id,
            vehicle = %invoice.vehicle_number,
            total = %invoice.total,
            "Invoice created"
        );
        Ok(invoice)
    }

    /// Replace an invoice with a new draft. The ID and date are kept and the
    /// totals are recomputed with the currently saved rates.
    pub async fn update_invoice(&mut self, id: &str, draft: InvoiceDraft) -> InvoiceResult<Invoice> {
        self.check_draft(&draft)?;

        let existing = self.get_invoice_required(id).await?;
        let settings = self.settings().await?;
        let invoice = Invoice::from_draft(existing.id, existing.date, draft, &settings.rates());

        self.storage.replace(id, &invoice).await?;
        self.render_cache.remove(id);

        info!(invoice_id = %id, total = %invoice.total, "Invoice updated");
        Ok(invoice)
    }

    /// Delete an invoice
    pub async fn delete_invoice(&mut self, id: &str) -> InvoiceResult<()> {
        self.storage.remove(id).await?;
        self.render_cache.remove(id);

        info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, id: &str) -> InvoiceResult<Option<Invoice>> {
        self.storage.get(id).await
    }

    /// Get an invoice by ID, returning an error if not found
    pub async fn get_invoice_required(&self, id: &str) -> InvoiceResult<Invoice> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| InvoiceError::NotFound(id.to_string()))
    }

    /// List all invoices in the order they were created
    pub async fn list_invoices(&self) -> InvoiceResult<Vec<Invoice>> {
        self.storage.list_all().await
    }

    /// Invoices matching a vehicle/date query
    pub async fn search(&self, query: &InvoiceQuery) -> InvoiceResult<Vec<Invoice>> {
        let invoices = self.storage.list_all().await?;
        let matched = query.apply(&invoices)?;

        debug!(
            vehicle = %query.vehicle,
            total = invoices.len(),
            matched = matched.len(),
            "Invoice search"
        );
        Ok(matched)
    }

    // Document operations
    /// Printable document for an invoice
    pub async fn render(&mut self, id: &str) -> InvoiceResult<String> {
        if let Some(document) = self.render_cache.get(id) {
            debug!(invoice_id = %id, "Render cache hit");
            return Ok(document.clone());
        }

        let invoice = self.get_invoice_required(id).await?;
        let settings = self.settings().await?;
        let document = render_invoice(&invoice, &settings);

        self.render_cache.insert(id.to_string(), document.clone());
        Ok(document)
    }

    /// Printable documents for every invoice, keyed by invoice ID
    pub async fn render_all(&mut self) -> InvoiceResult<Vec<(String, String)>> {
        let ids: Vec<String> = self
            .storage
            .list_all()
            .await?
            .into_iter()
            .map(|invoice| invoice.id)
            .collect();

        let mut documents = Vec::with_capacity(ids.len());
        for id in ids {
            let document = self.render(&id).await?;
            documents.push((id, document));
        }
        Ok(documents)
    }

    /// Everything the share hook needs for an invoice
    pub async fn share_request(&mut self, id: &str) -> InvoiceResult<ShareRequest> {
        let document = self.render(id).await?;
        let invoice = self.get_invoice_required(id).await?;
        let settings = self.settings().await?;

        ShareRequest::build(&invoice, &settings, document)
    }

    pub fn is_rendered(&self, id: &str) -> bool {
        self.render_cache.contains_key(id)
    }

    fn check_draft(&self, draft: &InvoiceDraft) -> InvoiceResult<()> {
        self.validator.validate_draft(draft).inspect_err(|e| {
            warn!(error = %e, vehicle = %draft.vehicle_number, "Rejected invoice draft");
        })
    }
}

//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    invoices: Arc<RwLock<Vec<Invoice>>>,
    settings: Arc<RwLock<Option<CompanySettings>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage instance pre-loaded with invoices
    pub fn with_invoices(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices: Arc::new(RwLock::new(invoices)),
            settings: Arc::default(),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> InvoiceResult<()> {
        write(&self.invoices)?.clear();
        *write(&self.settings)? = None;
        Ok(())
    }
}

fn read<T>(lock: &RwLock<T>) -> InvoiceResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| InvoiceError::Storage(format!("lock poisoned: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> InvoiceResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| InvoiceError::Storage(format!("lock poisoned: {}", e)))
}

#[async_trait]
impl InvoiceStore for MemoryStorage {
    async fn list_all(&self) -> InvoiceResult<Vec<Invoice>> {
        Ok(read(&self.invoices)?.clone())
    }

    async fn save_all(&mut self, invoices: &[Invoice]) -> InvoiceResult<()> {
        *write(&self.invoices)? = invoices.to_vec();
        Ok(())
    }

    async fn append(&mut self, invoice: &Invoice) -> InvoiceResult<()> {
        let mut invoices = write(&self.invoices)?;
        if invoices.iter().any(|existing| existing.id == invoice.id) {
            return Err(InvoiceError::DuplicateId(invoice.id.clone()));
        }
        invoices.push(invoice.clone());
        Ok(())
    }

    async fn replace(&mut self, id: &str, invoice: &Invoice) -> InvoiceResult<()> {
        let mut invoices = write(&self.invoices)?;
        let slot = invoices
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| InvoiceError::NotFound(id.to_string()))?;
        *slot = invoice.clone();
        Ok(())
    }

    async fn remove(&mut self, id: &str) -> InvoiceResult<()> {
        let mut invoices = write(&self.invoices)?;
        let before = invoices.len();
        invoices.retain(|invoice| invoice.id != id);
        if invoices.len() == before {
            return Err(InvoiceError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> InvoiceResult<Option<Invoice>> {
        Ok(read(&self.invoices)?
            .iter()
            .find(|invoice| invoice.id == id)
            .cloned())
    }
}

#[async_trait]
impl SettingsStore for MemoryStorage {
    async fn load_settings(&self) -> InvoiceResult<Option<CompanySettings>> {
        Ok(read(&self.settings)?.clone())
    }

    async fn save_settings(&mut self, settings: &CompanySettings) -> InvoiceResult<()> {
        *write(&self.settings)? = Some(settings.clone());
        Ok(())
    }
}

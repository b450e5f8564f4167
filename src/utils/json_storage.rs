//! File-backed storage keeping each slot as one serialized JSON document

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::StorageConfig;
use crate::traits::*;
use crate::types::*;

/// Stores the invoice list as a single JSON array and the company settings
/// as a single JSON object, one file per slot.
///
/// Every write rewrites the whole slot through a temporary file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    invoices_path: PathBuf,
    settings_path: PathBuf,
}

impl JsonFileStorage {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            invoices_path: config.invoices_path(),
            settings_path: config.settings_path(),
        }
    }

    /// Storage in `data_dir` with the default slot names
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&StorageConfig::in_dir(data_dir))
    }

    pub fn invoices_path(&self) -> &Path {
        &self.invoices_path
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    async fn load_invoices(&self) -> InvoiceResult<Vec<Invoice>> {
        Ok(read_slot(&self.invoices_path).await?.unwrap_or_default())
    }
}

async fn read_slot<T: DeserializeOwned>(path: &Path) -> InvoiceResult<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "Read slot");
            Ok(Some(serde_json::from_slice(&bytes)?))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Slot is empty");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

async fn write_slot<T: Serialize + ?Sized>(path: &Path, value: &T) -> InvoiceResult<()> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote slot");
    Ok(())
}

#[async_trait]
impl InvoiceStore for JsonFileStorage {
    async fn list_all(&self) -> InvoiceResult<Vec<Invoice>> {
        self.load_invoices().await
    }

    async fn save_all(&mut self, invoices: &[Invoice]) -> InvoiceResult<()> {
        write_slot(&self.invoices_path, invoices).await
    }

    async fn append(&mut self, invoice: &Invoice) -> InvoiceResult<()> {
        let mut invoices = self.load_invoices().await?;
        if invoices.iter().any(|existing| existing.id == invoice.id) {
            return Err(InvoiceError::DuplicateId(invoice.id.clone()));
        }
        invoices.push(invoice.clone());
        write_slot(&self.invoices_path, &invoices).await
    }

    async fn replace(&mut self, id: &str, invoice: &Invoice) -> InvoiceResult<()> {
        let mut invoices = self.load_invoices().await?;
        let slot = invoices
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| InvoiceError::NotFound(id.to_string()))?;
        *slot = invoice.clone();
        write_slot(&self.invoices_path, &invoices).await
    }

    async fn remove(&mut self, id: &str) -> InvoiceResult<()> {
        let mut invoices = self.load_invoices().await?;
        let before = invoices.len();
        invoices.retain(|invoice| invoice.id != id);
        if invoices.len() == before {
            return Err(InvoiceError::NotFound(id.to_string()));
        }
        write_slot(&self.invoices_path, &invoices).await
    }
}

#[async_trait]
impl SettingsStore for JsonFileStorage {
    async fn load_settings(&self) -> InvoiceResult<Option<CompanySettings>> {
        read_slot(&self.settings_path).await
    }

    async fn save_settings(&mut self, settings: &CompanySettings) -> InvoiceResult<()> {
        write_slot(&self.settings_path, settings).await
    }
}

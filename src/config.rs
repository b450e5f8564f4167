//! Storage configuration

use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::types::InvoiceResult;

pub const DEFAULT_CONFIG_FILE: &str = "invoicing";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_INVOICES_SLOT: &str = "invoices";
pub const DEFAULT_SETTINGS_SLOT: &str = "companyDetails";

/// Where the JSON store keeps its slots
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per slot
    pub data_dir: PathBuf,
    /// Slot holding the serialized invoice list
    pub invoices_slot: String,
    /// Slot holding the serialized company settings
    pub settings_slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            invoices_slot: DEFAULT_INVOICES_SLOT.to_string(),
            settings_slot: DEFAULT_SETTINGS_SLOT.to_string(),
        }
    }
}

impl StorageConfig {
    /// Config rooted at `data_dir` with the default slot names
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Load from defaults, an optional `invoicing` config file in the working
    /// directory, then `INVOICE_*` environment variables
    /// (e.g. `INVOICE_DATA_DIR`).
    pub fn load() -> InvoiceResult<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Same as [`StorageConfig::load`] with an explicit config file name.
    /// The extension may be omitted.
    pub fn load_from(file_name: &str) -> InvoiceResult<Self> {
        let config = Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("invoices_slot", DEFAULT_INVOICES_SLOT)?
            .set_default("settings_slot", DEFAULT_SETTINGS_SLOT)?
            .add_source(File::with_name(file_name).required(false))
            .add_source(Environment::with_prefix("INVOICE"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn invoices_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.invoices_slot))
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.settings_slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_paths() {
        let config = StorageConfig::in_dir("/tmp/garage");
        assert_eq!(config.invoices_path(), PathBuf::from("/tmp/garage/invoices.json"));
        assert_eq!(
            config.settings_path(),
            PathBuf::from("/tmp/garage/companyDetails.json")
        );
    }

    // Environment variables are process-wide, so every layer is checked in
    // this one test.
    #[test]
    fn test_load_layers() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let file = dir.path().join("invoicing.toml");
        std::fs::write(&file, "data_dir = \"/srv/from-file\"\ninvoices_slot = \"jobs\"\n").unwrap();

        std::env::remove_var("INVOICE_DATA_DIR");
        let config = StorageConfig::load_from(missing.to_str().unwrap()).unwrap();
        assert_eq!(config, StorageConfig::default());

        let config = StorageConfig::load_from(file.to_str().unwrap()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/from-file"));
        assert_eq!(config.invoices_slot, "jobs");
        assert_eq!(config.settings_slot, DEFAULT_SETTINGS_SLOT);

        std::env::set_var("INVOICE_DATA_DIR", "/srv/from-env");
        let loaded = StorageConfig::load_from(file.to_str().unwrap());
        std::env::remove_var("INVOICE_DATA_DIR");

        let config = loaded.unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/from-env"));
        assert_eq!(config.invoices_slot, "jobs");
        assert_eq!(
            config.invoices_path(),
            PathBuf::from("/srv/from-env/jobs.json")
        );
    }
}

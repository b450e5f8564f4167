//! # Service Invoice Core
//!
//! Invoicing for a single vehicle-service business: GST line items,
//! CGST/SGST or IGST totals, amounts in words, invoice search, and printable
//! documents.
//!
//! ## Features
//!
//! - **GST line items**: taxable value, GST amount and line total derived from quantity, rate and GST%
//! - **Invoice totals**: CGST + SGST for intra-state supply, IGST for inter-state supply
//! - **Amount in words**: Indian numbering (crore, lakh, thousand)
//! - **Search**: vehicle number and inclusive date range filters
//! - **Storage abstraction**: in-memory and JSON-file backends behind async traits
//! - **Documents**: plain-text printable invoices and share-hook payloads
//!
//! ## Quick Start
//!
//! ```rust
//! use service_invoice_core::{to_words, GstRates, InvoiceTotals, ServiceLineItem, TaxType};
//! use bigdecimal::BigDecimal;
//!
//! let items = vec![ServiceLineItem::service("AC service", BigDecimal::from(1000))];
//! let totals = InvoiceTotals::compute(&items, TaxType::IntraState, &GstRates::default());
//!
//! assert_eq!(totals.grand_total, BigDecimal::from(1180));
//! assert_eq!(to_words(1180), "One Thousand One Hundred Eighty Only");
//! ```

pub mod config;
pub mod invoice;
pub mod render;
pub mod share;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use crate::config::StorageConfig;
pub use invoice::*;
pub use render::render_invoice;
pub use share::*;
pub use tax::*;
pub use traits::*;
pub use types::*;

//! Core types and data structures for the invoicing system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::tax::gst::{GstRates, InvoiceTotals, LineAmounts, TaxError};
use crate::utils::parse::{deserialize_decimal, deserialize_optional_decimal};

/// Schema version written by this crate. Records without a version field
/// predate GST line items and are treated as version 1.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// How GST is split on an invoice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// Supply within the same state - CGST + SGST
    #[default]
    #[serde(rename = "intra", alias = "intra-state")]
    IntraState,
    /// Supply across states - IGST only
    #[serde(rename = "inter", alias = "inter-state")]
    InterState,
}

impl TaxType {
    pub fn is_inter_state(&self) -> bool {
        matches!(self, TaxType::InterState)
    }
}

/// A single billed service on an invoice.
///
/// `taxable_value`, `gst_amount` and `line_total` are always derived from
/// `quantity`, `rate` and `gst_percent`. Deserialization recomputes them, so
/// a stored record can never carry totals that disagree with its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredLineItem")]
pub struct ServiceLineItem {
    pub description: String,
    pub hsn_code: String,
    pub quantity: u32,
    pub rate: BigDecimal,
    pub taxable_value: BigDecimal,
    pub gst_percent: BigDecimal,
    pub gst_amount: BigDecimal,
    pub line_total: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServiceLineItem {
    /// Create a line item and derive its amounts
    pub fn new(
        description: String,
        hsn_code: String,
        quantity: u32,
        rate: BigDecimal,
        gst_percent: BigDecimal,
        details: Option<String>,
    ) -> Self {
        let amounts = LineAmounts::compute(quantity, &rate, &gst_percent);
        Self {
            description,
            hsn_code,
            quantity,
            rate,
            taxable_value: amounts.taxable_value,
            gst_percent,
            gst_amount: amounts.gst_amount,
            line_total: amounts.line_total,
            details,
        }
    }

    /// Build a line item from raw form input, coercing bad numbers instead
    /// of failing
    pub fn from_form(
        description: &str,
        hsn_code: &str,
        quantity: &str,
        rate: &str,
        gst_percent: &str,
        details: Option<&str>,
    ) -> Self {
        Self::new(
            description.trim().to_string(),
            hsn_code.trim().to_string(),
            crate::utils::parse_quantity(quantity),
            crate::utils::parse_amount(rate),
            crate::utils::parse_amount(gst_percent),
            details
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        )
    }

    /// Simple service charge with no HSN code and no line-level GST
    pub fn service(description: &str, amount: BigDecimal) -> Self {
        Self::new(
            description.to_string(),
            String::new(),
            1,
            amount,
            BigDecimal::from(0),
            None,
        )
    }
}

/// On-disk shape of a line item across schema versions
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLineItem {
    #[serde(default)]
    description: String,
    #[serde(default)]
    hsn_code: String,
    quantity: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    rate: Option<BigDecimal>,
    /// Version 1 items only carried a flat amount
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    amount: Option<BigDecimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    gst_percent: Option<BigDecimal>,
    #[serde(default)]
    details: Option<String>,
}

impl From<StoredLineItem> for ServiceLineItem {
    fn from(stored: StoredLineItem) -> Self {
        let rate = stored
            .rate
            .or(stored.amount)
            .unwrap_or_else(|| BigDecimal::from(0));
        ServiceLineItem::new(
            stored.description,
            stored.hsn_code,
            stored.quantity.unwrap_or(1),
            rate,
            stored.gst_percent.unwrap_or_else(|| BigDecimal::from(0)),
            stored.details,
        )
    }
}

/// A finished service invoice with all totals resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredInvoice")]
pub struct Invoice {
    pub id: String,
    pub version: u32,
    /// Invoice date as persisted, normally `YYYY-MM-DD`
    pub date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub vehicle_model: String,
    pub vehicle_number: String,
    pub services: Vec<ServiceLineItem>,
    pub subtotal: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
    pub total: BigDecimal,
    pub tax_type: TaxType,
}

impl Invoice {
    /// Resolve a draft into an invoice using the given tax rates
    pub fn from_draft(id: String, date: String, draft: InvoiceDraft, rates: &GstRates) -> Self {
        let totals = InvoiceTotals::compute(&draft.services, draft.tax_type, rates);
        Self {
            id,
            version: CURRENT_SCHEMA_VERSION,
            date,
            customer_name: draft.customer_name,
            customer_phone: draft.customer_phone,
            vehicle_model: draft.vehicle_model,
            vehicle_number: draft.vehicle_number,
            services: draft.services,
            subtotal: totals.subtotal,
            cgst: totals.cgst,
            sgst: totals.sgst,
            igst: totals.igst,
            total: totals.grand_total,
            tax_type: draft.tax_type,
        }
    }

    pub fn total_gst(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }

    pub fn has_customer_phone(&self) -> bool {
        !self.customer_phone.trim().is_empty()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredInvoice {
    id: String,
    version: Option<u32>,
    #[serde(default)]
    date: String,
    #[serde(default)]
    customer_name: String,
    #[serde(default)]
    customer_phone: String,
    #[serde(default)]
    vehicle_model: String,
    #[serde(default)]
    vehicle_number: String,
    #[serde(default)]
    services: Vec<ServiceLineItem>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    subtotal: Option<BigDecimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    cgst: Option<BigDecimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    sgst: Option<BigDecimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    igst: Option<BigDecimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    total: Option<BigDecimal>,
    #[serde(default)]
    tax_type: TaxType,
}

impl From<StoredInvoice> for Invoice {
    fn from(stored: StoredInvoice) -> Self {
        let zero = || BigDecimal::from(0);
        let subtotal = stored.subtotal.unwrap_or_else(|| {
            stored
                .services
                .iter()
                .map(|item| &item.taxable_value)
                .sum()
        });
        let cgst = stored.cgst.unwrap_or_else(zero);
        let sgst = stored.sgst.unwrap_or_else(zero);
        let igst = stored.igst.unwrap_or_else(zero);
        let total = stored
            .total
            .unwrap_or_else(|| &subtotal + &cgst + &sgst + &igst);

        Self {
            id: stored.id,
            version: stored.version.unwrap_or(1),
            date: stored.date,
            customer_name: stored.customer_name,
            customer_phone: stored.customer_phone,
            vehicle_model: stored.vehicle_model,
            vehicle_number: stored.vehicle_number,
            services: stored.services,
            subtotal,
            cgst,
            sgst,
            igst,
            total,
            tax_type: stored.tax_type,
        }
    }
}

/// User-authored part of an invoice, as submitted from the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub vehicle_model: String,
    pub vehicle_number: String,
    pub services: Vec<ServiceLineItem>,
    pub tax_type: TaxType,
}

impl InvoiceDraft {
    pub fn new(customer_name: &str, vehicle_model: &str, vehicle_number: &str) -> Self {
        Self {
            customer_name: customer_name.to_string(),
            vehicle_model: vehicle_model.to_string(),
            vehicle_number: vehicle_number.to_string(),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.customer_phone = phone.to_string();
        self
    }

    pub fn with_tax_type(mut self, tax_type: TaxType) -> Self {
        self.tax_type = tax_type;
        self
    }

    pub fn add_service(mut self, item: ServiceLineItem) -> Self {
        self.services.push(item);
        self
    }
}

impl From<&Invoice> for InvoiceDraft {
    fn from(invoice: &Invoice) -> Self {
        Self {
            customer_name: invoice.customer_name.clone(),
            customer_phone: invoice.customer_phone.clone(),
            vehicle_model: invoice.vehicle_model.clone(),
            vehicle_number: invoice.vehicle_number.clone(),
            services: invoice.services.clone(),
            tax_type: invoice.tax_type,
        }
    }
}

/// Business details printed on every invoice, plus the GST rates applied
/// at invoice creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySettings {
    pub name: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    /// GST registration number
    pub gstin: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub cgst_rate: BigDecimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub sgst_rate: BigDecimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub igst_rate: BigDecimal,
    /// Endpoint of the outbound share hook
    pub webhook_url: Option<String>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            name: "GM CAR A/C SERVICE & MULTIBRAND".to_string(),
            address: "123 Service Road, Mechanical District".to_string(),
            city: "Chennai".to_string(),
            pincode: "600001".to_string(),
            gstin: String::new(),
            phone: "+91 98765 43210".to_string(),
            email: "gmservice@example.com".to_string(),
            website: "www.gmcarservice.com".to_string(),
            cgst_rate: BigDecimal::from(9),
            sgst_rate: BigDecimal::from(9),
            igst_rate: BigDecimal::from(18),
            webhook_url: None,
        }
    }
}

impl CompanySettings {
    pub fn rates(&self) -> GstRates {
        GstRates::new(
            self.cgst_rate.clone(),
            self.sgst_rate.clone(),
            self.igst_rate.clone(),
        )
    }

    /// Configured webhook, ignoring blank values
    pub fn webhook(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Errors that can occur in the invoicing system
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invoice not found: {0}")]
    NotFound(String),
    #[error("Invoice already exists: {0}")]
    DuplicateId(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invoice {invoice_id} has an unreadable date: '{value}'")]
    InvalidDate { invoice_id: String, value: String },
    #[error(transparent)]
    Tax(#[from] TaxError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Result type for invoicing operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_item_derives_amounts() {
        let item = ServiceLineItem::new(
            "AC gas refill".to_string(),
            "998729".to_string(),
            2,
            BigDecimal::from(750),
            BigDecimal::from(18),
            None,
        );

        assert_eq!(item.taxable_value, BigDecimal::from(1500));
        assert_eq!(item.gst_amount, BigDecimal::from(270));
        assert_eq!(item.line_total, BigDecimal::from(1770));
    }

    #[test]
    fn test_line_item_from_form_is_fail_soft() {
        let item = ServiceLineItem::from_form("Wash", "", "abc", "oops", "", Some("  "));

        assert_eq!(item.quantity, 1);
        assert_eq!(item.rate, BigDecimal::from(0));
        assert_eq!(item.gst_percent, BigDecimal::from(0));
        assert_eq!(item.line_total, BigDecimal::from(0));
        assert_eq!(item.details, None);
    }

    #[test]
    fn test_legacy_line_item_loads_as_single_quantity() {
        let item: ServiceLineItem =
            serde_json::from_str(r#"{"description":"Oil change","amount":1200}"#).unwrap();

        assert_eq!(item.quantity, 1);
        assert_eq!(item.rate, BigDecimal::from(1200));
        assert_eq!(item.taxable_value, BigDecimal::from(1200));
        assert_eq!(item.gst_amount, BigDecimal::from(0));
        assert_eq!(item.hsn_code, "");
    }

    #[test]
    fn test_stored_derived_fields_are_recomputed() {
        let json = r#"{
            "description": "Compressor repair",
            "hsnCode": "998714",
            "quantity": 3,
            "rate": "100",
            "taxableValue": "999",
            "gstPercent": "18",
            "gstAmount": "1",
            "lineTotal": "5"
        }"#;
        let item: ServiceLineItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.taxable_value, BigDecimal::from(300));
        assert_eq!(item.gst_amount, BigDecimal::from(54));
        assert_eq!(item.line_total, BigDecimal::from(354));
    }

    #[test]
    fn test_legacy_invoice_fills_missing_totals() {
        let json = r#"{
            "id": "1712300000000",
            "date": "2024-04-05",
            "customerName": "Ravi",
            "customerPhone": "",
            "vehicleModel": "Swift",
            "vehicleNumber": "TN09AB1234",
            "services": [{"description": "Service", "amount": 1500}],
            "total": 1500
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();

        assert_eq!(invoice.version, 1);
        assert_eq!(invoice.subtotal, BigDecimal::from(1500));
        assert_eq!(invoice.total, BigDecimal::from(1500));
        assert_eq!(invoice.total_gst(), BigDecimal::from(0));
        assert_eq!(invoice.tax_type, TaxType::IntraState);
    }

    #[test]
    fn test_legacy_fractional_amounts_stay_exact() {
        let json = r#"{
            "id": "1712300000001",
            "date": "2024-04-05",
            "vehicleNumber": "TN09AB1234",
            "services": [
                {"description": "Wash", "amount": 99.99},
                {"description": "Polish", "amount": 0.1, "gstPercent": 0.2}
            ],
            "total": 100.09
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();

        assert_eq!(invoice.services[0].rate, BigDecimal::from_str("99.99").unwrap());
        assert_eq!(invoice.services[1].rate, BigDecimal::from_str("0.1").unwrap());
        assert_eq!(invoice.services[1].gst_percent, BigDecimal::from_str("0.2").unwrap());
        assert_eq!(invoice.subtotal, BigDecimal::from_str("100.09").unwrap());
        assert_eq!(invoice.total, BigDecimal::from_str("100.09").unwrap());

        // Re-saving writes the same short decimal back
        let saved = serde_json::to_value(&invoice).unwrap();
        assert_eq!(saved["services"][0]["rate"], "99.99");
        assert_eq!(saved["total"], "100.09");
    }

    #[test]
    fn test_settings_accept_numeric_rates() {
        let settings: CompanySettings =
            serde_json::from_str(r#"{"cgstRate": 2.5, "sgstRate": 2.5, "igstRate": 5}"#).unwrap();

        assert_eq!(settings.cgst_rate, BigDecimal::from_str("2.5").unwrap());
        assert_eq!(settings.igst_rate, BigDecimal::from(5));
    }

    #[test]
    fn test_invoice_from_draft_inter_state() {
        let draft = InvoiceDraft::new("Ravi", "Swift", "KA01X1")
            .with_tax_type(TaxType::InterState)
            .add_service(ServiceLineItem::service("Service", BigDecimal::from(1000)));
        let invoice = Invoice::from_draft(
            "id-1".to_string(),
            "2024-04-05".to_string(),
            draft,
            &CompanySettings::default().rates(),
        );

        assert_eq!(invoice.version, CURRENT_SCHEMA_VERSION);
        assert_eq!(invoice.igst, BigDecimal::from(180));
        assert_eq!(invoice.cgst, BigDecimal::from(0));
        assert_eq!(invoice.total, BigDecimal::from(1180));
    }

    #[test]
    fn test_tax_type_wire_names() {
        assert_eq!(serde_json::to_string(&TaxType::IntraState).unwrap(), "\"intra\"");
        let parsed: TaxType = serde_json::from_str("\"inter-state\"").unwrap();
        assert_eq!(parsed, TaxType::InterState);
    }

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let settings: CompanySettings =
            serde_json::from_str(r#"{"name":"Acme Motors","igstRate":"12"}"#).unwrap();

        assert_eq!(settings.name, "Acme Motors");
        assert_eq!(settings.city, "Chennai");
        assert_eq!(settings.igst_rate, BigDecimal::from_str("12").unwrap());
        assert_eq!(settings.cgst_rate, BigDecimal::from(9));
    }

    #[test]
    fn test_blank_webhook_is_unset() {
        let settings = CompanySettings {
            webhook_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.webhook(), None);
    }
}

//! Payload for handing a finished invoice to an outbound share hook

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Country code assumed for phone numbers entered without one
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Normalise a customer phone number for messaging
pub fn format_phone(phone: &str) -> String {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.starts_with('+') {
        compact
    } else {
        format!("{}{}", DEFAULT_COUNTRY_CODE, compact)
    }
}

/// JSON body posted to the share webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    pub customer_phone: String,
    pub customer_name: String,
    pub invoice_id: String,
    /// Rendered invoice document
    #[serde(rename = "pdfContent")]
    pub document: String,
    pub message: String,
}

impl SharePayload {
    pub fn build(
        invoice: &Invoice,
        settings: &CompanySettings,
        document: String,
    ) -> InvoiceResult<Self> {
        if !invoice.has_customer_phone() {
            return Err(InvoiceError::Validation(
                "Customer phone number is required for sharing".to_string(),
            ));
        }

        Ok(Self {
            customer_phone: format_phone(&invoice.customer_phone),
            customer_name: invoice.customer_name.clone(),
            invoice_id: invoice.id.clone(),
            document,
            message: format!(
                "Hi {}, here's your invoice from {}.",
                invoice.customer_name, settings.name
            ),
        })
    }
}

/// A payload together with the webhook it should be posted to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub webhook_url: String,
    pub payload: SharePayload,
}

impl ShareRequest {
    pub fn build(
        invoice: &Invoice,
        settings: &CompanySettings,
        document: String,
    ) -> InvoiceResult<Self> {
        let webhook_url = settings
            .webhook()
            .ok_or_else(|| {
                InvoiceError::Validation("Share webhook URL is not configured".to_string())
            })?
            .to_string();

        Ok(Self {
            webhook_url,
            payload: SharePayload::build(invoice, settings, document)?,
        })
    }
}

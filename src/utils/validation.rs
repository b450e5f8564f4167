//! Validation utilities

use bigdecimal::BigDecimal;

use crate::tax::gst::validate_percent;
use crate::types::*;

/// Validate that a required text field is present
pub fn validate_required(field: &str, value: &str) -> InvoiceResult<()> {
    if value.trim().is_empty() {
        return Err(InvoiceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate that an amount is not negative
pub fn validate_non_negative(field: &str, amount: &BigDecimal) -> InvoiceResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(InvoiceError::Validation(format!(
            "{} cannot be negative",
            field
        )))
    } else {
        Ok(())
    }
}

/// Validate a single line item; `index` is zero-based
pub fn validate_line_item(index: usize, item: &ServiceLineItem) -> InvoiceResult<()> {
    let line = index + 1;

    if item.description.trim().is_empty() {
        return Err(InvoiceError::Validation(format!(
            "Service description is required on line {}",
            line
        )));
    }

    if item.quantity == 0 {
        return Err(InvoiceError::Validation(format!(
            "Quantity must be at least 1 on line {}",
            line
        )));
    }

    validate_non_negative(&format!("Rate on line {}", line), &item.rate)?;
    validate_percent(&format!("GST on line {}", line), &item.gst_percent)?;

    Ok(())
}

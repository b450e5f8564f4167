//! Searching invoices by vehicle number and date range

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::*;

/// Inclusive date range; only applied when both ends are set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// A half-picked range does not filter anything
    pub fn is_active(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= date && date <= to,
            _ => true,
        }
    }
}

/// Search criteria for the invoice list. The default value is the reset state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceQuery {
    pub vehicle: String,
    pub range: DateRange,
}

impl InvoiceQuery {
    pub fn vehicle(vehicle: &str) -> Self {
        Self {
            vehicle: vehicle.to_string(),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.range = DateRange::new(from, to);
        self
    }

    pub fn apply(&self, invoices: &[Invoice]) -> InvoiceResult<Vec<Invoice>> {
        filter_invoices(invoices, &self.vehicle, &self.range)
    }
}

/// Invoices whose vehicle number contains `vehicle` (case-insensitive) and
/// whose date falls inside `range`, in their original order.
///
/// When the range is active every remaining invoice must have a readable
/// date; the first one that does not is reported as
/// [`InvoiceError::InvalidDate`].
pub fn filter_invoices(
    invoices: &[Invoice],
    vehicle: &str,
    range: &DateRange,
) -> InvoiceResult<Vec<Invoice>> {
    let needle = vehicle.trim().to_lowercase();
    let mut matched = Vec::new();

    for invoice in invoices {
        if !needle.is_empty() && !invoice.vehicle_number.to_lowercase().contains(&needle) {
            continue;
        }

        if range.is_active() {
            let date = parse_invoice_date(&invoice.date).ok_or_else(|| {
                warn!(invoice_id = %invoice.id, date = %invoice.date, "Unreadable invoice date");
                InvoiceError::InvalidDate {
                    invoice_id: invoice.id.clone(),
                    value: invoice.date.clone(),
                }
            })?;
            if !range.contains(date) {
                continue;
            }
        }

        matched.push(invoice.clone());
    }

    Ok(matched)
}

/// Parse a stored invoice date.
///
/// Common date and timestamp layouts are tried first; anything else must be
/// a strict ISO-8601 calendar, ordinal or week date.
pub fn parse_invoice_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_direct(value).or_else(|| parse_iso8601(value))
}

const DIRECT_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d %Y",
    "%a %b %d %Y",
    "%B %d, %Y",
];
const DIRECT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

fn parse_direct(value: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(value) {
        return Some(timestamp.date_naive());
    }
    DIRECT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DIRECT_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|timestamp| timestamp.date())
        })
}

const ISO_DATE_FORMATS: [&str; 3] = ["%Y%m%d", "%Y-%j", "%G-W%V-%u"];
const ISO_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y%m%dT%H%M%S"];

fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    ISO_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            ISO_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|timestamp| timestamp.date())
        })
}

//! GST (Goods and Services Tax) calculation for service invoices

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::types::{ServiceLineItem, TaxType};

/// Invoice-level GST rates, as percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRates {
    /// CGST rate percentage (Central GST)
    pub cgst_rate: BigDecimal,
    /// SGST rate percentage (State GST)
    pub sgst_rate: BigDecimal,
    /// IGST rate percentage (Integrated GST)
    pub igst_rate: BigDecimal,
}

impl GstRates {
    pub fn new(cgst_rate: BigDecimal, sgst_rate: BigDecimal, igst_rate: BigDecimal) -> Self {
        Self {
            cgst_rate,
            sgst_rate,
            igst_rate,
        }
    }

    /// Rates for a combined GST slab, split evenly into CGST and SGST for
    /// intra-state supply and charged whole as IGST otherwise
    pub fn from_slab(total_rate: BigDecimal) -> Self {
        let half_rate = &total_rate / BigDecimal::from(2);
        Self {
            cgst_rate: half_rate.clone(),
            sgst_rate: half_rate,
            igst_rate: total_rate,
        }
    }

    /// Every component must be a percentage between 0 and 100
    pub fn validate(&self) -> Result<(), TaxError> {
        for (name, rate) in [
            ("CGST", &self.cgst_rate),
            ("SGST", &self.sgst_rate),
            ("IGST", &self.igst_rate),
        ] {
            validate_percent(name, rate)?;
        }
        Ok(())
    }
}

impl Default for GstRates {
    fn default() -> Self {
        Self::from_slab(BigDecimal::from(18))
    }
}

/// Check that a rate lies in `0..=100`
pub fn validate_percent(name: &str, rate: &BigDecimal) -> Result<(), TaxError> {
    if *rate < BigDecimal::from(0) || *rate > BigDecimal::from(100) {
        return Err(TaxError::InvalidRate(format!(
            "{} rate must be between 0 and 100, got {}",
            name, rate
        )));
    }
    Ok(())
}

/// Amounts derived for a single line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAmounts {
    /// quantity x rate
    pub taxable_value: BigDecimal,
    /// taxable value x GST% / 100
    pub gst_amount: BigDecimal,
    pub line_total: BigDecimal,
}

impl LineAmounts {
    /// Derive taxable value, GST and total for a line
    pub fn compute(quantity: u32, rate: &BigDecimal, gst_percent: &BigDecimal) -> Self {
        let taxable_value = BigDecimal::from(quantity) * rate;
        let gst_amount = (&taxable_value * gst_percent) / BigDecimal::from(100);
        let line_total = &taxable_value + &gst_amount;

        Self {
            taxable_value,
            gst_amount,
            line_total,
        }
    }
}

/// Invoice totals after applying the invoice-level GST split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of taxable values
    pub subtotal: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
    /// subtotal + cgst + sgst + igst
    pub grand_total: BigDecimal,
}

impl InvoiceTotals {
    /// Aggregate line items and apply CGST+SGST or IGST by tax type
    pub fn compute(items: &[ServiceLineItem], tax_type: TaxType, rates: &GstRates) -> Self {
        let subtotal: BigDecimal = items.iter().map(|item| &item.taxable_value).sum();
        let zero = BigDecimal::from(0);
        let percent_of = |rate: &BigDecimal| (&subtotal * rate) / BigDecimal::from(100);

        let (cgst, sgst, igst) = match tax_type {
            TaxType::IntraState => (
                percent_of(&rates.cgst_rate),
                percent_of(&rates.sgst_rate),
                zero,
            ),
            TaxType::InterState => (zero.clone(), zero, percent_of(&rates.igst_rate)),
        };

        let grand_total = &subtotal + &cgst + &sgst + &igst;

        Self {
            subtotal,
            cgst,
            sgst,
            igst,
            grand_total,
        }
    }

    pub fn total_gst(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }
}

/// Round a currency amount to paise for display
pub fn round_money(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// GST-related errors
#[derive(Debug, thiserror::Error)]
pub enum TaxError {
    #[error("Invalid GST rate: {0}")]
    InvalidRate(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(taxable: i64) -> ServiceLineItem {
        ServiceLineItem::service("Service", BigDecimal::from(taxable))
    }

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_line_amounts() {
        let amounts = LineAmounts::compute(4, &dec("250.50"), &dec("18"));

        assert_eq!(amounts.taxable_value, dec("1002"));
        assert_eq!(amounts.gst_amount, dec("180.36"));
        assert_eq!(amounts.line_total, dec("1182.36"));
    }

    #[test]
    fn test_line_total_matches_formula() {
        for quantity in [0u32, 1, 3, 17] {
            for rate in ["0", "1", "99.99", "1250.5"] {
                for gst in ["0", "5", "12.5", "18", "28", "100"] {
                    let (r, g) = (dec(rate), dec(gst));
                    let q = BigDecimal::from(quantity);
                    let expected = &q * &r + (&q * &r * &g) / BigDecimal::from(100);

                    let amounts = LineAmounts::compute(quantity, &r, &g);
                    assert_eq!(amounts.line_total, expected, "q={quantity} r={rate} g={gst}");
                }
            }
        }
    }

    #[test]
    fn test_intra_state_totals() {
        let rates = GstRates::new(dec("9"), dec("9"), dec("18"));
        let totals = InvoiceTotals::compute(&[item(600), item(400)], TaxType::IntraState, &rates);

        assert_eq!(totals.subtotal, BigDecimal::from(1000));
        assert_eq!(totals.cgst, BigDecimal::from(90));
        assert_eq!(totals.sgst, BigDecimal::from(90));
        assert_eq!(totals.igst, BigDecimal::from(0));
        assert_eq!(totals.grand_total, BigDecimal::from(1180));
    }

    #[test]
    fn test_inter_state_totals() {
        let rates = GstRates::new(dec("9"), dec("9"), dec("18"));
        let totals = InvoiceTotals::compute(&[item(1000)], TaxType::InterState, &rates);

        assert_eq!(totals.igst, BigDecimal::from(180));
        assert_eq!(totals.cgst, BigDecimal::from(0));
        assert_eq!(totals.sgst, BigDecimal::from(0));
        assert_eq!(totals.grand_total, BigDecimal::from(1180));
        assert_eq!(totals.total_gst(), BigDecimal::from(180));
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        let rates = GstRates::default();
        for tax_type in [TaxType::IntraState, TaxType::InterState] {
            let totals = InvoiceTotals::compute(&[], tax_type, &rates);
            assert_eq!(totals.subtotal, BigDecimal::from(0));
            assert_eq!(totals.total_gst(), BigDecimal::from(0));
            assert_eq!(totals.grand_total, BigDecimal::from(0));
        }
    }

    #[test]
    fn test_totals_ignore_line_level_gst() {
        let line = ServiceLineItem::new(
            "Gas refill".to_string(),
            String::new(),
            1,
            BigDecimal::from(1000),
            BigDecimal::from(28),
            None,
        );
        let totals =
            InvoiceTotals::compute(&[line], TaxType::IntraState, &GstRates::default());

        assert_eq!(totals.subtotal, BigDecimal::from(1000));
        assert_eq!(totals.grand_total, BigDecimal::from(1180));
    }

    #[test]
    fn test_slab_split() {
        let rates = GstRates::from_slab(BigDecimal::from(12));
        assert_eq!(rates.cgst_rate, BigDecimal::from(6));
        assert_eq!(rates.sgst_rate, BigDecimal::from(6));
        assert_eq!(rates.igst_rate, BigDecimal::from(12));
        assert!(rates.validate().is_ok());
    }

    #[test]
    fn test_rate_validation() {
        let rates = GstRates::new(dec("9"), dec("-1"), dec("18"));
        assert!(matches!(rates.validate(), Err(TaxError::InvalidRate(_))));

        let rates = GstRates::new(dec("9"), dec("9"), dec("100.01"));
        assert!(rates.validate().is_err());
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(&dec("180.365")).to_string(), "180.37");
        assert_eq!(round_money(&dec("1180")).to_string(), "1180.00");
    }
}

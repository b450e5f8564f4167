//! Amount-in-words rendering using the Indian numbering system

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};

use crate::types::{InvoiceError, InvoiceResult};

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

const UNITS: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spell out a whole amount, e.g. `1234567` becomes
/// "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Only".
///
/// Zero is rendered as "Zero" with no suffix.
pub fn to_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }
    format!("{} Only", indian_groups(amount))
}

/// Spell out a currency amount, rounded half-up to whole rupees
pub fn amount_in_words(amount: &BigDecimal) -> InvoiceResult<String> {
    if *amount < BigDecimal::from(0) {
        return Err(InvoiceError::Validation(format!(
            "Cannot spell out a negative amount: {}",
            amount
        )));
    }

    let rupees = amount
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_u64()
        .ok_or_else(|| InvoiceError::Validation(format!("Amount too large to spell out: {}", amount)))?;

    Ok(to_words(rupees))
}

/// Crore, lakh, thousand and remainder groups, skipping empty ones.
/// Crore counts above 99 are grouped again ("One Lakh Crore").
fn indian_groups(amount: u64) -> String {
    let crores = amount / CRORE;
    let lakhs = (amount % CRORE) / LAKH;
    let thousands = (amount % LAKH) / THOUSAND;
    let rest = amount % THOUSAND;

    let mut parts: Vec<String> = Vec::new();
    if crores > 0 {
        parts.push(format!("{} Crore", indian_groups(crores)));
    }
    if lakhs > 0 {
        parts.push(format!("{} Lakh", hundreds(lakhs)));
    }
    if thousands > 0 {
        parts.push(format!("{} Thousand", hundreds(thousands)));
    }
    if rest > 0 {
        parts.push(hundreds(rest));
    }

    parts.join(" ").trim().to_string()
}

/// Words for 1..=999
fn hundreds(n: u64) -> String {
    let mut words: Vec<&str> = Vec::new();

    let hundred = (n / 100) as usize;
    if hundred > 0 {
        words.push(UNITS[hundred]);
        words.push("Hundred");
    }

    let rem = (n % 100) as usize;
    match rem {
        0 => {}
        1..=9 => words.push(UNITS[rem]),
        10..=19 => words.push(TEENS[rem - 10]),
        _ => {
            words.push(TENS[rem / 10]);
            if rem % 10 > 0 {
                words.push(UNITS[rem % 10]);
            }
        }
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_zero() {
        assert_eq!(to_words(0), "Zero");
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(to_words(7), "Seven Only");
        assert_eq!(to_words(10), "Ten Only");
        assert_eq!(to_words(19), "Nineteen Only");
        assert_eq!(to_words(40), "Forty Only");
        assert_eq!(to_words(99), "Ninety Nine Only");
        assert_eq!(to_words(100), "One Hundred Only");
        assert_eq!(to_words(115), "One Hundred Fifteen Only");
        assert_eq!(to_words(999), "Nine Hundred Ninety Nine Only");
    }

    #[test]
    fn test_indian_groups() {
        assert_eq!(to_words(1_000), "One Thousand Only");
        assert_eq!(to_words(1_180), "One Thousand One Hundred Eighty Only");
        assert_eq!(to_words(100_000), "One Lakh Only");
        assert_eq!(
            to_words(1_234_567),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Only"
        );
    }

    #[test]
    fn test_zero_intermediate_groups() {
        assert_eq!(to_words(100_005), "One Lakh Five Only");
        assert_eq!(to_words(10_000_001), "One Crore One Only");
        assert_eq!(to_words(10_050_000), "One Crore Fifty Thousand Only");
        assert_eq!(to_words(2_000_300), "Twenty Lakh Three Hundred Only");
    }

    #[test]
    fn test_crore_and_above() {
        assert_eq!(to_words(10_000_000), "One Crore Only");
        assert_eq!(
            to_words(123_456_789),
            "Twelve Crore Thirty Four Lakh Fifty Six Thousand Seven Hundred Eighty Nine Only"
        );
        assert_eq!(to_words(9_990_000_000), "Nine Hundred Ninety Nine Crore Only");
        assert_eq!(to_words(1_000_000_000_000), "One Lakh Crore Only");
    }

    #[test]
    fn test_amount_in_words_rounds_half_up() {
        let amount = BigDecimal::from_str("1179.50").unwrap();
        assert_eq!(
            amount_in_words(&amount).unwrap(),
            "One Thousand One Hundred Eighty Only"
        );

        let amount = BigDecimal::from_str("0.49").unwrap();
        assert_eq!(amount_in_words(&amount).unwrap(), "Zero");
    }

    #[test]
    fn test_amount_in_words_rejects_negative() {
        let amount = BigDecimal::from(-5);
        assert!(matches!(
            amount_in_words(&amount),
            Err(InvoiceError::Validation(_))
        ));
    }
}

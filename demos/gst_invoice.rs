//! GST invoice calculation examples

use bigdecimal::BigDecimal;
use service_invoice_core::{
    amount_in_words, round_money, to_words, GstRates, InvoiceTotals, LineAmounts,
    ServiceLineItem, TaxType,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Service Invoice Core - GST Calculation Examples\n");

    // 1. Single line item
    println!("🔧 Line Item:");
    let amounts = LineAmounts::compute(2, &BigDecimal::from(750), &BigDecimal::from(18));
    println!("  2 × ₹750 @ 18%");
    println!("  Taxable Value: ₹{}", round_money(&amounts.taxable_value));
    println!("  GST Amount:    ₹{}", round_money(&amounts.gst_amount));
    println!("  Line Total:    ₹{}", round_money(&amounts.line_total));
    println!();

    // 2. Intra-state vs Inter-state totals on the same items
    let items = vec![
        ServiceLineItem::from_form("AC gas refill", "998729", "1", "1800", "18", None),
        ServiceLineItem::from_form("Condenser cleaning", "998729", "1", "700", "18", None),
        ServiceLineItem::from_form("Cabin filter", "842139", "2", "250", "18", Some("OEM")),
    ];
    let rates = GstRates::from_slab(BigDecimal::from(18));

    for tax_type in [TaxType::IntraState, TaxType::InterState] {
        let totals = InvoiceTotals::compute(&items, tax_type, &rates);
        println!("🏢 {:?}:", tax_type);
        println!("  Subtotal:    ₹{}", round_money(&totals.subtotal));
        println!("  CGST:        ₹{}", round_money(&totals.cgst));
        println!("  SGST:        ₹{}", round_money(&totals.sgst));
        println!("  IGST:        ₹{}", round_money(&totals.igst));
        println!("  Grand Total: ₹{}", round_money(&totals.grand_total));
        println!("  In words:    Rupees {}", amount_in_words(&totals.grand_total)?);
        println!();
    }

    // 3. Indian numbering
    println!("🔢 Amounts in Words:");
    for amount in [0u64, 1_180, 100_000, 1_234_567, 10_050_000, 123_456_789] {
        println!("  {:>11} → {}", amount, to_words(amount));
    }
    println!();

    // 4. Rate validation
    println!("✅ GST Rate Validation:");
    let invalid = GstRates::new(BigDecimal::from(9), BigDecimal::from(9), BigDecimal::from(118));
    match invalid.validate() {
        Ok(()) => println!("  ✓ Valid rates"),
        Err(e) => println!("  ❌ {}", e),
    }

    println!("\n🎉 GST calculation examples completed successfully!");
    Ok(())
}

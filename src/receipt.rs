use crate::basket::{parse_basket, BasketError};
use crate::tax::{TaxPolicy, TaxedLine};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// An ordered sequence of taxed lines with basket-level totals.
///
/// Line order is input order and is significant for rendering. Totals are
/// sums of the per-line values, which are already rounded to two decimals;
/// nothing is re-rounded at the aggregate level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub lines: Vec<TaxedLine>,
    pub total_tax: Decimal,
    pub grand_total: Decimal,
}

impl Receipt {
    /// Aggregate a sequence of taxed lines. A receipt must describe at least
    /// one line.
    pub fn new(lines: Vec<TaxedLine>) -> Result<Self, BasketError> {
        if lines.is_empty() {
            return Err(BasketError::EmptyBasket);
        }
        let total_tax = lines.iter().map(|l| l.tax_amount).sum();
        let grand_total = lines.iter().map(|l| l.total_price).sum();
        Ok(Receipt {
            lines,
            total_tax,
            grand_total,
        })
    }

    /// Parse a whole basket text and compute its receipt.
    pub fn from_text(basket: &str, policy: &TaxPolicy) -> Result<Self, BasketError> {
        let lines = parse_basket(basket)?;
        Receipt::new(lines.into_iter().map(|line| policy.apply(line)).collect())
    }

    /// Structured view of the receipt.
    pub fn summary(&self) -> ReceiptSummary {
        ReceiptSummary {
            products: self
                .lines
                .iter()
                .map(|taxed| ProductRecord {
                    product: taxed.line.product.clone(),
                    quantity: taxed.line.quantity,
                    total_price: taxed.total_price,
                    tax_amount: taxed.tax_amount,
                })
                .collect(),
            sale_taxes: self.total_tax,
            total: self.grand_total,
        }
    }
}

impl fmt::Display for Receipt {
    /// One line per product in input order, then the two totals. No trailing
    /// newline after the final line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for taxed in &self.lines {
            writeln!(
                f,
                "{} {}: {:.2}",
                taxed.line.quantity, taxed.line.product, taxed.total_price
            )?;
        }
        writeln!(f, "Sales Taxes: {:.2}", self.total_tax)?;
        write!(f, "Total: {:.2}", self.grand_total)
    }
}

/// Structured receipt output.
///
/// Decimal amounts serialize as exact two-decimal values.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ReceiptSummary {
    /// Per-line records, in input order
    pub products: Vec<ProductRecord>,
    /// Sum of tax amounts across all lines
    #[schemars(with = "f64")]
    pub sale_taxes: Decimal,
    /// Sum of line totals across all lines
    #[schemars(with = "f64")]
    pub total: Decimal,
}

/// One line of the structured receipt.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ProductRecord {
    pub product: String,
    pub quantity: u32,
    #[schemars(with = "f64")]
    pub total_price: Decimal,
    #[schemars(with = "f64")]
    pub tax_amount: Decimal,
}

use crate::basket::ProductLine;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// Base sales rate, waived for exempt product categories.
const BASE_RATE: Decimal = dec!(0.10);

/// Flat surcharge on imported products.
const IMPORT_RATE: Decimal = dec!(0.05);

/// Tax amounts are rounded up to the nearest multiple of this increment.
const ROUNDING_INCREMENT: Decimal = dec!(0.05);

/// Default exempt categories: books, food and medicine, by name.
const DEFAULT_EXEMPT: &[&str] = &[
    "book",
    "chocolate bar",
    "packet of headache pills",
    "box of chocolates",
];

/// Classifies products and computes their sales tax.
///
/// The exempt category set is configuration, not a code path: pass a custom
/// set to [`TaxPolicy::new`] to extend it without touching the calculator.
#[derive(Debug, Clone)]
pub struct TaxPolicy {
    exempt_products: HashSet<String>,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::new(DEFAULT_EXEMPT.iter().copied())
    }
}

impl TaxPolicy {
    pub fn new<I, S>(exempt_products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TaxPolicy {
            exempt_products: exempt_products.into_iter().map(Into::into).collect(),
        }
    }

    /// A product is exempt if its name, with an optional leading "imported "
    /// prefix stripped, exactly equals one of the exempt categories.
    pub fn is_exempt(&self, product: &str) -> bool {
        let category = product.strip_prefix("imported ").unwrap_or(product);
        self.exempt_products.contains(category)
    }

    /// Sum of the applicable component rates: 0.00, 0.05, 0.10 or 0.15.
    pub fn tax_rate(&self, product: &str) -> Decimal {
        let mut rate = Decimal::ZERO;
        if !self.is_exempt(product) {
            rate += BASE_RATE;
        }
        if is_imported(product) {
            rate += IMPORT_RATE;
        }
        rate
    }

    /// Classify a product line and compute its tax and total.
    pub fn apply(&self, line: ProductLine) -> TaxedLine {
        let tax_rate = self.tax_rate(&line.product);
        let raw_tax = line.subtotal() * tax_rate;
        let tax_amount = round2(round_up_to_increment(raw_tax));
        let total_price = round2(line.subtotal() + tax_amount);
        TaxedLine {
            line,
            tax_rate,
            tax_amount,
            total_price,
        }
    }
}

/// A product is imported if its name contains the token "imported" anywhere.
/// Substring containment, not prefix-only, to tolerate variant phrasing.
pub fn is_imported(product: &str) -> bool {
    product.contains("imported")
}

/// A product line with its computed tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxedLine {
    pub line: ProductLine,
    pub tax_rate: Decimal,
    /// Always a non-negative multiple of 0.05; exactly 0.00 at rate 0.
    pub tax_amount: Decimal,
    /// Line subtotal plus tax, at two decimals.
    pub total_price: Decimal,
}

/// The smallest multiple of the increment that is >= the raw tax.
fn round_up_to_increment(raw_tax: Decimal) -> Decimal {
    (raw_tax / ROUNDING_INCREMENT).ceil() * ROUNDING_INCREMENT
}

/// Half-up rounding to two decimals, rescaled for two-decimal display.
pub(crate) fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u32, product: &str, unit_price: Decimal) -> ProductLine {
        ProductLine {
            quantity,
            product: product.to_string(),
            unit_price,
        }
    }

    #[test]
    fn exempt_categories_match_exactly() {
        let policy = TaxPolicy::default();
        assert!(policy.is_exempt("book"));
        assert!(policy.is_exempt("chocolate bar"));
        assert!(policy.is_exempt("packet of headache pills"));
        assert!(policy.is_exempt("box of chocolates"));
        assert!(!policy.is_exempt("music CD"));
        assert!(!policy.is_exempt("books"));
        assert!(!policy.is_exempt("bottle of perfume"));
    }

    #[test]
    fn exemption_strips_leading_imported_prefix_only() {
        let policy = TaxPolicy::default();
        assert!(policy.is_exempt("imported box of chocolates"));
        // Only a leading prefix is stripped, so an infix "imported" keeps the
        // base rate even though the product is food in the business sense
        assert!(!policy.is_exempt("box of imported chocolates"));
    }

    #[test]
    fn import_detection_is_substring_containment() {
        assert!(is_imported("imported bottle of perfume"));
        assert!(is_imported("box of imported chocolates"));
        assert!(!is_imported("bottle of perfume"));
    }

    #[test]
    fn rate_composition() {
        let policy = TaxPolicy::default();
        assert_eq!(policy.tax_rate("book"), dec!(0.00));
        assert_eq!(policy.tax_rate("imported box of chocolates"), dec!(0.05));
        assert_eq!(policy.tax_rate("music CD"), dec!(0.10));
        assert_eq!(policy.tax_rate("imported bottle of perfume"), dec!(0.15));
    }

    #[test]
    fn classification_ignores_quantity_and_price() {
        let policy = TaxPolicy::default();
        let cheap = policy.apply(line(1, "music CD", dec!(0.01)));
        let dear = policy.apply(line(7, "music CD", dec!(999.99)));
        assert_eq!(cheap.tax_rate, dear.tax_rate);
    }

    #[test]
    fn custom_exempt_set_is_configuration() {
        let policy = TaxPolicy::new(["bag of apples"]);
        assert!(policy.is_exempt("bag of apples"));
        assert!(!policy.is_exempt("book"));
    }

    #[test]
    fn exempt_domestic_line_has_zero_tax() {
        let policy = TaxPolicy::default();
        let taxed = policy.apply(line(2, "book", dec!(12.49)));
        assert_eq!(taxed.tax_amount, dec!(0.00));
        assert_eq!(taxed.total_price, dec!(24.98));
    }

    #[test]
    fn base_rate_rounds_up_to_increment() {
        // raw tax 1.499 rounds up to 1.50
        let policy = TaxPolicy::default();
        let taxed = policy.apply(line(1, "music CD", dec!(14.99)));
        assert_eq!(taxed.tax_amount, dec!(1.50));
        assert_eq!(taxed.total_price, dec!(16.49));
    }

    #[test]
    fn import_surcharge_applies_to_exempt_products() {
        let policy = TaxPolicy::default();
        let taxed = policy.apply(line(1, "imported box of chocolates", dec!(10.00)));
        assert_eq!(taxed.tax_amount, dec!(0.50));
        assert_eq!(taxed.total_price, dec!(10.50));
    }

    #[test]
    fn combined_rate_rounds_up_to_increment() {
        // raw tax 47.50 * 0.15 = 7.125 rounds up to 7.15
        let policy = TaxPolicy::default();
        let taxed = policy.apply(line(1, "imported bottle of perfume", dec!(47.50)));
        assert_eq!(taxed.tax_rate, dec!(0.15));
        assert_eq!(taxed.tax_amount, dec!(7.15));
        assert_eq!(taxed.total_price, dec!(54.65));
    }

    #[test]
    fn tax_is_never_rounded_down() {
        let policy = TaxPolicy::default();
        for (product, price, expected) in [
            ("imported box of chocolates", dec!(11.25), dec!(0.60)),
            ("imported bottle of perfume", dec!(27.99), dec!(4.20)),
            ("bottle of perfume", dec!(18.99), dec!(1.90)),
        ] {
            let taxed = policy.apply(line(1, product, price));
            assert_eq!(taxed.tax_amount, expected);
            assert!(taxed.tax_amount >= taxed.line.subtotal() * taxed.tax_rate);
        }
    }

    #[test]
    fn tax_is_a_multiple_of_the_increment() {
        let policy = TaxPolicy::default();
        for price in [dec!(0.01), dec!(0.99), dec!(14.99), dec!(47.50), dec!(99.97)] {
            for product in ["music CD", "imported bottle of perfume"] {
                let taxed = policy.apply(line(3, product, price));
                assert_eq!(
                    taxed.tax_amount % ROUNDING_INCREMENT,
                    dec!(0.00),
                    "{product} at {price}"
                );
            }
        }
    }

    #[test]
    fn exact_multiple_does_not_round_up_further() {
        // raw tax 10.00 * 0.10 = 1.00 is already a multiple of 0.05
        let policy = TaxPolicy::default();
        let taxed = policy.apply(line(1, "music CD", dec!(10.00)));
        assert_eq!(taxed.tax_amount, dec!(1.00));
    }

    #[test]
    fn zero_price_line_is_free() {
        let policy = TaxPolicy::default();
        let taxed = policy.apply(line(1, "music CD", dec!(0.00)));
        assert_eq!(taxed.tax_amount, dec!(0.00));
        assert_eq!(taxed.total_price, dec!(0.00));
    }

    #[test]
    fn tax_scales_with_quantity() {
        // 2 * 14.99 = 29.98, raw tax 2.998 rounds up to 3.00
        let policy = TaxPolicy::default();
        let taxed = policy.apply(line(2, "music CD", dec!(14.99)));
        assert_eq!(taxed.tax_amount, dec!(3.00));
        assert_eq!(taxed.total_price, dec!(32.98));
    }
}

use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BasketError {
    #[error("basket is empty")]
    EmptyBasket,
    #[error("malformed basket line: {0:?}")]
    MalformedLine(String),
}

/// One basket entry: `<quantity> <product name> at <unit price>`.
///
/// Built by parsing a single line of basket text and never mutated afterwards.
/// `quantity` is positive, `product` is non-blank and `unit_price` carries
/// exactly two fractional digits as written in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLine {
    pub quantity: u32,
    pub product: String,
    pub unit_price: Decimal,
}

impl ProductLine {
    /// Unit price multiplied by quantity.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl FromStr for ProductLine {
    type Err = BasketError;

    /// Parse one basket line.
    ///
    /// The price suffix is anchored at the end of the line and the quantity at
    /// the start; everything in between is the product name. The name may
    /// itself contain the word "at" - only the last " at " followed by a
    /// well-formed price terminates it.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || BasketError::MalformedLine(text.to_string());

        let (head, price) = text.rsplit_once(" at ").ok_or_else(malformed)?;
        let (quantity, product) = head.split_once(' ').ok_or_else(malformed)?;

        if quantity.is_empty() || !quantity.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let quantity: u32 = quantity.parse().map_err(|_| malformed())?;
        if quantity == 0 {
            return Err(malformed());
        }

        if product.trim().is_empty() {
            return Err(malformed());
        }

        let unit_price = parse_price(price).ok_or_else(malformed)?;

        Ok(ProductLine {
            quantity,
            product: product.to_string(),
            unit_price,
        })
    }
}

/// Price grammar: one or more digits, a dot, exactly two fractional digits.
fn parse_price(s: &str) -> Option<Decimal> {
    let (whole, frac) = s.split_once('.')?;
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() != 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a whole basket, one product line per physical line.
///
/// A single malformed line fails the whole basket - silently dropping it
/// would misrepresent the receipt.
pub fn parse_basket(text: &str) -> Result<Vec<ProductLine>, BasketError> {
    if text.trim().is_empty() {
        return Err(BasketError::EmptyBasket);
    }
    text.lines().map(str::parse).collect()
}

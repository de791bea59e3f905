//! Response DTOs and display helpers for pricing results.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{round_money, Adjustment, ClampBound, PriceQuote};
use super::validation::PricingError;

/// Outcome of one evaluation; exactly one of `price` / `error` is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceResult {
    pub success: bool,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<&'static str>,
}

impl From<&Result<Decimal, PricingError>> for PriceResult {
    fn from(result: &Result<Decimal, PricingError>) -> Self {
        match result {
            Ok(price) => PriceResult {
                success: true,
                price: Some(*price),
                error: None,
                error_type: None,
            },
            Err(err) => PriceResult::from(err),
        }
    }
}

impl From<&PricingError> for PriceResult {
    fn from(err: &PricingError) -> Self {
        PriceResult {
            success: false,
            price: None,
            error: Some(err.to_string()),
            error_type: Some(err.kind()),
        }
    }
}

/// Response for a successful evaluation
#[derive(Debug, Serialize)]
pub struct PriceQuoteResponse {
    #[serde(flatten)]
    pub result: PriceResult,
    /// Rendered price, e.g. `$110.00`
    pub display: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unclamped_price: Decimal,
    pub adjustments: Vec<Adjustment>,
    pub clamped_to: Option<ClampBound>,
}

impl From<PriceQuote> for PriceQuoteResponse {
    fn from(quote: PriceQuote) -> Self {
        let result = Ok(quote.price);
        PriceQuoteResponse {
            display: render_price(&result),
            result: PriceResult::from(&result),
            base_price: quote.base_price,
            unclamped_price: quote.unclamped_price,
            adjustments: quote.adjustments,
            clamped_to: quote.clamped_to,
        }
    }
}

/// Render a price as dollars with two decimals.
pub fn format_price(price: Decimal) -> String {
    let mut rounded = round_money(price, 2);
    rounded.rescale(2);
    format!("${}", rounded)
}

/// Render an evaluation the way the booking page displays it:
/// `$72.25` on success, `Error: <message>` otherwise.
pub fn render_price(result: &Result<Decimal, PricingError>) -> String {
    match result {
        Ok(price) => format_price(*price),
        Err(err) => format!("Error: {}", err),
    }
}

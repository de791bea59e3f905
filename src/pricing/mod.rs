//! Pricing engine module for appointment bookings.
//!
//! Computes a service price from a base price and the business's
//! adjustment rules (weekend and peak-hour surcharges, last-minute and
//! cancellation discounts), then clamps it to the service's price range.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod validation;

// Re-export commonly used items
pub use calculators::{evaluate, quote, round_money, Adjustment, AdjustmentKind, ClampBound, PriceQuote};
pub use models::{Business, Context, PricingCatalog, Service};
pub use responses::{format_price, render_price, PriceResult};
pub use routes::router;
pub use validation::{validate, BookingWindow, DateField, PricingError};

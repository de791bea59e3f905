//! Request DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::models::{Business, Context, Service};

/// Request to evaluate a price.
///
/// Business and service fall back to the configured catalog when omitted.
#[derive(Debug, Deserialize)]
pub struct EvaluatePriceRequest {
    #[serde(default)]
    pub appt_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub book_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub was_cancelled: bool,
    #[serde(default)]
    pub cancellation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub business: Option<Business>,
    #[serde(default)]
    pub service: Option<Service>,
}

impl EvaluatePriceRequest {
    pub fn context(&self) -> Context {
        Context {
            appt_date: self.appt_date,
            book_date: self.book_date,
            was_cancelled: self.was_cancelled,
            cancellation_date: self.cancellation_date,
        }
    }
}

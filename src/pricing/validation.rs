//! Input validation for pricing requests.
//!
//! This is the single place where absent timestamps turn into typed errors;
//! everything downstream works on a `BookingWindow` whose required fields
//! are always present.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::models::Context;

/// Timestamp that was found out of order relative to the appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    Booking,
    Cancellation,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateField::Booking => write!(f, "Booking"),
            DateField::Cancellation => write!(f, "Cancellation"),
        }
    }
}

/// Pricing error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Missing required dates")]
    MissingDates,

    #[error("{0} date cannot be after appointment date")]
    InvalidOrder(DateField),

    #[error("Configuration error: {message}")]
    Configuration { message: String, errors: Vec<String> },
}

impl PricingError {
    /// Stable tag for API consumers
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::MissingDates => "missing_dates",
            PricingError::InvalidOrder(_) => "invalid_order",
            PricingError::Configuration { .. } => "configuration",
        }
    }
}

/// Validated timestamps of one booking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingWindow {
    pub appointment: DateTime<Utc>,
    pub booked: DateTime<Utc>,
    /// Set only when the context reports a prior cancellation with a date
    pub cancelled: Option<DateTime<Utc>>,
}

/// Validate a booking context.
///
/// Checks run in order and the first failure wins:
/// 1. appointment and booking dates must both be present
/// 2. booking must not be after the appointment
/// 3. a cancellation date, when given, must not be after the appointment
///
/// The cancellation date is order-checked even when `was_cancelled` is false.
pub fn validate(context: &Context) -> Result<BookingWindow, PricingError> {
    let (appointment, booked) = match (context.appt_date, context.book_date) {
        (Some(appt), Some(book)) => (appt, book),
        _ => return Err(PricingError::MissingDates),
    };

    if booked > appointment {
        return Err(PricingError::InvalidOrder(DateField::Booking));
    }

    if let Some(cancelled) = context.cancellation_date {
        if cancelled > appointment {
            return Err(PricingError::InvalidOrder(DateField::Cancellation));
        }
    }

    Ok(BookingWindow {
        appointment,
        booked,
        cancelled: context
            .cancellation_date
            .filter(|_| context.was_cancelled),
    })
}

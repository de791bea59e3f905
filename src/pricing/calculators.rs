//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no logging, no shared state.
//! Every call works only on its borrowed arguments, so evaluations may run
//! from any number of callers at once.

use chrono::{DateTime, Datelike, Timelike, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{Business, Context, Service};
use super::validation::{validate, PricingError};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Presentation only: evaluation itself never rounds.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use appointment_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Elapsed time from `earlier` to `later` in hours (milliseconds / 3,600,000).
///
/// Negative when `later` precedes `earlier`.
pub fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> Decimal {
    let millis = (later - earlier).num_milliseconds();
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}

/// Constrain a price to `[min, max]`; `min` wins if the bounds are inverted.
pub fn clamp_price(price: Decimal, min: Decimal, max: Decimal) -> Decimal {
    min.max(price.min(max))
}

/// Price adjustment that fired during evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    WeekendSurcharge,
    PeakHourSurcharge,
    LastMinuteDiscount,
    CancellationDiscount,
}

/// One multiplicative step of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    #[serde(with = "rust_decimal::serde::str")]
    pub factor: Decimal,
}

/// Bound that replaced the computed price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampBound {
    Min,
    Max,
}

/// Evaluated price with the steps that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub base_price: Decimal,
    /// Applied adjustments, in pipeline order
    pub adjustments: Vec<Adjustment>,
    pub unclamped_price: Decimal,
    pub price: Decimal,
    pub clamped_to: Option<ClampBound>,
}

/// Compute the final price for one booking.
///
/// Validation failures are returned as errors; once the context validates
/// the computation cannot fail.
pub fn evaluate(
    business: &Business,
    service: &Service,
    context: &Context,
) -> Result<Decimal, PricingError> {
    quote(business, service, context).map(|q| q.price)
}

/// Compute the final price together with its breakdown.
///
/// Pipeline, each step multiplying a running price that starts at
/// `service.base_price`:
/// 1. weekend surcharge, if the appointment's weekday is configured
/// 2. peak-hour surcharge, if the appointment's hour is in the window
/// 3. at most one discount: last-minute first, else cancellation
/// 4. clamp to `[service.min_price, service.max_price]`
///
/// Weekday and hour are read in the business's timezone.
pub fn quote(
    business: &Business,
    service: &Service,
    context: &Context,
) -> Result<PriceQuote, PricingError> {
    let window = validate(context)?;
    let rules = &business.pricing_rules;
    let local = window.appointment.with_timezone(&business.timezone);

    let mut price = service.base_price;
    let mut adjustments = Vec::new();
    // Overflow saturates; the clamp below brings the price back into range
    let mut apply = |price: &mut Decimal, kind: AdjustmentKind, factor: Decimal| {
        *price = price.checked_mul(factor).unwrap_or(Decimal::MAX);
        adjustments.push(Adjustment { kind, factor });
    };

    // 0 = Sunday
    let weekday = local.weekday().num_days_from_sunday() as u8;
    if rules.weekend_days.days.contains(&weekday) {
        apply(
            &mut price,
            AdjustmentKind::WeekendSurcharge,
            rules.weekend_days.multiplier,
        );
    }

    if rules.peak_hours.contains(local.hour()) {
        apply(
            &mut price,
            AdjustmentKind::PeakHourSurcharge,
            rules.peak_hours.multiplier,
        );
    }

    let last_minute = &rules.discounts.last_minute;
    let cancellation = &rules.discounts.cancellation;
    if hours_between(window.booked, window.appointment) <= last_minute.threshold_hours {
        apply(
            &mut price,
            AdjustmentKind::LastMinuteDiscount,
            last_minute.factor(),
        );
    } else if let Some(cancelled) = window.cancelled {
        if hours_between(cancelled, window.appointment) <= cancellation.threshold_hours {
            apply(
                &mut price,
                AdjustmentKind::CancellationDiscount,
                cancellation.factor(),
            );
        }
    }

    let final_price = clamp_price(price, service.min_price, service.max_price);
    let clamped_to = if final_price == price {
        None
    } else if final_price == service.min_price {
        Some(ClampBound::Min)
    } else {
        Some(ClampBound::Max)
    };

    Ok(PriceQuote {
        base_price: service.base_price,
        adjustments,
        unclamped_price: price,
        price: final_price,
        clamped_to,
    })
}

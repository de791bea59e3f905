//! Configuration and per-booking models for the pricing engine.
//!
//! Business and service records are immutable configuration, built once by
//! the caller and borrowed by every evaluation. `Context` is the only
//! per-request input.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::validation::PricingError;

/// Business whose pricing rules govern the computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub industry: String,
    /// Zone in which the appointment's weekday and hour are read
    pub timezone: Tz,
    pub pricing_rules: PricingRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    pub peak_hours: PeakHours,
    pub weekend_days: WeekendDays,
    /// Carried for configuration compatibility; evaluation does not read it.
    pub urgency_threshold: UrgencyThreshold,
    pub discounts: Discounts,
}

/// Half-open hour window `[start, end)` with a surcharge multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakHours {
    pub start: u32,
    pub end: u32,
    pub multiplier: Decimal,
}

impl PeakHours {
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// Surcharged days of the week, numbered 0 (Sunday) through 6 (Saturday)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekendDays {
    pub days: BTreeSet<u8>,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyThreshold {
    pub hours: Decimal,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discounts {
    pub last_minute: DiscountRule,
    pub cancellation: DiscountRule,
}

/// Fractional discount applied when an elapsed window is within `threshold_hours`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub threshold_hours: Decimal,
    pub discount: Decimal,
}

impl DiscountRule {
    /// Multiplier form of the discount, `1 - discount`
    pub fn factor(&self) -> Decimal {
        Decimal::ONE - self.discount
    }
}

/// Bookable offering with its allowed price range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Not used by pricing
    #[serde(default)]
    pub duration_minutes: u32,
    pub base_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

/// Per-booking facts for a single evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub appt_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub book_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub was_cancelled: bool,
    #[serde(default)]
    pub cancellation_date: Option<DateTime<Utc>>,
}

/// Business and service pair the server prices against by default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    pub business: Business,
    pub service: Service,
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self {
            business: Business {
                id: "biz_123".to_string(),
                name: "Bella's Hair Studio".to_string(),
                industry: "beauty".to_string(),
                timezone: chrono_tz::America::New_York,
                pricing_rules: PricingRules {
                    peak_hours: PeakHours {
                        start: 12,
                        end: 15,
                        multiplier: dec!(1.15),
                    },
                    weekend_days: WeekendDays {
                        days: BTreeSet::from([5, 6, 0]),
                        multiplier: dec!(1.5),
                    },
                    urgency_threshold: UrgencyThreshold {
                        hours: dec!(5),
                        multiplier: dec!(1.1),
                    },
                    discounts: Discounts {
                        last_minute: DiscountRule {
                            threshold_hours: dec!(4),
                            discount: dec!(0.15),
                        },
                        cancellation: DiscountRule {
                            threshold_hours: dec!(36),
                            discount: dec!(0.10),
                        },
                    },
                },
            },
            service: Service {
                id: "svc_456".to_string(),
                name: "Haircut & Style".to_string(),
                duration_minutes: 60,
                base_price: dec!(85),
                min_price: dec!(65),
                max_price: dec!(110),
            },
        }
    }
}

impl PricingCatalog {
    /// Check configured rules and price bounds, collecting every problem found.
    ///
    /// `base_price` outside `[min_price, max_price]` is tolerated: clamping
    /// handles it at evaluation time.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();
        let rules = &self.business.pricing_rules;

        let peak = &rules.peak_hours;
        // end = 24 expresses a window running to midnight
        if peak.start >= 24 || peak.end > 24 {
            errors.push(format!(
                "peak_hours {}..{} must lie within 0..24",
                peak.start, peak.end
            ));
        }
        if peak.start >= peak.end {
            errors.push(format!(
                "peak_hours.start ({}) must be before peak_hours.end ({})",
                peak.start, peak.end
            ));
        }
        check_multiplier(&mut errors, "peak_hours.multiplier", peak.multiplier);

        if let Some(day) = rules.weekend_days.days.iter().find(|d| **d > 6) {
            errors.push(format!("weekend_days.days contains {} (expected 0-6)", day));
        }
        check_multiplier(&mut errors, "weekend_days.multiplier", rules.weekend_days.multiplier);

        check_multiplier(
            &mut errors,
            "urgency_threshold.multiplier",
            rules.urgency_threshold.multiplier,
        );
        if rules.urgency_threshold.hours < Decimal::ZERO {
            errors.push("urgency_threshold.hours must not be negative".to_string());
        }

        check_discount(&mut errors, "discounts.last_minute", &rules.discounts.last_minute);
        check_discount(&mut errors, "discounts.cancellation", &rules.discounts.cancellation);

        let service = &self.service;
        for (field, value) in [
            ("base_price", service.base_price),
            ("min_price", service.min_price),
            ("max_price", service.max_price),
        ] {
            if value <= Decimal::ZERO {
                errors.push(format!("service.{} must be positive", field));
            }
        }
        if service.min_price > service.max_price {
            errors.push(format!(
                "service.min_price ({}) exceeds service.max_price ({})",
                service.min_price, service.max_price
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::Configuration {
                message: format!(
                    "Invalid pricing configuration for {} / {}",
                    self.business.id, self.service.id
                ),
                errors,
            })
        }
    }

    /// Whether the base price sits inside the service's own bounds
    pub fn base_price_in_range(&self) -> bool {
        let s = &self.service;
        s.min_price <= s.base_price && s.base_price <= s.max_price
    }
}

fn check_multiplier(errors: &mut Vec<String>, field: &str, value: Decimal) {
    if value <= Decimal::ZERO {
        errors.push(format!("{} must be positive (got {})", field, value));
    }
}

fn check_discount(errors: &mut Vec<String>, field: &str, rule: &DiscountRule) {
    if rule.discount < Decimal::ZERO || rule.discount >= Decimal::ONE {
        errors.push(format!(
            "{}.discount must be in [0, 1) (got {})",
            field, rule.discount
        ));
    }
    if rule.threshold_hours < Decimal::ZERO {
        errors.push(format!("{}.threshold_hours must not be negative", field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = PricingCatalog::default();
        assert!(catalog.validate().is_ok());
        assert!(catalog.base_price_in_range());
    }

    #[test]
    fn test_peak_hours_window_is_half_open() {
        let peak = PricingCatalog::default().business.pricing_rules.peak_hours;
        assert!(!peak.contains(11));
        assert!(peak.contains(12));
        assert!(peak.contains(14));
        assert!(!peak.contains(15));
    }

    #[test]
    fn test_discount_factor() {
        let rule = DiscountRule {
            threshold_hours: dec!(4),
            discount: dec!(0.15),
        };
        assert_eq!(rule.factor(), dec!(0.85));
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut catalog = PricingCatalog::default();
        let rules = &mut catalog.business.pricing_rules;
        rules.peak_hours.start = 16;
        rules.weekend_days.days.insert(7);
        rules.discounts.last_minute.discount = dec!(1);
        catalog.service.min_price = dec!(200);

        match catalog.validate() {
            Err(PricingError::Configuration { errors, .. }) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| e.contains("peak_hours.start")));
                assert!(errors.iter().any(|e| e.contains("weekend_days")));
                assert!(errors.iter().any(|e| e.contains("last_minute")));
                assert!(errors.iter().any(|e| e.contains("min_price")));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_peak_window_may_run_to_midnight() {
        let mut catalog = PricingCatalog::default();
        catalog.business.pricing_rules.peak_hours.start = 20;
        catalog.business.pricing_rules.peak_hours.end = 24;
        assert!(catalog.validate().is_ok());
        assert!(catalog.business.pricing_rules.peak_hours.contains(23));

        catalog.business.pricing_rules.peak_hours.end = 25;
        match catalog.validate() {
            Err(PricingError::Configuration { errors, .. }) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("within 0..24"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_base_price_outside_bounds_is_tolerated() {
        let mut catalog = PricingCatalog::default();
        catalog.service.base_price = dec!(150);
        assert!(catalog.validate().is_ok());
        assert!(!catalog.base_price_in_range());
    }

    #[test]
    fn test_catalog_deserializes_numeric_json() {
        let json = serde_json::json!({
            "business": {
                "id": "biz_1",
                "name": "Studio",
                "timezone": "Europe/London",
                "pricing_rules": {
                    "peak_hours": { "start": 9, "end": 11, "multiplier": 1.2 },
                    "weekend_days": { "days": [0, 6], "multiplier": 1.25 },
                    "urgency_threshold": { "hours": 2, "multiplier": 1.05 },
                    "discounts": {
                        "last_minute": { "threshold_hours": 3, "discount": 0.2 },
                        "cancellation": { "threshold_hours": 24, "discount": 0.05 }
                    }
                }
            },
            "service": {
                "id": "svc_1",
                "name": "Trim",
                "base_price": 40,
                "min_price": 30,
                "max_price": 60
            }
        });

        let catalog: PricingCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(catalog.business.timezone, chrono_tz::Europe::London);
        assert_eq!(catalog.business.industry, "");
        assert_eq!(catalog.business.pricing_rules.peak_hours.multiplier, dec!(1.2));
        assert!(catalog.business.pricing_rules.weekend_days.days.contains(&6));
        assert_eq!(catalog.service.duration_minutes, 0);
        assert_eq!(catalog.service.base_price, dec!(40));
    }
}

//! HTTP routes for the pricing engine.

use std::borrow::Cow;

use axum::{extract::State, routing::get, routing::post, Json, Router};
use tracing::{debug, info};

use crate::error::Result;
use crate::AppState;

use super::calculators::quote;
use super::models::PricingCatalog;
use super::requests::EvaluatePriceRequest;
use super::responses::PriceQuoteResponse;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/evaluate", post(evaluate_price))
        .route("/api/pricing/catalog", get(catalog))
}

/// Evaluate a price against the configured catalog, or against inline
/// business/service records when the request carries them.
async fn evaluate_price(
    State(state): State<AppState>,
    Json(request): Json<EvaluatePriceRequest>,
) -> Result<Json<PriceQuoteResponse>> {
    let catalog: Cow<'_, PricingCatalog> = match (&request.business, &request.service) {
        (None, None) => Cow::Borrowed(state.catalog.as_ref()),
        (business, service) => {
            let catalog = PricingCatalog {
                business: business.clone().unwrap_or_else(|| state.catalog.business.clone()),
                service: service.clone().unwrap_or_else(|| state.catalog.service.clone()),
            };
            catalog.validate()?;
            Cow::Owned(catalog)
        }
    };

    let context = request.context();
    let result = quote(&catalog.business, &catalog.service, &context)?;

    info!(
        business = %catalog.business.id,
        service = %catalog.service.id,
        price = %result.price,
        adjustments = result.adjustments.len(),
        "Price evaluated"
    );
    debug!(?context, ?result, "Pricing breakdown");

    Ok(Json(PriceQuoteResponse::from(result)))
}

/// Configured business and service
async fn catalog(State(state): State<AppState>) -> Json<PricingCatalog> {
    Json(state.catalog.as_ref().clone())
}

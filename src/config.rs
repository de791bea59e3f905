//! Runtime configuration loaded from the environment

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::pricing::PricingCatalog;

/// Server settings read from `HOST`, `PORT` and `PRICING_CATALOG`
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// JSON file holding `{ "business": .., "service": .. }`
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Build from process environment (after `.env` has been loaded)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            catalog_path: lookup("PRICING_CATALOG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid bind address {}:{}", self.host, self.port)))
    }

    /// Load and validate the pricing catalog, falling back to the built-in one
    pub fn load_catalog(&self) -> Result<PricingCatalog> {
        let catalog = match &self.catalog_path {
            Some(path) => read_catalog(path)?,
            None => {
                info!("PRICING_CATALOG not set, using built-in catalog");
                PricingCatalog::default()
            }
        };

        catalog.validate()?;
        if !catalog.base_price_in_range() {
            warn!(
                service = %catalog.service.id,
                "Base price {} lies outside [{}, {}]; it will be clamped",
                catalog.service.base_price,
                catalog.service.min_price,
                catalog.service.max_price
            );
        }

        info!(
            business = %catalog.business.id,
            service = %catalog.service.id,
            timezone = %catalog.business.timezone,
            "Pricing catalog loaded"
        );
        Ok(catalog)
    }
}

fn read_catalog(path: &Path) -> Result<PricingCatalog> {
    info!("Reading pricing catalog from {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    let catalog = serde_json::from_str(&raw)?;
    Ok(catalog)
}

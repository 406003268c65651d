//! # Service Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CampaignSource / CatalogSource failure                                 │
//! │       │  SourceError                                                    │
//! │       ▼                                                                 │
//! │  ServiceError::CampaignSource / ::Catalog  ← which collaborator failed  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Consumer shows "promotions unavailable", NOT "no promotions"          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty campaign list is a success ("no discounts apply"). A source that
//! could not be reached is an error. The two must never be conflated.

use thiserror::Error;
use titan_promo_core::ValidationError;

/// Failures reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Backend could not be reached or timed out.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Credentials missing or rejected.
    #[error("Source rejected credentials for tenant {tenant_id}")]
    Unauthorized { tenant_id: String },

    /// Backend answered with something that is not a campaign list / product.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Context could not be built.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors surfaced by [`crate::PromotionService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Campaigns could not be retrieved.
    #[error("Campaign source failed: {0}")]
    CampaignSource(#[source] SourceError),

    /// Product price could not be retrieved.
    #[error("Catalog failed: {0}")]
    Catalog(#[source] SourceError),

    /// Catalog has no such product.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Caller input rejected before pricing.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for service results.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ServiceError::CampaignSource(SourceError::Unavailable("timeout".to_string()));
        assert_eq!(
            err.to_string(),
            "Campaign source failed: Source unavailable: timeout"
        );

        let err = ServiceError::ProductNotFound(42);
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = SourceError::Unauthorized {
            tenant_id: "store-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Source rejected credentials for tenant store-1"
        );
    }

    #[test]
    fn test_validation_converts_to_service_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let err: ServiceError = validation_err.into();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}

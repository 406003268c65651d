//! # titan-promo-service: Promotions for Consumers
//!
//! Connects the pure pricing logic in `titan-promo-core` to the systems that
//! feed it: a campaign source and a product catalog.
//!
//! ## Module Organization
//! ```text
//! titan_promo_service/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── config.rs       ◄─── SourceContext: tenant, environment, credentials
//! ├── source.rs       ◄─── CampaignSource / CatalogSource traits + in-memory impls
//! ├── service.rs      ◄─── PromotionService: the consumer-facing operations
//! ├── error.rs        ◄─── SourceError, ServiceError
//! └── bin/
//!     └── promo_quote.rs ◄─ CLI: price a cart from JSON files
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use titan_promo_core::CartLine;
//! use titan_promo_service::{PromotionService, SourceContext, StaticCampaignSource, StaticCatalog};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let campaigns = StaticCampaignSource::new(vec![json!({
//!     "id": 1, "name": "20 off", "type": "fixed-amount", "amount": 20,
//!     "rules": [{ "products": [1] }]
//! })]);
//! let service = PromotionService::new(Arc::new(campaigns), Arc::new(StaticCatalog::default()));
//!
//! let ctx = SourceContext::default();
//! let lines = vec![CartLine::new(1, 2, 50.0).unwrap()];
//! let totals = service.compute_cart_total(&ctx, &lines).await.unwrap();
//! assert_eq!(totals.total.value(), 80.0);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod source;

pub use config::{Environment, SourceContext, DEFAULT_TENANT_ID};
pub use error::{ServiceError, ServiceResult, SourceError};
pub use service::{ProductQuote, PromotionService};
pub use source::{
    CampaignSource, CatalogProduct, CatalogSource, StaticCampaignSource, StaticCatalog,
};

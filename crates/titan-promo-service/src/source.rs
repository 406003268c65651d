//! # Collaborator Sources
//!
//! Traits for the two external inputs, plus in-memory implementations
//! used by the `promo-quote` binary and by tests.
//!
//! ## Contract
//! - Campaign sources return RAW records. Validation is the normalizer's job.
//! - Every call is ground truth. Nothing here (or above) caches.
//! - A failure is an `Err`, never an empty list.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::SourceContext;
use crate::error::SourceError;

// =============================================================================
// Traits
// =============================================================================

/// Supplies raw campaign records.
#[async_trait]
pub trait CampaignSource: Send + Sync {
    async fn fetch_campaigns(&self, ctx: &SourceContext) -> Result<Vec<Value>, SourceError>;
}

/// Supplies a product's current price and name.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `Ok(None)` when the product does not exist.
    async fn find_product(
        &self,
        ctx: &SourceContext,
        product_id: i64,
    ) -> Result<Option<CatalogProduct>, SourceError>;
}

/// What the catalog knows about a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

// =============================================================================
// In-Memory Implementations
// =============================================================================

/// Campaign source backed by a fixed list of raw records.
#[derive(Debug, Clone, Default)]
pub struct StaticCampaignSource {
    records: Vec<Value>,
}

impl StaticCampaignSource {
    pub fn new(records: Vec<Value>) -> Self {
        StaticCampaignSource { records }
    }

    /// Parses a JSON array of campaign records.
    ///
    /// Individual records are not checked; only the outer array is.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Array(records)) => Ok(Self::new(records)),
            Ok(_) => Err(SourceError::InvalidPayload(
                "campaigns must be a JSON array".to_string(),
            )),
            Err(e) => Err(SourceError::InvalidPayload(e.to_string())),
        }
    }
}

#[async_trait]
impl CampaignSource for StaticCampaignSource {
    async fn fetch_campaigns(&self, ctx: &SourceContext) -> Result<Vec<Value>, SourceError> {
        debug!(
            tenant_id = %ctx.tenant_id,
            records = self.records.len(),
            "serving static campaigns"
        );
        Ok(self.records.clone())
    }
}

/// Catalog backed by a fixed product list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: HashMap<i64, CatalogProduct>,
}

impl StaticCatalog {
    pub fn new(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        StaticCatalog {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Parses a JSON array of `{ id, name, price }` objects.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let products: Vec<CatalogProduct> =
            serde_json::from_str(json).map_err(|e| SourceError::InvalidPayload(e.to_string()))?;
        Ok(Self::new(products))
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn find_product(
        &self,
        _ctx: &SourceContext,
        product_id: i64,
    ) -> Result<Option<CatalogProduct>, SourceError> {
        Ok(self.products.get(&product_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_source_from_json() {
        let raw = r#"[{"id": 1}, "junk"]"#;
        let source = StaticCampaignSource::from_json(raw).unwrap();
        assert_eq!(source.records.len(), 2);

        assert!(matches!(
            StaticCampaignSource::from_json(r#"{"id": 1}"#),
            Err(SourceError::InvalidPayload(_))
        ));
        assert!(StaticCampaignSource::from_json("not json").is_err());
    }

    #[test]
    fn test_catalog_from_json() {
        let raw = r#"[{"id": 1, "name": "Cola", "price": 2.5}]"#;
        let catalog = StaticCatalog::from_json(raw).unwrap();
        assert_eq!(catalog.products[&1].name, "Cola");

        assert!(StaticCatalog::from_json(r#"[{"id": 1}]"#).is_err());
    }

    #[tokio::test]
    async fn test_static_sources_serve_their_data() {
        let ctx = SourceContext::default();

        let source = StaticCampaignSource::new(vec![serde_json::json!({ "id": 3 })]);
        assert_eq!(source.fetch_campaigns(&ctx).await.unwrap().len(), 1);

        let catalog = StaticCatalog::new(vec![CatalogProduct {
            id: 9,
            name: "Chips".to_string(),
            price: 1.99,
        }]);
        assert_eq!(
            catalog.find_product(&ctx, 9).await.unwrap().unwrap().price,
            1.99
        );
        assert!(catalog.find_product(&ctx, 10).await.unwrap().is_none());
    }
}

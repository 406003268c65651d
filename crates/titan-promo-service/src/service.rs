//! # Promotion Service
//!
//! Consumer-facing operations. Each call fetches campaigns fresh from the
//! [`CampaignSource`], normalizes them and hands them to titan-promo-core.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  operation                       collaborators        core function     │
//! │  ─────────────────────────────   ─────────────────    ───────────────── │
//! │  list_campaigns                  campaigns            list_campaigns    │
//! │  list_campaigns_for_product      campaigns            list_…_for_product│
//! │  compute_product_discount        campaigns            compute_product_… │
//! │  compute_cart_total              campaigns            compute_cart_total│
//! │  quote_product                   campaigns + catalog  compute_product_… │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use titan_promo_core::validation::validate_unit_price;
use titan_promo_core::{
    compute_cart_total, compute_product_discount, list_campaigns, list_campaigns_for_product,
    Campaign, CartLine, CartTotals, Price, ProductCampaign, ProductDiscount,
};

use crate::config::SourceContext;
use crate::error::{ServiceError, ServiceResult};
use crate::source::{CampaignSource, CatalogSource};

/// A catalog product priced with its best campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuote {
    pub product_id: i64,
    pub name: String,
    pub original_price: Price,
    pub discounted_price: Price,
    pub campaign: Option<ProductCampaign>,
}

/// Stateless facade over the campaign and catalog sources.
///
/// Cloning is cheap; clones share the same sources.
#[derive(Clone)]
pub struct PromotionService {
    campaigns: Arc<dyn CampaignSource>,
    catalog: Arc<dyn CatalogSource>,
}

impl PromotionService {
    pub fn new(campaigns: Arc<dyn CampaignSource>, catalog: Arc<dyn CatalogSource>) -> Self {
        PromotionService { campaigns, catalog }
    }

    /// Fetches and normalizes the campaign list. Called once per operation.
    async fn load_campaigns(&self, ctx: &SourceContext) -> ServiceResult<Vec<Campaign>> {
        let raw = self.campaigns.fetch_campaigns(ctx).await.map_err(|e| {
            warn!(
                tenant_id = %ctx.tenant_id,
                environment = %ctx.environment,
                error = %e,
                "campaign source failed"
            );
            ServiceError::CampaignSource(e)
        })?;

        let campaigns = list_campaigns(&raw);
        debug!(
            tenant_id = %ctx.tenant_id,
            fetched = raw.len(),
            kept = campaigns.len(),
            "campaigns loaded"
        );
        Ok(campaigns)
    }

    /// Normalized campaigns, for display.
    pub async fn list_campaigns(&self, ctx: &SourceContext) -> ServiceResult<Vec<Campaign>> {
        self.load_campaigns(ctx).await
    }

    /// Campaigns covering one product. Empty when none does.
    pub async fn list_campaigns_for_product(
        &self,
        ctx: &SourceContext,
        product_id: i64,
    ) -> ServiceResult<Vec<ProductCampaign>> {
        debug!(product_id, "list_campaigns_for_product");
        let campaigns = self.load_campaigns(ctx).await?;
        Ok(list_campaigns_for_product(product_id, &campaigns))
    }

    /// Prices a product at a caller-supplied price.
    pub async fn compute_product_discount(
        &self,
        ctx: &SourceContext,
        product_id: i64,
        original_price: f64,
    ) -> ServiceResult<ProductDiscount> {
        debug!(product_id, original_price, "compute_product_discount");
        validate_unit_price(original_price)?;

        let campaigns = self.load_campaigns(ctx).await?;
        Ok(compute_product_discount(
            product_id,
            Price::new(original_price),
            &campaigns,
        ))
    }

    /// Prices a whole cart.
    pub async fn compute_cart_total(
        &self,
        ctx: &SourceContext,
        lines: &[CartLine],
    ) -> ServiceResult<CartTotals> {
        debug!(lines = lines.len(), "compute_cart_total");

        let campaigns = self.load_campaigns(ctx).await?;
        Ok(compute_cart_total(lines, &campaigns))
    }

    /// Looks a product up in the catalog and prices it at its current price.
    pub async fn quote_product(
        &self,
        ctx: &SourceContext,
        product_id: i64,
    ) -> ServiceResult<ProductQuote> {
        debug!(product_id, "quote_product");

        let product = self
            .catalog
            .find_product(ctx, product_id)
            .await
            .map_err(|e| {
                warn!(product_id, error = %e, "catalog lookup failed");
                ServiceError::Catalog(e)
            })?
            .ok_or(ServiceError::ProductNotFound(product_id))?;
        validate_unit_price(product.price)?;

        let campaigns = self.load_campaigns(ctx).await?;
        let original_price = Price::new(product.price);
        let discount = compute_product_discount(product_id, original_price, &campaigns);

        Ok(ProductQuote {
            product_id,
            name: product.name,
            original_price,
            discounted_price: discount.discounted_price,
            campaign: discount.campaign,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Pricing Operations
//!
//! The consumer-facing entry points, as pure functions over an in-memory
//! campaign list. `titan-promo-service` wraps these with campaign and
//! catalog retrieval.
//!
//! ```text
//! list_campaigns(raw)                         → Vec<Campaign>
//! list_campaigns_for_product(id, campaigns)   → Vec<ProductCampaign>
//! compute_product_discount(id, price, camps)  → ProductDiscount
//! compute_cart_total(lines, campaigns)        → CartTotals      (cart.rs)
//! ```

use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::calculator::apply_discount;
use crate::campaign::{Campaign, ProductCampaign, ProductCampaignRecord};
use crate::matcher::campaigns_for_product;
use crate::normalize::normalize_campaigns;
use crate::price::Price;
use crate::selector::best_campaign;

pub use crate::cart::compute_cart_total;

/// Result of pricing one product.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDiscount {
    pub discounted_price: Price,
    /// The campaign that produced `discounted_price`, `null` if none applied.
    #[ts(as = "Option<ProductCampaignRecord>")]
    pub campaign: Option<ProductCampaign>,
}

/// Normalized campaigns, for display.
pub fn list_campaigns(raw: &[Value]) -> Vec<Campaign> {
    normalize_campaigns(raw)
}

/// Campaigns that cover a product. Empty when none does.
pub fn list_campaigns_for_product(product_id: i64, campaigns: &[Campaign]) -> Vec<ProductCampaign> {
    campaigns_for_product(product_id, campaigns)
}

/// Prices one product with its best campaign.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use titan_promo_core::pricing::{compute_product_discount, list_campaigns};
/// use titan_promo_core::price::Price;
///
/// let campaigns = list_campaigns(&[json!({
///     "id": 1, "name": "Flat 99", "type": "fixed-price", "amount": 99,
///     "rules": [{ "products": [5] }]
/// })]);
///
/// let result = compute_product_discount(5, Price::new(500.0), &campaigns);
/// assert_eq!(result.discounted_price.value(), 99.0);
///
/// let untouched = compute_product_discount(6, Price::new(500.0), &campaigns);
/// assert_eq!(untouched.discounted_price.value(), 500.0);
/// ```
pub fn compute_product_discount(
    product_id: i64,
    original_price: Price,
    campaigns: &[Campaign],
) -> ProductDiscount {
    let campaign = best_campaign(product_id, campaigns, original_price);
    ProductDiscount {
        discounted_price: apply_discount(original_price, campaign.as_ref()),
        campaign,
    }
}

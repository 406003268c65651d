//! # Best Campaign Selector
//!
//! Picks the single most advantageous campaign for a product.
//!
//! ## Selection Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product 42 @ 100.00                                                    │
//! │                                                                         │
//! │  candidate (list order)      discounted     best so far                 │
//! │  ───────────────────────     ──────────     ───────────                 │
//! │  #1  10% off                 90.00          #1                          │
//! │  #2  −10.00                  90.00          #1  (tie: earlier wins)     │
//! │  #3  fixed price 85.00       85.00          #3                          │
//! │                                                                         │
//! │  → #3                                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tie-break is positional only. Reordering campaigns upstream can change
//! which of two equally good campaigns is shown; the price never changes.

use tracing::trace;

use crate::calculator::apply_discount;
use crate::campaign::{Campaign, ProductCampaign};
use crate::matcher::campaigns_for_product;
use crate::price::Price;

/// Returns the campaign giving `product_id` the lowest discounted price at
/// `price`, or `None` if no campaign covers the product.
pub fn best_campaign(
    product_id: i64,
    campaigns: &[Campaign],
    price: Price,
) -> Option<ProductCampaign> {
    let mut best: Option<(ProductCampaign, Price)> = None;

    for candidate in campaigns_for_product(product_id, campaigns) {
        let discounted = apply_discount(price, Some(&candidate));
        let improves = match &best {
            Some((_, best_price)) => discounted < *best_price,
            None => true,
        };
        if improves {
            best = Some((candidate, discounted));
        }
    }

    if let Some((campaign, discounted)) = &best {
        trace!(product_id, campaign_id = campaign.id, %discounted, "best campaign selected");
    }

    best.map(|(campaign, _)| campaign)
}

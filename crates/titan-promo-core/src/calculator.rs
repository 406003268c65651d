//! # Discount Calculator
//!
//! Pure pricing of one amount against one campaign.
//!
//! ## Discount Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TYPE            RESULT                         NO-OP WHEN              │
//! │  ─────────────   ────────────────────────────   ─────────────────────   │
//! │  percentage      p × (1 − rate / 100)           rate missing            │
//! │  fixed-amount    max(0, p − amount)             amount missing          │
//! │  fixed-price     amount                         amount missing          │
//! │  cheapest-free   p × (q − 1) / q                q missing or q ≤ 1      │
//! │  unrecognized    p                              always                  │
//! │  (no campaign)   p                              always                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Simplifications
//! - `fixed-price` is not clamped to the original price: a campaign priced
//!   above the item raises it. Kept for compatibility with existing campaign
//!   data.
//! - `cheapest-free` spreads one free unit evenly over the amount it is given.
//!   It is exact for identically priced units and an approximation otherwise.

use crate::campaign::{Discount, ProductCampaign};
use crate::price::Price;

// =============================================================================
// Calculation
// =============================================================================

/// Applies a campaign to an amount. `None` returns the amount unchanged.
///
/// ## Example
/// ```rust
/// use titan_promo_core::calculator::apply_discount;
/// use titan_promo_core::campaign::{Discount, ProductCampaign};
/// use titan_promo_core::price::Price;
///
/// let three_for_two = ProductCampaign {
///     id: 1,
///     name: "3 for 2".to_string(),
///     discount: Discount::CheapestFree,
///     quantity: Some(3),
/// };
///
/// let discounted = apply_discount(Price::new(90.0), Some(&three_for_two));
/// assert_eq!(discounted.value(), 60.0);
/// ```
pub fn apply_discount(original: Price, campaign: Option<&ProductCampaign>) -> Price {
    let Some(campaign) = campaign else {
        return original;
    };

    let p = original.value();
    match &campaign.discount {
        Discount::Percentage {
            discount_rate: Some(rate),
        } => Price::new(p * (1.0 - rate / 100.0)),
        Discount::FixedAmount {
            amount: Some(amount),
        } => Price::new(p - amount).clamp_non_negative(),
        Discount::FixedPrice {
            amount: Some(amount),
        } => Price::new(*amount),
        Discount::CheapestFree => match campaign.quantity {
            Some(q) if q > 1 => Price::new(p * (q - 1) as f64 / q as f64),
            _ => original,
        },
        Discount::Percentage {
            discount_rate: None,
        }
        | Discount::FixedAmount { amount: None }
        | Discount::FixedPrice { amount: None }
        | Discount::Unrecognized { .. } => original,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

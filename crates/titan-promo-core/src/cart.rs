//! # Cart Total Aggregator
//!
//! Applies the best campaign to every cart line and sums the result.
//!
//! ## Line Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartLine { product 1, qty 2, unit 50.00 }                              │
//! │       │                                                                 │
//! │       ├── select campaign using the UNIT price (50.00)                 │
//! │       │        → fixed-amount 20.00                                    │
//! │       │                                                                 │
//! │       ├── line original = 50.00 × 2 = 100.00                           │
//! │       │                                                                 │
//! │       └── apply campaign to the LINE total                             │
//! │                100.00 − 20.00 = 80.00                                  │
//! │                                                                         │
//! │  total = Σ discounted lines = 80.00                                    │
//! │  totalDiscount = Σ originals − total = 20.00                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because the campaign applies to the line total, a `fixed-price` 50.00
//! campaign sets a whole line of any quantity to 50.00, and a `fixed-amount`
//! campaign is taken off once per line, not once per unit.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::calculator::apply_discount;
use crate::campaign::{Campaign, ProductCampaign, ProductCampaignRecord};
use crate::error::ValidationError;
use crate::price::Price;
use crate::selector::best_campaign;
use crate::validation::{validate_quantity, validate_unit_price, ValidationResult};

// =============================================================================
// Cart Line
// =============================================================================

/// One cart entry: a product, a quantity and a unit price.
///
/// ## Invariants
/// - `quantity` is ≥ 1
/// - `unit_price` is finite and ≥ 0
///
/// Both hold for every value of this type: the fields are private and
/// deserialization goes through the same checks as [`CartLine::new`].
/// Any product id is accepted; one that no campaign covers prices at its
/// original total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartLineRecord", into = "CartLineRecord")]
pub struct CartLine {
    product_id: i64,
    quantity: i64,
    unit_price: Price,
}

impl CartLine {
    /// Creates a validated cart line.
    ///
    /// ## Example
    /// ```rust
    /// use titan_promo_core::cart::CartLine;
    ///
    /// assert!(CartLine::new(1, 2, 50.0).is_ok());
    /// assert!(CartLine::new(0, 1000, 50.0).is_ok());
    /// assert!(CartLine::new(1, 0, 50.0).is_err());
    /// assert!(CartLine::new(1, 2, -1.0).is_err());
    /// ```
    pub fn new(product_id: i64, quantity: i64, unit_price: f64) -> ValidationResult<Self> {
        validate_quantity(quantity)?;
        validate_unit_price(unit_price)?;

        Ok(CartLine {
            product_id,
            quantity,
            unit_price: Price::new(unit_price),
        })
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Unit price × quantity, before any campaign.
    pub fn original_total(&self) -> Price {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// JSON shape of a cart line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRecord {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

impl TryFrom<CartLineRecord> for CartLine {
    type Error = ValidationError;

    fn try_from(record: CartLineRecord) -> Result<Self, Self::Error> {
        CartLine::new(record.product_id, record.quantity, record.unit_price)
    }
}

impl From<CartLine> for CartLineRecord {
    fn from(line: CartLine) -> Self {
        CartLineRecord {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price.value(),
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Pricing of one line, in the same position as the input line.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotal {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Price,
    pub original_total: Price,
    pub discounted_total: Price,
    /// Campaign applied to this line, `null` when none covers the product.
    #[ts(as = "Option<ProductCampaignRecord>")]
    pub campaign: Option<ProductCampaign>,
}

impl LineTotal {
    /// Amount saved on this line.
    ///
    /// Negative when an unclamped fixed price exceeds the original total.
    pub fn discount(&self) -> Price {
        self.original_total - self.discounted_total
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub total: Price,
    pub total_discount: Price,
    /// Itemized lines, in input order.
    pub lines: Vec<LineTotal>,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Prices a single line against the campaign list.
pub fn price_line(line: &CartLine, campaigns: &[Campaign]) -> LineTotal {
    let campaign = best_campaign(line.product_id, campaigns, line.unit_price);
    let original_total = line.original_total();
    let discounted_total = apply_discount(original_total, campaign.as_ref());

    LineTotal {
        product_id: line.product_id,
        quantity: line.quantity,
        unit_price: line.unit_price,
        original_total,
        discounted_total,
        campaign,
    }
}

/// Computes the cart total and total discount.
///
/// Lines are priced independently; `lines` in the result keeps input order.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use titan_promo_core::cart::{compute_cart_total, CartLine};
/// use titan_promo_core::normalize::normalize_campaigns;
///
/// let campaigns = normalize_campaigns(&[json!({
///     "id": 1, "name": "20 off", "type": "fixed-amount", "amount": 20,
///     "rules": [{ "products": [1] }]
/// })]);
/// let lines = vec![CartLine::new(1, 2, 50.0).unwrap()];
///
/// let totals = compute_cart_total(&lines, &campaigns);
/// assert_eq!(totals.total.value(), 80.0);
/// assert_eq!(totals.total_discount.value(), 20.0);
/// ```
pub fn compute_cart_total(lines: &[CartLine], campaigns: &[Campaign]) -> CartTotals {
    let priced: Vec<LineTotal> = lines
        .iter()
        .map(|line| price_line(line, campaigns))
        .collect();

    let total: Price = priced.iter().map(|line| line.discounted_total).sum();
    let total_discount: Price = priced.iter().map(LineTotal::discount).sum();

    debug!(
        lines = priced.len(),
        campaigns = campaigns.len(),
        %total,
        "cart total computed"
    );

    CartTotals {
        total,
        total_discount,
        lines: priced,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_campaigns;
    use serde_json::json;

    fn line(product_id: i64, quantity: i64, unit_price: f64) -> CartLine {
        CartLine::new(product_id, quantity, unit_price).unwrap()
    }

    fn campaigns() -> Vec<Campaign> {
        normalize_campaigns(&[
            json!({ "id": 1, "name": "20 off", "type": "fixed-amount", "amount": 20,
                    "rules": [{ "products": [1] }] }),
            json!({ "id": 2, "name": "Flat 50", "type": "fixed-price", "amount": 50,
                    "rules": [{ "products": [2] }] }),
            json!({ "id": 3, "name": "3 for 2", "type": "cheapest-free",
                    "rules": [{ "quantity": 3, "products": [3] }] }),
            json!({ "id": 4, "name": "Half", "type": "percentage", "discountRate": 50,
                    "rules": [{ "products": [4] }] }),
        ])
    }

    #[test]
    fn test_end_to_end_fixed_amount() {
        let totals = compute_cart_total(&[line(1, 2, 50.0)], &campaigns());
        assert_eq!(totals.total.value(), 80.0);
        assert_eq!(totals.total_discount.value(), 20.0);
        assert_eq!(totals.lines[0].campaign.as_ref().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_fixed_price_applies_to_whole_line() {
        let totals = compute_cart_total(&[line(2, 4, 30.0)], &campaigns());
        assert_eq!(totals.lines[0].original_total.value(), 120.0);
        assert_eq!(totals.total.value(), 50.0);
        assert_eq!(totals.total_discount.value(), 70.0);
    }

    #[test]
    fn test_cheapest_free_on_line_total() {
        let totals = compute_cart_total(&[line(3, 3, 30.0)], &campaigns());
        assert_eq!(totals.total.value(), 60.0);
        assert_eq!(totals.total_discount.value(), 30.0);
    }

    #[test]
    fn test_lines_without_campaign_pass_through() {
        let totals = compute_cart_total(&[line(99, 3, 2.5)], &campaigns());
        assert_eq!(totals.total.value(), 7.5);
        assert!(totals.total_discount.is_zero());
        assert!(totals.lines[0].campaign.is_none());
    }

    #[test]
    fn test_any_product_id_and_large_quantity_pass_through() {
        let unreferenced = CartLine::new(0, 1000, 1.0).unwrap();
        let totals = compute_cart_total(&[unreferenced, line(-7, 2, 3.0)], &campaigns());

        assert_eq!(totals.total.value(), 1006.0);
        assert!(totals.total_discount.is_zero());
        assert_eq!(totals.lines[0].quantity, 1000);
        assert!(totals.lines[0].campaign.is_none());
        assert!(totals.lines[1].campaign.is_none());
    }

    #[test]
    fn test_large_cart_is_priced() {
        let lines: Vec<CartLine> = (1..=250).map(|id| line(id, 1, 2.0)).collect();
        let totals = compute_cart_total(&lines, &[]);

        assert_eq!(totals.lines.len(), 250);
        assert_eq!(totals.total.value(), 500.0);
    }

    #[test]
    fn test_total_discount_sums_line_discounts() {
        let lines = vec![line(1, 2, 50.0), line(2, 1, 80.0), line(4, 2, 10.0)];
        let totals = compute_cart_total(&lines, &campaigns());

        let per_line: Price = totals.lines.iter().map(LineTotal::discount).sum();
        assert_eq!(totals.total_discount, per_line);
        // 20 + 30 + 10
        assert_eq!(totals.total_discount.value(), 60.0);
    }

    #[test]
    fn test_fixed_price_above_original_gives_negative_discount() {
        let totals = compute_cart_total(&[line(2, 1, 40.0)], &campaigns());
        assert_eq!(totals.total.value(), 50.0);
        assert_eq!(totals.lines[0].discount().value(), -10.0);
        assert_eq!(totals.total_discount.value(), -10.0);
    }

    #[test]
    fn test_empty_cart_and_empty_campaigns() {
        let totals = compute_cart_total(&[], &campaigns());
        assert!(totals.total.is_zero());
        assert!(totals.total_discount.is_zero());
        assert!(totals.lines.is_empty());

        let totals = compute_cart_total(&[line(1, 2, 50.0)], &[]);
        assert_eq!(totals.total.value(), 100.0);
        assert!(totals.total_discount.is_zero());
    }

    #[test]
    fn test_mixed_cart() {
        let lines = vec![
            line(1, 2, 50.0),
            line(2, 4, 30.0),
            line(4, 1, 10.0),
            line(9, 1, 5.0),
        ];
        let totals = compute_cart_total(&lines, &campaigns());

        // 80 + 50 + 5 + 5
        assert_eq!(totals.total.value(), 140.0);
        // (100 + 120 + 10 + 5) - 140
        assert_eq!(totals.total_discount.value(), 95.0);
    }

    #[test]
    fn test_itemized_lines_keep_input_order() {
        let lines = vec![line(4, 1, 10.0), line(1, 1, 50.0), line(2, 1, 80.0)];
        let totals = compute_cart_total(&lines, &campaigns());
        let ids: Vec<i64> = totals.lines.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![4, 1, 2]);
        assert_eq!(totals.lines[1].discount().value(), 20.0);
    }

    #[test]
    fn test_reordering_distinct_lines_keeps_totals() {
        let lines = vec![line(1, 2, 50.0), line(2, 4, 30.0), line(3, 3, 30.0)];
        let reversed: Vec<CartLine> = lines.iter().rev().copied().collect();

        let a = compute_cart_total(&lines, &campaigns());
        let b = compute_cart_total(&reversed, &campaigns());
        assert_eq!(a.total, b.total);
        assert_eq!(a.total_discount, b.total_discount);
    }

    #[test]
    fn test_selection_uses_unit_price() {
        // At unit price 40: fixed-price 45 → 45, 10% → 36, so the percentage wins.
        // Applied to the line (qty 3, 120): 108. The fixed-price would have given 45.
        let campaigns = normalize_campaigns(&[
            json!({ "id": 1, "name": "Set 45", "type": "fixed-price", "amount": 45,
                    "rules": [{ "products": [5] }] }),
            json!({ "id": 2, "name": "10%", "type": "percentage", "discountRate": 10,
                    "rules": [{ "products": [5] }] }),
        ]);
        let totals = compute_cart_total(&[line(5, 3, 40.0)], &campaigns);
        assert_eq!(totals.lines[0].campaign.as_ref().map(|c| c.id), Some(2));
        assert_eq!(totals.total.value(), 108.0);
    }

    #[test]
    fn test_cart_line_deserialization_validates() {
        let raw = json!({ "productId": 0, "quantity": 1500, "unitPrice": 50 });
        let ok: CartLine = serde_json::from_value(raw).unwrap();
        assert_eq!(ok, line(0, 1500, 50.0));

        let zero_quantity = json!({ "productId": 1, "quantity": 0, "unitPrice": 50 });
        assert!(serde_json::from_value::<CartLine>(zero_quantity).is_err());

        let negative_price = json!({ "productId": 1, "quantity": 1, "unitPrice": -3 });
        assert!(serde_json::from_value::<CartLine>(negative_price).is_err());
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        let totals = compute_cart_total(&[line(1, 2, 50.0)], &campaigns());
        let value = serde_json::to_value(&totals).unwrap();
        assert_eq!(value["total"], json!(80.0));
        assert_eq!(value["totalDiscount"], json!(20.0));
        assert_eq!(value["lines"][0]["discountedTotal"], json!(80.0));
        assert_eq!(value["lines"][0]["campaign"]["type"], json!("fixed-amount"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: totals do not depend on the order of distinct-product lines.
            #[test]
            fn totals_are_order_independent(
                quantities in proptest::collection::vec(1i64..20, 1..6),
                prices in proptest::collection::vec(0u32..10_000, 6),
            ) {
                let lines: Vec<CartLine> = quantities
                    .iter()
                    .enumerate()
                    .map(|(i, qty)| line(i as i64 + 1, *qty, prices[i] as f64 / 100.0))
                    .collect();
                let reversed: Vec<CartLine> = lines.iter().rev().copied().collect();

                let a = compute_cart_total(&lines, &campaigns());
                let b = compute_cart_total(&reversed, &campaigns());

                prop_assert!((a.total.value() - b.total.value()).abs() < 1e-6);
                prop_assert!((a.total_discount.value() - b.total_discount.value()).abs() < 1e-6);

                let forward: Vec<i64> = a.lines.iter().map(|l| l.product_id).collect();
                let backward: Vec<i64> = b.lines.iter().rev().map(|l| l.product_id).collect();
                prop_assert_eq!(forward, backward);
            }
        }
    }
}

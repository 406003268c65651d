//! # Campaign Types
//!
//! Canonical campaign model used throughout titan-promo-core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Campaign Types                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Campaign     │   │  CampaignRule   │   │ ProductCampaign │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  quantity?      │   │  id, name       │       │
//! │  │  name           │1 n│  products (set) │   │  discount       │       │
//! │  │  discount       │   │  labels (set)   │   │  quantity?      │       │
//! │  │  rules          │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘    matched rule ──────────────►  projection       │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │ Discount (tagged union)                                        │     │
//! │  │   Percentage { discount_rate? }   FixedAmount { amount? }      │     │
//! │  │   FixedPrice { amount? }          CheapestFree                 │     │
//! │  │   Unrecognized { type_name }                                   │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Campaigns travel as [`CampaignRecord`] JSON (camelCase, flat `type`
//! field). A [`Campaign`] serializes back into that shape, so feeding the
//! output of the normalizer into the normalizer again is a no-op.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Discount Type Names
// =============================================================================

/// Wire name of a percentage-off campaign.
pub const PERCENTAGE: &str = "percentage";
/// Wire name of an amount-off campaign.
pub const FIXED_AMOUNT: &str = "fixed-amount";
/// Wire name of a set-price campaign.
pub const FIXED_PRICE: &str = "fixed-price";
/// Wire name of a "buy N, cheapest is free" campaign.
pub const CHEAPEST_FREE: &str = "cheapest-free";

// =============================================================================
// Discount
// =============================================================================

/// The discount a campaign grants, with only the parameters its type uses.
///
/// Parameters are optional because campaign sources sometimes omit them;
/// a discount with a missing parameter prices as a no-op. A percentage
/// campaign can never carry an `amount`, and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub enum Discount {
    /// `discount_rate` percent off, in `[0, 100]`.
    Percentage { discount_rate: Option<f64> },

    /// Subtract `amount`, never going below zero.
    FixedAmount { amount: Option<f64> },

    /// Replace the price with `amount`.
    FixedPrice { amount: Option<f64> },

    /// Buy N (the matched rule's quantity), the cheapest one is free.
    CheapestFree,

    /// A type string this engine does not know. Kept for display,
    /// never changes a price.
    Unrecognized { type_name: String },
}

impl Discount {
    /// Builds a discount from its wire type name and the two optional
    /// numeric parameters. Parameters irrelevant to the type are ignored.
    ///
    /// ## Example
    /// ```rust
    /// use titan_promo_core::campaign::Discount;
    ///
    /// let d = Discount::from_parts("fixed-amount", Some(12.0), Some(30.0));
    /// assert_eq!(d, Discount::FixedAmount { amount: Some(30.0) });
    /// ```
    pub fn from_parts(type_name: &str, discount_rate: Option<f64>, amount: Option<f64>) -> Self {
        match type_name {
            PERCENTAGE => Discount::Percentage { discount_rate },
            FIXED_AMOUNT => Discount::FixedAmount { amount },
            FIXED_PRICE => Discount::FixedPrice { amount },
            CHEAPEST_FREE => Discount::CheapestFree,
            other => Discount::Unrecognized {
                type_name: other.to_string(),
            },
        }
    }

    /// Returns the wire type name.
    pub fn type_name(&self) -> &str {
        match self {
            Discount::Percentage { .. } => PERCENTAGE,
            Discount::FixedAmount { .. } => FIXED_AMOUNT,
            Discount::FixedPrice { .. } => FIXED_PRICE,
            Discount::CheapestFree => CHEAPEST_FREE,
            Discount::Unrecognized { type_name } => type_name,
        }
    }

    /// Returns the percentage rate, if this is a percentage discount that has one.
    pub fn discount_rate(&self) -> Option<f64> {
        match self {
            Discount::Percentage { discount_rate } => *discount_rate,
            _ => None,
        }
    }

    /// Returns the amount parameter of fixed-amount / fixed-price discounts.
    pub fn amount(&self) -> Option<f64> {
        match self {
            Discount::FixedAmount { amount } | Discount::FixedPrice { amount } => *amount,
            _ => None,
        }
    }
}

// =============================================================================
// Campaign Rule
// =============================================================================

/// A sub-unit of a campaign scoping which products it covers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CampaignRule {
    /// Threshold for quantity-based types. Only meaningful when > 1.
    pub quantity: Option<i64>,

    /// Product ids covered by this rule. Never empty once normalized.
    pub products: BTreeSet<i64>,

    /// Free-form labels attached by the campaign author.
    pub labels: BTreeSet<String>,
}

impl CampaignRule {
    /// Checks if this rule covers the product.
    #[inline]
    pub fn covers(&self, product_id: i64) -> bool {
        self.products.contains(&product_id)
    }
}

// =============================================================================
// Campaign
// =============================================================================

/// A validated promotional campaign.
///
/// Only the normalizer builds these from untrusted input; see
/// [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "CampaignRecord")]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub discount: Discount,
    /// Ordered. The first rule covering a product wins during matching.
    pub rules: Vec<CampaignRule>,
}

impl Campaign {
    /// Returns the first rule (by list order) that covers the product.
    pub fn matching_rule(&self, product_id: i64) -> Option<&CampaignRule> {
        self.rules.iter().find(|rule| rule.covers(product_id))
    }
}

// =============================================================================
// Product Campaign (projection)
// =============================================================================

/// A campaign as it applies to one product.
///
/// `quantity` comes from the campaign's first rule covering the product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ProductCampaignRecord")]
pub struct ProductCampaign {
    pub id: i64,
    pub name: String,
    pub discount: Discount,
    pub quantity: Option<i64>,
}

impl ProductCampaign {
    /// Projects a campaign through the rule that matched.
    pub fn from_match(campaign: &Campaign, rule: &CampaignRule) -> Self {
        ProductCampaign {
            id: campaign.id,
            name: campaign.name.clone(),
            discount: campaign.discount.clone(),
            quantity: rule.quantity,
        }
    }
}

// =============================================================================
// Wire Records
// =============================================================================

/// JSON shape of a campaign rule.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<i64>,
    pub products: Vec<i64>,
    pub labels: Vec<String>,
}

/// JSON shape of a campaign, as listed to consumers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub amount: Option<f64>,
    pub rules: Vec<RuleRecord>,
}

/// JSON shape of a [`ProductCampaign`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCampaignRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<i64>,
}

impl From<CampaignRule> for RuleRecord {
    fn from(rule: CampaignRule) -> Self {
        RuleRecord {
            quantity: rule.quantity,
            products: rule.products.into_iter().collect(),
            labels: rule.labels.into_iter().collect(),
        }
    }
}

impl From<Campaign> for CampaignRecord {
    fn from(campaign: Campaign) -> Self {
        CampaignRecord {
            id: campaign.id,
            name: campaign.name,
            campaign_type: campaign.discount.type_name().to_string(),
            discount_rate: campaign.discount.discount_rate(),
            amount: campaign.discount.amount(),
            rules: campaign.rules.into_iter().map(RuleRecord::from).collect(),
        }
    }
}

impl From<ProductCampaign> for ProductCampaignRecord {
    fn from(campaign: ProductCampaign) -> Self {
        ProductCampaignRecord {
            id: campaign.id,
            name: campaign.name,
            campaign_type: campaign.discount.type_name().to_string(),
            discount_rate: campaign.discount.discount_rate(),
            amount: campaign.discount.amount(),
            quantity: campaign.quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(quantity: Option<i64>, products: &[i64]) -> CampaignRule {
        CampaignRule {
            quantity,
            products: products.iter().copied().collect(),
            labels: BTreeSet::new(),
        }
    }

    #[test]
    fn test_from_parts_keeps_only_relevant_parameters() {
        assert_eq!(
            Discount::from_parts(PERCENTAGE, Some(10.0), Some(5.0)),
            Discount::Percentage {
                discount_rate: Some(10.0)
            }
        );
        assert_eq!(
            Discount::from_parts(FIXED_PRICE, Some(10.0), None),
            Discount::FixedPrice { amount: None }
        );
        assert_eq!(
            Discount::from_parts(CHEAPEST_FREE, Some(10.0), Some(5.0)),
            Discount::CheapestFree
        );
        assert_eq!(
            Discount::from_parts("bogo", None, None),
            Discount::Unrecognized {
                type_name: "bogo".to_string()
            }
        );
    }

    #[test]
    fn test_type_name_round_trips_through_from_parts() {
        for name in [PERCENTAGE, FIXED_AMOUNT, FIXED_PRICE, CHEAPEST_FREE, "loyalty"] {
            assert_eq!(Discount::from_parts(name, None, None).type_name(), name);
        }
    }

    #[test]
    fn test_matching_rule_is_first_by_list_order() {
        let campaign = Campaign {
            id: 1,
            name: "Multi".to_string(),
            discount: Discount::CheapestFree,
            rules: vec![rule(Some(3), &[5, 6]), rule(Some(2), &[6, 7])],
        };

        assert_eq!(campaign.matching_rule(6).and_then(|r| r.quantity), Some(3));
        assert_eq!(campaign.matching_rule(7).and_then(|r| r.quantity), Some(2));
        assert!(campaign.matching_rule(8).is_none());
    }

    #[test]
    fn test_campaign_serializes_as_flat_record() {
        let campaign = Campaign {
            id: 7,
            name: "Spring".to_string(),
            discount: Discount::Percentage {
                discount_rate: Some(15.0),
            },
            rules: vec![rule(None, &[3, 1])],
        };

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Spring",
                "type": "percentage",
                "discountRate": 15.0,
                "rules": [{ "products": [1, 3], "labels": [] }]
            })
        );
    }

    #[test]
    fn test_product_campaign_serializes_quantity() {
        let campaign = ProductCampaign {
            id: 2,
            name: "3 for 2".to_string(),
            discount: Discount::CheapestFree,
            quantity: Some(3),
        };

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(
            value,
            json!({ "id": 2, "name": "3 for 2", "type": "cheapest-free", "quantity": 3 })
        );
    }

    #[test]
    fn test_skipped_fields_are_optional_in_bindings() {
        let campaign = CampaignRecord::decl();
        assert!(campaign.contains("discountRate?: number"));
        assert!(campaign.contains("amount?: number"));

        assert!(ProductCampaignRecord::decl().contains("quantity?:"));
        assert!(RuleRecord::decl().contains("quantity?:"));
    }
}

//! # Rule Matcher
//!
//! Finds the campaigns whose rules reference a product.

use crate::campaign::{Campaign, ProductCampaign};

/// Lists every campaign that covers `product_id`, in campaign list order.
///
/// A campaign with several covering rules appears once; its first covering
/// rule supplies `quantity`. A product no rule mentions yields an empty list.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use titan_promo_core::{matcher::campaigns_for_product, normalize::normalize_campaigns};
///
/// let campaigns = normalize_campaigns(&[json!({
///     "id": 1, "name": "3 for 2", "type": "cheapest-free",
///     "rules": [{ "quantity": 3, "products": [42] }]
/// })]);
///
/// let matched = campaigns_for_product(42, &campaigns);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].quantity, Some(3));
/// assert!(campaigns_for_product(7, &campaigns).is_empty());
/// ```
pub fn campaigns_for_product(product_id: i64, campaigns: &[Campaign]) -> Vec<ProductCampaign> {
    campaigns
        .iter()
        .filter_map(|campaign| {
            campaign
                .matching_rule(product_id)
                .map(|rule| ProductCampaign::from_match(campaign, rule))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{CampaignRule, Discount};

    fn campaign(id: i64, rules: Vec<(Option<i64>, Vec<i64>)>) -> Campaign {
        Campaign {
            id,
            name: format!("Campaign {}", id),
            discount: Discount::CheapestFree,
            rules: rules
                .into_iter()
                .map(|(quantity, products)| CampaignRule {
                    quantity,
                    products: products.into_iter().collect(),
                    labels: Default::default(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_unreferenced_product_yields_empty_list() {
        let campaigns = vec![campaign(1, vec![(None, vec![1, 2])])];
        assert!(campaigns_for_product(99, &campaigns).is_empty());
        assert!(campaigns_for_product(1, &[]).is_empty());
    }

    #[test]
    fn test_one_entry_per_campaign_in_list_order() {
        let campaigns = vec![
            campaign(5, vec![(None, vec![1])]),
            campaign(2, vec![(None, vec![2])]),
            campaign(9, vec![(Some(2), vec![1]), (Some(4), vec![1])]),
        ];

        let matched = campaigns_for_product(1, &campaigns);
        let ids: Vec<i64> = matched.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 9]);
    }

    #[test]
    fn test_first_matching_rule_supplies_quantity() {
        let campaigns = vec![campaign(
            1,
            vec![(Some(5), vec![2]), (Some(3), vec![1]), (Some(2), vec![1])],
        )];

        let matched = campaigns_for_product(1, &campaigns);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].quantity, Some(3));
        assert_eq!(matched[0].name, "Campaign 1");
    }
}

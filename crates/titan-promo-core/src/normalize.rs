//! # Campaign Normalizer
//!
//! Turns untrusted campaign records into canonical [`Campaign`] values.
//!
//! ## Normalization Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw JSON record                                                        │
//! │       │                                                                 │
//! │       ├── not an object? ─────────────────────────────► dropped         │
//! │       ├── no integer id / no name / no type string? ──► dropped         │
//! │       ├── rules not a list? ──────────────────────────► dropped         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  each rule: products → set of positive ints                            │
//! │             labels   → set of strings (default empty)                  │
//! │             quantity → integer or undefined                            │
//! │             empty product set? → rule dropped                          │
//! │       │                                                                 │
//! │       ├── no rules left? ─────────────────────────────► dropped         │
//! │       ▼                                                                 │
//! │  Campaign                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping is silent from the caller's point of view; the reason is logged
//! at `debug` level. The normalizer is total and idempotent.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::campaign::{Campaign, CampaignRule, Discount};

/// Why a record did not make it through normalization.
#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum Rejection {
    #[error("record is not an object")]
    NotAnObject,
    #[error("missing or non-integer id")]
    MissingId,
    #[error("missing name")]
    MissingName,
    #[error("missing type")]
    MissingType,
    #[error("rules is not a list")]
    RulesNotAList,
    #[error("no rule covers any product")]
    NoUsableRules,
}

/// Normalizes a batch of raw campaign records, dropping invalid ones.
///
/// Output order follows input order.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use titan_promo_core::normalize::normalize_campaigns;
///
/// let raw = vec![
///     json!({ "id": 1, "name": "10% off", "type": "percentage", "discountRate": 10,
///             "rules": [{ "products": [42] }] }),
///     json!({ "name": "no id", "type": "percentage", "rules": [] }),
/// ];
///
/// let campaigns = normalize_campaigns(&raw);
/// assert_eq!(campaigns.len(), 1);
/// assert_eq!(campaigns[0].id, 1);
/// ```
pub fn normalize_campaigns(raw: &[Value]) -> Vec<Campaign> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_campaign(record) {
            Ok(campaign) => Some(campaign),
            Err(reason) => {
                debug!(index, reason = %reason, "dropping campaign record");
                None
            }
        })
        .collect()
}

pub(crate) fn normalize_campaign(raw: &Value) -> Result<Campaign, Rejection> {
    let record = raw.as_object().ok_or(Rejection::NotAnObject)?;

    let id = record
        .get("id")
        .and_then(coerce_integer_or_numeric_string)
        .ok_or(Rejection::MissingId)?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .ok_or(Rejection::MissingName)?;

    let type_name = record
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or(Rejection::MissingType)?;

    let raw_rules = record
        .get("rules")
        .and_then(Value::as_array)
        .ok_or(Rejection::RulesNotAList)?;

    let rules: Vec<CampaignRule> = raw_rules.iter().filter_map(normalize_rule).collect();
    if rules.is_empty() {
        return Err(Rejection::NoUsableRules);
    }

    let discount = Discount::from_parts(
        type_name,
        number_field(record, "discountRate")
            .filter(|rate| (0.0..=100.0).contains(rate)),
        number_field(record, "amount").filter(|amount| *amount >= 0.0),
    );

    Ok(Campaign {
        id,
        name: name.to_string(),
        discount,
        rules,
    })
}

/// Coerces one rule; `None` when it covers no product.
fn normalize_rule(raw: &Value) -> Option<CampaignRule> {
    let rule = raw.as_object()?;

    let products: BTreeSet<i64> = rule
        .get("products")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(coerce_integer_or_numeric_string)
                .filter(|id| *id > 0)
                .collect()
        })
        .unwrap_or_default();

    if products.is_empty() {
        return None;
    }

    let labels = rule
        .get("labels")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(CampaignRule {
        quantity: rule.get("quantity").and_then(coerce_integer),
        products,
        labels,
    })
}

// =============================================================================
// Coercion Helpers
// =============================================================================

fn number_field(record: &Map<String, Value>, key: &str) -> Option<f64> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// Integer JSON numbers, including whole floats like `3.0`.
fn coerce_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn coerce_integer_or_numeric_string(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        other => coerce_integer(other),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

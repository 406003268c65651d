//! # titan-promo-core: Campaign & Discount Logic for Titan POS
//!
//! This crate decides which promotional campaign applies to a product and
//! what the product (or a whole cart) costs after it. Everything here is a
//! pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Titan Promotions Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Campaign source            Catalog source             │   │
//! │  │          (raw JSON records)        (product price, name)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ titan-promo-service (async, I/O)       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ titan-promo-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   normalize ──► matcher ──► selector ──► calculator ──► cart   │   │
//! │  │   raw records   rules for   best         discounted     totals │   │
//! │  │   → Campaign    a product   campaign     price                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CACHE • NO SHARED STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`campaign`] - Campaign, rule and discount types, plus their JSON records
//! - [`normalize`] - Raw records → canonical campaigns (drops bad records)
//! - [`matcher`] - Campaigns covering a product
//! - [`calculator`] - One price, one campaign → discounted price
//! - [`selector`] - Best campaign for a product
//! - [`cart`] - Cart lines and totals
//! - [`pricing`] - Consumer-facing operations
//! - [`price`] - Price value type
//! - [`validation`] / [`error`] - Cart input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use titan_promo_core::{compute_cart_total, list_campaigns, CartLine};
//!
//! let campaigns = list_campaigns(&[json!({
//!     "id": 1, "name": "20 off", "type": "fixed-amount", "amount": 20,
//!     "rules": [{ "products": [1] }]
//! })]);
//!
//! let cart = vec![CartLine::new(1, 2, 50.0).unwrap()];
//! let totals = compute_cart_total(&cart, &campaigns);
//!
//! assert_eq!(totals.total.value(), 80.0);
//! assert_eq!(totals.total_discount.value(), 20.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod campaign;
pub mod cart;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod price;
pub mod pricing;
pub mod selector;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use campaign::{Campaign, CampaignRule, Discount, ProductCampaign};
pub use cart::{CartLine, CartTotals, LineTotal};
pub use error::ValidationError;
pub use price::Price;
pub use pricing::{
    compute_cart_total, compute_product_discount, list_campaigns, list_campaigns_for_product,
    ProductDiscount,
};

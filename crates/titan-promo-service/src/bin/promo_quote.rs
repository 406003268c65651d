//! # Promo Quote
//!
//! Prices a cart (or a single product) against a campaign file and prints
//! the result as JSON.
//!
//! ## Usage
//! ```bash
//! # Price a cart
//! cargo run -p titan-promo-service --bin promo-quote -- \
//!     --campaigns ./campaigns.json --cart ./cart.json
//!
//! # Quote one product from a catalog file
//! cargo run -p titan-promo-service --bin promo-quote -- \
//!     --campaigns ./campaigns.json --catalog ./catalog.json --product 42
//!
//! # List normalized campaigns
//! cargo run -p titan-promo-service --bin promo-quote -- --campaigns ./campaigns.json
//! ```
//!
//! ## File Formats
//! - campaigns: JSON array of raw campaign records
//! - cart: JSON array of `{ "productId", "quantity", "unitPrice" }`
//! - catalog: JSON array of `{ "id", "name", "price" }`
//!
//! Tenant, environment and API key come from `TITAN_TENANT_ID`,
//! `TITAN_PROMO_ENV` and `TITAN_PROMO_API_KEY`.

use std::env;
use std::fs;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use titan_promo_core::CartLine;
use titan_promo_service::{PromotionService, SourceContext, StaticCampaignSource, StaticCatalog};

const DEFAULT_LOG_FILTER: &str = "info,titan_promo_core=debug,titan_promo_service=debug";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut campaigns_path: Option<String> = None;
    let mut cart_path: Option<String> = None;
    let mut catalog_path: Option<String> = None;
    let mut product_id: Option<i64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--campaigns" | "-c" => {
                if i + 1 < args.len() {
                    campaigns_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--cart" => {
                if i + 1 < args.len() {
                    cart_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--catalog" => {
                if i + 1 < args.len() {
                    catalog_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--product" | "-p" => {
                if i + 1 < args.len() {
                    product_id = Some(args[i + 1].parse()?);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let Some(campaigns_path) = campaigns_path else {
        print_help();
        return Err("--campaigns is required".into());
    };

    let ctx = SourceContext::from_env();
    info!(tenant_id = %ctx.tenant_id, environment = %ctx.environment, "promo-quote starting");

    let campaigns = StaticCampaignSource::from_json(&fs::read_to_string(&campaigns_path)?)?;
    let catalog = match &catalog_path {
        Some(path) => StaticCatalog::from_json(&fs::read_to_string(path)?)?,
        None => StaticCatalog::default(),
    };
    let service = PromotionService::new(Arc::new(campaigns), Arc::new(catalog));

    let output = if let Some(path) = cart_path {
        let lines: Vec<CartLine> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        serde_json::to_string_pretty(&service.compute_cart_total(&ctx, &lines).await?)?
    } else if let Some(product_id) = product_id {
        serde_json::to_string_pretty(&service.quote_product(&ctx, product_id).await?)?
    } else {
        serde_json::to_string_pretty(&service.list_campaigns(&ctx).await?)?
    };

    println!("{}", output);
    Ok(())
}

fn print_help() {
    println!("Titan Promo Quote");
    println!();
    println!("Usage: promo-quote --campaigns <PATH> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --campaigns <PATH>  Raw campaign records (JSON array)");
    println!("      --cart <PATH>       Cart lines to price (JSON array)");
    println!("      --catalog <PATH>    Catalog products (JSON array)");
    println!("  -p, --product <ID>      Quote one catalog product");
    println!("  -h, --help              Show this help message");
}

/// Logs go to stderr so stdout stays valid JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, debug for titan crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # Source Context
//!
//! Ambient configuration the collaborators need: which tenant, which
//! environment, which credentials.
//!
//! ## Explicit, Never Global
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  promo-quote main()                                                     │
//! │       │  SourceContext::from_env()   ◄── the ONLY env read              │
//! │       ▼                                                                 │
//! │  PromotionService::compute_cart_total(&ctx, …)                          │
//! │       │                                                                 │
//! │       ├──► CampaignSource::fetch_campaigns(&ctx)                        │
//! │       └──► CatalogSource::find_product(&ctx, id)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Environment Variables
//! - `TITAN_TENANT_ID`: Override tenant ID
//! - `TITAN_PROMO_ENV`: `sandbox` (default) or `production`
//! - `TITAN_PROMO_API_KEY`: Credential for the campaign source

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SourceError;

/// Default tenant ID (single-tenant deployments).
pub const DEFAULT_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

// =============================================================================
// Environment
// =============================================================================

/// Which backend the collaborators should talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Test data, safe for development.
    #[default]
    Sandbox,

    /// Live campaigns and prices.
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" | "test" | "dev" => Ok(Environment::Sandbox),
            "production" | "prod" | "live" => Ok(Environment::Production),
            other => Err(SourceError::InvalidConfig(format!(
                "Unknown environment: '{}'. Valid options: sandbox, production",
                other
            ))),
        }
    }
}

// =============================================================================
// Source Context
// =============================================================================

/// Per-call context handed to every collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub tenant_id: String,
    pub environment: Environment,
    /// Credential for the campaign / catalog backends. Never logged.
    pub api_key: Option<String>,
}

impl Default for SourceContext {
    /// Sandbox context for the default tenant, no credentials.
    fn default() -> Self {
        SourceContext {
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            environment: Environment::Sandbox,
            api_key: None,
        }
    }
}

impl SourceContext {
    pub fn new(tenant_id: impl Into<String>, environment: Environment) -> Self {
        SourceContext {
            tenant_id: tenant_id.into(),
            environment,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builds a context from the process environment, falling back to
    /// defaults. An unparseable `TITAN_PROMO_ENV` is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SourceContext::from_env`], with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ctx = SourceContext::default();

        if let Some(tenant_id) = lookup("TITAN_TENANT_ID").filter(|t| !t.trim().is_empty()) {
            ctx.tenant_id = tenant_id;
        }

        if let Some(env) = lookup("TITAN_PROMO_ENV") {
            match env.parse() {
                Ok(environment) => ctx.environment = environment,
                Err(e) => warn!(error = %e, "Ignoring TITAN_PROMO_ENV"),
            }
        }

        ctx.api_key = lookup("TITAN_PROMO_API_KEY").filter(|k| !k.is_empty());
        ctx
    }
}

impl fmt::Debug for SourceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceContext")
            .field("tenant_id", &self.tenant_id)
            .field("environment", &self.environment)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

//! # Error Types
//!
//! Domain-specific error types for titan-promo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  titan-promo-core errors (this file)                                   │
//! │  └── ValidationError  - Caller-supplied cart line is malformed         │
//! │                                                                         │
//! │  titan-promo-service errors (separate crate)                           │
//! │  ├── SourceError      - Campaign / catalog retrieval failures          │
//! │  └── ServiceError     - What the consumer sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError → Consumer                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Malformed campaign records are dropped by the normalizer, and unknown
//! discount types or missing parameters price as a no-op. Neither is ever
//! reported through these types. Once a [`CartLine`](crate::cart::CartLine)
//! exists, pricing it cannot fail.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a caller hands us cart input that violates the line
/// invariants (quantity ≥ 1, unit price ≥ 0). They are raised while the
/// input is being constructed, before any discount math runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Price is NaN, infinite or negative.
    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: String, value: f64 },
}

// =============================================================================
// Unit Tests
// =============================================================================

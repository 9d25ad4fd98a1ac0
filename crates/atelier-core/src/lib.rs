//! # atelier-core: Pure Pricing Logic for the Atelier Back Office
//!
//! This crate is the **heart** of the Atelier quoting system. It contains the
//! multi-metal pricing domain and the quote cost calculator as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Atelier Pricing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Ticket / Quote UI                            │   │
//! │  │    Line-item forms ──► Analytics panel ──► Publish button       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    atelier-workflow                             │   │
//! │  │    QuoteSession: save / publish / unpublish, collaborators      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   metal   │  │  pricing  │  │ analytics │  │   money   │  │   │
//! │  │   │ MetalKey  │  │ PriceMap  │  │  compute  │  │Money, Rate│  │   │
//! │  │   │  Purity   │  │   stats   │  │ Analytics │  │ to_money  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`metal`] - Metal context model (MetalType, Purity, MetalKey)
//! - [`pricing`] - Universal price map and statistics engine
//! - [`quote`] - Itemized quote line groups
//! - [`settings`] - Financial settings value type
//! - [`analytics`] - Quote cost & analytics calculator
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Remote store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: Metal-context failures are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::metal::MetalKey;
//! use atelier_core::pricing::UniversalPriceMap;
//! use atelier_core::money::Money;
//!
//! let key = MetalKey::parse("gold_14k").unwrap();
//! assert_eq!(key.display_name(), "Gold 14K");
//!
//! let mut prices = UniversalPriceMap::new();
//! prices.set_price(key, Money::from_cents(125_000)); // $1,250.00
//!
//! assert_eq!(
//!     prices.price_for("gold", "14k"),
//!     Some(Money::from_cents(125_000))
//! );
//! // Not offered in platinum: opaque "not available", never an error.
//! assert_eq!(prices.price_for("platinum", "950"), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod error;
pub mod metal;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod settings;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atelier_core::MetalKey` instead of
// `use atelier_core::metal::MetalKey`

pub use analytics::{compute_analytics, QuoteAnalytics};
pub use error::{CoreResult, MetalError};
pub use metal::{
    all_supported, display_label, is_supported, supported_purities, MetalKey, MetalType, Purity,
    SupportedMetal,
};
pub use money::{to_money, Money, Rate};
pub use pricing::{
    total_across, ContextTotal, PriceDifference, PriceEntry, PriceMapAudit, PricedItem,
    PricingStatistics, UniversalPriceMap,
};
pub use quote::{CostLine, QuantityLine, QuoteLines};
pub use settings::FinancialSettings;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default custom design fee in cents ($100.00).
///
/// Applied when a quote includes CAD design work and the settings
/// collaborator did not supply a fee.
pub const DEFAULT_CUSTOM_DESIGN_FEE_CENTS: i64 = 10_000;

/// Default sales commission in basis points (1000 = 10%).
///
/// Commission is earned on gross profit only, never on cost-recovered
/// labor or the design fee.
pub const DEFAULT_COMMISSION_BPS: u32 = 1_000;

/// Default material markup in basis points (10000 = 100% markup).
///
/// A 100% markup doubles material cost when deriving material revenue.
pub const DEFAULT_MATERIAL_MARKUP_BPS: u32 = 10_000;

/// Default rush multiplier in basis points (15000 = x1.5).
///
/// The upcharge applies to materials revenue + labor revenue when a quote
/// is flagged rush.
pub const DEFAULT_RUSH_MULTIPLIER_BPS: u32 = 15_000;

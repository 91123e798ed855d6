//! Domain models and types for proprietor-recon.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SourceId`], [`CanonicalKey`])
//! - **Source schemas** ([`TitleRow`], [`RoeEntity`], [`ExclusionRow`])
//! - **The normalized record** the core reconciles ([`NormalizedRecord`])
//! - **Error types** ([`ReconError`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! A [`CanonicalKey`] can only be produced by the name normalizer, so a key
//! is always derived from a display name and never typed in by hand:
//!
//! ```rust
//! use proprietor_recon::core::normalize::NameNormalizer;
//!
//! let normalizer = NameNormalizer::default();
//! let key = normalizer.normalize("Acme Trading Ltd.");
//! assert_eq!(key.as_str(), "acmetrading");
//! ```

pub mod errors;
pub mod ids;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::ReconError;
pub use ids::{CanonicalKey, SourceId};
pub use records::{
    ExclusionRow, NormalizedRecord, Proprietor, ProprietorSlot, RoeEntity, TitleDetails,
    TitleRow, TitleRowBuilder,
};
pub use result::Result;

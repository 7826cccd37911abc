//! `tradefeed-ingest` — payload normalizer for the supplier catalog feed.
//!
//! Converts one loosely-structured feed item (an untyped JSON mapping) into
//! typed catalog drafts, in two passes:
//!
//! 1. [`canonical`] resolves shape quirks (dual-shape weights, key aliases,
//!    `false`-as-absent, presence flags, the nested VAT block) into a
//!    single-shape intermediate.
//! 2. [`normalize`] applies the strict contracts (closed enums, required
//!    fields, ISO country codes), collecting every violation into one
//!    [`ValidationFailure`] per item.
//!
//! Stateless and IO-free; callers are free to fan items out across threads.

pub mod canonical;
pub mod error;
pub mod normalize;

#[cfg(test)]
mod integration_tests;

pub use canonical::{CanonicalItem, CanonicalVat, RawMeatFields, Weight};
pub use error::{FieldError, FieldErrorKind, ValidationFailure};
pub use normalize::{normalize_batch, normalize_item, NormalizedItem};

//! Case identifier utilities.
//!
//! Every record in the pharmcase library is addressed by a small string
//! identifier assigned by the store itself, never by the caller. To keep
//! lookups, completion tracking and the persisted snapshot deterministic, the
//! identifier has exactly two *canonical* forms:
//!
//! - **Seed form**: `case<N>`, assigned in catalogue order when the library
//!   is populated from the built-in seed catalogue. `N` is a positive decimal
//!   integer without leading zeros (`case1`, `case2`, ...).
//! - **Created form**: `case_<ms>`, assigned when a case is added at
//!   runtime. `<ms>` is the creation time as milliseconds since the Unix
//!   epoch (`case_1755950400123`).
//!
//! This module provides:
//! - A wrapper type ([`CaseId`]) that *guarantees* one of the canonical forms
//!   once constructed.
//! - Generation of created-form ids with a monotonicity guarantee, so two
//!   additions inside the same millisecond still receive distinct ids.
//!
//! Notes:
//! - Canonical form is *required* for externally supplied identifiers (for
//!   example CLI input). Use [`CaseId::parse`] to validate an input string.
//! - Non-canonical values (uppercase, leading zeros, missing prefix, stray
//!   characters) are rejected.

mod case_id;

pub use case_id::CaseId;

/// Error type for case identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for case identifier operations.
pub type IdResult<T> = Result<T, IdError>;

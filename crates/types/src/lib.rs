//! Shared domain types for the pharmcase case library.
//!
//! This crate defines the records that flow between the store, the
//! projection layer, the AI-collaborator boundary and the CLI:
//!
//! - [`NonEmptyText`]: a string type that guarantees non-empty content,
//!   used for fields that must carry at least one visible character.
//! - [`CaseTags`] / [`TagDimension`]: the closed set of tag dimensions a
//!   case is filed under. Dimension *names* are fixed; values stay open
//!   strings.
//! - [`QuizQuestion`]: a single self-assessment question, valid by
//!   construction (at least two options, the answer is one of them).
//! - [`CaseDraft`]: a case payload without an identifier, as submitted by a
//!   caller or the seed catalogue. Valid by construction (non-empty quiz).
//! - [`CaseStudy`]: a stored case, a draft plus the identifier the library
//!   assigned to it.
//!
//! Invariants live in constructors and in the deserialisation path, so a
//! value of these types is valid wherever it came from: a form submission,
//! the seed catalogue, a persisted snapshot or a collaborator reply.

mod case;
mod text;

pub use case::{CaseDraft, CaseStudy, CaseTags, DraftError, QuizQuestion, TagDimension};
pub use text::{NonEmptyText, TextError};

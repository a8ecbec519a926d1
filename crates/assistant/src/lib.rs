//! AI collaborator boundary for pharmcase.
//!
//! This crate provides **wire models** and the **reply envelope** for the
//! external generative-AI service the application delegates to:
//! - case generation (topic parameters in, a full case payload out)
//! - drug interaction checking (medication list in, graded findings out)
//!
//! This crate focuses on:
//! - the typed request/response contract
//! - the uniform success-or-`{"error": ...}` envelope
//! - translation between wire payloads and domain records
//!
//! It deliberately ships no transport. How a reply is obtained (HTTP, a
//! recorded fixture, a test script) is the implementer's concern; everything
//! after the raw JSON arrives is this crate's.

pub mod case_generation;
pub mod interaction_check;
pub mod reply;

// Re-export facades
pub use reply::Reply;

// Re-export public call types
pub use case_generation::{CaseGenerationRequest, CaseGenerationResponse, QuizQuestionPayload};
pub use interaction_check::{
    InteractionCheckRequest, InteractionCheckResponse, InteractionFinding, InteractionSeverity,
};

/// Errors returned by the assistant boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The collaborator answered with the `{"error": ...}` shape.
    #[error("collaborator reported an error: {0}")]
    Service(String),

    /// The reply was not valid JSON or did not match the expected payload.
    #[error("malformed collaborator reply: {0}")]
    Malformed(String),

    /// The call never produced a reply at all.
    #[error("collaborator transport failure: {0}")]
    Transport(String),

    /// The reply parsed but its content failed domain validation.
    #[error("generated case rejected: {0}")]
    Rejected(#[from] pharmcase_types::DraftError),
}

/// Type alias for Results that can fail with an [`AssistantError`].
pub type AssistantResult<T> = Result<T, AssistantError>;

/// The calls a collaborating AI service must answer.
///
/// Implementations hide how the raw reply is obtained; they are expected to
/// funnel it through [`Reply::parse`] so the error-first envelope contract
/// holds uniformly. Callers surface any [`AssistantError`] to the user and
/// leave their own state untouched, so the same request can be retried as-is.
pub trait Collaborator {
    /// Asks the collaborator to author a complete case payload.
    fn generate_case(
        &self,
        request: &CaseGenerationRequest,
    ) -> AssistantResult<CaseGenerationResponse>;

    /// Asks the collaborator to grade interactions within a medication list.
    fn check_interactions(
        &self,
        request: &InteractionCheckRequest,
    ) -> AssistantResult<InteractionCheckResponse>;
}

//! Case generation call: topic parameters in, a full case payload out.
//!
//! The wire payload mirrors the stored case shape but stays loose where the
//! domain is strict: every field is a plain string so the reply always
//! decodes when structurally sound, and domain validation happens once, in
//! the [`CaseDraft`] conversion. A collaborator reply is untrusted input;
//! nothing from it reaches the library without passing the same checks a
//! hand-written draft does.

use pharmcase_types::{CaseDraft, CaseTags, DraftError, NonEmptyText, QuizQuestion};
use serde::{Deserialize, Serialize};

/// Parameters of a case generation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseGenerationRequest {
    /// Clinical topic the case should teach (for example "myocardial infarction").
    pub topic: String,
    /// Organ system tag to target.
    pub organ: String,
    /// Difficulty tag to target.
    pub difficulty: String,
}

/// Wire shape of one quiz question inside a generation reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizQuestionPayload {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// Wire payload of a successful case generation reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseGenerationResponse {
    pub title: String,

    #[serde(default)]
    pub specialty: String,

    #[serde(default)]
    pub presentation: String,

    #[serde(default)]
    pub diagnosis: String,

    #[serde(default)]
    pub discussion: String,

    pub tags: CaseTags,

    pub quiz: Vec<QuizQuestionPayload>,
}

impl TryFrom<CaseGenerationResponse> for CaseDraft {
    type Error = DraftError;

    /// Validates a generation payload into a draft the library will accept.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when the title is blank, the quiz is empty, or
    /// any question is unanswerable under the option-set rules.
    fn try_from(response: CaseGenerationResponse) -> Result<Self, Self::Error> {
        let title = NonEmptyText::new(response.title)?;
        let quiz = response
            .quiz
            .into_iter()
            .map(|q| QuizQuestion::new(q.question, q.options, q.answer))
            .collect::<Result<Vec<_>, DraftError>>()?;

        CaseDraft::new(
            title,
            response.specialty,
            response.presentation,
            response.diagnosis,
            response.discussion,
            response.tags,
            quiz,
        )
    }
}

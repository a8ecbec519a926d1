//! Case study records: tags, quiz questions, drafts and stored cases.
//!
//! The serde shape of these types is the persisted entity shape: a stored
//! snapshot holds exactly what [`CaseStudy`] serialises to. Deserialisation
//! routes through the same constructors as programmatic creation, so data
//! read back from disk (or received from a collaborator) is held to the same
//! invariants as data built in-process. A record that fails those checks is
//! a schema mismatch, not a half-valid value.

use crate::{NonEmptyText, TextError};
use pharmcase_ids::CaseId;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a case payload.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    /// The quiz sequence was empty.
    #[error("a case must carry at least one quiz question")]
    EmptyQuiz,
    /// A question offered fewer than two options.
    #[error("question '{question}' needs at least two options")]
    TooFewOptions { question: String },
    /// A question's designated answer is not among its options.
    #[error("the answer to '{question}' is not one of its options")]
    AnswerNotAnOption { question: String },
    /// A required text field failed validation.
    #[error(transparent)]
    Text(#[from] TextError),
}

// ============================================================================
// Tags
// ============================================================================

/// The closed set of dimensions a case is tagged under.
///
/// Dimension names are fixed by the schema; the *values* within each
/// dimension are open strings. Projection code iterates
/// [`TagDimension::ALL`] instead of hard-coding field access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagDimension {
    /// Organ system the case centres on (for example "Heart").
    Organ,
    /// Kind of pathology (wire name `type`, for example "Inflammatory").
    Category,
    /// Teaching difficulty (for example "Intermediate").
    Difficulty,
}

impl TagDimension {
    /// Every dimension, in the order filter surfaces present them.
    pub const ALL: [TagDimension; 3] =
        [TagDimension::Organ, TagDimension::Category, TagDimension::Difficulty];

    /// The wire/display name of this dimension.
    pub const fn as_str(self) -> &'static str {
        match self {
            TagDimension::Organ => "organ",
            TagDimension::Category => "type",
            TagDimension::Difficulty => "difficulty",
        }
    }
}

/// Categorical tags of a case, one value per [`TagDimension`].
///
/// Values are deliberately not validated against a closed vocabulary: the
/// catalogue grows by hand and through collaborator-generated cases, and the
/// filter surfaces derive their option lists from the values actually
/// present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseTags {
    /// Organ system.
    pub organ: String,
    /// Pathology category. Serialises as `type`, the historical field name.
    #[serde(rename = "type")]
    pub category: String,
    /// Teaching difficulty.
    pub difficulty: String,
}

impl CaseTags {
    /// Convenience constructor.
    pub fn new(
        organ: impl Into<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            organ: organ.into(),
            category: category.into(),
            difficulty: difficulty.into(),
        }
    }

    /// Returns the value stored under `dimension`.
    pub fn value(&self, dimension: TagDimension) -> &str {
        match dimension {
            TagDimension::Organ => &self.organ,
            TagDimension::Category => &self.category,
            TagDimension::Difficulty => &self.difficulty,
        }
    }
}

// ============================================================================
// Quiz questions
// ============================================================================

/// A single self-assessment question, valid by construction.
///
/// Validity means: at least two options, and the designated answer is
/// exactly one of them (compared as whole strings). Deserialisation applies
/// the same checks, so a quiz read from a snapshot or a collaborator reply
/// cannot smuggle in an unanswerable question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl QuizQuestion {
    /// Builds a question after validating its option set.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::TooFewOptions`] if fewer than two options are
    /// given, or [`DraftError::AnswerNotAnOption`] if `answer` does not
    /// equal any option.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, DraftError> {
        let question = question.into();
        let answer = answer.into();

        if options.len() < 2 {
            return Err(DraftError::TooFewOptions { question });
        }
        if !options.iter().any(|option| *option == answer) {
            return Err(DraftError::AnswerNotAnOption { question });
        }

        Ok(Self {
            question,
            options,
            answer,
        })
    }

    /// The question prompt.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer options, in presentation order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The designated correct answer (always one of [`options`](Self::options)).
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct QuizQuestionWire {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl<'de> Deserialize<'de> for QuizQuestion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = QuizQuestionWire::deserialize(deserializer)?;
        QuizQuestion::new(wire.question, wire.options, wire.answer)
            .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Drafts and stored cases
// ============================================================================

/// A case payload without an identifier.
///
/// This is the shape callers submit: identifiers are assigned by the
/// library, never chosen by the caller. A draft is valid by construction
/// (in particular its quiz is non-empty), so the store accepts any draft
/// without further checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaseDraft {
    title: NonEmptyText,
    specialty: String,
    presentation: String,
    diagnosis: String,
    discussion: String,
    tags: CaseTags,
    quiz: Vec<QuizQuestion>,
}

impl CaseDraft {
    /// Builds a draft after validating the quiz sequence.
    ///
    /// The individual questions are already valid by construction; the only
    /// check applied here is that at least one question is present.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::EmptyQuiz`] if `quiz` is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: NonEmptyText,
        specialty: impl Into<String>,
        presentation: impl Into<String>,
        diagnosis: impl Into<String>,
        discussion: impl Into<String>,
        tags: CaseTags,
        quiz: Vec<QuizQuestion>,
    ) -> Result<Self, DraftError> {
        if quiz.is_empty() {
            return Err(DraftError::EmptyQuiz);
        }
        Ok(Self {
            title,
            specialty: specialty.into(),
            presentation: presentation.into(),
            diagnosis: diagnosis.into(),
            discussion: discussion.into(),
            tags,
            quiz,
        })
    }

    /// Attaches the identifier the library assigned, producing the stored
    /// form of the case.
    pub fn into_case(self, id: CaseId) -> CaseStudy {
        CaseStudy {
            id,
            title: self.title,
            specialty: self.specialty,
            presentation: self.presentation,
            diagnosis: self.diagnosis,
            discussion: self.discussion,
            tags: self.tags,
            quiz: self.quiz,
        }
    }

    /// The case title.
    pub fn title(&self) -> &NonEmptyText {
        &self.title
    }

    /// The categorical tags.
    pub fn tags(&self) -> &CaseTags {
        &self.tags
    }

    /// The quiz sequence (never empty).
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseDraftWire {
    title: NonEmptyText,
    #[serde(default)]
    specialty: String,
    #[serde(default)]
    presentation: String,
    #[serde(default)]
    diagnosis: String,
    #[serde(default)]
    discussion: String,
    tags: CaseTags,
    quiz: Vec<QuizQuestion>,
}

impl CaseDraftWire {
    fn into_draft(self) -> Result<CaseDraft, DraftError> {
        CaseDraft::new(
            self.title,
            self.specialty,
            self.presentation,
            self.diagnosis,
            self.discussion,
            self.tags,
            self.quiz,
        )
    }
}

impl<'de> Deserialize<'de> for CaseDraft {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = CaseDraftWire::deserialize(deserializer)?;
        wire.into_draft().map_err(serde::de::Error::custom)
    }
}

/// A stored case study: a validated payload plus its assigned identifier.
///
/// Stored cases are immutable once created: the library supports adding
/// cases and toggling completion, never editing an entity in place. All
/// fields are therefore exposed read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaseStudy {
    id: CaseId,
    title: NonEmptyText,
    specialty: String,
    presentation: String,
    diagnosis: String,
    discussion: String,
    tags: CaseTags,
    quiz: Vec<QuizQuestion>,
}

impl CaseStudy {
    /// The identifier assigned by the library.
    pub fn id(&self) -> &CaseId {
        &self.id
    }

    /// The case title.
    pub fn title(&self) -> &NonEmptyText {
        &self.title
    }

    /// The clinical specialty the case belongs to.
    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    /// The presenting complaint and findings.
    pub fn presentation(&self) -> &str {
        &self.presentation
    }

    /// The established diagnosis.
    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    /// Teaching discussion accompanying the case.
    pub fn discussion(&self) -> &str {
        &self.discussion
    }

    /// The categorical tags.
    pub fn tags(&self) -> &CaseTags {
        &self.tags
    }

    /// The quiz sequence (never empty).
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseStudyWire {
    id: CaseId,
    title: NonEmptyText,
    #[serde(default)]
    specialty: String,
    #[serde(default)]
    presentation: String,
    #[serde(default)]
    diagnosis: String,
    #[serde(default)]
    discussion: String,
    tags: CaseTags,
    quiz: Vec<QuizQuestion>,
}

impl<'de> Deserialize<'de> for CaseStudy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = CaseStudyWire::deserialize(deserializer)?;
        let draft = CaseDraftWire {
            title: wire.title,
            specialty: wire.specialty,
            presentation: wire.presentation,
            diagnosis: wire.diagnosis,
            discussion: wire.discussion,
            tags: wire.tags,
            quiz: wire.quiz,
        }
        .into_draft()
        .map_err(serde::de::Error::custom)?;

        Ok(draft.into_case(wire.id))
    }
}

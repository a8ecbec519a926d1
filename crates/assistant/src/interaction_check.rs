//! Drug interaction check call: a medication list in, graded findings out.

use serde::{Deserialize, Serialize};

/// Parameters of an interaction check call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractionCheckRequest {
    /// Medication names as the user entered them.
    pub medications: Vec<String>,
}

impl InteractionCheckRequest {
    /// Convenience constructor.
    pub fn new(medications: Vec<String>) -> Self {
        Self { medications }
    }
}

/// Severity grade attached to a reported interaction.
///
/// Ordered so `Minor < Moderate < Major`; consumers use the ordering to pick
/// the headline finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSeverity {
    Minor,
    Moderate,
    Major,
}

/// One interaction the collaborator flagged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractionFinding {
    /// The two interacting medications.
    pub pair: [String; 2],
    /// How serious the interaction is.
    pub severity: InteractionSeverity,
    /// Short description of the mechanism or effect.
    pub summary: String,
    /// Suggested course of action, possibly empty.
    #[serde(default)]
    pub recommendation: String,
}

/// Wire payload of a successful interaction check reply.
///
/// An empty findings list is a meaningful answer ("no interactions found"),
/// not a failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractionCheckResponse {
    #[serde(default)]
    pub findings: Vec<InteractionFinding>,
}

impl InteractionCheckResponse {
    /// True when no interactions were reported.
    pub fn is_clear(&self) -> bool {
        self.findings.is_empty()
    }

    /// The most severe grade among the findings, if any.
    pub fn worst_severity(&self) -> Option<InteractionSeverity> {
        self.findings.iter().map(|finding| finding.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reply;

    #[test]
    fn test_severity_grades_are_ordered() {
        assert!(InteractionSeverity::Minor < InteractionSeverity::Moderate);
        assert!(InteractionSeverity::Moderate < InteractionSeverity::Major);
    }

    #[test]
    fn test_worst_severity_picks_the_highest_grade() {
        let response: InteractionCheckResponse = Reply::parse(
            r#"{
                "findings": [
                    {"pair": ["simvastatin", "clarithromycin"],
                     "severity": "moderate",
                     "summary": "CYP3A4 inhibition raises statin exposure."},
                    {"pair": ["warfarin", "aspirin"],
                     "severity": "major",
                     "summary": "Additive bleeding risk.",
                     "recommendation": "Avoid combination."}
                ]
            }"#,
        )
        .expect("reply parses");

        assert!(!response.is_clear());
        assert_eq!(response.worst_severity(), Some(InteractionSeverity::Major));
    }

    #[test]
    fn test_empty_reply_means_no_interactions() {
        let response: InteractionCheckResponse =
            Reply::parse(r#"{"findings": []}"#).expect("reply parses");
        assert!(response.is_clear());
        assert_eq!(response.worst_severity(), None);

        // The findings key may be omitted entirely.
        let response: InteractionCheckResponse = Reply::parse("{}").expect("reply parses");
        assert!(response.is_clear());
    }

    #[test]
    fn test_unknown_severity_grade_is_rejected() {
        let result = Reply::parse::<InteractionCheckResponse>(
            r#"{
                "findings": [
                    {"pair": ["a", "b"], "severity": "catastrophic", "summary": "?"}
                ]
            }"#,
        );
        assert!(result.is_err());
    }
}

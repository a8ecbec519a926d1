//! Seed catalogue: the deterministic initial dataset.
//!
//! A hand-authored set of case payloads embedded at compile time, used
//! whenever no usable persisted snapshot exists. Hydration assigns ids
//! `case1..caseN` in catalogue order, and seeding is all-or-nothing: the
//! catalogue is never merged with partial persisted state.

use crate::error::SeedError;
use pharmcase_types::CaseDraft;

const SEED_CATALOGUE_YAML: &str = include_str!("../seed/catalogue.yaml");

/// Parses the embedded seed catalogue into case drafts, in catalogue order.
///
/// # Errors
///
/// Fails only when the embedded YAML does not match the draft schema. The
/// catalogue ships inside the binary, so that is a packaging defect pinned
/// by a test, not a condition normal operation can reach.
pub fn seed_catalogue() -> Result<Vec<CaseDraft>, SeedError> {
    let deserializer = serde_yaml::Deserializer::from_str(SEED_CATALOGUE_YAML);
    match serde_path_to_error::deserialize::<_, Vec<CaseDraft>>(deserializer) {
        Ok(drafts) => Ok(drafts),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() {
                "<root>".to_string()
            } else {
                path
            };
            Err(SeedError::Schema { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_catalogue_parses() {
        let drafts = seed_catalogue().expect("embedded catalogue must parse");
        assert_eq!(drafts.len(), 6);
        assert_eq!(
            drafts[0].title().as_str(),
            "Crushing chest pain in a 58-year-old taxi driver"
        );
    }

    #[test]
    fn test_catalogue_titles_are_distinct() {
        let drafts = seed_catalogue().expect("embedded catalogue must parse");
        let titles: HashSet<&str> = drafts.iter().map(|draft| draft.title().as_str()).collect();
        assert_eq!(titles.len(), drafts.len());
    }

    #[test]
    fn test_catalogue_spans_multiple_organs_and_difficulties() {
        let drafts = seed_catalogue().expect("embedded catalogue must parse");

        let organs: HashSet<&str> = drafts.iter().map(|draft| draft.tags().organ.as_str()).collect();
        assert!(organs.len() >= 4, "catalogue should cover several organs");

        let difficulties: HashSet<&str> = drafts
            .iter()
            .map(|draft| draft.tags().difficulty.as_str())
            .collect();
        assert_eq!(
            difficulties,
            HashSet::from(["Basic", "Intermediate", "Advanced"])
        );
    }

    #[test]
    fn test_every_catalogue_case_has_a_multi_question_quiz() {
        let drafts = seed_catalogue().expect("embedded catalogue must parse");
        for draft in &drafts {
            assert!(
                draft.quiz().len() >= 2,
                "case '{}' should quiz more than once",
                draft.title()
            );
        }
    }
}

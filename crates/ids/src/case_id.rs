//! Internal implementation of the case identifier type.

use crate::{IdError, IdResult};
use chrono::Utc;
use std::{fmt, str::FromStr};

/// The canonical identifier of a case study.
///
/// A `CaseId` is always in one of the two canonical forms described in the
/// crate docs: the seed form `case<N>` or the created form `case_<ms>`. Once
/// constructed, the contained string is guaranteed canonical, so it can be
/// used directly as a storage key, a completion-set member and a display
/// value without re-validation.
///
/// # Construction
/// - [`CaseId::seed`] produces the id for a seed-catalogue position.
/// - [`CaseId::generate`] allocates a fresh created-form id for an `add`.
/// - [`CaseId::parse`] validates an externally supplied identifier.
///
/// # Ordering of created ids
/// Created ids embed wall-clock milliseconds. [`CaseId::generate`] never
/// reuses the millisecond of the previously issued created id: when the
/// clock has not advanced (or moved backwards), the new id is nudged forward
/// by at least 1 ms. Callers pass the largest created-form millisecond they
/// have issued so far.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaseId(String);

impl CaseId {
    /// Returns the id for position `ordinal` of the seed catalogue.
    ///
    /// Positions are 1-based: the first catalogue entry is `case1`. An
    /// `ordinal` of zero is not a canonical position and is mapped to
    /// `case1` so that the invariant of this type (always canonical) holds
    /// for every constructed value.
    pub fn seed(ordinal: usize) -> Self {
        Self(format!("case{}", ordinal.max(1)))
    }

    /// Allocates a new created-form id from the current wall clock.
    ///
    /// `last_created_ms` is the millisecond component of the most recent
    /// created-form id already present in the library, if any. When the
    /// clock reads less than or equal to that value the new id uses
    /// `last_created_ms + 1`, guaranteeing that ids stay pairwise distinct
    /// even for several additions inside one millisecond.
    pub fn generate(last_created_ms: Option<i64>) -> Self {
        let now = Utc::now().timestamp_millis();
        let ms = match last_created_ms {
            Some(prev) if now <= prev => prev + 1,
            _ => now,
        };
        Self(format!("case_{ms}"))
    }

    /// Validates and parses an identifier that must already be canonical.
    ///
    /// This does **not** normalise other spellings (uppercase, padded
    /// numbers, surrounding whitespace). Callers must provide the canonical
    /// representation.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is not in one of the two
    /// canonical forms.
    pub fn parse(input: &str) -> IdResult<Self> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(IdError::InvalidInput(format!(
            "case id must be 'case<N>' or 'case_<ms>', got: '{input}'"
        )))
    }

    /// Returns true if `input` is in one of the canonical id forms.
    ///
    /// This is a purely syntactic check:
    /// - `case<N>`: `N` is one or more ASCII digits with no leading zero
    ///   and a non-zero value;
    /// - `case_<ms>`: `<ms>` is one or more ASCII digits with no leading
    ///   zero (a single `0` is accepted), fitting in a signed 64-bit value.
    pub fn is_canonical(input: &str) -> bool {
        let Some(rest) = input.strip_prefix("case") else {
            return false;
        };
        match rest.strip_prefix('_') {
            Some(ms) => is_plain_decimal(ms) && ms.parse::<i64>().is_ok(),
            None => is_plain_decimal(rest) && rest != "0" && !rest.is_empty(),
        }
    }

    /// Returns the inner identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the embedded creation time in epoch milliseconds, or `None`
    /// for a seed-form id.
    pub fn created_ms(&self) -> Option<i64> {
        self.0.strip_prefix("case_").and_then(|ms| ms.parse().ok())
    }
}

/// True for a non-empty ASCII digit string without a superfluous leading
/// zero (`"0"` itself is allowed, `"01"` is not).
fn is_plain_decimal(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s.len() == 1 || !s.starts_with('0'))
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CaseId {
    type Err = IdError;

    /// Parses a string into a `CaseId`, requiring canonical form.
    ///
    /// Equivalent to calling [`CaseId::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CaseId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CaseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CaseId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_produces_expected_ids() {
        assert_eq!(CaseId::seed(1).as_str(), "case1");
        assert_eq!(CaseId::seed(2).as_str(), "case2");
        assert_eq!(CaseId::seed(12).as_str(), "case12");
    }

    #[test]
    fn test_seed_clamps_zero_to_first_position() {
        assert_eq!(CaseId::seed(0).as_str(), "case1");
    }

    #[test]
    fn test_generate_produces_created_form() {
        let id = CaseId::generate(None);
        assert!(id.as_str().starts_with("case_"));
        assert!(id.created_ms().is_some());
        assert!(CaseId::is_canonical(id.as_str()));
    }

    #[test]
    fn test_generate_nudges_forward_at_same_instant() {
        let first = CaseId::generate(None);
        let first_ms = first.created_ms().expect("created id embeds ms");
        // Don't sleep - force the monotonic increment logic
        let second = CaseId::generate(Some(first_ms));
        let second_ms = second.created_ms().expect("created id embeds ms");

        assert!(second_ms > first_ms);
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_ignores_older_previous_id() {
        let id = CaseId::generate(Some(1_000));
        let ms = id.created_ms().expect("created id embeds ms");
        // The clock is well past epoch-second one; the previous id must not
        // drag the new id back.
        assert!(ms > 1_000);
    }

    #[test]
    fn test_parse_valid_seed_form() {
        let id = CaseId::parse("case7").expect("case7 is canonical");
        assert_eq!(id.as_str(), "case7");
        assert_eq!(id.created_ms(), None);
    }

    #[test]
    fn test_parse_valid_created_form() {
        let id = CaseId::parse("case_1755950400123").expect("created form is canonical");
        assert_eq!(id.created_ms(), Some(1_755_950_400_123));
    }

    #[test]
    fn test_parse_rejects_bare_prefix() {
        assert!(CaseId::parse("case").is_err());
        assert!(CaseId::parse("case_").is_err());
    }

    #[test]
    fn test_parse_rejects_zero_and_leading_zeros_in_seed_form() {
        assert!(CaseId::parse("case0").is_err());
        assert!(CaseId::parse("case01").is_err());
        assert!(CaseId::parse("case007").is_err());
    }

    #[test]
    fn test_parse_rejects_leading_zeros_in_created_form() {
        assert!(CaseId::parse("case_0123").is_err());
        // A literal zero millisecond is canonical, if pathological.
        assert!(CaseId::parse("case_0").is_ok());
    }

    #[test]
    fn test_parse_rejects_uppercase_and_stray_characters() {
        assert!(CaseId::parse("Case1").is_err());
        assert!(CaseId::parse("CASE_123").is_err());
        assert!(CaseId::parse("case1a").is_err());
        assert!(CaseId::parse("case_12a").is_err());
        assert!(CaseId::parse(" case1").is_err());
        assert!(CaseId::parse("case-1").is_err());
        assert!(CaseId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_oversized_millisecond_value() {
        // One digit beyond i64::MAX.
        assert!(CaseId::parse("case_92233720368547758070").is_err());
    }

    #[test]
    fn test_from_str_matches_parse() {
        let parsed: CaseId = "case3".parse().expect("case3 is canonical");
        assert_eq!(parsed, CaseId::parse("case3").unwrap());

        let invalid: Result<CaseId, _> = "case03".parse();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let original = CaseId::generate(None);
        let as_string = original.to_string();
        let parsed = CaseId::parse(&as_string).expect("display output is canonical");
        assert_eq!(original, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_as_plain_string() {
        let id = CaseId::parse("case_1700000000000").unwrap();
        let json = serde_json::to_string(&id).expect("serialises");
        assert_eq!(json, "\"case_1700000000000\"");

        let back: CaseId = serde_json::from_str(&json).expect("deserialises");
        assert_eq!(back, id);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_non_canonical_input() {
        let result: Result<CaseId, _> = serde_json::from_str("\"case01\"");
        assert!(result.is_err());
    }
}

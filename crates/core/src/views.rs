//! Read-side projections over the case collection.
//!
//! Pure functions of the current collection and overlay: nothing here
//! mutates or persists anything, every projection is a cheap linear pass
//! recomputed on demand, and none of them can fail.

use pharmcase_ids::CaseId;
use pharmcase_types::{CaseStudy, TagDimension};

/// Distinct tag values present in the collection, one list per dimension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub organs: Vec<String>,
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
}

impl FilterOptions {
    /// The option list for `dimension`.
    pub fn for_dimension(&self, dimension: TagDimension) -> &[String] {
        match dimension {
            TagDimension::Organ => &self.organs,
            TagDimension::Category => &self.categories,
            TagDimension::Difficulty => &self.difficulties,
        }
    }
}

/// Derives the distinct tag values per dimension across `cases`.
///
/// Values keep first-occurrence order over the collection, never sorted;
/// filter dropdowns present them exactly as derived.
pub fn filter_options(cases: &[CaseStudy]) -> FilterOptions {
    let mut options = FilterOptions::default();
    for case in cases {
        for dimension in TagDimension::ALL {
            let value = case.tags().value(dimension);
            let bucket = match dimension {
                TagDimension::Organ => &mut options.organs,
                TagDimension::Category => &mut options.categories,
                TagDimension::Difficulty => &mut options.difficulties,
            };
            if !bucket.iter().any(|existing| existing == value) {
                bucket.push(value.to_string());
            }
        }
    }
    options
}

/// One tag criterion: either no constraint or an exact value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TagFilter {
    /// Matches every case (the "All" choice in a dropdown).
    #[default]
    Any,
    /// Matches cases whose tag equals this value exactly.
    Value(String),
}

impl TagFilter {
    fn matches(&self, value: &str) -> bool {
        match self {
            TagFilter::Any => true,
            TagFilter::Value(wanted) => wanted == value,
        }
    }
}

/// Search criteria. Every populated part must match: the criteria are ANDed,
/// and an empty/`Any` part constrains nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseFilter {
    /// Case-insensitive substring matched against title, presentation and
    /// diagnosis. An empty string matches everything.
    pub text: String,
    pub organ: TagFilter,
    pub category: TagFilter,
    pub difficulty: TagFilter,
}

impl CaseFilter {
    fn tag_filter(&self, dimension: TagDimension) -> &TagFilter {
        match dimension {
            TagDimension::Organ => &self.organ,
            TagDimension::Category => &self.category,
            TagDimension::Difficulty => &self.difficulty,
        }
    }

    fn matches(&self, case: &CaseStudy) -> bool {
        if !self.text.is_empty() {
            let needle = self.text.to_lowercase();
            let matched = [case.title().as_str(), case.presentation(), case.diagnosis()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !matched {
                return false;
            }
        }

        TagDimension::ALL
            .iter()
            .all(|&dimension| self.tag_filter(dimension).matches(case.tags().value(dimension)))
    }
}

/// Linear filter pass over `cases`, preserving collection order.
///
/// No ranking: a case either matches every criterion or is dropped.
pub fn search<'a>(cases: &'a [CaseStudy], filter: &CaseFilter) -> Vec<&'a CaseStudy> {
    cases.iter().filter(|case| filter.matches(case)).collect()
}

/// Completed-over-total progress of the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    /// Fraction in `[0, 1]`; an empty collection counts as no progress.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Whole-number percentage, rounded to nearest.
    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).round() as u8
    }
}

/// Summarises completion over `cases`.
///
/// Counts the cases whose id carries a mark, so neither stale marks nor
/// duplicated marks can push progress past 100%.
pub fn progress(cases: &[CaseStudy], completed: &[CaseId]) -> ProgressSummary {
    let completed = cases
        .iter()
        .filter(|case| completed.contains(case.id()))
        .count();
    ProgressSummary {
        completed,
        total: cases.len(),
    }
}

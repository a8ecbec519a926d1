//! The case library: single source of truth for the current session.
//!
//! A `CaseLibrary` owns the in-memory case collection and the completion
//! overlay, mediates every mutation, and re-persists the full snapshot
//! through its [`SnapshotStore`] after each change. Consumers read the
//! current state through accessors and projections, or subscribe for
//! change notifications; they never touch the store directly.
//!
//! The execution model is single-threaded and callback-driven: each
//! operation runs to completion before the next, so no locking is needed
//! and observers are delivered synchronously.

use crate::error::SeedError;
use crate::seed::seed_catalogue;
use crate::snapshot::{CaseSnapshot, SnapshotStore};
use crate::views::{self, CaseFilter, FilterOptions, ProgressSummary};
use pharmcase_ids::CaseId;
use pharmcase_types::{CaseDraft, CaseStudy};

/// State-change notifications delivered to subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibraryEvent {
    /// A case was added at the front of the collection.
    CaseAdded { id: CaseId },
    /// Completion was flipped for an id; `completed` is the new membership.
    CompletionToggled { id: CaseId, completed: bool },
}

/// Handle returned by [`CaseLibrary::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(&LibraryEvent)>;

/// Collapses duplicate marks in a loaded overlay, keeping first-occurrence
/// order. Every mutation path keeps the overlay duplicate-free already; this
/// holds persisted data to the same standard on hydration.
fn dedupe_overlay(completed: Vec<CaseId>) -> Vec<CaseId> {
    let mut overlay: Vec<CaseId> = Vec::with_capacity(completed.len());
    for id in completed {
        if !overlay.contains(&id) {
            overlay.push(id);
        }
    }
    overlay
}

/// The persisted case collection plus completion overlay for one session.
pub struct CaseLibrary<S> {
    cases: Vec<CaseStudy>,
    completed: Vec<CaseId>,
    store: S,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
    last_created_ms: Option<i64>,
}

impl<S: SnapshotStore> CaseLibrary<S> {
    /// Opens the library: hydrates from the persisted snapshot when one is
    /// usable, otherwise falls back to the seed catalogue.
    ///
    /// A snapshot is usable only if it loads *and* holds at least one case;
    /// a snapshot with an empty collection reseeds exactly like a missing
    /// one, and its overlay is dropped with it. The overlay is a set:
    /// duplicate marks in a persisted snapshot are collapsed on load, first
    /// occurrence wins. Opening performs no writes: the seeded state first
    /// reaches disk on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] only when the embedded catalogue fails to
    /// parse, which is a packaging defect.
    pub fn open(store: S) -> Result<Self, SeedError> {
        let (cases, completed) = match store.load() {
            Some(snapshot) if !snapshot.cases.is_empty() => {
                tracing::info!(
                    "case library hydrated from persisted snapshot: {} cases, {} completed",
                    snapshot.cases.len(),
                    snapshot.completed.len()
                );
                (snapshot.cases, dedupe_overlay(snapshot.completed))
            }
            Some(_) => {
                tracing::info!("persisted snapshot holds no cases; seeding case library");
                (Self::seeded_cases()?, Vec::new())
            }
            None => {
                tracing::info!("no usable persisted snapshot; seeding case library");
                (Self::seeded_cases()?, Vec::new())
            }
        };

        let last_created_ms = cases.iter().filter_map(|case| case.id().created_ms()).max();

        Ok(Self {
            cases,
            completed,
            store,
            subscribers: Vec::new(),
            next_subscriber: 0,
            last_created_ms,
        })
    }

    fn seeded_cases() -> Result<Vec<CaseStudy>, SeedError> {
        let drafts = seed_catalogue()?;
        Ok(drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| draft.into_case(CaseId::seed(index + 1)))
            .collect())
    }

    /// Adds a draft to the library and returns the assigned id.
    ///
    /// The library assigns the id itself, never the caller. The new case is
    /// prepended (the collection is newest-first), the full snapshot is
    /// persisted best-effort, and observers are notified last.
    pub fn add(&mut self, draft: CaseDraft) -> CaseId {
        let id = CaseId::generate(self.last_created_ms);
        self.last_created_ms = id.created_ms();

        let case = draft.into_case(id.clone());
        self.cases.insert(0, case);

        self.persist();
        self.notify(&LibraryEvent::CaseAdded { id: id.clone() });
        id
    }

    /// Flips completion for `id` and returns the new membership.
    ///
    /// Applied unconditionally: the id need not belong to a case in the
    /// collection, and a toggle-pair always restores the prior overlay.
    pub fn toggle_completion(&mut self, id: &CaseId) -> bool {
        let completed = match self.completed.iter().position(|marked| marked == id) {
            Some(index) => {
                self.completed.remove(index);
                false
            }
            None => {
                self.completed.push(id.clone());
                true
            }
        };

        self.persist();
        self.notify(&LibraryEvent::CompletionToggled {
            id: id.clone(),
            completed,
        });
        completed
    }

    /// Persists the full snapshot. A failed write is logged and otherwise
    /// ignored: the in-memory state stays authoritative for this session.
    fn persist(&self) {
        let snapshot = CaseSnapshot {
            cases: self.cases.clone(),
            completed: self.completed.clone(),
        };
        if let Err(err) = self.store.save(&snapshot) {
            tracing::warn!(
                "failed to persist case library snapshot: {}; changes are in-memory only",
                err
            );
        }
    }
}

impl<S> CaseLibrary<S> {
    /// Registers a subscriber; it runs synchronously after every mutation,
    /// once the state change and persistence attempt are done.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&LibraryEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, event: &LibraryEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// The case collection, newest first.
    pub fn cases(&self) -> &[CaseStudy] {
        &self.cases
    }

    /// Ids marked completed, in the order they were first marked.
    pub fn completed(&self) -> &[CaseId] {
        &self.completed
    }

    /// Whether `id` is currently marked completed.
    pub fn is_completed(&self, id: &CaseId) -> bool {
        self.completed.iter().any(|marked| marked == id)
    }

    /// Number of cases in the collection.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True when the collection holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Distinct tag values present in the collection, per dimension.
    pub fn filter_options(&self) -> FilterOptions {
        views::filter_options(&self.cases)
    }

    /// Cases matching `filter`, in collection order.
    pub fn search(&self, filter: &CaseFilter) -> Vec<&CaseStudy> {
        views::search(&self.cases, filter)
    }

    /// Completion progress over the current collection.
    pub fn progress(&self) -> ProgressSummary {
        views::progress(&self.cases, &self.completed)
    }
}

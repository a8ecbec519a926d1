//! Versioned snapshot persistence for the case library.
//!
//! The whole library state (the case collection plus the completion overlay)
//! serialises to one JSON document held in a single versioned slot file,
//! `<namespace>_data_v<N>.json`, inside the data directory. The slot name
//! embeds the schema version: bumping [`SCHEMA_VERSION`] makes every older
//! slot invisible to `load`, and the migration table below names what happens
//! to the data they hold.
//!
//! Failure semantics follow the library's fail-open policy:
//! - `load` never surfaces an error. A missing file, unreadable file, invalid
//!   JSON or mismatched shape all degrade to `None` (logged), and the caller
//!   falls back to the seed catalogue.
//! - `save` reports its error to the caller, who logs it and keeps the
//!   in-memory state authoritative for the session. Persistence is
//!   best-effort, never a reason to halt.
//!
//! Old-version slot files are left in place on disk; they are only ever
//! ignored, never read and never deleted.

use crate::config::LibraryConfig;
use crate::constants::{SCHEMA_VERSION, SNAPSHOT_NAMESPACE};
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use pharmcase_ids::CaseId;
use pharmcase_types::CaseStudy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Schema versioning
// ============================================================================

/// Version of the persisted snapshot schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
    /// Create a schema version.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The numeric version.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// What becomes of data persisted under an older schema version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Migration {
    /// The old shape is incompatible: never read it, rebuild from seed.
    DiscardAndReseed,
}

/// Migration table for persisted snapshots.
///
/// Every version older than [`SCHEMA_VERSION`] maps to a policy here, so
/// discarding old data is a named decision rather than an accident. Returns
/// `None` for the current version and anything newer.
pub fn migration_for(version: SchemaVersion) -> Option<Migration> {
    if version >= SCHEMA_VERSION {
        return None;
    }
    // v1 stored quiz answers as option indexes; there is no lossless mapping
    // to the current shape, so every pre-2 slot rebuilds from seed.
    Some(Migration::DiscardAndReseed)
}

// ============================================================================
// Snapshot value and store interface
// ============================================================================

/// The full serialisable state of the library: collection plus overlay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseSnapshot {
    /// The case collection, newest first.
    pub cases: Vec<CaseStudy>,
    /// Ids marked completed, in the order they were first marked.
    pub completed: Vec<CaseId>,
}

/// Persistence adapter for the case library.
///
/// `load` is infallible by contract: anything short of a usable snapshot is
/// reported as `None` (after logging) so the caller falls back to seeding.
/// `save` surfaces its error; the caller decides how loudly to care.
pub trait SnapshotStore {
    /// Returns the persisted snapshot, if a usable one exists.
    fn load(&self) -> Option<CaseSnapshot>;

    /// Persists the full snapshot, replacing whatever the slot held.
    fn save(&self, snapshot: &CaseSnapshot) -> StoreResult<()>;
}

// ============================================================================
// File-backed store
// ============================================================================

/// On-disk document: the snapshot fields plus a write stamp.
///
/// `saved_at` is diagnostic only. The slot has no concurrency control, so
/// concurrent sessions overwrite each other last-writer-wins; the stamp at
/// least shows whose write survived.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDocument {
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    cases: Vec<CaseStudy>,
    #[serde(default)]
    completed: Vec<CaseId>,
}

/// File name of the snapshot slot for `version`.
fn slot_file_name(version: SchemaVersion) -> String {
    format!("{SNAPSHOT_NAMESPACE}_data_{version}.json")
}

/// Snapshot persistence backed by a single JSON file in the data directory.
#[derive(Clone, Debug)]
pub struct FileSnapshotStore {
    cfg: Arc<LibraryConfig>,
    version: SchemaVersion,
}

impl FileSnapshotStore {
    /// Creates a store reading and writing the current-version slot.
    pub fn new(cfg: Arc<LibraryConfig>) -> Self {
        Self::at_version(cfg, SCHEMA_VERSION)
    }

    /// Creates a store pinned to an explicit schema version.
    ///
    /// Normal operation always uses [`FileSnapshotStore::new`]; pinning
    /// exists so tests can stage slots for other versions.
    pub fn at_version(cfg: Arc<LibraryConfig>, version: SchemaVersion) -> Self {
        Self { cfg, version }
    }

    /// Path of this store's slot file.
    pub fn slot_path(&self) -> PathBuf {
        self.cfg.data_dir().join(slot_file_name(self.version))
    }

    /// Older-version slots sitting in the data directory, paired with the
    /// migration policy that applies to each. They are never read.
    fn stale_slots(&self) -> Vec<(PathBuf, Migration)> {
        (1..self.version.get())
            .map(SchemaVersion::new)
            .filter_map(|old| {
                let path = self.cfg.data_dir().join(slot_file_name(old));
                match migration_for(old) {
                    Some(migration) if path.exists() => Some((path, migration)),
                    _ => None,
                }
            })
            .collect()
    }

    /// Logs any stale slots and their migration policy. Called on every load
    /// outcome that falls back to seeding, so a version-bump discard is
    /// visible in diagnostics no matter how the current slot failed.
    fn report_stale_slots(&self) {
        for (path, migration) in self.stale_slots() {
            match migration {
                Migration::DiscardAndReseed => tracing::warn!(
                    "snapshot {} predates schema {}; policy is discard-and-reseed, it will not be read",
                    path.display(),
                    self.version
                ),
            }
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Option<CaseSnapshot> {
        let path = self.slot_path();

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no snapshot at {}", path.display());
                self.report_stale_slots();
                return None;
            }
            Err(err) => {
                tracing::warn!("failed to read snapshot {}: {}", path.display(), err);
                self.report_stale_slots();
                return None;
            }
        };

        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        match serde_path_to_error::deserialize::<_, SnapshotDocument>(&mut deserializer) {
            Ok(document) => Some(CaseSnapshot {
                cases: document.cases,
                completed: document.completed,
            }),
            Err(err) => {
                let at = err.path().to_string();
                let at = if at.is_empty() { "<root>".to_string() } else { at };
                tracing::warn!(
                    "discarding snapshot {}: schema mismatch at {}: {}",
                    path.display(),
                    at,
                    err.into_inner()
                );
                self.report_stale_slots();
                None
            }
        }
    }

    fn save(&self, snapshot: &CaseSnapshot) -> StoreResult<()> {
        fs::create_dir_all(self.cfg.data_dir()).map_err(StoreError::DataDirCreation)?;

        let document = SnapshotDocument {
            saved_at: Some(Utc::now()),
            cases: snapshot.cases.clone(),
            completed: snapshot.completed.clone(),
        };
        let json = serde_json::to_string_pretty(&document).map_err(StoreError::Serialisation)?;

        // The slot file replaces the entire library, so write to a sibling
        // temp file and rename: a torn write must not destroy the old slot.
        let path = self.slot_path();
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(StoreError::FileWrite)?;
        fs::rename(&tmp_path, &path).map_err(StoreError::FileRename)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmcase_types::{CaseDraft, CaseTags, NonEmptyText, QuizQuestion};
    use std::fs;
    use tempfile::TempDir;

    fn test_cfg(dir: &TempDir) -> Arc<LibraryConfig> {
        Arc::new(LibraryConfig::new(dir.path().to_path_buf()))
    }

    fn sample_snapshot() -> CaseSnapshot {
        let quiz = vec![QuizQuestion::new(
            "Which vessel is occluded?",
            vec!["LAD".to_string(), "RCA".to_string()],
            "LAD",
        )
        .expect("valid question")];
        let draft = CaseDraft::new(
            NonEmptyText::new("Chest pain").expect("valid title"),
            "Cardiology",
            "Crushing central chest pain.",
            "Myocardial infarction",
            "",
            CaseTags::new("Heart", "Vascular", "Basic"),
            quiz,
        )
        .expect("valid draft");

        let case = draft.into_case(CaseId::seed(1));
        let completed = vec![case.id().clone()];
        CaseSnapshot {
            cases: vec![case],
            completed,
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileSnapshotStore::new(test_cfg(&dir));

        let snapshot = sample_snapshot();
        store.save(&snapshot).expect("save should succeed");

        let loaded = store.load().expect("saved snapshot should load");
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_missing_slot_returns_none() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileSnapshotStore::new(test_cfg(&dir));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_non_json_slot_returns_none() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileSnapshotStore::new(test_cfg(&dir));

        fs::write(store.slot_path(), "not json").expect("stage corrupt slot");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_mismatched_shape_returns_none() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileSnapshotStore::new(test_cfg(&dir));

        // Valid JSON, wrong document shape.
        fs::write(store.slot_path(), r#"{"entries": []}"#).expect("stage wrong shape");
        assert!(store.load().is_none());

        // Valid envelope, invalid case record inside.
        fs::write(
            store.slot_path(),
            r#"{"cases": [{"id": "case1"}], "completed": []}"#,
        )
        .expect("stage invalid record");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_old_version_slot_is_never_read() {
        let dir = TempDir::new().expect("create temp dir");
        let cfg = test_cfg(&dir);

        let old_store = FileSnapshotStore::at_version(cfg.clone(), SchemaVersion::new(1));
        old_store
            .save(&sample_snapshot())
            .expect("staging v1 slot should succeed");

        let current_store = FileSnapshotStore::new(cfg);
        assert!(
            current_store.load().is_none(),
            "a current-version store must not read an old slot"
        );
        assert!(
            old_store.slot_path().is_file(),
            "the old slot is ignored, not deleted"
        );
    }

    #[test]
    fn test_stale_slots_detected_alongside_corrupt_current_slot() {
        let dir = TempDir::new().expect("create temp dir");
        let cfg = test_cfg(&dir);

        let old_store = FileSnapshotStore::at_version(cfg.clone(), SchemaVersion::new(1));
        old_store
            .save(&sample_snapshot())
            .expect("staging v1 slot should succeed");

        let current_store = FileSnapshotStore::new(cfg);
        fs::write(current_store.slot_path(), "not json").expect("stage corrupt current slot");

        // Both reseed paths (missing and corrupt current slot) must still
        // surface the old slot and its discard policy.
        assert!(current_store.load().is_none());
        assert_eq!(
            current_store.stale_slots(),
            vec![(old_store.slot_path(), Migration::DiscardAndReseed)]
        );
    }

    #[test]
    fn test_save_creates_data_dir_on_demand() {
        let dir = TempDir::new().expect("create temp dir");
        let nested = dir.path().join("deep").join("data");
        let store = FileSnapshotStore::new(Arc::new(LibraryConfig::new(nested.clone())));

        store.save(&sample_snapshot()).expect("save should succeed");
        assert!(nested.is_dir());
        assert!(store.slot_path().is_file());
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileSnapshotStore::new(test_cfg(&dir));
        store.save(&sample_snapshot()).expect("save should succeed");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read data dir")
            .flatten()
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|extension| extension == "tmp")
            })
            .collect();
        assert!(leftovers.is_empty(), "temp file should have been renamed");
    }

    #[test]
    fn test_slot_name_embeds_namespace_and_version() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileSnapshotStore::new(test_cfg(&dir));
        let name = store
            .slot_path()
            .file_name()
            .expect("slot has a file name")
            .to_string_lossy()
            .into_owned();
        assert_eq!(name, format!("cases_data_{SCHEMA_VERSION}.json"));
    }

    #[test]
    fn test_migration_table_covers_old_versions_only() {
        assert_eq!(
            migration_for(SchemaVersion::new(1)),
            Some(Migration::DiscardAndReseed)
        );
        assert_eq!(migration_for(SCHEMA_VERSION), None);
        assert_eq!(
            migration_for(SchemaVersion::new(SCHEMA_VERSION.get() + 1)),
            None
        );
    }

    #[test]
    fn test_snapshot_document_tolerates_missing_optional_fields() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileSnapshotStore::new(test_cfg(&dir));

        // No saved_at, no completed: still a usable snapshot.
        let case = sample_snapshot().cases.remove(0);
        let json = format!(
            r#"{{"cases": [{}]}}"#,
            serde_json::to_string(&case).expect("case serialises")
        );
        fs::write(store.slot_path(), json).expect("stage slot");

        let loaded = store.load().expect("minimal document should load");
        assert_eq!(loaded.cases, vec![case]);
        assert!(loaded.completed.is_empty());
    }
}

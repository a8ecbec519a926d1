//! Constants used throughout the pharmcase core crate.
//!
//! This module contains the storage-layout and schema constants to ensure
//! consistency across the codebase and make maintenance easier.

use crate::snapshot::SchemaVersion;

/// Default directory for case library storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "pharmcase_data";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PHARMCASE_DATA_DIR";

/// Namespace of the case library's snapshot slot. The slot file is named
/// `<namespace>_data_v<N>.json`.
pub const SNAPSHOT_NAMESPACE: &str = "cases";

/// Current schema version of the persisted snapshot.
///
/// Bumping this abandons every older slot: there is no forward migration,
/// only the policies named in [`crate::snapshot::migration_for`].
pub const SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(2);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create data directory: {0}")]
    DataDirCreation(std::io::Error),
    #[error("failed to write snapshot file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to replace snapshot file: {0}")]
    FileRename(std::io::Error),
    #[error("failed to serialise snapshot: {0}")]
    Serialisation(serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors from parsing the embedded seed catalogue.
///
/// The catalogue ships inside the binary, so this only ever fires on a
/// packaging defect, never on user data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seed catalogue schema mismatch at {path}: {source}")]
    Schema {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

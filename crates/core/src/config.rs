//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during operation, which can lead to inconsistent behaviour in test harnesses.

use crate::constants::DEFAULT_DATA_DIR;
use std::path::{Path, PathBuf};

/// Library configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct LibraryConfig {
    data_dir: PathBuf,
}

impl LibraryConfig {
    /// Create a new `LibraryConfig` rooted at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding the snapshot slot files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Resolve the data directory without reading environment variables.
///
/// Precedence: the explicit override, then the captured environment value
/// (empty/whitespace values are ignored), then [`DEFAULT_DATA_DIR`].
pub fn resolve_data_dir(override_dir: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }

    let env_value = env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match env_value {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_over_env_value() {
        let dir = resolve_data_dir(
            Some(PathBuf::from("/explicit")),
            Some("/from-env".to_string()),
        );
        assert_eq!(dir, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_env_value_wins_over_default() {
        let dir = resolve_data_dir(None, Some("/from-env".to_string()));
        assert_eq!(dir, PathBuf::from("/from-env"));
    }

    #[test]
    fn test_blank_env_value_falls_back_to_default() {
        let dir = resolve_data_dir(None, Some("   ".to_string()));
        assert_eq!(dir, PathBuf::from(DEFAULT_DATA_DIR));

        let dir = resolve_data_dir(None, None);
        assert_eq!(dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}

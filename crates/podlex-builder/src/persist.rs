use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use podlex_core::Dictionary;
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to serialize dictionary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Write the dictionary as compact UTF-8 JSON, replacing `path` atomically.
///
/// The data goes to a temporary file in the same directory first and is
/// renamed over the artifact only once fully written. On failure the temp
/// file is removed and the previous artifact is left as it was.
pub fn save_dictionary(path: &Path, dictionary: &Dictionary) -> Result<(), PersistError> {
    let json = serde_json::to_vec(dictionary)?;
    let write_err = |source| PersistError::Write {
        path: path.display().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    file.write_all(&json).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!("Saved {} entries to {}", dictionary.len(), path.display());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryStats {
    pub total: usize,
    pub resolved: usize,
}

impl DictionaryStats {
    pub fn unresolved(&self) -> usize {
        self.total - self.resolved
    }
}

impl fmt::Display for DictionaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} words, {} with translation, {} unresolved",
            self.total,
            self.resolved,
            self.unresolved()
        )
    }
}

pub fn summarize(dictionary: &Dictionary) -> DictionaryStats {
    DictionaryStats {
        total: dictionary.len(),
        resolved: dictionary.resolved_count(),
    }
}

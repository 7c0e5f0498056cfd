//! On-disk artifact cache.
//!
//! Layout under the artifact directory:
//!
//! ```text
//! version               engine version that last opened the cache
//! src/sg_templates.hpp  template prelude
//! src/<hash>.cpp        generated source
//! lib/<hash>.<dll ext>  compiled library
//! meta/<hash>.bin       ArtifactMeta (bincode)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sg_codegen::{SourceUnit, TEMPLATE_PRELUDE, TEMPLATE_PRELUDE_NAME};
use tempfile::TempPath;
use tracing::warn;

use super::AotConfig;
use crate::error::BackendError;

/// What a cached library was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Canonical key text.
    pub key: String,
    /// Hash of the generated source.
    pub source_hash: u64,
    /// Engine version that built the library.
    pub version: String,
}

impl ArtifactMeta {
    fn for_unit(unit: &SourceUnit, version: &str) -> Self {
        Self {
            key: unit.key().canonical(),
            source_hash: unit.source_hash().value(),
            version: version.to_string(),
        }
    }
}

#[derive(Debug)]
pub(super) struct ArtifactStore {
    lib_dir: PathBuf,
    src_dir: PathBuf,
    meta_dir: PathBuf,
    version: String,
}

fn create_dir(path: &Path) -> Result<(), BackendError> {
    fs::create_dir_all(path).map_err(BackendError::io(path))
}

impl ArtifactStore {
    pub(super) fn open(config: &AotConfig) -> Result<Self, BackendError> {
        let root = &config.artifact_dir;
        let lib_dir = root.join("lib");
        let src_dir = root.join("src");
        let meta_dir = root.join("meta");
        for dir in [&lib_dir, &src_dir, &meta_dir] {
            create_dir(dir)?;
        }

        let version_file = root.join("version");
        fs::write(&version_file, &config.version).map_err(BackendError::io(&version_file))?;
        let prelude = src_dir.join(TEMPLATE_PRELUDE_NAME);
        fs::write(&prelude, TEMPLATE_PRELUDE).map_err(BackendError::io(&prelude))?;

        Ok(Self {
            lib_dir,
            src_dir,
            meta_dir,
            version: config.version.clone(),
        })
    }

    /// Directory holding the template prelude.
    pub(super) fn include_dir(&self) -> &Path {
        &self.src_dir
    }

    fn stem(unit: &SourceUnit) -> String {
        unit.key().hash().to_hex()
    }

    pub(super) fn library_path(&self, unit: &SourceUnit) -> PathBuf {
        self.lib_dir.join(format!(
            "{}.{}",
            Self::stem(unit),
            std::env::consts::DLL_EXTENSION
        ))
    }

    pub(super) fn source_path(&self, unit: &SourceUnit) -> PathBuf {
        self.src_dir.join(format!("{}.cpp", Self::stem(unit)))
    }

    pub(super) fn meta_path(&self, unit: &SourceUnit) -> PathBuf {
        self.meta_dir.join(format!("{}.bin", Self::stem(unit)))
    }

    fn read_meta(path: &Path) -> Option<ArtifactMeta> {
        let bytes = fs::read(path).ok()?;
        bincode::deserialize(&bytes).ok()
    }

    /// The cached library for `unit`, if one exists and was built from the
    /// same key, source and engine version. Stale entries are removed.
    pub(super) fn lookup(&self, unit: &SourceUnit) -> Result<Option<PathBuf>, BackendError> {
        let library = self.library_path(unit);
        let meta_path = self.meta_path(unit);
        if !library.exists() && !meta_path.exists() {
            return Ok(None);
        }

        let expected = ArtifactMeta::for_unit(unit, &self.version);
        match Self::read_meta(&meta_path) {
            Some(meta) if meta == expected && library.exists() => Ok(Some(library)),
            found => {
                warn!(
                    key = %expected.key,
                    found = ?found,
                    "discarding stale artifact"
                );
                for path in [&library, &meta_path] {
                    if path.exists() {
                        fs::remove_file(path).map_err(BackendError::io(path))?;
                    }
                }
                Ok(None)
            }
        }
    }

    pub(super) fn write_source(&self, unit: &SourceUnit) -> Result<PathBuf, BackendError> {
        let path = self.source_path(unit);
        fs::write(&path, unit.text()).map_err(BackendError::io(&path))?;
        Ok(path)
    }

    /// A temporary path in the library directory for the compiler to write
    /// to. Removed on drop unless committed.
    pub(super) fn scratch_library(&self, unit: &SourceUnit) -> Result<TempPath, BackendError> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{}.", Self::stem(unit)))
            .suffix(".tmp")
            .tempfile_in(&self.lib_dir)
            .map_err(BackendError::io(&self.lib_dir))?;
        Ok(file.into_temp_path())
    }

    /// Move a freshly built library into place and record its metadata.
    pub(super) fn commit(&self, unit: &SourceUnit, built: TempPath) -> Result<PathBuf, BackendError> {
        let library = self.library_path(unit);
        built
            .persist(&library)
            .map_err(|e| BackendError::Io {
                path: library.clone(),
                source: e.error,
            })?;

        let meta_path = self.meta_path(unit);
        let meta = ArtifactMeta::for_unit(unit, &self.version);
        let bytes = bincode::serialize(&meta)
            .map_err(|e| BackendError::Artifact(format!("failed to serialize metadata: {e}")))?;
        fs::write(&meta_path, bytes).map_err(BackendError::io(&meta_path))?;
        Ok(library)
    }
}

#[cfg(test)]
mod tests;

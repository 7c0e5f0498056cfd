//! Engine configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use sg_backend::AotConfig;

use crate::error::{Error, Result};

/// Which compilation backend a [`Specializer`](crate::Specializer) uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process evaluation into the global namespace.
    #[default]
    Jit,
    /// External C++ compilation with an on-disk artifact cache.
    Aot,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jit" => Ok(BackendKind::Jit),
            "aot" => Ok(BackendKind::Aot),
            other => Err(Error::Config(format!(
                "unknown backend {other:?} (expected `jit` or `aot`)"
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Jit => "jit",
            BackendKind::Aot => "aot",
        })
    }
}

/// Configuration of a [`Specializer`](crate::Specializer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub backend: BackendKind,
    /// Artifact directory of the AOT backend.
    pub artifact_dir: PathBuf,
    /// Optimization level of the AOT backend.
    pub opt_level: u32,
    /// Version stamped on AOT artifacts.
    pub version: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: BackendKind::default(),
            artifact_dir: std::env::temp_dir().join("spatial_graph"),
            opt_level: 2,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Defaults overridden by `SG_BACKEND`, `SG_ARTIFACT_DIR` and
    /// `SG_OPT_LEVEL` where set.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();
        if let Ok(backend) = std::env::var("SG_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(dir) = std::env::var_os("SG_ARTIFACT_DIR") {
            config.artifact_dir = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var("SG_OPT_LEVEL") {
            config.opt_level = level
                .parse()
                .map_err(|_| Error::Config(format!("SG_OPT_LEVEL is not a number: {level:?}")))?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_opt_level(mut self, level: u32) -> Self {
        self.opt_level = level;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The AOT backend configuration this engine configuration implies.
    #[must_use]
    pub fn aot_config(&self) -> AotConfig {
        AotConfig::new(&self.artifact_dir)
            .with_opt_level(self.opt_level)
            .with_version(&self.version)
    }
}

#[cfg(test)]
mod tests;

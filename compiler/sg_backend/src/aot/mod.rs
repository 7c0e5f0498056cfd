//! Ahead-of-time compilation through an external C++ toolchain.
//!
//! A source unit is written under the artifact directory, compiled into a
//! shared library, and loaded. Artifact names derive from the key hash, so
//! a library built by an earlier run with identical inputs is loaded
//! without recompiling.

use std::path::PathBuf;
use std::time::Instant;

use sg_codegen::SourceUnit;
use tracing::{debug, info};

use crate::backend::CompilationBackend;
use crate::error::BackendError;
use crate::handle::NativeTypeHandle;

mod artifact;
mod loader;
mod toolchain;

pub use artifact::ArtifactMeta;

use artifact::ArtifactStore;
use toolchain::Toolchain;

/// Configuration for [`AotBackend`].
#[derive(Debug, Clone)]
pub struct AotConfig {
    /// Root of the on-disk artifact cache.
    pub artifact_dir: PathBuf,
    /// Optimization level handed to the compiler (0-3).
    pub opt_level: u32,
    /// Engine version; artifacts built by another version are rebuilt.
    pub version: String,
    /// Explicit compiler; otherwise `CXX` or the platform default.
    pub compiler: Option<PathBuf>,
}

impl AotConfig {
    #[must_use]
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            opt_level: 2,
            version: env!("CARGO_PKG_VERSION").to_string(),
            compiler: None,
        }
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

    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = Some(compiler.into());
        self
    }
}

/// Compiles source units into shared libraries and loads them.
#[derive(Debug)]
pub struct AotBackend {
    config: AotConfig,
    store: ArtifactStore,
}

impl AotBackend {
    /// Open (creating if needed) the artifact directory.
    ///
    /// The toolchain is resolved lazily, on the first compilation that
    /// misses the on-disk cache.
    pub fn new(config: AotConfig) -> Result<Self, BackendError> {
        let store = ArtifactStore::open(&config)?;
        Ok(Self { config, store })
    }

    #[must_use]
    pub fn config(&self) -> &AotConfig {
        &self.config
    }

    /// Whether a valid artifact for `unit` is already on disk.
    pub fn is_cached(&self, unit: &SourceUnit) -> Result<bool, BackendError> {
        Ok(self.store.lookup(unit)?.is_some())
    }
}

impl CompilationBackend for AotBackend {
    fn name(&self) -> &'static str {
        "aot"
    }

    fn discriminator(&self) -> Option<u64> {
        None
    }

    #[tracing::instrument(level = "debug", skip_all, fields(alias = %unit.symbols().alias))]
    fn compile(&self, unit: &SourceUnit) -> Result<NativeTypeHandle, BackendError> {
        if let Some(library) = self.store.lookup(unit)? {
            debug!(path = %library.display(), "reusing cached artifact");
            return loader::load(&library, unit, self.name());
        }

        let start = Instant::now();
        let source = self.store.write_source(unit)?;
        let toolchain = Toolchain::resolve(&self.config)?;
        let output = self.store.scratch_library(unit)?;
        toolchain.compile_shared(&source, self.store.include_dir(), &output, &unit.symbols().alias)?;
        let library = self.store.commit(unit, output)?;
        info!(
            key = %unit.key(),
            path = %library.display(),
            elapsed_ms = start.elapsed().as_millis(),
            "compiled specialization"
        );
        loader::load(&library, unit, self.name())
    }
}

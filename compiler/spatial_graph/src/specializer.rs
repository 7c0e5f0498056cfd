//! The specialization registry.

use std::sync::{Arc, OnceLock};

use sg_backend::{AotBackend, CompilationBackend, JitBackend, NativeTypeHandle};
use sg_codegen::{GraphRequest, SourceUnit, SpatialIndexRequest, SpecializationKey};
use tracing::debug;

use crate::cache::SpecializationCache;
use crate::config::{BackendKind, EngineConfig};
use crate::error::Result;

/// Maps requests to native type handles, compiling each distinct
/// specialization once.
pub struct Specializer {
    backend: Box<dyn CompilationBackend>,
    cache: SpecializationCache<SpecializationKey, NativeTypeHandle>,
}

static GLOBAL: OnceLock<Specializer> = OnceLock::new();

impl Specializer {
    /// A registry with the backend `config` selects.
    ///
    /// # Errors
    ///
    /// Fails if the AOT artifact directory cannot be created.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let specializer = match config.backend {
            BackendKind::Jit => Self::with_backend(JitBackend::global()),
            BackendKind::Aot => Self::with_backend(AotBackend::new(config.aot_config())?),
        };
        Ok(specializer)
    }

    #[must_use]
    pub fn with_backend(backend: impl CompilationBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            cache: SpecializationCache::new(),
        }
    }

    /// The process-wide registry, configured from the environment on first
    /// use (see [`EngineConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Fails if the environment holds an invalid configuration.
    pub fn global() -> Result<&'static Specializer> {
        if let Some(specializer) = GLOBAL.get() {
            return Ok(specializer);
        }
        let specializer = Specializer::new(&EngineConfig::from_env()?)?;
        Ok(GLOBAL.get_or_init(|| specializer))
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Number of specializations compiled by this registry.
    #[must_use]
    pub fn compilations(&self) -> usize {
        self.cache.builds()
    }

    /// The handle for a graph specialization, compiling it on first request.
    ///
    /// # Errors
    ///
    /// Code generation or backend failures; nothing is cached then.
    #[tracing::instrument(level = "debug", skip_all, fields(key = tracing::field::Empty))]
    pub fn graph_handle(&self, request: &GraphRequest) -> Result<Arc<NativeTypeHandle>> {
        let key = SpecializationKey::for_graph(request);
        self.get_or_compile(&key, || SourceUnit::graph(request, self.backend.discriminator()))
    }

    /// The handle for a spatial index specialization, compiling it on first
    /// request.
    ///
    /// # Errors
    ///
    /// Code generation or backend failures; nothing is cached then.
    #[tracing::instrument(level = "debug", skip_all, fields(key = tracing::field::Empty))]
    pub fn spatial_index_handle(
        &self,
        request: &SpatialIndexRequest,
    ) -> Result<Arc<NativeTypeHandle>> {
        let key = SpecializationKey::for_spatial_index(request);
        self.get_or_compile(&key, || {
            SourceUnit::spatial_index(request, self.backend.discriminator())
        })
    }

    fn get_or_compile(
        &self,
        key: &SpecializationKey,
        generate: impl FnOnce() -> Result<SourceUnit, sg_codegen::CodegenError>,
    ) -> Result<Arc<NativeTypeHandle>> {
        tracing::Span::current().record("key", tracing::field::display(key));
        let mut built = false;
        let handle = self.cache.get_or_create(key, || {
            debug!(backend = self.backend.name(), "cache miss");
            let unit = generate()?;
            let handle = self.backend.compile(&unit)?;
            built = true;
            Ok::<_, crate::Error>(handle)
        })?;
        if !built {
            debug!("cache hit");
        }
        Ok(handle)
    }
}

impl std::fmt::Debug for Specializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Specializer")
            .field("backend", &self.backend.name())
            .field("compilations", &self.cache.builds())
            .finish()
    }
}

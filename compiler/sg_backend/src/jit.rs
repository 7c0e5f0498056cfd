//! In-process evaluation of source units.
//!
//! The JIT backend never invokes a compiler. It evaluates a unit's
//! structured declarations directly: each record becomes an interpreted
//! [`RecordType`] laid out by the computed C-ABI layout, and the template
//! instantiation resolves through the build-time catalog. Every name the
//! unit declares is then committed to a [`Namespace`], which refuses
//! redefinitions; a per-unit serial from the same namespace keeps
//! names unique.

use std::sync::Arc;

use sg_codegen::SourceUnit;
use tracing::debug;

use crate::backend::CompilationBackend;
use crate::error::BackendError;
use crate::handle::NativeTypeHandle;
use crate::record::RecordType;

mod namespace;

pub use namespace::Namespace;

/// Evaluates source units into a shared [`Namespace`].
#[derive(Clone, Debug)]
pub struct JitBackend {
    namespace: Arc<Namespace>,
}

impl JitBackend {
    /// A backend defining into `namespace`.
    #[must_use]
    pub fn new(namespace: Arc<Namespace>) -> Self {
        Self { namespace }
    }

    /// A backend defining into [`Namespace::global`].
    #[must_use]
    pub fn global() -> Self {
        Self::new(Namespace::global())
    }

    #[must_use]
    pub fn namespace(&self) -> &Arc<Namespace> {
        &self.namespace
    }
}

impl Default for JitBackend {
    fn default() -> Self {
        Self::global()
    }
}

impl CompilationBackend for JitBackend {
    fn name(&self) -> &'static str {
        "jit"
    }

    fn discriminator(&self) -> Option<u64> {
        Some(self.namespace.next_serial())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(alias = %unit.symbols().alias))]
    fn compile(&self, unit: &SourceUnit) -> Result<NativeTypeHandle, BackendError> {
        let symbols = unit.symbols();
        let primary = RecordType::interpreted(&symbols.primary, unit.primary().clone());
        let secondary = RecordType::interpreted(&symbols.secondary, unit.secondary().clone());
        self.namespace.define_all(&symbols.all())?;
        debug!(key = %unit.key(), "evaluated source unit");
        Ok(NativeTypeHandle::new(unit, primary, secondary, self.name()))
    }
}

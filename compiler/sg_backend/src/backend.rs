//! The backend abstraction.

use sg_codegen::SourceUnit;

use crate::error::BackendError;
use crate::handle::NativeTypeHandle;

/// Turns a generated [`SourceUnit`] into a loaded, callable native type.
///
/// A failed compilation is terminal for that call; callers decide whether
/// to retry.
pub trait CompilationBackend: Send + Sync {
    /// Short name used in logs and handles.
    fn name(&self) -> &'static str;

    /// Discriminator to embed in generated names, if this backend's
    /// namespace requires names to be unique beyond the key hash.
    fn discriminator(&self) -> Option<u64>;

    /// Compile (or load) `unit`.
    fn compile(&self, unit: &SourceUnit) -> Result<NativeTypeHandle, BackendError>;
}

//! Loading compiled specializations.
//!
//! Symbols are resolved by their mangled names. Before a record type is
//! handed out, the layout the library reports must equal the layout
//! computed on this side; record images are exchanged byte for byte.

use std::path::Path;
use std::sync::Arc;

use libloading::{Library, Symbol};
use sg_codegen::{RecordSpec, SourceUnit, ELEMENT_SIZE_SHIM};

use crate::error::BackendError;
use crate::handle::NativeTypeHandle;
use crate::record::{DefaultFn, InitFn, NativeCtor, RecordType};

type LayoutFn = unsafe extern "C" fn(*mut usize, usize) -> usize;
type ElementSizeFn = unsafe extern "C" fn() -> usize;

struct Loaded<'a> {
    library: Arc<Library>,
    path: &'a Path,
}

impl Loaded<'_> {
    /// Copy out the function pointer named `name`.
    ///
    /// # Safety
    ///
    /// `T` must be the type of the exported function.
    unsafe fn function<T: Copy>(&self, name: &str) -> Result<T, BackendError> {
        let symbol: Symbol<T> = self
            .library
            .get(name.as_bytes())
            .map_err(|e| BackendError::Load {
                path: self.path.to_path_buf(),
                message: format!("{name}: {e}"),
            })?;
        Ok(*symbol)
    }

    fn record(&self, name: &str, spec: &RecordSpec) -> Result<RecordType, BackendError> {
        // SAFETY: these are the signatures of the generated shims.
        let (layout, default, init) = unsafe {
            (
                self.function::<LayoutFn>(&format!("{name}_layout"))?,
                self.function::<DefaultFn>(&format!("{name}_default"))?,
                self.function::<InitFn>(&format!("{name}_init"))?,
            )
        };

        let expected = spec.layout().to_words();
        let mut native = vec![0usize; expected.len()];
        // SAFETY: the shim writes at most `cap` words.
        let count = unsafe { layout(native.as_mut_ptr(), native.len()) };
        if count != expected.len() || native != expected {
            return Err(BackendError::Compilation {
                symbol: name.to_string(),
                diagnostics: format!(
                    "layout mismatch: library reports {native:?} ({count} words), expected {expected:?}"
                ),
            });
        }

        let ctor = NativeCtor {
            default,
            init,
            _library: Arc::clone(&self.library),
        };
        Ok(RecordType::native(name, spec.clone(), ctor))
    }

    fn check_element_size(&self, unit: &SourceUnit) -> Result<(), BackendError> {
        let alias = &unit.symbols().alias;
        // SAFETY: signature of the generated element-size shim.
        let element_size =
            unsafe { self.function::<ElementSizeFn>(&format!("{alias}{ELEMENT_SIZE_SHIM}"))? };
        // SAFETY: takes no arguments and only evaluates `sizeof`.
        let native = unsafe { element_size() };
        let expected = unit.instantiation().element.size();
        if native == expected {
            Ok(())
        } else {
            Err(BackendError::Compilation {
                symbol: alias.clone(),
                diagnostics: format!(
                    "layout mismatch: element is {native} bytes, expected {expected}"
                ),
            })
        }
    }
}

/// Load the library at `path` built from `unit`.
///
/// The library stays mapped for as long as any record type built from it
/// is alive.
pub(super) fn load(
    path: &Path,
    unit: &SourceUnit,
    backend: &'static str,
) -> Result<NativeTypeHandle, BackendError> {
    // SAFETY: the library was generated from `unit`; its only static
    // initializers are the explicit template instantiation.
    let library = unsafe { Library::new(path) }.map_err(|e| BackendError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let loaded = Loaded {
        library: Arc::new(library),
        path,
    };

    let symbols = unit.symbols();
    let primary = loaded.record(&symbols.primary, unit.primary())?;
    let secondary = loaded.record(&symbols.secondary, unit.secondary())?;
    loaded.check_element_size(unit)?;
    tracing::debug!(path = %path.display(), "loaded specialization");
    Ok(NativeTypeHandle::new(unit, primary, secondary, backend))
}

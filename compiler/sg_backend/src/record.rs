//! Record images and record types.
//!
//! A [`Record`] is the byte image of one instance of a generated aggregate.
//! A [`RecordType`] pairs the aggregate's specification with its accessor
//! table and a constructor: either evaluated in-process from the layout, or
//! the native constructors exported by a compiled library.

use std::ffi::c_void;
use std::sync::Arc;

use libloading::Library;
use sg_codegen::{RecordLayout, RecordSpec};
use sg_dtype::{Column, Value};

use crate::accessor::{AccessorTable, ShapeMismatch};

/// Byte image of one aggregate instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    bytes: Box<[u8]>,
}

impl Record {
    #[must_use]
    pub fn zeroed(size: usize) -> Self {
        Self {
            bytes: vec![0; size].into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub(crate) type DefaultFn = unsafe extern "C" fn(*mut c_void);
pub(crate) type InitFn = unsafe extern "C" fn(*mut c_void, *const *const c_void);

/// Constructors exported by a loaded library.
pub(crate) struct NativeCtor {
    pub(crate) default: DefaultFn,
    pub(crate) init: InitFn,
    /// Keeps the functions above mapped.
    pub(crate) _library: Arc<Library>,
}

impl std::fmt::Debug for NativeCtor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeCtor").finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum Constructor {
    Interpreted,
    Native(NativeCtor),
}

/// A loaded aggregate type.
#[derive(Debug)]
pub struct RecordType {
    name: String,
    spec: RecordSpec,
    accessors: AccessorTable,
    ctor: Constructor,
}

impl RecordType {
    pub(crate) fn interpreted(name: &str, spec: RecordSpec) -> Self {
        Self::with_ctor(name, spec, Constructor::Interpreted)
    }

    pub(crate) fn native(name: &str, spec: RecordSpec, ctor: NativeCtor) -> Self {
        Self::with_ctor(name, spec, Constructor::Native(ctor))
    }

    fn with_ctor(name: &str, spec: RecordSpec, ctor: Constructor) -> Self {
        Self {
            name: name.to_string(),
            accessors: AccessorTable::for_record(&spec),
            spec,
            ctor,
        }
    }

    /// Generated type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn spec(&self) -> &RecordSpec {
        &self.spec
    }

    #[must_use]
    pub fn layout(&self) -> &RecordLayout {
        self.spec.layout()
    }

    #[must_use]
    pub fn accessors(&self) -> &AccessorTable {
        &self.accessors
    }

    /// Whether construction runs native code.
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self.ctor, Constructor::Native(_))
    }

    /// A default-constructed (zeroed) record.
    #[must_use]
    pub fn default_record(&self) -> Record {
        match &self.ctor {
            Constructor::Interpreted => Record::zeroed(self.layout().size()),
            Constructor::Native(native) => self.run_native(|dst| {
                // SAFETY: `dst` is an aligned buffer of at least the record's
                // size, and the layout was checked against the library's.
                unsafe { (native.default)(dst) }
            }),
        }
    }

    /// Construct a record from one value per field, in field order.
    ///
    /// Values are cast to each field's scalar kind.
    ///
    /// # Errors
    ///
    /// [`ShapeMismatch`] if a value does not have its field's shape.
    pub fn construct(&self, values: &[Value]) -> Result<Record, ShapeMismatch> {
        debug_assert_eq!(values.len(), self.accessors.len());
        match &self.ctor {
            Constructor::Interpreted => {
                let mut record = Record::zeroed(self.layout().size());
                for (accessor, value) in self.accessors.iter().zip(values) {
                    accessor.set(&mut record, value)?;
                }
                Ok(record)
            }
            Constructor::Native(native) => {
                let mut args = Vec::with_capacity(values.len());
                for (accessor, value) in self.accessors.iter().zip(values) {
                    let mut column = Column::for_descriptor(&accessor.descriptor(), 1);
                    if !column.push(value) {
                        return Err(accessor.mismatch(value));
                    }
                    args.push(column);
                }
                let pointers: Vec<*const c_void> = args.iter().map(|c| c.data().as_ptr()).collect();
                Ok(self.run_native(|dst| {
                    // SAFETY: one pointer per constructor parameter, each to
                    // a buffer of the parameter's scalar type and length;
                    // `args` outlives the call.
                    unsafe { (native.init)(dst, pointers.as_ptr()) }
                }))
            }
        }
    }

    /// Run a native constructor into an 8-byte aligned scratch buffer and
    /// copy out the record's bytes.
    fn run_native(&self, ctor: impl FnOnce(*mut c_void)) -> Record {
        let size = self.layout().size();
        let mut scratch = vec![0u64; size.div_ceil(8)];
        ctor(scratch.as_mut_ptr().cast());
        let bytes: Vec<u8> = scratch
            .iter()
            .flat_map(|word| word.to_ne_bytes())
            .take(size)
            .collect();
        Record {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests;

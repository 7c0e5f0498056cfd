//! Closed per-record attribute accessors.
//!
//! One [`Accessor`] exists per declared field; it knows the field's
//! descriptor and byte offset and reads or writes values in a
//! [`Record`](crate::Record) with native-endian scalars.

use sg_codegen::RecordSpec;
use sg_dtype::{ScalarValue, TypeDescriptor, Value};
use smallvec::SmallVec;
use thiserror::Error;

use crate::record::Record;

/// A value whose shape does not fit the attribute it was written to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("attribute {name:?} of type `{expected}` cannot hold a value of shape {found}")]
pub struct ShapeMismatch {
    pub name: String,
    pub expected: TypeDescriptor,
    pub found: String,
}

/// Get/set pair for one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    name: String,
    descriptor: TypeDescriptor,
    offset: usize,
}

impl Accessor {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read the field.
    #[must_use]
    pub fn get(&self, record: &Record) -> Value {
        let kind = self.descriptor.base();
        let bytes = record.as_bytes();
        let read = |k: usize| ScalarValue::read_ne(kind, &bytes[self.offset + k * kind.size()..]);
        match self.descriptor.element_count() {
            None => Value::Scalar(read(0)),
            Some(n) => Value::Array((0..n).map(read).collect::<SmallVec<_>>()),
        }
    }

    /// Write the field, casting each element to the field's scalar kind.
    ///
    /// # Errors
    ///
    /// [`ShapeMismatch`] if `value` is a scalar where an array is declared,
    /// or an array of the wrong length.
    pub fn set(&self, record: &mut Record, value: &Value) -> Result<(), ShapeMismatch> {
        if !value.fits(&self.descriptor) {
            return Err(self.mismatch(value));
        }
        let kind = self.descriptor.base();
        let bytes = record.as_bytes_mut();
        for (k, v) in value.elements().iter().enumerate() {
            v.cast(kind).write_ne(&mut bytes[self.offset + k * kind.size()..]);
        }
        Ok(())
    }

    pub(crate) fn mismatch(&self, value: &Value) -> ShapeMismatch {
        let found = match value.array_len() {
            None => "scalar".to_string(),
            Some(n) => format!("[{n}]"),
        };
        ShapeMismatch {
            name: self.name.clone(),
            expected: self.descriptor,
            found,
        }
    }
}

/// Accessors of one record type, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessorTable {
    accessors: Vec<Accessor>,
}

impl AccessorTable {
    #[must_use]
    pub fn for_record(spec: &RecordSpec) -> Self {
        let accessors = spec
            .fields()
            .iter()
            .zip(spec.layout().offsets())
            .map(|(field, &offset)| Accessor {
                name: field.name.clone(),
                descriptor: field.descriptor,
                offset,
            })
            .collect();
        Self { accessors }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Accessor> + '_ {
        self.accessors.iter()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.accessors.iter().map(|a| a.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

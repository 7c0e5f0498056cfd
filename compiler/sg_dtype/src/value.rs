//! Attribute values and homogeneous columns.

use std::borrow::Cow;
use std::ffi::c_void;

use smallvec::SmallVec;

use crate::descriptor::TypeDescriptor;
use crate::scalar::{Scalar, ScalarKind, ScalarValue};

/// One attribute value: a scalar or a fixed-length array of scalars.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(ScalarValue),
    Array(SmallVec<[ScalarValue; 4]>),
}

impl Value {
    /// The zero value for a descriptor.
    #[must_use]
    pub fn zero(descriptor: &TypeDescriptor) -> Self {
        let zero = ScalarValue::zero(descriptor.base());
        match descriptor.element_count() {
            None => Value::Scalar(zero),
            Some(n) => Value::Array(std::iter::repeat(zero).take(n).collect()),
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<ScalarValue> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Array(_) => None,
        }
    }

    /// Elements in order; a scalar is a one-element slice.
    #[must_use]
    pub fn elements(&self) -> &[ScalarValue] {
        match self {
            Value::Scalar(v) => std::slice::from_ref(v),
            Value::Array(vs) => vs,
        }
    }

    /// `None` for scalars, the length for arrays.
    #[must_use]
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(vs) => Some(vs.len()),
        }
    }

    /// Whether this value has the shape of `descriptor` (kinds may differ).
    #[must_use]
    pub fn fits(&self, descriptor: &TypeDescriptor) -> bool {
        self.array_len() == descriptor.element_count()
    }

    /// Cast every element to `kind`.
    #[must_use]
    pub fn cast(&self, kind: ScalarKind) -> Self {
        match self {
            Value::Scalar(v) => Value::Scalar(v.cast(kind)),
            Value::Array(vs) => Value::Array(vs.iter().map(|v| v.cast(kind)).collect()),
        }
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Scalar(ScalarValue::from(v))
            }
        }
    )*};
}

value_from_scalar!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

impl From<ScalarValue> for Value {
    fn from(v: ScalarValue) -> Self {
        Value::Scalar(v)
    }
}

impl<S: Scalar, const N: usize> From<[S; N]> for Value {
    fn from(vs: [S; N]) -> Self {
        Value::Array(vs.into_iter().map(Scalar::into_value).collect())
    }
}

impl<S: Scalar> From<&[S]> for Value {
    fn from(vs: &[S]) -> Self {
        Value::Array(vs.iter().copied().map(Scalar::into_value).collect())
    }
}

impl<S: Scalar> From<Vec<S>> for Value {
    fn from(vs: Vec<S>) -> Self {
        Value::from(vs.as_slice())
    }
}

/// Contiguous storage of one scalar kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Float(Vec<f32>),
    Double(Vec<f64>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Uint64(Vec<u64>),
}

/// Expand `$body` once per variant with `$v` bound to the vector.
macro_rules! each_column {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ColumnData::Float($v) => $body,
            ColumnData::Double($v) => $body,
            ColumnData::Int8($v) => $body,
            ColumnData::Int16($v) => $body,
            ColumnData::Int32($v) => $body,
            ColumnData::Int64($v) => $body,
            ColumnData::Uint8($v) => $body,
            ColumnData::Uint16($v) => $body,
            ColumnData::Uint32($v) => $body,
            ColumnData::Uint64($v) => $body,
        }
    };
}

impl ColumnData {
    #[must_use]
    pub fn with_capacity(kind: ScalarKind, capacity: usize) -> Self {
        match kind {
            ScalarKind::Float => ColumnData::Float(Vec::with_capacity(capacity)),
            ScalarKind::Double => ColumnData::Double(Vec::with_capacity(capacity)),
            ScalarKind::Int8 => ColumnData::Int8(Vec::with_capacity(capacity)),
            ScalarKind::Int16 => ColumnData::Int16(Vec::with_capacity(capacity)),
            ScalarKind::Int32 => ColumnData::Int32(Vec::with_capacity(capacity)),
            ScalarKind::Int64 => ColumnData::Int64(Vec::with_capacity(capacity)),
            ScalarKind::Uint8 => ColumnData::Uint8(Vec::with_capacity(capacity)),
            ScalarKind::Uint16 => ColumnData::Uint16(Vec::with_capacity(capacity)),
            ScalarKind::Uint32 => ColumnData::Uint32(Vec::with_capacity(capacity)),
            ScalarKind::Uint64 => ColumnData::Uint64(Vec::with_capacity(capacity)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            ColumnData::Float(_) => ScalarKind::Float,
            ColumnData::Double(_) => ScalarKind::Double,
            ColumnData::Int8(_) => ScalarKind::Int8,
            ColumnData::Int16(_) => ScalarKind::Int16,
            ColumnData::Int32(_) => ScalarKind::Int32,
            ColumnData::Int64(_) => ScalarKind::Int64,
            ColumnData::Uint8(_) => ScalarKind::Uint8,
            ColumnData::Uint16(_) => ScalarKind::Uint16,
            ColumnData::Uint32(_) => ScalarKind::Uint32,
            ColumnData::Uint64(_) => ScalarKind::Uint64,
        }
    }

    /// Number of scalars stored.
    #[must_use]
    pub fn len(&self) -> usize {
        each_column!(self, v => v.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `value`, cast to this column's kind.
    pub fn push(&mut self, value: ScalarValue) {
        let value = value.cast(self.kind());
        match (self, value) {
            (ColumnData::Float(v), ScalarValue::Float(x)) => v.push(x),
            (ColumnData::Double(v), ScalarValue::Double(x)) => v.push(x),
            (ColumnData::Int8(v), ScalarValue::Int8(x)) => v.push(x),
            (ColumnData::Int16(v), ScalarValue::Int16(x)) => v.push(x),
            (ColumnData::Int32(v), ScalarValue::Int32(x)) => v.push(x),
            (ColumnData::Int64(v), ScalarValue::Int64(x)) => v.push(x),
            (ColumnData::Uint8(v), ScalarValue::Uint8(x)) => v.push(x),
            (ColumnData::Uint16(v), ScalarValue::Uint16(x)) => v.push(x),
            (ColumnData::Uint32(v), ScalarValue::Uint32(x)) => v.push(x),
            (ColumnData::Uint64(v), ScalarValue::Uint64(x)) => v.push(x),
            _ => unreachable!("value was cast to the column kind"),
        }
    }

    /// The scalar at flat index `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<ScalarValue> {
        each_column!(self, v => v.get(i).map(|x| Scalar::into_value(*x)))
    }

    /// Pointer to the first element, for handing contiguous arguments to
    /// native code.
    #[must_use]
    pub fn as_ptr(&self) -> *const c_void {
        each_column!(self, v => v.as_ptr().cast::<c_void>())
    }
}

/// A homogeneous, typed array of rows.
///
/// Rows are scalars (`width == None`) or fixed-width arrays stored row-major
/// (`width == Some(n)`), mirroring the descriptor that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    data: ColumnData,
    width: Option<usize>,
}

impl Column {
    /// An empty column shaped like `descriptor`.
    #[must_use]
    pub fn for_descriptor(descriptor: &TypeDescriptor, rows: usize) -> Self {
        Self {
            data: ColumnData::with_capacity(descriptor.base(), rows * descriptor.scalar_count()),
            width: descriptor.element_count(),
        }
    }

    #[must_use]
    pub fn from_vec<S: Scalar>(data: Vec<S>) -> Self {
        Self {
            data: S::into_column(data),
            width: None,
        }
    }

    /// Row-major rows of `width` scalars each.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero or does not divide `data.len()`.
    #[must_use]
    pub fn from_rows<S: Scalar>(data: Vec<S>, width: usize) -> Self {
        assert!(width > 0 && data.len() % width == 0, "ragged column");
        Self {
            data: S::into_column(data),
            width: Some(width),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        self.data.kind()
    }

    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / self.width.unwrap_or(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> ColumnData {
        self.data
    }

    /// Typed view of the flat storage; `None` if `S` is not this column's kind.
    #[must_use]
    pub fn as_slice<S: Scalar>(&self) -> Option<&[S]> {
        S::column_slice(&self.data)
    }

    /// The flat storage as `S`, borrowed when the kinds match and cast
    /// element-wise otherwise.
    #[must_use]
    pub fn cast_slice<S: Scalar>(&self) -> Cow<'_, [S]> {
        match self.as_slice::<S>() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(
                (0..self.data.len())
                    .filter_map(|i| self.data.get(i))
                    .map(S::cast_from)
                    .collect(),
            ),
        }
    }

    /// Typed copy of the flat storage.
    #[must_use]
    pub fn to_vec<S: Scalar>(&self) -> Option<Vec<S>> {
        self.as_slice().map(<[S]>::to_vec)
    }

    /// Append one row; elements are cast to the column kind.
    ///
    /// Returns `false` (and appends nothing) if the row shape does not match.
    pub fn push(&mut self, row: &Value) -> bool {
        if row.array_len() != self.width {
            return false;
        }
        for v in row.elements() {
            self.data.push(*v);
        }
        true
    }

    /// The row at index `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<Value> {
        match self.width {
            None => self.data.get(i).map(Value::Scalar),
            Some(w) => (i * w..(i + 1) * w)
                .map(|k| self.data.get(k))
                .collect::<Option<SmallVec<_>>>()
                .map(Value::Array),
        }
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }
}

#[cfg(test)]
mod tests;

//! Scalar kinds and their native Rust counterparts.
//!
//! `ScalarKind` is the closed enumeration every descriptor resolves to.
//! The `Scalar` trait binds each of the ten native Rust scalar types to its
//! kind, so typed facade calls can be checked against a specialization's
//! element type without any runtime reflection.

use std::fmt;
use std::hash::Hash;

use crate::value::ColumnData;

/// Base scalar kind of a type descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    /// 32-bit IEEE 754 float.
    Float,
    /// 64-bit IEEE 754 float.
    Double,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

/// Descriptor aliases and the canonical base they resolve to.
pub const ALIASES: [(&str, ScalarKind); 4] = [
    ("int", ScalarKind::Int64),
    ("uint", ScalarKind::Uint64),
    ("float32", ScalarKind::Float),
    ("float64", ScalarKind::Double),
];

impl ScalarKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [ScalarKind; 10] = [
        ScalarKind::Float,
        ScalarKind::Double,
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::Uint8,
        ScalarKind::Uint16,
        ScalarKind::Uint32,
        ScalarKind::Uint64,
    ];

    /// Canonical descriptor name (`"float"`, `"uint64"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Int8 => "int8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Uint8 => "uint8",
            ScalarKind::Uint16 => "uint16",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Uint64 => "uint64",
        }
    }

    /// Native (C/C++) scalar type name.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Int8 => "int8_t",
            ScalarKind::Int16 => "int16_t",
            ScalarKind::Int32 => "int32_t",
            ScalarKind::Int64 => "int64_t",
            ScalarKind::Uint8 => "uint8_t",
            ScalarKind::Uint16 => "uint16_t",
            ScalarKind::Uint32 => "uint32_t",
            ScalarKind::Uint64 => "uint64_t",
        }
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            ScalarKind::Int8 | ScalarKind::Uint8 => 1,
            ScalarKind::Int16 | ScalarKind::Uint16 => 2,
            ScalarKind::Float | ScalarKind::Int32 | ScalarKind::Uint32 => 4,
            ScalarKind::Double | ScalarKind::Int64 | ScalarKind::Uint64 => 8,
        }
    }

    /// Natural alignment in bytes; equal to the size for every supported kind.
    #[must_use]
    pub const fn align(self) -> usize {
        self.size()
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarKind::Float | ScalarKind::Double)
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            ScalarKind::Uint8 | ScalarKind::Uint16 | ScalarKind::Uint32 | ScalarKind::Uint64
        )
    }

    /// Look up a canonical name. Aliases are not accepted here.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Resolve a base name, substituting aliases first.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, kind)| *kind)
            .or_else(|| Self::from_name(name))
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single scalar tagged with its kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Float(f32),
    Double(f64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
}

/// Expand `$body` once per integer variant with `$v` bound to the payload.
macro_rules! match_int {
    ($value:expr, $v:ident => $body:expr, float $f:ident => $fbody:expr) => {
        match $value {
            ScalarValue::Float($f) => $fbody,
            ScalarValue::Double($f) => $fbody,
            ScalarValue::Int8($v) => $body,
            ScalarValue::Int16($v) => $body,
            ScalarValue::Int32($v) => $body,
            ScalarValue::Int64($v) => $body,
            ScalarValue::Uint8($v) => $body,
            ScalarValue::Uint16($v) => $body,
            ScalarValue::Uint32($v) => $body,
            ScalarValue::Uint64($v) => $body,
        }
    };
}

/// Build a value of `$kind` from a numeric expression using `as` conversion.
macro_rules! cast_to {
    ($kind:expr, $n:expr) => {
        match $kind {
            ScalarKind::Float => ScalarValue::Float($n as f32),
            ScalarKind::Double => ScalarValue::Double($n as f64),
            ScalarKind::Int8 => ScalarValue::Int8($n as i8),
            ScalarKind::Int16 => ScalarValue::Int16($n as i16),
            ScalarKind::Int32 => ScalarValue::Int32($n as i32),
            ScalarKind::Int64 => ScalarValue::Int64($n as i64),
            ScalarKind::Uint8 => ScalarValue::Uint8($n as u8),
            ScalarKind::Uint16 => ScalarValue::Uint16($n as u16),
            ScalarKind::Uint32 => ScalarValue::Uint32($n as u32),
            ScalarKind::Uint64 => ScalarValue::Uint64($n as u64),
        }
    };
}

impl ScalarValue {
    #[must_use]
    pub const fn kind(self) -> ScalarKind {
        match self {
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::Double(_) => ScalarKind::Double,
            ScalarValue::Int8(_) => ScalarKind::Int8,
            ScalarValue::Int16(_) => ScalarKind::Int16,
            ScalarValue::Int32(_) => ScalarKind::Int32,
            ScalarValue::Int64(_) => ScalarKind::Int64,
            ScalarValue::Uint8(_) => ScalarKind::Uint8,
            ScalarValue::Uint16(_) => ScalarKind::Uint16,
            ScalarValue::Uint32(_) => ScalarKind::Uint32,
            ScalarValue::Uint64(_) => ScalarKind::Uint64,
        }
    }

    /// The zero value of `kind`.
    #[must_use]
    pub fn zero(kind: ScalarKind) -> Self {
        cast_to!(kind, 0u8)
    }

    #[must_use]
    pub fn to_f64(self) -> f64 {
        match_int!(self, v => v as f64, float f => f as f64)
    }

    /// Convert to `kind` with numeric `as` semantics (truncating, wrapping,
    /// saturating float-to-int), the way array `astype` conversions behave.
    #[must_use]
    pub fn cast(self, kind: ScalarKind) -> Self {
        if self.kind() == kind {
            return self;
        }
        match_int!(self, v => cast_to!(kind, v as i128), float f => cast_to!(kind, f))
    }

    /// Write the native-endian bytes of this value.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than the kind's size.
    pub fn write_ne(self, out: &mut [u8]) {
        let size = self.kind().size();
        match self {
            ScalarValue::Float(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Double(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Int8(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Int16(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Int32(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Int64(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Uint8(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Uint16(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Uint32(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::Uint64(v) => out[..size].copy_from_slice(&v.to_ne_bytes()),
        }
    }

    /// Read a value of `kind` from native-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than the kind's size.
    #[must_use]
    pub fn read_ne(kind: ScalarKind, bytes: &[u8]) -> Self {
        match kind {
            ScalarKind::Float => ScalarValue::Float(f32::from_ne_bytes(fixed(bytes))),
            ScalarKind::Double => ScalarValue::Double(f64::from_ne_bytes(fixed(bytes))),
            ScalarKind::Int8 => ScalarValue::Int8(i8::from_ne_bytes(fixed(bytes))),
            ScalarKind::Int16 => ScalarValue::Int16(i16::from_ne_bytes(fixed(bytes))),
            ScalarKind::Int32 => ScalarValue::Int32(i32::from_ne_bytes(fixed(bytes))),
            ScalarKind::Int64 => ScalarValue::Int64(i64::from_ne_bytes(fixed(bytes))),
            ScalarKind::Uint8 => ScalarValue::Uint8(u8::from_ne_bytes(fixed(bytes))),
            ScalarKind::Uint16 => ScalarValue::Uint16(u16::from_ne_bytes(fixed(bytes))),
            ScalarKind::Uint32 => ScalarValue::Uint32(u32::from_ne_bytes(fixed(bytes))),
            ScalarKind::Uint64 => ScalarValue::Uint64(u64::from_ne_bytes(fixed(bytes))),
        }
    }
}

fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match_int!(*self, v => write!(f, "{v}"), float x => write!(f, "{x}"))
    }
}

/// A native Rust scalar usable as an element, item, coordinate or attribute.
pub trait Scalar: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    const KIND: ScalarKind;

    /// Hashable, totally ordered representation used as a container key.
    /// Integers are their own bits; floats use their IEEE bit pattern.
    type Bits: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static;

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;
    fn into_value(self) -> ScalarValue;

    /// Exact-kind extraction; `None` if `value` is of another kind.
    fn from_value(value: ScalarValue) -> Option<Self>;

    /// Numeric `as` conversion from a value of any kind.
    fn cast_from(value: ScalarValue) -> Self;

    fn to_f64(self) -> f64;
    fn into_column(data: Vec<Self>) -> ColumnData;
    fn column_slice(data: &ColumnData) -> Option<&[Self]>;
}

macro_rules! scalar_common {
    ($variant:ident) => {
        const KIND: ScalarKind = ScalarKind::$variant;

        fn into_value(self) -> ScalarValue {
            ScalarValue::$variant(self)
        }

        fn from_value(value: ScalarValue) -> Option<Self> {
            match value {
                ScalarValue::$variant(v) => Some(v),
                _ => None,
            }
        }

        fn cast_from(value: ScalarValue) -> Self {
            match_int!(value, v => v as Self, float f => f as Self)
        }

        fn into_column(data: Vec<Self>) -> ColumnData {
            ColumnData::$variant(data)
        }

        fn column_slice(data: &ColumnData) -> Option<&[Self]> {
            match data {
                ColumnData::$variant(v) => Some(v),
                _ => None,
            }
        }
    };
}

macro_rules! impl_int_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            type Bits = $ty;

            scalar_common!($variant);

            fn to_bits(self) -> Self::Bits {
                self
            }

            fn from_bits(bits: Self::Bits) -> Self {
                bits
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }

        impl From<$ty> for ScalarValue {
            fn from(v: $ty) -> Self {
                ScalarValue::$variant(v)
            }
        }
    )*};
}

macro_rules! impl_float_scalar {
    ($($ty:ty => $variant:ident, $bits:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            type Bits = $bits;

            scalar_common!($variant);

            fn to_bits(self) -> Self::Bits {
                <$ty>::to_bits(self)
            }

            fn from_bits(bits: Self::Bits) -> Self {
                <$ty>::from_bits(bits)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }

        impl From<$ty> for ScalarValue {
            fn from(v: $ty) -> Self {
                ScalarValue::$variant(v)
            }
        }
    )*};
}

impl_int_scalar!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
);

impl_float_scalar!(f32 => Float, u32, f64 => Double, u64);

//! Type descriptors: `base('[' N ']')?`.
//!
//! A descriptor names a scalar kind and an optional fixed array length.
//! Parsing resolves aliases (`int`, `uint`, `float32`, `float64`), so two
//! spellings of the same type produce equal descriptors and the same
//! canonical text.
//!
//! Besides validation, descriptors render the C++ fragments the code
//! generator splices into aggregate declarations:
//!
//! | descriptor | flavor | declaration |
//! |------------|--------|-------------|
//! | `T` | plain, view | `T name` |
//! | `T[n]` | plain | `T name[n]` |
//! | `T[n]` | view | `std::span<const T> name` |
//! | `T` | leading dim | `std::span<const T> name` |
//! | `T[n]` | leading dim | `std::span<const T[n]> name` |

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::DescriptorError;
use crate::scalar::ScalarKind;

/// A validated, canonical type descriptor. Immutable once built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
    base: ScalarKind,
    count: Option<NonZeroU32>,
}

/// Declaration flavor flags for [`TypeDescriptor::decl`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclFlavor {
    /// Arrays are declared as an unsized view instead of `[n]`.
    pub unsized_view: bool,
    /// Prepend a generic leading dimension (a batch of values).
    pub append_leading_dim: bool,
}

impl DeclFlavor {
    pub const PLAIN: DeclFlavor = DeclFlavor {
        unsized_view: false,
        append_leading_dim: false,
    };
    pub const VIEW: DeclFlavor = DeclFlavor {
        unsized_view: true,
        append_leading_dim: false,
    };
    pub const BATCH: DeclFlavor = DeclFlavor {
        unsized_view: false,
        append_leading_dim: true,
    };
}

/// An r-value / access expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RValue {
    /// A single expression, e.g. `score` or `score[i]`.
    Scalar(String),
    /// One expression per array element, in element order.
    Elements(Vec<String>),
}

impl fmt::Display for RValue {
    /// Scalars print as-is; element lists print as a braced initializer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RValue::Scalar(expr) => f.write_str(expr),
            RValue::Elements(elements) => write!(f, "{{{}}}", elements.join(", ")),
        }
    }
}

impl TypeDescriptor {
    #[must_use]
    pub const fn scalar(base: ScalarKind) -> Self {
        Self { base, count: None }
    }

    /// A fixed-size array descriptor.
    ///
    /// # Errors
    ///
    /// Fails for a zero element count.
    pub fn array(base: ScalarKind, count: u32) -> Result<Self, DescriptorError> {
        let count = NonZeroU32::new(count).ok_or_else(|| DescriptorError::Invalid {
            input: format!("{base}[{count}]"),
            reason: "array length must be positive".to_string(),
        })?;
        Ok(Self {
            base,
            count: Some(count),
        })
    }

    /// Parse and canonicalize a descriptor string.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Invalid`] unless `input` matches
    /// `base ('[' positiveInt ']')?` with a supported (or alias) base.
    pub fn parse(input: &str) -> Result<Self, DescriptorError> {
        let invalid = |reason: &str| DescriptorError::Invalid {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (base, count) = match input.find('[') {
            None => (input, None),
            Some(open) => {
                let Some(digits) = input[open + 1..].strip_suffix(']') else {
                    return Err(invalid("expected `]` at the end of the array length"));
                };
                (&input[..open], Some(digits))
            }
        };

        if base.is_empty() {
            return Err(invalid("missing base type"));
        }
        let base = ScalarKind::resolve(base).ok_or_else(|| {
            invalid("unknown base type; expected one of float, double, int8, int16, int32, int64, uint8, uint16, uint32, uint64 (or int, uint, float32, float64)")
        })?;

        let count = match count {
            None => None,
            Some(digits) => {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("array length must be a decimal integer"));
                }
                let value: u32 = digits
                    .parse()
                    .map_err(|_| invalid("array length is out of range"))?;
                Some(NonZeroU32::new(value).ok_or_else(|| invalid("array length must be positive"))?)
            }
        };

        Ok(Self { base, count })
    }

    #[must_use]
    pub const fn base(&self) -> ScalarKind {
        self.base
    }

    /// Canonical text: post-alias base, brackets only for arrays.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.count.is_some()
    }

    #[must_use]
    pub fn element_count(&self) -> Option<usize> {
        self.count.map(|n| n.get() as usize)
    }

    /// `[]` for scalars, `[n]` for arrays.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.element_count().into_iter().collect()
    }

    /// Number of scalars stored: 1 for scalars, `n` for arrays.
    #[must_use]
    pub fn scalar_count(&self) -> usize {
        self.element_count().unwrap_or(1)
    }

    /// Storage size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.base.size() * self.scalar_count()
    }

    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        self.base.native_name()
    }

    /// Field declaration: `T name` or `T name[n]`.
    #[must_use]
    pub fn field_decl(&self, name: &str) -> String {
        self.decl(name, DeclFlavor::PLAIN)
    }

    /// Declaration of `name` in the requested flavor.
    #[must_use]
    pub fn decl(&self, name: &str, flavor: DeclFlavor) -> String {
        let native = self.native_name();
        match (self.count, flavor.append_leading_dim, flavor.unsized_view) {
            (None, false, _) => format!("{native} {name}"),
            (None, true, _) => format!("std::span<const {native}> {name}"),
            (Some(n), true, _) => format!("std::span<const {native}[{n}]> {name}"),
            (Some(_), false, true) => format!("std::span<const {native}> {name}"),
            (Some(n), false, false) => format!("{native} {name}[{n}]"),
        }
    }

    /// Access expression for `name`, optionally subscripted by `index`.
    #[must_use]
    pub fn rvalue(&self, name: &str, index: Option<&str>) -> RValue {
        match (self.element_count(), index) {
            (None, None) => RValue::Scalar(name.to_string()),
            (None, Some(i)) => RValue::Scalar(format!("{name}[{i}]")),
            (Some(n), None) => RValue::Elements((0..n).map(|k| format!("{name}[{k}]")).collect()),
            (Some(n), Some(i)) => {
                RValue::Elements((0..n).map(|k| format!("{name}[{i}, {k}]")).collect())
            }
        }
    }

    /// Reject array descriptors where only a scalar makes sense.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::ExpectedScalar`] naming `role`.
    pub fn expect_scalar(self, role: &'static str) -> Result<Self, DescriptorError> {
        if self.is_array() {
            Err(DescriptorError::ExpectedScalar {
                role,
                descriptor: self,
            })
        } else {
            Ok(self)
        }
    }
}

impl From<ScalarKind> for TypeDescriptor {
    fn from(base: ScalarKind) -> Self {
        Self::scalar(base)
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            Some(n) => write!(f, "{}[{n}]", self.base),
            None => write!(f, "{}", self.base),
        }
    }
}

#[cfg(test)]
mod tests;

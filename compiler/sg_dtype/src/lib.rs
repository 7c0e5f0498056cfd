//! Type descriptors, attribute specifications and typed values.
//!
//! Everything the specialization engine accepts from callers is validated
//! here first: descriptor strings (`"double[3]"`, `"uint"`), ordered
//! attribute lists, and the scalar/array values and columns that flow
//! through the graph and spatial index facades.

// Casts between scalar kinds are numeric `as` conversions by definition.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_lossless
)]

mod attrs;
mod descriptor;
mod error;
mod scalar;
mod value;

pub use attrs::{is_valid_attribute_name, AttributeSpec};
pub use descriptor::{DeclFlavor, RValue, TypeDescriptor};
pub use error::DescriptorError;
pub use scalar::{Scalar, ScalarKind, ScalarValue, ALIASES};
pub use value::{Column, ColumnData, Value};

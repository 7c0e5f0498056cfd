use thiserror::Error;

use crate::descriptor::TypeDescriptor;

/// A descriptor or attribute specification rejected at the boundary where it
/// was first accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("invalid type descriptor {input:?}: {reason}")]
    Invalid { input: String, reason: String },

    #[error("{role} type must be a scalar, found `{descriptor}`")]
    ExpectedScalar {
        role: &'static str,
        descriptor: TypeDescriptor,
    },

    #[error("attribute {name:?} is declared more than once")]
    DuplicateAttribute { name: String },

    #[error("attribute name {name:?} is not a usable identifier")]
    InvalidAttributeName { name: String },
}

use thiserror::Error;

use sg_dtype::TypeDescriptor;

/// Failure to generate native declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("attribute {name:?} has type `{descriptor}` with no native scalar mapping")]
    UnsupportedAttributeType {
        name: String,
        descriptor: TypeDescriptor,
    },
}

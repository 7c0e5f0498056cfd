use sg_backend::{BackendError, ShapeMismatch};
use sg_codegen::CodegenError;
use sg_collections::Rejected;
use sg_dtype::{DescriptorError, ScalarKind, ScalarValue};
use thiserror::Error;

/// Everything that can go wrong between a descriptor string and a container
/// operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A type descriptor or attribute name was rejected where it was first
    /// accepted.
    #[error(transparent)]
    InvalidDescriptor(#[from] DescriptorError),

    #[error(transparent)]
    UnsupportedAttributeType(#[from] CodegenError),

    /// The backend failed to produce a native type. Nothing was cached.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The container declined the operation and is unchanged.
    #[error("operation rejected: {0}")]
    Rejected(#[from] Rejected),

    /// An identifier of another scalar kind than the container's elements.
    #[error("identifiers are `{expected}`, got `{found}`")]
    ElementMismatch {
        expected: ScalarKind,
        found: ScalarKind,
    },

    #[error("no attribute named {name:?}")]
    UnknownAttribute { name: String },

    #[error("attribute {name:?} has no value")]
    MissingAttribute { name: String },

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),

    /// Parallel batch inputs disagree in length.
    #[error("expected {expected} rows, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A neighbor query that does not exist for the graph's topology.
    #[error("`{query}` is not available on {topology} graphs")]
    TopologyMismatch {
        query: &'static str,
        topology: &'static str,
    },

    #[error("node {id} does not exist")]
    MissingNode { id: ScalarValue },

    #[error("edge ({u}, {v}) does not exist")]
    MissingEdge { u: ScalarValue, v: ScalarValue },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

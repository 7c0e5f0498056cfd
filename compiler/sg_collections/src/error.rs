use thiserror::Error;

/// An operation the container declined. The container is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("node already exists")]
    DuplicateNode,

    #[error("edge already exists")]
    DuplicateEdge,

    #[error("self-loops are not allowed")]
    SelfLoop,

    #[error("edge endpoint is not a node")]
    MissingNode,

    #[error("expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

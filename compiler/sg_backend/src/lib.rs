//! Compilation backends for runtime specializations.
//!
//! A [`CompilationBackend`] turns a [`SourceUnit`](sg_codegen::SourceUnit)
//! into a [`NativeTypeHandle`]: two loaded record types (with their
//! [`AccessorTable`]s) and a factory for collaborator instances.
//!
//! - [`JitBackend`] evaluates units in-process against the template catalog
//!   and commits every declared name to an append-only [`Namespace`].
//! - [`AotBackend`] compiles units with the host C++ toolchain, caches the
//!   libraries on disk, and loads them with `libloading`.

// Dims and scalar sizes are small; the casts below cannot truncate.
#![allow(clippy::cast_possible_truncation)]

mod accessor;
mod aot;
mod backend;
mod catalog;
mod error;
mod handle;
mod jit;
mod record;

pub use accessor::{Accessor, AccessorTable, ShapeMismatch};
pub use aot::{AotBackend, AotConfig, ArtifactMeta};
pub use backend::CompilationBackend;
pub use catalog::{
    graph_factory, spatial_index_factory, GraphFactory, GraphInstance, NeighborCount,
    NeighborQuery, SpatialIndexFactory, SpatialIndexInstance,
};
pub use error::BackendError;
pub use handle::NativeTypeHandle;
pub use jit::{JitBackend, Namespace};
pub use record::{Record, RecordType};

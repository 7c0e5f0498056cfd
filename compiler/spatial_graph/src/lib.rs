//! Graphs and spatial indexes specialized at runtime.
//!
//! Describe a container's element type and attribute records with type
//! descriptor strings and get back a facade over a native specialization:
//!
//! ```no_run
//! use spatial_graph::{Attrs, Graph, Specializer};
//!
//! let specializer = Specializer::global()?;
//! let mut graph = Graph::from_descriptors(
//!     specializer,
//!     "uint64",
//!     &[("position", "double[3]")],
//!     &[("score", "float")],
//!     false,
//! )?;
//! graph.add_node(1u64, &Attrs::new().with("position", [0.0, 0.0, 0.0]))?;
//! # Ok::<(), spatial_graph::Error>(())
//! ```
//!
//! Each distinct specialization is compiled once per [`Specializer`]; later
//! requests with the same parameters, in any attribute order, reuse the
//! cached [`NativeTypeHandle`](sg_backend::NativeTypeHandle).

use std::sync::Once;

mod attrs;
mod cache;
mod config;
mod error;
mod graph;
mod spatial_index;
mod specializer;

pub use attrs::{AttrColumns, Attrs};
pub use cache::SpecializationCache;
pub use config::{BackendKind, EngineConfig};
pub use error::{Error, Result};
pub use graph::Graph;
pub use spatial_index::SpatialIndex;
pub use specializer::Specializer;

pub use sg_backend::{CompilationBackend, JitBackend, Namespace, NativeTypeHandle};
pub use sg_codegen::{GraphRequest, SourceUnit, SpatialIndexRequest, SpecializationKey};
pub use sg_dtype::{AttributeSpec, Column, Scalar, ScalarKind, ScalarValue, TypeDescriptor, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the engine.
///
/// Safe to call multiple times. Enable with `RUST_LOG=spatial_graph=debug`;
/// compilations log under `sg_backend`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

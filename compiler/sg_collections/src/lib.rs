//! Generic containers: an attributed graph and an R-tree.
//!
//! Both are plain generic libraries. Node, edge and item payloads are
//! whatever the caller chooses; failed operations come back as [`Rejected`]
//! and leave the container unchanged.

mod error;
mod graph;
mod rtree;

pub use error::Rejected;
pub use graph::{Directed, EdgeKind, Graph, Undirected};
pub use rtree::{Coordinate, RTree};

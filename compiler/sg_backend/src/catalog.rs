//! Build-time catalog of collaborator instantiations.
//!
//! Every element kind and topology of [`Graph`](sg_collections::Graph), and
//! every item and coordinate kind of [`RTree`](sg_collections::RTree), is
//! monomorphized here. A specialization resolves to a factory producing
//! fresh, independent instances behind an object-safe interface that speaks
//! [`ScalarValue`]s, [`Column`]s and [`Record`]s.

use sg_collections::Rejected;
use sg_dtype::{Column, ScalarKind, ScalarValue};

use crate::record::Record;

mod graph;
mod spatial;

/// Which neighbor count to take.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NeighborQuery {
    /// All neighbors of an undirected node.
    All,
    In,
    Out,
}

/// Outcome of a neighbor count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NeighborCount {
    Count(usize),
    MissingNode,
    /// The query does not exist for this graph's topology.
    WrongTopology,
}

/// A graph instance with record payloads.
///
/// Identifiers are cast to the element kind on the way in.
pub trait GraphInstance: Send {
    fn is_directed(&self) -> bool;
    fn element(&self) -> ScalarKind;

    fn add_node(&mut self, id: ScalarValue, data: Record) -> Result<(), Rejected>;
    fn add_edge(
        &mut self,
        source: ScalarValue,
        target: ScalarValue,
        data: Record,
    ) -> Result<(), Rejected>;

    fn contains_node(&self, id: ScalarValue) -> bool;
    fn contains_edge(&self, source: ScalarValue, target: ScalarValue) -> bool;
    fn node_count(&self) -> usize;
    fn edge_count(&self) -> usize;

    fn node_data(&self, id: ScalarValue) -> Option<&Record>;
    fn node_data_mut(&mut self, id: ScalarValue) -> Option<&mut Record>;
    fn edge_data(&self, source: ScalarValue, target: ScalarValue) -> Option<&Record>;
    fn edge_data_mut(&mut self, source: ScalarValue, target: ScalarValue) -> Option<&mut Record>;

    /// Node identifiers in insertion order.
    fn nodes(&self) -> Column;

    /// Edge endpoints in insertion order, as two parallel columns.
    fn edges(&self) -> (Column, Column);

    fn count_neighbors(&self, id: ScalarValue, query: NeighborQuery) -> NeighborCount;
}

/// A spatial index instance over flat, row-major coordinate columns.
///
/// Item and coordinate columns of another kind are cast on the way in. Batch
/// operations validate every row before changing anything.
pub trait SpatialIndexInstance: Send {
    fn item(&self) -> ScalarKind;
    fn coord(&self) -> ScalarKind;
    fn dims(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_points(&mut self, items: &Column, points: &Column) -> Result<(), Rejected>;
    fn insert_boxes(
        &mut self,
        items: &Column,
        mins: &Column,
        maxs: &Column,
    ) -> Result<(), Rejected>;

    /// Delete each item stored with exactly the given extent. A missing
    /// `maxs` means point items. Returns how many were deleted.
    fn delete(
        &mut self,
        items: &Column,
        mins: &Column,
        maxs: Option<&Column>,
    ) -> Result<usize, Rejected>;

    fn count(&self, min: &Column, max: &Column) -> Result<usize, Rejected>;
    fn search(&self, min: &Column, max: &Column) -> Result<Column, Rejected>;

    /// The `k` nearest items with their distances, closest first.
    fn nearest(&self, point: &Column, k: usize) -> Result<(Column, Vec<f64>), Rejected>;

    fn bounding_box(&self) -> Option<(Column, Column)>;
}

pub type GraphFactory = fn() -> Box<dyn GraphInstance>;
pub type SpatialIndexFactory = fn(usize) -> Box<dyn SpatialIndexInstance>;

/// Expand `$body` with `$t` aliased to the Rust type of `$kind`.
macro_rules! with_scalar {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            ScalarKind::Float => {
                type $t = f32;
                $body
            }
            ScalarKind::Double => {
                type $t = f64;
                $body
            }
            ScalarKind::Int8 => {
                type $t = i8;
                $body
            }
            ScalarKind::Int16 => {
                type $t = i16;
                $body
            }
            ScalarKind::Int32 => {
                type $t = i32;
                $body
            }
            ScalarKind::Int64 => {
                type $t = i64;
                $body
            }
            ScalarKind::Uint8 => {
                type $t = u8;
                $body
            }
            ScalarKind::Uint16 => {
                type $t = u16;
                $body
            }
            ScalarKind::Uint32 => {
                type $t = u32;
                $body
            }
            ScalarKind::Uint64 => {
                type $t = u64;
                $body
            }
        }
    };
}

/// Factory for graphs over `element` identifiers.
#[must_use]
pub fn graph_factory(element: ScalarKind, directed: bool) -> GraphFactory {
    use sg_collections::{Directed, Undirected};

    if directed {
        with_scalar!(element, T => graph::create::<T, Directed> as GraphFactory)
    } else {
        with_scalar!(element, T => graph::create::<T, Undirected> as GraphFactory)
    }
}

/// Factory for spatial indexes; the factory takes the dimensionality.
#[must_use]
pub fn spatial_index_factory(item: ScalarKind, coord: ScalarKind) -> SpatialIndexFactory {
    with_scalar!(item, I => with_scalar!(coord, C => spatial::create::<I, C> as SpatialIndexFactory))
}

#[cfg(test)]
mod tests;

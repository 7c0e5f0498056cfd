use std::hash::Hash;
use std::marker::PhantomData;

use sg_collections::{Directed, EdgeKind, Graph, Rejected, Undirected};
use sg_dtype::{Column, Scalar, ScalarKind, ScalarValue};

use super::{GraphInstance, NeighborCount, NeighborQuery};
use crate::record::Record;

/// Neighbor queries available on one topology.
pub(super) trait Neighbors<K> {
    fn neighbors(&self, key: &K, query: NeighborQuery) -> NeighborCount;
}

fn found(count: Option<usize>) -> NeighborCount {
    count.map_or(NeighborCount::MissingNode, NeighborCount::Count)
}

impl<K: Copy + Eq + Hash, N, E> Neighbors<K> for Graph<K, N, E, Undirected> {
    fn neighbors(&self, key: &K, query: NeighborQuery) -> NeighborCount {
        match query {
            NeighborQuery::All => found(self.count_neighbors(key)),
            NeighborQuery::In | NeighborQuery::Out => NeighborCount::WrongTopology,
        }
    }
}

impl<K: Copy + Eq + Hash, N, E> Neighbors<K> for Graph<K, N, E, Directed> {
    fn neighbors(&self, key: &K, query: NeighborQuery) -> NeighborCount {
        match query {
            NeighborQuery::All => NeighborCount::WrongTopology,
            NeighborQuery::In => found(self.count_in_neighbors(key)),
            NeighborQuery::Out => found(self.count_out_neighbors(key)),
        }
    }
}

struct GraphImpl<S: Scalar, D> {
    graph: Graph<S::Bits, Record, Record, D>,
    element: PhantomData<S>,
}

fn key<S: Scalar>(id: ScalarValue) -> S::Bits {
    S::cast_from(id).to_bits()
}

pub(super) fn create<S, D>() -> Box<dyn GraphInstance>
where
    S: Scalar,
    D: EdgeKind,
    Graph<S::Bits, Record, Record, D>: Neighbors<S::Bits>,
{
    Box::new(GraphImpl::<S, D> {
        graph: Graph::new(),
        element: PhantomData,
    })
}

impl<S, D> GraphInstance for GraphImpl<S, D>
where
    S: Scalar,
    D: EdgeKind,
    Graph<S::Bits, Record, Record, D>: Neighbors<S::Bits>,
{
    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn element(&self) -> ScalarKind {
        S::KIND
    }

    fn add_node(&mut self, id: ScalarValue, data: Record) -> Result<(), Rejected> {
        self.graph.add_node(key::<S>(id), data)
    }

    fn add_edge(
        &mut self,
        source: ScalarValue,
        target: ScalarValue,
        data: Record,
    ) -> Result<(), Rejected> {
        self.graph.add_edge(key::<S>(source), key::<S>(target), data)
    }

    fn contains_node(&self, id: ScalarValue) -> bool {
        self.graph.contains_node(&key::<S>(id))
    }

    fn contains_edge(&self, source: ScalarValue, target: ScalarValue) -> bool {
        self.graph.contains_edge(&key::<S>(source), &key::<S>(target))
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node_data(&self, id: ScalarValue) -> Option<&Record> {
        self.graph.node_data(&key::<S>(id))
    }

    fn node_data_mut(&mut self, id: ScalarValue) -> Option<&mut Record> {
        self.graph.node_data_mut(&key::<S>(id))
    }

    fn edge_data(&self, source: ScalarValue, target: ScalarValue) -> Option<&Record> {
        self.graph.edge_data(&key::<S>(source), &key::<S>(target))
    }

    fn edge_data_mut(&mut self, source: ScalarValue, target: ScalarValue) -> Option<&mut Record> {
        self.graph.edge_data_mut(&key::<S>(source), &key::<S>(target))
    }

    fn nodes(&self) -> Column {
        Column::from_vec(self.graph.nodes().map(S::from_bits).collect::<Vec<S>>())
    }

    fn edges(&self) -> (Column, Column) {
        let (sources, targets): (Vec<S>, Vec<S>) = self
            .graph
            .edges()
            .map(|(u, v)| (S::from_bits(u), S::from_bits(v)))
            .unzip();
        (Column::from_vec(sources), Column::from_vec(targets))
    }

    fn count_neighbors(&self, id: ScalarValue, query: NeighborQuery) -> NeighborCount {
        self.graph.neighbors(&key::<S>(id), query)
    }
}

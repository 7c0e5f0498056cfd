//! Attributed graph over copyable node identifiers.
//!
//! Nodes and edges carry one payload each (`N` and `E`). Nodes iterate in
//! insertion order. Self-loops and parallel edges are rejected; an edge
//! needs both endpoints to exist.
//!
//! The edge kind is a type parameter, so neighbor queries exist only where
//! they make sense: [`Graph::count_neighbors`] on undirected graphs,
//! [`Graph::count_in_neighbors`] and [`Graph::count_out_neighbors`] on
//! directed ones. An undirected edge is stored once and can be addressed
//! with its endpoints in either order.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::error::Rejected;

mod sealed {
    pub trait Sealed {}
}

/// Directed or undirected edges.
pub trait EdgeKind: sealed::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static {
    const DIRECTED: bool;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Directed;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Undirected;

impl sealed::Sealed for Directed {}
impl sealed::Sealed for Undirected {}

impl EdgeKind for Directed {
    const DIRECTED: bool = true;
}

impl EdgeKind for Undirected {
    const DIRECTED: bool = false;
}

#[derive(Clone, Debug)]
struct NodeEntry<K, N> {
    key: K,
    data: N,
    in_degree: usize,
    out_degree: usize,
}

#[derive(Clone, Debug)]
struct EdgeEntry<K, E> {
    source: K,
    target: K,
    data: E,
}

#[derive(Clone, Debug)]
pub struct Graph<K, N, E, D> {
    nodes: Vec<NodeEntry<K, N>>,
    index: FxHashMap<K, usize>,
    edges: Vec<EdgeEntry<K, E>>,
    /// Edge slots keyed by endpoint node indices, normalized for undirected
    /// graphs.
    edge_index: FxHashMap<(usize, usize), usize>,
    kind: PhantomData<D>,
}

impl<K, N, E, D> Default for Graph<K, N, E, D> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            edges: Vec::new(),
            edge_index: FxHashMap::default(),
            kind: PhantomData,
        }
    }
}

impl<K, N, E, D> Graph<K, N, E, D>
where
    K: Copy + Eq + Hash,
    D: EdgeKind,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    /// Insert a node.
    ///
    /// # Errors
    ///
    /// [`Rejected::DuplicateNode`] if `key` is already present.
    pub fn add_node(&mut self, key: K, data: N) -> Result<(), Rejected> {
        if self.index.contains_key(&key) {
            return Err(Rejected::DuplicateNode);
        }
        self.index.insert(key, self.nodes.len());
        self.nodes.push(NodeEntry {
            key,
            data,
            in_degree: 0,
            out_degree: 0,
        });
        Ok(())
    }

    /// Insert an edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// [`Rejected::SelfLoop`], [`Rejected::MissingNode`] or
    /// [`Rejected::DuplicateEdge`].
    pub fn add_edge(&mut self, source: K, target: K, data: E) -> Result<(), Rejected> {
        if source == target {
            return Err(Rejected::SelfLoop);
        }
        let (Some(&u), Some(&v)) = (self.index.get(&source), self.index.get(&target)) else {
            return Err(Rejected::MissingNode);
        };
        let slot = Self::normalize(u, v);
        if self.edge_index.contains_key(&slot) {
            return Err(Rejected::DuplicateEdge);
        }
        self.edge_index.insert(slot, self.edges.len());
        self.edges.push(EdgeEntry {
            source,
            target,
            data,
        });
        self.nodes[u].out_degree += 1;
        self.nodes[v].in_degree += 1;
        Ok(())
    }

    fn normalize(u: usize, v: usize) -> (usize, usize) {
        if D::DIRECTED {
            (u, v)
        } else {
            (u.min(v), u.max(v))
        }
    }

    fn edge_slot(&self, source: &K, target: &K) -> Option<usize> {
        let u = *self.index.get(source)?;
        let v = *self.index.get(target)?;
        self.edge_index.get(&Self::normalize(u, v)).copied()
    }

    #[must_use]
    pub fn contains_node(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn contains_edge(&self, source: &K, target: &K) -> bool {
        self.edge_slot(source, target).is_some()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn node_data(&self, key: &K) -> Option<&N> {
        self.index.get(key).map(|&i| &self.nodes[i].data)
    }

    pub fn node_data_mut(&mut self, key: &K) -> Option<&mut N> {
        let i = *self.index.get(key)?;
        Some(&mut self.nodes[i].data)
    }

    #[must_use]
    pub fn edge_data(&self, source: &K, target: &K) -> Option<&E> {
        self.edge_slot(source, target).map(|i| &self.edges[i].data)
    }

    pub fn edge_data_mut(&mut self, source: &K, target: &K) -> Option<&mut E> {
        let i = self.edge_slot(source, target)?;
        Some(&mut self.edges[i].data)
    }

    /// Node identifiers in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = K> + '_ {
        self.nodes.iter().map(|n| n.key)
    }

    /// Edges in insertion order, with endpoints as they were inserted.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (K, K)> + '_ {
        self.edges.iter().map(|e| (e.source, e.target))
    }

    fn degrees(&self, key: &K) -> Option<(usize, usize)> {
        self.index.get(key).map(|&i| {
            let node = &self.nodes[i];
            (node.in_degree, node.out_degree)
        })
    }
}

impl<K: Copy + Eq + Hash, N, E> Graph<K, N, E, Undirected> {
    /// Number of nodes adjacent to `key`, or `None` if it is not a node.
    #[must_use]
    pub fn count_neighbors(&self, key: &K) -> Option<usize> {
        self.degrees(key).map(|(i, o)| i + o)
    }
}

impl<K: Copy + Eq + Hash, N, E> Graph<K, N, E, Directed> {
    /// Number of edges ending at `key`, or `None` if it is not a node.
    #[must_use]
    pub fn count_in_neighbors(&self, key: &K) -> Option<usize> {
        self.degrees(key).map(|(i, _)| i)
    }

    /// Number of edges starting at `key`, or `None` if it is not a node.
    #[must_use]
    pub fn count_out_neighbors(&self, key: &K) -> Option<usize> {
        self.degrees(key).map(|(_, o)| o)
    }
}

//! The graph facade.
//!
//! A [`Graph`] binds one specialized native type to one collaborator graph
//! instance. Node identifiers must be of the element kind the graph was
//! specialized for; attribute values are cast to each attribute's kind.
//! Batch operations validate their whole input before touching the graph.

use std::sync::Arc;

use parking_lot::Mutex;
use sg_backend::{
    Accessor, GraphInstance, NativeTypeHandle, NeighborCount, NeighborQuery, Record, RecordType,
};
use sg_codegen::GraphRequest;
use sg_collections::Rejected;
use sg_dtype::{AttributeSpec, Column, Scalar, ScalarKind, ScalarValue, Value};

use crate::attrs::{build_record, build_records, AttrColumns, Attrs};
use crate::error::{Error, Result};
use crate::specializer::Specializer;

/// A graph whose node identifiers and node/edge attributes were chosen at
/// runtime.
pub struct Graph {
    handle: Arc<NativeTypeHandle>,
    inner: Arc<Mutex<Box<dyn GraphInstance>>>,
    directed: bool,
}

impl Graph {
    /// A new, empty graph. Compiles the specialization unless `specializer`
    /// already holds it.
    ///
    /// # Errors
    ///
    /// Code generation or backend failures.
    pub fn new(specializer: &Specializer, request: &GraphRequest) -> Result<Self> {
        let handle = specializer.graph_handle(request)?;
        let inner = handle.new_graph().ok_or_else(|| {
            Error::Config(format!("`{}` is not a graph specialization", handle.key()))
        })?;
        Ok(Self {
            directed: request.directed(),
            inner: Arc::new(Mutex::new(inner)),
            handle,
        })
    }

    /// A new graph from descriptor strings, e.g.
    /// `Graph::from_descriptors(s, "uint64", &[("position", "double[3]")], &[], false)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDescriptor`] for malformed descriptors or names, and
    /// everything [`Graph::new`] reports.
    pub fn from_descriptors(
        specializer: &Specializer,
        element: &str,
        node_attrs: &[(&str, &str)],
        edge_attrs: &[(&str, &str)],
        directed: bool,
    ) -> Result<Self> {
        let request = GraphRequest::new(element, directed)?.with_attrs(
            AttributeSpec::parse(node_attrs.iter().copied())?,
            AttributeSpec::parse(edge_attrs.iter().copied())?,
        );
        Self::new(specializer, &request)
    }

    /// Another facade over the same graph.
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
            inner: Arc::clone(&self.inner),
            directed: self.directed,
        }
    }

    #[must_use]
    pub fn handle(&self) -> &Arc<NativeTypeHandle> {
        &self.handle
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Scalar kind of node identifiers.
    #[must_use]
    pub fn element(&self) -> ScalarKind {
        self.handle.key().element()
    }

    fn nodes_type(&self) -> &RecordType {
        self.handle.primary()
    }

    fn edges_type(&self) -> &RecordType {
        self.handle.secondary()
    }

    fn id<S: Scalar>(&self, id: S) -> Result<ScalarValue> {
        if S::KIND == self.element() {
            Ok(id.into_value())
        } else {
            Err(Error::ElementMismatch {
                expected: self.element(),
                found: S::KIND,
            })
        }
    }

    fn check_rows(expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Error::LengthMismatch { expected, found })
        }
    }

    // ---- nodes ----

    /// Add one node.
    ///
    /// # Errors
    ///
    /// Attribute errors, or [`Error::Rejected`] if the node exists.
    pub fn add_node<S: Scalar>(&mut self, id: S, attrs: &Attrs) -> Result<()> {
        let id = self.id(id)?;
        let record = build_record(self.nodes_type(), attrs)?;
        self.inner.lock().add_node(id, record)?;
        Ok(())
    }

    /// Add nodes with one attribute row each. Returns how many were added;
    /// identifiers already present are skipped.
    ///
    /// # Errors
    ///
    /// Identifier or attribute errors, reported before any node is added.
    pub fn add_nodes<S: Scalar>(&mut self, ids: &[S], attrs: &AttrColumns) -> Result<usize> {
        let ids = ids.iter().map(|&id| self.id(id)).collect::<Result<Vec<_>>>()?;
        let records = build_records(self.nodes_type(), attrs, ids.len())?;
        let mut graph = self.inner.lock();
        Ok(ids
            .into_iter()
            .zip(records)
            .filter(|(id, record)| graph.add_node(*id, record.clone()).is_ok())
            .count())
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.inner.lock().node_count()
    }

    /// Node identifiers in insertion order.
    #[must_use]
    pub fn nodes(&self) -> Column {
        self.inner.lock().nodes()
    }

    /// Whether `id` is a node.
    ///
    /// # Errors
    ///
    /// [`Error::ElementMismatch`] for identifiers of another kind.
    pub fn contains_node<S: Scalar>(&self, id: S) -> Result<bool> {
        let id = self.id(id)?;
        Ok(self.inner.lock().contains_node(id))
    }

    // ---- edges ----

    fn insert_edge(
        &self,
        graph: &mut dyn GraphInstance,
        u: ScalarValue,
        v: ScalarValue,
        record: Record,
    ) -> Result<(), Rejected> {
        if u == v {
            return Err(Rejected::SelfLoop);
        }
        if graph.contains_edge(u, v) {
            return Err(Rejected::DuplicateEdge);
        }
        for endpoint in [u, v] {
            if !graph.contains_node(endpoint) {
                graph.add_node(endpoint, self.nodes_type().default_record())?;
            }
        }
        graph.add_edge(u, v, record)
    }

    /// Add one edge. Missing endpoints are added first, with default node
    /// attributes.
    ///
    /// # Errors
    ///
    /// Attribute errors, or [`Error::Rejected`] for self-loops and existing
    /// edges (the graph is unchanged then).
    pub fn add_edge<S: Scalar>(&mut self, u: S, v: S, attrs: &Attrs) -> Result<()> {
        let (u, v) = (self.id(u)?, self.id(v)?);
        let record = build_record(self.edges_type(), attrs)?;
        let mut graph = self.inner.lock();
        self.insert_edge(&mut **graph, u, v, record)?;
        Ok(())
    }

    /// Add edges with one attribute row each. Returns how many were added;
    /// self-loops and existing edges are skipped.
    ///
    /// # Errors
    ///
    /// Identifier or attribute errors, reported before any edge is added.
    pub fn add_edges<S: Scalar>(
        &mut self,
        edges: &[(S, S)],
        attrs: &AttrColumns,
    ) -> Result<usize> {
        let edges = edges
            .iter()
            .map(|&(u, v)| -> Result<_> { Ok((self.id(u)?, self.id(v)?)) })
            .collect::<Result<Vec<_>>>()?;
        let records = build_records(self.edges_type(), attrs, edges.len())?;
        let mut graph = self.inner.lock();
        Ok(edges
            .into_iter()
            .zip(records)
            .filter(|((u, v), record)| {
                self.insert_edge(&mut **graph, *u, *v, record.clone()).is_ok()
            })
            .count())
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.inner.lock().edge_count()
    }

    /// Edge endpoints in insertion order, as parallel columns.
    #[must_use]
    pub fn edges(&self) -> (Column, Column) {
        self.inner.lock().edges()
    }

    /// Whether `(u, v)` is an edge. Undirected edges match either order.
    ///
    /// # Errors
    ///
    /// [`Error::ElementMismatch`] for identifiers of another kind.
    pub fn contains_edge<S: Scalar>(&self, u: S, v: S) -> Result<bool> {
        let (u, v) = (self.id(u)?, self.id(v)?);
        Ok(self.inner.lock().contains_edge(u, v))
    }

    // ---- neighbors ----

    fn neighbor_counts<S: Scalar>(
        &self,
        ids: &[S],
        query: NeighborQuery,
        name: &'static str,
    ) -> Result<Column> {
        let available = match query {
            NeighborQuery::All => !self.directed,
            NeighborQuery::In | NeighborQuery::Out => self.directed,
        };
        if !available {
            return Err(Error::TopologyMismatch {
                query: name,
                topology: if self.directed { "directed" } else { "undirected" },
            });
        }
        let ids = ids.iter().map(|&id| self.id(id)).collect::<Result<Vec<_>>>()?;
        let graph = self.inner.lock();
        let counts = ids
            .into_iter()
            .map(|id| match graph.count_neighbors(id, query) {
                NeighborCount::Count(n) => Ok(n as u64),
                NeighborCount::MissingNode => Err(Error::MissingNode { id }),
                NeighborCount::WrongTopology => Err(Error::TopologyMismatch {
                    query: name,
                    topology: if self.directed { "directed" } else { "undirected" },
                }),
            })
            .collect::<Result<Vec<u64>>>()?;
        Ok(Column::from_vec(counts))
    }

    /// Neighbor count per node of an undirected graph.
    ///
    /// # Errors
    ///
    /// [`Error::TopologyMismatch`] on directed graphs, [`Error::MissingNode`]
    /// for unknown identifiers.
    pub fn count_neighbors<S: Scalar>(&self, ids: &[S]) -> Result<Column> {
        self.neighbor_counts(ids, NeighborQuery::All, "count_neighbors")
    }

    /// Incoming edge count per node of a directed graph.
    ///
    /// # Errors
    ///
    /// [`Error::TopologyMismatch`] on undirected graphs,
    /// [`Error::MissingNode`] for unknown identifiers.
    pub fn count_in_neighbors<S: Scalar>(&self, ids: &[S]) -> Result<Column> {
        self.neighbor_counts(ids, NeighborQuery::In, "count_in_neighbors")
    }

    /// Outgoing edge count per node of a directed graph.
    ///
    /// # Errors
    ///
    /// [`Error::TopologyMismatch`] on undirected graphs,
    /// [`Error::MissingNode`] for unknown identifiers.
    pub fn count_out_neighbors<S: Scalar>(&self, ids: &[S]) -> Result<Column> {
        self.neighbor_counts(ids, NeighborQuery::Out, "count_out_neighbors")
    }

    // ---- attributes ----

    fn accessor<'a>(ty: &'a RecordType, name: &str) -> Result<&'a Accessor> {
        ty.accessors().get(name).ok_or_else(|| Error::UnknownAttribute {
            name: name.to_string(),
        })
    }

    /// Rows of `values`, each checked to fit `accessor`.
    fn checked_rows(ty: &RecordType, accessor: &Accessor, values: &Column) -> Result<Vec<Value>> {
        let mut scratch = ty.default_record();
        values
            .rows()
            .map(|row| -> Result<Value> {
                accessor.set(&mut scratch, &row)?;
                Ok(row)
            })
            .collect()
    }

    /// One node's attribute.
    ///
    /// # Errors
    ///
    /// Unknown attribute or node.
    pub fn node_attr<S: Scalar>(&self, id: S, name: &str) -> Result<Value> {
        let accessor = Self::accessor(self.nodes_type(), name)?;
        let id = self.id(id)?;
        let graph = self.inner.lock();
        let record = graph.node_data(id).ok_or(Error::MissingNode { id })?;
        Ok(accessor.get(record))
    }

    /// Set one node's attribute.
    ///
    /// # Errors
    ///
    /// Unknown attribute or node, or a value of the wrong shape.
    pub fn set_node_attr<S: Scalar>(
        &mut self,
        id: S,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let accessor = Self::accessor(self.nodes_type(), name)?;
        let id = self.id(id)?;
        let mut graph = self.inner.lock();
        let record = graph.node_data_mut(id).ok_or(Error::MissingNode { id })?;
        accessor.set(record, &value.into())?;
        Ok(())
    }

    /// An attribute of several nodes, as a column typed like the attribute.
    ///
    /// # Errors
    ///
    /// Unknown attribute or node.
    pub fn node_attrs<S: Scalar>(&self, ids: &[S], name: &str) -> Result<Column> {
        let accessor = Self::accessor(self.nodes_type(), name)?;
        let ids = ids.iter().map(|&id| self.id(id)).collect::<Result<Vec<_>>>()?;
        let graph = self.inner.lock();
        let mut column = Column::for_descriptor(&accessor.descriptor(), ids.len());
        for id in ids {
            let record = graph.node_data(id).ok_or(Error::MissingNode { id })?;
            column.push(&accessor.get(record));
        }
        Ok(column)
    }

    /// Set an attribute of several nodes, row `i` of `values` for `ids[i]`.
    ///
    /// # Errors
    ///
    /// Unknown attribute or node, or mismatched lengths or shapes; nothing
    /// is written then.
    pub fn set_node_attrs<S: Scalar>(
        &mut self,
        ids: &[S],
        name: &str,
        values: &Column,
    ) -> Result<()> {
        let accessor = Self::accessor(self.nodes_type(), name)?;
        Self::check_rows(ids.len(), values.len())?;
        let ids = ids.iter().map(|&id| self.id(id)).collect::<Result<Vec<_>>>()?;
        let rows = Self::checked_rows(self.nodes_type(), accessor, values)?;
        let mut graph = self.inner.lock();
        if let Some(&id) = ids.iter().find(|&&id| !graph.contains_node(id)) {
            return Err(Error::MissingNode { id });
        }
        for (id, row) in ids.into_iter().zip(&rows) {
            if let Some(record) = graph.node_data_mut(id) {
                accessor.set(record, row)?;
            }
        }
        Ok(())
    }

    /// One edge's attribute.
    ///
    /// # Errors
    ///
    /// Unknown attribute or edge.
    pub fn edge_attr<S: Scalar>(&self, u: S, v: S, name: &str) -> Result<Value> {
        let accessor = Self::accessor(self.edges_type(), name)?;
        let (u, v) = (self.id(u)?, self.id(v)?);
        let graph = self.inner.lock();
        let record = graph.edge_data(u, v).ok_or(Error::MissingEdge { u, v })?;
        Ok(accessor.get(record))
    }

    /// Set one edge's attribute.
    ///
    /// # Errors
    ///
    /// Unknown attribute or edge, or a value of the wrong shape.
    pub fn set_edge_attr<S: Scalar>(
        &mut self,
        u: S,
        v: S,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let accessor = Self::accessor(self.edges_type(), name)?;
        let (u, v) = (self.id(u)?, self.id(v)?);
        let mut graph = self.inner.lock();
        let record = graph.edge_data_mut(u, v).ok_or(Error::MissingEdge { u, v })?;
        accessor.set(record, &value.into())?;
        Ok(())
    }

    /// An attribute of several edges, as a column typed like the attribute.
    ///
    /// # Errors
    ///
    /// Unknown attribute or edge.
    pub fn edge_attrs<S: Scalar>(&self, edges: &[(S, S)], name: &str) -> Result<Column> {
        let accessor = Self::accessor(self.edges_type(), name)?;
        let edges = edges
            .iter()
            .map(|&(u, v)| -> Result<_> { Ok((self.id(u)?, self.id(v)?)) })
            .collect::<Result<Vec<_>>>()?;
        let graph = self.inner.lock();
        let mut column = Column::for_descriptor(&accessor.descriptor(), edges.len());
        for (u, v) in edges {
            let record = graph.edge_data(u, v).ok_or(Error::MissingEdge { u, v })?;
            column.push(&accessor.get(record));
        }
        Ok(column)
    }

    /// Set an attribute of several edges, row `i` of `values` for
    /// `edges[i]`.
    ///
    /// # Errors
    ///
    /// Unknown attribute or edge, or mismatched lengths or shapes; nothing
    /// is written then.
    pub fn set_edge_attrs<S: Scalar>(
        &mut self,
        edges: &[(S, S)],
        name: &str,
        values: &Column,
    ) -> Result<()> {
        let accessor = Self::accessor(self.edges_type(), name)?;
        Self::check_rows(edges.len(), values.len())?;
        let edges = edges
            .iter()
            .map(|&(u, v)| -> Result<_> { Ok((self.id(u)?, self.id(v)?)) })
            .collect::<Result<Vec<_>>>()?;
        let rows = Self::checked_rows(self.edges_type(), accessor, values)?;
        let mut graph = self.inner.lock();
        for &(u, v) in &edges {
            if !graph.contains_edge(u, v) {
                return Err(Error::MissingEdge { u, v });
            }
        }
        for ((u, v), row) in edges.into_iter().zip(&rows) {
            if let Some(record) = graph.edge_data_mut(u, v) {
                accessor.set(record, row)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("key", &self.handle.key().canonical())
            .field("nodes", &self.num_nodes())
            .field("edges", &self.num_edges())
            .finish()
    }
}

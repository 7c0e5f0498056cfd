//! Loaded specializations.

use std::fmt;

use sg_codegen::{Instantiation, SourceUnit, SpecializationKey, SymbolSet, Template, Topology};

use crate::catalog::{
    self, GraphFactory, GraphInstance, SpatialIndexFactory, SpatialIndexInstance,
};
use crate::record::RecordType;

/// Collaborator factory resolved for one specialization.
#[derive(Clone, Copy)]
pub(crate) enum Factory {
    Graph(GraphFactory),
    SpatialIndex {
        create: SpatialIndexFactory,
        dims: usize,
    },
}

impl Factory {
    pub(crate) fn for_instantiation(instantiation: &Instantiation) -> Self {
        let element = instantiation.element;
        match (instantiation.template, instantiation.topology) {
            (Template::SpatialIndex, Topology::Dimensions(dims)) => Factory::SpatialIndex {
                create: catalog::spatial_index_factory(
                    element,
                    instantiation.coord.unwrap_or(element),
                ),
                dims: dims.get() as usize,
            },
            (_, topology) => {
                Factory::Graph(catalog::graph_factory(element, topology == Topology::Directed))
            }
        }
    }
}

/// A compiled or evaluated specialization: the two generated record types
/// plus the collaborator instantiation they parameterize.
///
/// Handles are immutable and shared by every container built from the same
/// key.
pub struct NativeTypeHandle {
    key: SpecializationKey,
    symbols: SymbolSet,
    primary: RecordType,
    secondary: RecordType,
    factory: Factory,
    backend: &'static str,
}

impl NativeTypeHandle {
    pub(crate) fn new(
        unit: &SourceUnit,
        primary: RecordType,
        secondary: RecordType,
        backend: &'static str,
    ) -> Self {
        Self {
            key: unit.key().clone(),
            symbols: unit.symbols().clone(),
            primary,
            secondary,
            factory: Factory::for_instantiation(unit.instantiation()),
            backend,
        }
    }

    #[must_use]
    pub fn key(&self) -> &SpecializationKey {
        &self.key
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// The node record of a graph, the item record of a spatial index.
    #[must_use]
    pub fn primary(&self) -> &RecordType {
        &self.primary
    }

    /// The edge record of a graph, the point record of a spatial index.
    #[must_use]
    pub fn secondary(&self) -> &RecordType {
        &self.secondary
    }

    /// Name of the backend that produced this handle.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// A fresh graph, or `None` if this is not a graph specialization.
    #[must_use]
    pub fn new_graph(&self) -> Option<Box<dyn GraphInstance>> {
        match self.factory {
            Factory::Graph(create) => Some(create()),
            Factory::SpatialIndex { .. } => None,
        }
    }

    /// A fresh spatial index, or `None` if this is not a spatial index
    /// specialization.
    #[must_use]
    pub fn new_spatial_index(&self) -> Option<Box<dyn SpatialIndexInstance>> {
        match self.factory {
            Factory::SpatialIndex { create, dims } => Some(create(dims)),
            Factory::Graph(_) => None,
        }
    }
}

impl fmt::Debug for NativeTypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeTypeHandle")
            .field("key", &self.key.canonical())
            .field("alias", &self.symbols.alias)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

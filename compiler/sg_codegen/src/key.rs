//! Specialization keys.
//!
//! A key identifies one specialization independently of the order in which
//! attributes were supplied: both attribute lists are stored sorted by name.
//! Its canonical text is stable across runs and feeds the content hash used
//! in symbol and artifact names.
//!
//! ```text
//! graph<uint64;node{};edge{score:float};directed>
//! spatial<uint64;item{item:uint64};point{coord:double[3]};dims=3>
//! ```

use std::fmt::{self, Write};
use std::num::NonZeroU32;

use sg_dtype::{AttributeSpec, ScalarKind, TypeDescriptor};

use crate::hash::{hash_str, ContentHash};
use crate::request::{GraphRequest, SpatialIndexRequest};

/// Which generic template a specialization instantiates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Template {
    Graph,
    SpatialIndex,
}

impl Template {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Template::Graph => "graph",
            Template::SpatialIndex => "spatial",
        }
    }

    /// Names of the primary and secondary aggregates.
    #[must_use]
    pub const fn aggregate_names(self) -> (&'static str, &'static str) {
        match self {
            Template::Graph => ("node", "edge"),
            Template::SpatialIndex => ("item", "point"),
        }
    }
}

/// The topology parameter of an instantiation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topology {
    Undirected,
    Directed,
    Dimensions(NonZeroU32),
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Undirected => f.write_str("undirected"),
            Topology::Directed => f.write_str("directed"),
            Topology::Dimensions(n) => write!(f, "dims={n}"),
        }
    }
}

/// Canonical, order-independent identity of a specialization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpecializationKey {
    template: Template,
    element: ScalarKind,
    primary: Vec<(String, TypeDescriptor)>,
    secondary: Vec<(String, TypeDescriptor)>,
    topology: Topology,
}

impl SpecializationKey {
    #[must_use]
    pub fn new(
        template: Template,
        element: ScalarKind,
        primary: &AttributeSpec,
        secondary: &AttributeSpec,
        topology: Topology,
    ) -> Self {
        Self {
            template,
            element,
            primary: primary.sorted(),
            secondary: secondary.sorted(),
            topology,
        }
    }

    #[must_use]
    pub fn for_graph(request: &GraphRequest) -> Self {
        let topology = if request.directed() {
            Topology::Directed
        } else {
            Topology::Undirected
        };
        Self::new(
            Template::Graph,
            request.element(),
            request.node_attrs(),
            request.edge_attrs(),
            topology,
        )
    }

    #[must_use]
    pub fn for_spatial_index(request: &SpatialIndexRequest) -> Self {
        Self::new(
            Template::SpatialIndex,
            request.item(),
            &request.item_attrs(),
            &request.point_attrs(),
            Topology::Dimensions(request.dims()),
        )
    }

    #[must_use]
    pub fn template(&self) -> Template {
        self.template
    }

    #[must_use]
    pub fn element(&self) -> ScalarKind {
        self.element
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Primary aggregate attributes, sorted by name.
    #[must_use]
    pub fn primary(&self) -> &[(String, TypeDescriptor)] {
        &self.primary
    }

    /// Secondary aggregate attributes, sorted by name.
    #[must_use]
    pub fn secondary(&self) -> &[(String, TypeDescriptor)] {
        &self.secondary
    }

    /// Stable textual form of the key.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Content hash of the canonical text.
    #[must_use]
    pub fn hash(&self) -> ContentHash {
        hash_str(&self.canonical())
    }
}

fn write_attrs(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    attrs: &[(String, TypeDescriptor)],
) -> fmt::Result {
    f.write_str(name)?;
    f.write_char('{')?;
    for (i, (attr, descriptor)) in attrs.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{attr}:{descriptor}")?;
    }
    f.write_char('}')
}

impl fmt::Display for SpecializationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (primary, secondary) = self.template.aggregate_names();
        write!(f, "{}<{};", self.template.name(), self.element)?;
        write_attrs(f, primary, &self.primary)?;
        f.write_char(';')?;
        write_attrs(f, secondary, &self.secondary)?;
        write!(f, ";{}>", self.topology)
    }
}

#[cfg(test)]
mod tests;

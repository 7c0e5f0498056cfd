//! Specialization requests as accepted from callers.

use std::num::NonZeroU32;

use sg_dtype::{AttributeSpec, DescriptorError, ScalarKind, TypeDescriptor};

/// A request for a graph specialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphRequest {
    element: TypeDescriptor,
    node_attrs: AttributeSpec,
    edge_attrs: AttributeSpec,
    directed: bool,
}

impl GraphRequest {
    /// A graph over node identifiers of type `element` with no attributes.
    ///
    /// # Errors
    ///
    /// Fails if `element` is not a valid scalar descriptor.
    pub fn new(element: &str, directed: bool) -> Result<Self, DescriptorError> {
        Ok(Self {
            element: TypeDescriptor::parse(element)?.expect_scalar("node identifier")?,
            node_attrs: AttributeSpec::new(),
            edge_attrs: AttributeSpec::new(),
            directed,
        })
    }

    /// Append a node attribute.
    ///
    /// # Errors
    ///
    /// Fails on an invalid descriptor or name, or a duplicate name.
    pub fn with_node_attr(mut self, name: &str, descriptor: &str) -> Result<Self, DescriptorError> {
        self.node_attrs.insert(name, TypeDescriptor::parse(descriptor)?)?;
        Ok(self)
    }

    /// Append an edge attribute.
    ///
    /// # Errors
    ///
    /// Fails on an invalid descriptor or name, or a duplicate name.
    pub fn with_edge_attr(mut self, name: &str, descriptor: &str) -> Result<Self, DescriptorError> {
        self.edge_attrs.insert(name, TypeDescriptor::parse(descriptor)?)?;
        Ok(self)
    }

    /// Replace both attribute specifications at once.
    #[must_use]
    pub fn with_attrs(mut self, node_attrs: AttributeSpec, edge_attrs: AttributeSpec) -> Self {
        self.node_attrs = node_attrs;
        self.edge_attrs = edge_attrs;
        self
    }

    #[must_use]
    pub fn element(&self) -> ScalarKind {
        self.element.base()
    }

    #[must_use]
    pub fn node_attrs(&self) -> &AttributeSpec {
        &self.node_attrs
    }

    #[must_use]
    pub fn edge_attrs(&self) -> &AttributeSpec {
        &self.edge_attrs
    }

    #[must_use]
    pub fn directed(&self) -> bool {
        self.directed
    }
}

/// Field of the spatial index item record.
pub const ITEM_FIELD: &str = "item";

/// Field of the spatial index point record.
pub const COORD_FIELD: &str = "coord";

/// A request for a spatial index specialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpatialIndexRequest {
    item: TypeDescriptor,
    coord: TypeDescriptor,
    dims: NonZeroU32,
}

impl SpatialIndexRequest {
    /// Items of type `item` located by `dims` coordinates of type `coord`.
    ///
    /// # Errors
    ///
    /// Fails if either descriptor is invalid or not a scalar, or if `dims`
    /// is zero.
    pub fn new(item: &str, coord: &str, dims: u32) -> Result<Self, DescriptorError> {
        let item = TypeDescriptor::parse(item)?.expect_scalar("item")?;
        let coord = TypeDescriptor::parse(coord)?.expect_scalar("coordinate")?;
        let dims = NonZeroU32::new(dims).ok_or_else(|| DescriptorError::Invalid {
            input: format!("{coord}[{dims}]"),
            reason: "dimensionality must be positive".to_string(),
        })?;
        Ok(Self { item, coord, dims })
    }

    #[must_use]
    pub fn item(&self) -> ScalarKind {
        self.item.base()
    }

    #[must_use]
    pub fn coord(&self) -> ScalarKind {
        self.coord.base()
    }

    #[must_use]
    pub fn dims(&self) -> NonZeroU32 {
        self.dims
    }

    /// The item aggregate: `{ item: I }`.
    #[must_use]
    pub fn item_attrs(&self) -> AttributeSpec {
        let mut attrs = AttributeSpec::new();
        // ITEM_FIELD is a valid, unreserved identifier
        let _ = attrs.insert(ITEM_FIELD, self.item);
        attrs
    }

    /// The point aggregate: `{ coord: C[dims] }`.
    #[must_use]
    pub fn point_attrs(&self) -> AttributeSpec {
        let mut attrs = AttributeSpec::new();
        if let Ok(point) = TypeDescriptor::array(self.coord.base(), self.dims.get()) {
            let _ = attrs.insert(COORD_FIELD, point);
        }
        attrs
    }
}

#[cfg(test)]
mod tests;

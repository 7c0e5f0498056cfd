//! The spatial index facade.
//!
//! Coordinates are passed as flat slices: one row of `dims` values per point
//! or box corner, row-major for batches. Items and coordinate rows are packed
//! into the specialization's item and point records on the way in, which
//! casts them to the specialization's kinds.

use std::sync::Arc;

use parking_lot::Mutex;
use sg_backend::{NativeTypeHandle, RecordType, SpatialIndexInstance};
use sg_codegen::{SpatialIndexRequest, COORD_FIELD, ITEM_FIELD};
use sg_dtype::{Column, Scalar, ScalarKind, Value};

use crate::error::{Error, Result};
use crate::specializer::Specializer;

/// A spatial index whose item and coordinate types were chosen at runtime.
pub struct SpatialIndex {
    handle: Arc<NativeTypeHandle>,
    inner: Arc<Mutex<Box<dyn SpatialIndexInstance>>>,
    dims: usize,
}

impl SpatialIndex {
    /// A new, empty index. Compiles the specialization unless `specializer`
    /// already holds it.
    ///
    /// # Errors
    ///
    /// Code generation or backend failures.
    pub fn new(specializer: &Specializer, request: &SpatialIndexRequest) -> Result<Self> {
        let handle = specializer.spatial_index_handle(request)?;
        let inner = handle.new_spatial_index().ok_or_else(|| {
            Error::Config(format!("`{}` is not a spatial index specialization", handle.key()))
        })?;
        Ok(Self {
            dims: inner.dims(),
            inner: Arc::new(Mutex::new(inner)),
            handle,
        })
    }

    /// A new index from descriptor strings, e.g.
    /// `SpatialIndex::from_descriptors(s, "uint64", "double", 3)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDescriptor`] for malformed or non-scalar descriptors
    /// and zero dimensions, and everything [`SpatialIndex::new`] reports.
    pub fn from_descriptors(
        specializer: &Specializer,
        item: &str,
        coord: &str,
        dims: u32,
    ) -> Result<Self> {
        Self::new(specializer, &SpatialIndexRequest::new(item, coord, dims)?)
    }

    /// Another facade over the same index.
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
            inner: Arc::clone(&self.inner),
            dims: self.dims,
        }
    }

    #[must_use]
    pub fn handle(&self) -> &Arc<NativeTypeHandle> {
        &self.handle
    }

    #[must_use]
    pub fn dims(&self) -> usize {
        self.dims
    }

    #[must_use]
    pub fn item_kind(&self) -> ScalarKind {
        self.handle.key().element()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// `coords` as `rows` point records' coordinates.
    fn points<C: Scalar>(&self, coords: &[C], rows: usize) -> Result<Column> {
        let expected = rows * self.dims;
        if coords.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: coords.len(),
            });
        }
        through_record(
            self.handle.secondary(),
            COORD_FIELD,
            coords.chunks(self.dims).map(Value::from),
        )
    }

    /// `items` as item records' items.
    fn items<I: Scalar>(&self, items: &[I]) -> Result<Column> {
        through_record(
            self.handle.primary(),
            ITEM_FIELD,
            items.iter().map(|&item| Value::Scalar(item.into_value())),
        )
    }

    // ---- insertion ----

    /// Insert one point item.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `point` does not have `dims` values.
    pub fn insert_point_item<I: Scalar, C: Scalar>(&mut self, item: I, point: &[C]) -> Result<()> {
        self.insert_point_items(&[item], point)
    }

    /// Insert point items, `points` holding one row per item.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`]; nothing is inserted then.
    pub fn insert_point_items<I: Scalar, C: Scalar>(
        &mut self,
        items: &[I],
        points: &[C],
    ) -> Result<()> {
        let points = self.points(points, items.len())?;
        let items = self.items(items)?;
        self.inner.lock().insert_points(&items, &points)?;
        Ok(())
    }

    /// Insert one box item.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if a corner does not have `dims` values.
    pub fn insert_bb_item<I: Scalar, C: Scalar>(
        &mut self,
        item: I,
        bb_min: &[C],
        bb_max: &[C],
    ) -> Result<()> {
        self.insert_bb_items(&[item], bb_min, bb_max)
    }

    /// Insert box items, `bb_mins` and `bb_maxs` holding one row per item.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`]; nothing is inserted then.
    pub fn insert_bb_items<I: Scalar, C: Scalar>(
        &mut self,
        items: &[I],
        bb_mins: &[C],
        bb_maxs: &[C],
    ) -> Result<()> {
        let mins = self.points(bb_mins, items.len())?;
        let maxs = self.points(bb_maxs, items.len())?;
        let items = self.items(items)?;
        self.inner.lock().insert_boxes(&items, &mins, &maxs)?;
        Ok(())
    }

    // ---- deletion ----

    /// Delete an item stored with exactly this extent. Without `bb_max` the
    /// item is taken to be a point at `bb_min`. Returns whether it was found.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`].
    pub fn delete_item<I: Scalar, C: Scalar>(
        &mut self,
        item: I,
        bb_min: &[C],
        bb_max: Option<&[C]>,
    ) -> Result<bool> {
        Ok(self.delete_items(&[item], bb_min, bb_max)? == 1)
    }

    /// Delete several items, one extent row each. Returns how many were found.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`]; nothing is deleted then.
    pub fn delete_items<I: Scalar, C: Scalar>(
        &mut self,
        items: &[I],
        bb_mins: &[C],
        bb_maxs: Option<&[C]>,
    ) -> Result<usize> {
        let mins = self.points(bb_mins, items.len())?;
        let maxs = bb_maxs.map(|m| self.points(m, items.len())).transpose()?;
        let items = self.items(items)?;
        let deleted = self.inner.lock().delete(&items, &mins, maxs.as_ref())?;
        Ok(deleted)
    }

    // ---- queries ----

    /// Number of items intersecting the inclusive box.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`].
    pub fn count<C: Scalar>(&self, bb_min: &[C], bb_max: &[C]) -> Result<usize> {
        let (min, max) = (self.points(bb_min, 1)?, self.points(bb_max, 1)?);
        Ok(self.inner.lock().count(&min, &max)?)
    }

    /// Items intersecting the inclusive box, as a column of the item kind.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`].
    pub fn search<C: Scalar>(&self, bb_min: &[C], bb_max: &[C]) -> Result<Column> {
        let (min, max) = (self.points(bb_min, 1)?, self.points(bb_max, 1)?);
        Ok(self.inner.lock().search(&min, &max)?)
    }

    /// The `k` items closest to `point`, closest first.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`].
    pub fn nearest<C: Scalar>(&self, point: &[C], k: usize) -> Result<Column> {
        Ok(self.nearest_with_distances(point, k)?.0)
    }

    /// Like [`SpatialIndex::nearest`], with the distance of each item's
    /// extent to `point`.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`].
    pub fn nearest_with_distances<C: Scalar>(
        &self,
        point: &[C],
        k: usize,
    ) -> Result<(Column, Vec<f64>)> {
        let point = self.points(point, 1)?;
        Ok(self.inner.lock().nearest(&point, k)?)
    }

    /// Smallest box enclosing every item, `None` when empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Column, Column)> {
        self.inner.lock().bounding_box()
    }
}

/// Build one `ty` record per value and read each back through the `field`
/// accessor, giving a column of the field's kind and shape.
fn through_record(
    ty: &RecordType,
    field: &str,
    values: impl ExactSizeIterator<Item = Value>,
) -> Result<Column> {
    let accessor = ty
        .accessors()
        .get(field)
        .ok_or_else(|| Error::UnknownAttribute {
            name: field.to_string(),
        })?;
    let mut column = Column::for_descriptor(&accessor.descriptor(), values.len());
    for value in values {
        let record = ty.construct(std::slice::from_ref(&value))?;
        // the accessor always yields the field's own shape
        let pushed = column.push(&accessor.get(&record));
        debug_assert!(pushed);
    }
    Ok(column)
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("key", &self.handle.key().canonical())
            .field("dims", &self.dims)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;

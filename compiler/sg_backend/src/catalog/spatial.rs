use std::borrow::Cow;
use std::marker::PhantomData;

use sg_collections::{Coordinate, RTree, Rejected};
use sg_dtype::{Column, Scalar, ScalarKind};

use super::SpatialIndexInstance;

struct SpatialImpl<I: Scalar, C> {
    tree: RTree<I::Bits, C>,
    item: PhantomData<I>,
}

pub(super) fn create<I, C>(dims: usize) -> Box<dyn SpatialIndexInstance>
where
    I: Scalar,
    C: Scalar + Coordinate,
{
    Box::new(SpatialImpl::<I, C> {
        tree: RTree::new(dims),
        item: PhantomData,
    })
}

impl<I: Scalar, C: Scalar + Coordinate> SpatialImpl<I, C> {
    /// `rows` coordinate rows of this tree's dimensionality, cast to `C`.
    fn coords<'a>(&self, column: &'a Column, rows: usize) -> Result<Cow<'a, [C]>, Rejected> {
        let flat = column.cast_slice::<C>();
        let expected = rows * self.tree.dims();
        if flat.len() == expected {
            Ok(flat)
        } else {
            Err(Rejected::DimensionMismatch {
                expected,
                found: flat.len(),
            })
        }
    }

    fn items(column: &Column) -> Vec<I::Bits> {
        column.cast_slice::<I>().iter().map(|i| i.to_bits()).collect()
    }

    fn item_column(items: impl IntoIterator<Item = I::Bits>) -> Column {
        Column::from_vec(items.into_iter().map(I::from_bits).collect::<Vec<I>>())
    }
}

impl<I: Scalar, C: Scalar + Coordinate> SpatialIndexInstance for SpatialImpl<I, C> {
    fn item(&self) -> ScalarKind {
        I::KIND
    }

    fn coord(&self) -> ScalarKind {
        C::KIND
    }

    fn dims(&self) -> usize {
        self.tree.dims()
    }

    fn len(&self) -> usize {
        self.tree.len()
    }

    fn insert_points(&mut self, items: &Column, points: &Column) -> Result<(), Rejected> {
        let items = Self::items(items);
        let points = self.coords(points, items.len())?;
        let dims = self.tree.dims();
        for (item, point) in items.into_iter().zip(points.chunks_exact(dims)) {
            self.tree.insert_point(item, point)?;
        }
        Ok(())
    }

    fn insert_boxes(
        &mut self,
        items: &Column,
        mins: &Column,
        maxs: &Column,
    ) -> Result<(), Rejected> {
        let items = Self::items(items);
        let mins = self.coords(mins, items.len())?;
        let maxs = self.coords(maxs, items.len())?;
        let dims = self.tree.dims();
        for ((item, min), max) in items
            .into_iter()
            .zip(mins.chunks_exact(dims))
            .zip(maxs.chunks_exact(dims))
        {
            self.tree.insert_box(item, min, max)?;
        }
        Ok(())
    }

    fn delete(
        &mut self,
        items: &Column,
        mins: &Column,
        maxs: Option<&Column>,
    ) -> Result<usize, Rejected> {
        let items = Self::items(items);
        let mins = self.coords(mins, items.len())?;
        let maxs = maxs.map(|m| self.coords(m, items.len())).transpose()?;
        let dims = self.tree.dims();
        let mut deleted = 0;
        for (row, (item, min)) in items.into_iter().zip(mins.chunks_exact(dims)).enumerate() {
            let max = maxs.as_deref().map(|m| &m[row * dims..(row + 1) * dims]);
            if self.tree.delete(item, min, max)? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    fn count(&self, min: &Column, max: &Column) -> Result<usize, Rejected> {
        self.tree.count(&self.coords(min, 1)?, &self.coords(max, 1)?)
    }

    fn search(&self, min: &Column, max: &Column) -> Result<Column, Rejected> {
        let found = self.tree.search(&self.coords(min, 1)?, &self.coords(max, 1)?)?;
        Ok(Self::item_column(found))
    }

    fn nearest(&self, point: &Column, k: usize) -> Result<(Column, Vec<f64>), Rejected> {
        let found = self.tree.nearest(&self.coords(point, 1)?, k)?;
        let (items, distances): (Vec<_>, Vec<_>) = found.into_iter().unzip();
        Ok((Self::item_column(items), distances))
    }

    fn bounding_box(&self) -> Option<(Column, Column)> {
        self.tree
            .bounding_box()
            .map(|(min, max)| (Column::from_vec(min), Column::from_vec(max)))
    }
}

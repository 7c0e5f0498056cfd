use std::sync::Arc;

use pretty_assertions::assert_eq;
use sg_backend::{JitBackend, Namespace};
use sg_dtype::{Column, ScalarKind};

use super::*;

fn index(specializer: &Specializer) -> SpatialIndex {
    SpatialIndex::from_descriptors(specializer, "uint64", "double", 3).unwrap()
}

fn specializer() -> Specializer {
    Specializer::with_backend(JitBackend::new(Arc::new(Namespace::new())))
}

#[test]
fn test_point_search() {
    let s = specializer();
    let mut index = index(&s);
    index.insert_point_item(5u64, &[1.0f64, 2.0, 3.0]).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.item_kind(), ScalarKind::Uint64);
    let found = index.search(&[0.0f64, 0.0, 0.0], &[2.0, 2.0, 3.0]).unwrap();
    assert_eq!(found, Column::from_vec(vec![5u64]));
    let none = index.search(&[10.0f64; 3], &[20.0f64; 3]).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_batches_and_casting() {
    let s = specializer();
    let mut index = index(&s);
    index
        .insert_point_items(&[1u32, 2, 3], &[0i32, 0, 0, 1, 1, 1, 5, 5, 5])
        .unwrap();
    index
        .insert_bb_items(&[4u64], &[2.0f32, 2.0, 2.0], &[3.0f32, 3.0, 3.0])
        .unwrap();

    assert_eq!(index.len(), 4);
    assert_eq!(index.count(&[0.0f64; 3], &[2.0f64; 3]).unwrap(), 3);
    let (min, max) = index.bounding_box().unwrap();
    assert_eq!(min, Column::from_vec(vec![0.0f64; 3]));
    assert_eq!(max, Column::from_vec(vec![5.0f64; 3]));
}

#[test]
fn test_wrong_dimensionality() {
    let s = specializer();
    let mut index = index(&s);
    let err = index.insert_point_item(1u64, &[1.0f64, 2.0]).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 3, found: 2 }));

    let err = index
        .insert_point_items(&[1u64, 2], &[0.0f64, 0.0, 0.0])
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 6, found: 3 }));
    assert!(index.is_empty());
}

#[test]
fn test_nearest() {
    let s = specializer();
    let mut index = index(&s);
    index
        .insert_point_items(&[1u64, 2, 3], &[0.0f64, 0.0, 0.0, 3.0, 4.0, 0.0, 10.0, 0.0, 0.0])
        .unwrap();

    let (items, distances) = index.nearest_with_distances(&[0.0f64; 3], 2).unwrap();
    assert_eq!(items, Column::from_vec(vec![1u64, 2]));
    assert_eq!(distances, vec![0.0, 5.0]);
    assert_eq!(index.nearest(&[9.0f64, 0.0, 0.0], 1).unwrap(), Column::from_vec(vec![3u64]));
}

#[test]
fn test_delete_needs_exact_extent() {
    let s = specializer();
    let mut index = index(&s);
    index.insert_point_item(1u64, &[1.0f64, 1.0, 1.0]).unwrap();
    index
        .insert_bb_item(2u64, &[0.0f64; 3], &[2.0f64; 3])
        .unwrap();

    assert!(!index.delete_item(1u64, &[0.0f64; 3], None).unwrap());
    assert!(!index.delete_item(2u64, &[0.0f64; 3], Some(&[1.0f64; 3][..])).unwrap());
    assert!(index.delete_item(1u64, &[1.0f64; 3], None).unwrap());
    assert_eq!(
        index
            .delete_items(&[2u64], &[0.0f64; 3], Some(&[2.0f64; 3][..]))
            .unwrap(),
        1
    );
    assert!(index.is_empty());
    assert!(index.bounding_box().is_none());
}

#[test]
fn test_share_and_independence() {
    let s = specializer();
    let mut first = index(&s);
    let view = first.share();
    let second = index(&s);
    first.insert_point_item(1u64, &[0.0f64; 3]).unwrap();

    assert_eq!(view.len(), 1);
    assert_eq!(second.len(), 0);
    assert_eq!(s.compilations(), 1);
}

#[test]
fn test_rows_are_packed_through_item_and_point_records() {
    let s = specializer();
    let mut index = SpatialIndex::from_descriptors(&s, "uint16", "float", 2).unwrap();
    let handle = Arc::clone(index.handle());
    assert_eq!(handle.primary().accessors().names().collect::<Vec<_>>(), ["item"]);
    assert_eq!(handle.secondary().accessors().names().collect::<Vec<_>>(), ["coord"]);
    assert_eq!(handle.primary().layout().size(), 2);
    assert_eq!(handle.secondary().layout().size(), 8);

    let points = index.points(&[1.5f64, 2.5, 3.0, 4.0], 2).unwrap();
    assert_eq!(points, Column::from_rows(vec![1.5f32, 2.5, 3.0, 4.0], 2));
    let items = index.items(&[7u64, 9]).unwrap();
    assert_eq!(items, Column::from_vec(vec![7u16, 9]));

    index
        .insert_point_items(&[7u64, 9], &[1.5f64, 2.5, 3.0, 4.0])
        .unwrap();
    let (min, max) = index.bounding_box().unwrap();
    assert_eq!(min.kind(), ScalarKind::Float);
    assert_eq!(min.to_vec::<f32>(), Some(vec![1.5, 2.5]));
    assert_eq!(max.to_vec::<f32>(), Some(vec![3.0, 4.0]));
    let nearest = index.nearest(&[3.0f32, 4.0], 1).unwrap();
    assert_eq!(nearest, Column::from_vec(vec![9u16]));
}

use pretty_assertions::assert_eq;

use super::*;

fn empty() -> Record {
    Record::zeroed(1)
}

#[test]
fn test_undirected_graph_instance() {
    let mut g = graph_factory(ScalarKind::Uint64, false)();
    assert!(!g.is_directed());
    assert_eq!(g.element(), ScalarKind::Uint64);
    for n in [1u64, 2, 3] {
        g.add_node(ScalarValue::from(n), empty()).unwrap();
    }
    g.add_edge(ScalarValue::from(1u64), ScalarValue::from(2u64), empty())
        .unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(
        g.count_neighbors(ScalarValue::from(1u64), NeighborQuery::All),
        NeighborCount::Count(1)
    );
    assert_eq!(
        g.count_neighbors(ScalarValue::from(3u64), NeighborQuery::All),
        NeighborCount::Count(0)
    );
    assert_eq!(
        g.count_neighbors(ScalarValue::from(9u64), NeighborQuery::All),
        NeighborCount::MissingNode
    );
    assert_eq!(
        g.count_neighbors(ScalarValue::from(1u64), NeighborQuery::In),
        NeighborCount::WrongTopology
    );
}

#[test]
fn test_directed_graph_instance() {
    let mut g = graph_factory(ScalarKind::Int32, true)();
    g.add_node(ScalarValue::from(1i32), empty()).unwrap();
    g.add_node(ScalarValue::from(2i32), empty()).unwrap();
    g.add_edge(ScalarValue::from(1i32), ScalarValue::from(2i32), empty())
        .unwrap();
    assert_eq!(
        g.count_neighbors(ScalarValue::from(2i32), NeighborQuery::In),
        NeighborCount::Count(1)
    );
    assert_eq!(
        g.count_neighbors(ScalarValue::from(2i32), NeighborQuery::Out),
        NeighborCount::Count(0)
    );
    assert_eq!(
        g.count_neighbors(ScalarValue::from(2i32), NeighborQuery::All),
        NeighborCount::WrongTopology
    );
}

#[test]
fn test_identifiers_are_cast() {
    let mut g = graph_factory(ScalarKind::Int16, false)();
    g.add_node(ScalarValue::from(7u64), empty()).unwrap();
    assert!(g.contains_node(ScalarValue::from(7i16)));
    assert!(g.contains_node(ScalarValue::from(7.0f64)));
    assert_eq!(
        g.add_node(ScalarValue::from(7i32), empty()),
        Err(Rejected::DuplicateNode)
    );
}

#[test]
fn test_nodes_and_edges_columns() {
    let mut g = graph_factory(ScalarKind::Float, true)();
    for n in [0.5f32, 1.5, 2.5] {
        g.add_node(ScalarValue::from(n), empty()).unwrap();
    }
    g.add_edge(ScalarValue::from(2.5f32), ScalarValue::from(0.5f32), empty())
        .unwrap();
    assert_eq!(g.nodes().to_vec::<f32>(), Some(vec![0.5, 1.5, 2.5]));
    let (sources, targets) = g.edges();
    assert_eq!(sources.to_vec::<f32>(), Some(vec![2.5]));
    assert_eq!(targets.to_vec::<f32>(), Some(vec![0.5]));
}

#[test]
fn test_instances_are_independent() {
    let factory = graph_factory(ScalarKind::Uint8, false);
    let mut a = factory();
    let b = factory();
    a.add_node(ScalarValue::from(1u8), empty()).unwrap();
    assert_eq!(a.node_count(), 1);
    assert_eq!(b.node_count(), 0);
}

#[test]
fn test_spatial_index_instance() {
    let mut index = spatial_index_factory(ScalarKind::Uint64, ScalarKind::Double)(3);
    assert_eq!(index.item(), ScalarKind::Uint64);
    assert_eq!(index.coord(), ScalarKind::Double);
    assert_eq!(index.dims(), 3);
    assert!(index.is_empty());

    index
        .insert_points(
            &Column::from_vec(vec![5u64]),
            &Column::from_vec(vec![1.0f64, 2.0, 3.0]),
        )
        .unwrap();
    let lo = Column::from_vec(vec![0.0f64, 0.0, 0.0]);
    let hi = Column::from_vec(vec![2.0f64, 2.0, 3.0]);
    assert_eq!(index.search(&lo, &hi).unwrap().to_vec::<u64>(), Some(vec![5]));
    assert_eq!(index.count(&lo, &hi), Ok(1));

    let far_lo = Column::from_vec(vec![10.0f64, 10.0, 10.0]);
    let far_hi = Column::from_vec(vec![20.0f64, 20.0, 20.0]);
    assert_eq!(index.count(&far_lo, &far_hi), Ok(0));
}

#[test]
fn test_spatial_columns_are_cast() {
    let mut index = spatial_index_factory(ScalarKind::Uint32, ScalarKind::Float)(2);
    index
        .insert_points(
            &Column::from_vec(vec![1i64, 2]),
            &Column::from_vec(vec![0i32, 0, 3, 4]),
        )
        .unwrap();
    let (items, distances) = index
        .nearest(&Column::from_vec(vec![0.0f64, 0.0]), 2)
        .unwrap();
    assert_eq!(items.to_vec::<u32>(), Some(vec![1, 2]));
    assert_eq!(distances, vec![0.0, 5.0]);
    let (min, max) = index.bounding_box().unwrap();
    assert_eq!(min.to_vec::<f32>(), Some(vec![0.0, 0.0]));
    assert_eq!(max.to_vec::<f32>(), Some(vec![3.0, 4.0]));
}

#[test]
fn test_spatial_batches_are_validated_first() {
    let mut index = spatial_index_factory(ScalarKind::Uint64, ScalarKind::Int32)(2);
    let err = index.insert_points(
        &Column::from_vec(vec![1u64, 2]),
        &Column::from_vec(vec![0i32, 0, 1]),
    );
    assert_eq!(
        err,
        Err(Rejected::DimensionMismatch {
            expected: 4,
            found: 3
        })
    );
    assert!(index.is_empty());
}

#[test]
fn test_spatial_delete() {
    let mut index = spatial_index_factory(ScalarKind::Uint64, ScalarKind::Int32)(2);
    index
        .insert_boxes(
            &Column::from_vec(vec![1u64, 2]),
            &Column::from_vec(vec![0i32, 0, 5, 5]),
            &Column::from_vec(vec![1i32, 1, 6, 6]),
        )
        .unwrap();
    index
        .insert_points(&Column::from_vec(vec![3u64]), &Column::from_vec(vec![9i32, 9]))
        .unwrap();
    assert_eq!(index.len(), 3);

    let deleted = index.delete(
        &Column::from_vec(vec![1u64, 2]),
        &Column::from_vec(vec![0i32, 0, 5, 5]),
        Some(&Column::from_vec(vec![1i32, 1, 7, 7])),
    );
    assert_eq!(deleted, Ok(1));
    let deleted = index.delete(
        &Column::from_vec(vec![3u64]),
        &Column::from_vec(vec![9i32, 9]),
        None,
    );
    assert_eq!(deleted, Ok(1));
    assert_eq!(index.len(), 1);
}

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_graph_request_builder() {
    let request = GraphRequest::new("uint", true)
        .and_then(|r| r.with_edge_attr("score", "float32"))
        .and_then(|r| r.with_node_attr("position", "double[3]"))
        .unwrap();
    assert_eq!(request.element(), ScalarKind::Uint64);
    assert!(request.directed());
    assert_eq!(request.node_attrs().len(), 1);
    assert_eq!(
        request.edge_attrs().get("score"),
        Some(TypeDescriptor::scalar(ScalarKind::Float))
    );
}

#[test]
fn test_graph_element_must_be_scalar() {
    let err = GraphRequest::new("uint64[2]", false).unwrap_err();
    assert!(matches!(err, DescriptorError::ExpectedScalar { .. }));
    assert!(matches!(
        GraphRequest::new("uint65", false),
        Err(DescriptorError::Invalid { .. })
    ));
}

#[test]
fn test_graph_rejects_duplicate_attribute() {
    let err = GraphRequest::new("int32", false)
        .and_then(|r| r.with_node_attr("a", "float"))
        .and_then(|r| r.with_node_attr("a", "double"))
        .unwrap_err();
    assert_eq!(err, DescriptorError::DuplicateAttribute { name: "a".into() });
}

#[test]
fn test_spatial_request_aggregates() {
    let request = SpatialIndexRequest::new("uint64", "double", 3).unwrap();
    assert_eq!(request.item(), ScalarKind::Uint64);
    assert_eq!(request.coord(), ScalarKind::Double);
    assert_eq!(request.dims().get(), 3);
    assert_eq!(
        request.item_attrs().get("item"),
        Some(TypeDescriptor::scalar(ScalarKind::Uint64))
    );
    assert_eq!(
        request.point_attrs().get("coord"),
        Some(TypeDescriptor::parse("double[3]").unwrap())
    );
}

#[test]
fn test_spatial_request_validation() {
    assert!(SpatialIndexRequest::new("uint64", "double", 0).is_err());
    assert!(matches!(
        SpatialIndexRequest::new("uint64", "double[2]", 2),
        Err(DescriptorError::ExpectedScalar { role: "coordinate", .. })
    ));
    assert!(matches!(
        SpatialIndexRequest::new("uint64[2]", "double", 2),
        Err(DescriptorError::ExpectedScalar { role: "item", .. })
    ));
}

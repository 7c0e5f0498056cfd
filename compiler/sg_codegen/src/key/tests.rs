use pretty_assertions::assert_eq;

use super::*;

fn graph(node: &[(&str, &str)], edge: &[(&str, &str)], directed: bool) -> SpecializationKey {
    let request = GraphRequest::new("uint64", directed).unwrap().with_attrs(
        AttributeSpec::parse(node.iter().copied()).unwrap(),
        AttributeSpec::parse(edge.iter().copied()).unwrap(),
    );
    SpecializationKey::for_graph(&request)
}

#[test]
fn test_canonical_graph_text() {
    let key = graph(&[], &[("score", "float")], true);
    assert_eq!(key.canonical(), "graph<uint64;node{};edge{score:float};directed>");
}

#[test]
fn test_canonical_spatial_text() {
    let request = SpatialIndexRequest::new("uint", "float64", 3).unwrap();
    let key = SpecializationKey::for_spatial_index(&request);
    assert_eq!(
        key.canonical(),
        "spatial<uint64;item{item:uint64};point{coord:double[3]};dims=3>"
    );
    assert_eq!(key.template(), Template::SpatialIndex);
}

#[test]
fn test_attribute_order_does_not_matter() {
    let a = graph(
        &[("x", "float"), ("pos", "double[3]")],
        &[("w", "int8"), ("c", "uint8")],
        false,
    );
    let b = graph(
        &[("pos", "double[3]"), ("x", "float32")],
        &[("c", "uint8"), ("w", "int8")],
        false,
    );
    assert_eq!(a, b);
    assert_eq!(a.hash(), b.hash());
    assert_eq!(
        a.canonical(),
        "graph<uint64;node{pos:double[3],x:float};edge{c:uint8,w:int8};undirected>"
    );
}

#[test]
fn test_any_difference_changes_the_key() {
    let base = graph(&[("x", "float")], &[], false);
    let variants = [
        graph(&[("x", "double")], &[], false),
        graph(&[("x", "float[2]")], &[], false),
        graph(&[("y", "float")], &[], false),
        graph(&[], &[("x", "float")], false),
        graph(&[("x", "float")], &[], true),
    ];
    for variant in &variants {
        assert_ne!(&base, variant);
        assert_ne!(base.hash(), variant.hash(), "{variant}");
    }
}

#[test]
fn test_element_type_changes_the_key() {
    let a = SpecializationKey::for_graph(&GraphRequest::new("uint64", false).unwrap());
    let b = SpecializationKey::for_graph(&GraphRequest::new("int64", false).unwrap());
    assert_ne!(a, b);
}

#[test]
fn test_dimensionality_changes_the_key() {
    let a = SpatialIndexRequest::new("uint64", "double", 2).unwrap();
    let b = SpatialIndexRequest::new("uint64", "double", 3).unwrap();
    assert_ne!(
        SpecializationKey::for_spatial_index(&a),
        SpecializationKey::for_spatial_index(&b)
    );
}

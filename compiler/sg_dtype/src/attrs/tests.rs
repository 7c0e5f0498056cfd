use pretty_assertions::assert_eq;

use super::*;
use crate::ScalarKind;

#[test]
fn test_preserves_insertion_order() {
    let spec = AttributeSpec::parse([("z", "float"), ("a", "double[3]"), ("m", "int")]).unwrap();
    let names: Vec<_> = spec.iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["z", "a", "m"]);
    assert_eq!(spec.position("a"), Some(1));
    assert_eq!(spec.get("m"), Some(TypeDescriptor::scalar(ScalarKind::Int64)));
}

#[test]
fn test_sorted_view_is_order_independent() {
    let a = AttributeSpec::parse([("score", "float"), ("position", "double[3]")]).unwrap();
    let b = AttributeSpec::parse([("position", "double[3]"), ("score", "float32")]).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.sorted(), b.sorted());
}

#[test]
fn test_rejects_duplicates() {
    let err = AttributeSpec::parse([("score", "float"), ("score", "double")]).unwrap_err();
    assert_eq!(
        err,
        DescriptorError::DuplicateAttribute {
            name: "score".into()
        }
    );
}

#[test]
fn test_rejects_bad_names() {
    for name in ["", "1abc", "_x", "a-b", "has space", "int", "struct", "args"] {
        let err = AttributeSpec::new()
            .with(name, TypeDescriptor::scalar(ScalarKind::Float))
            .unwrap_err();
        assert!(
            matches!(err, DescriptorError::InvalidAttributeName { .. }),
            "{name:?} should be rejected"
        );
    }
    assert!(is_valid_attribute_name("node_attr_float"));
    assert!(is_valid_attribute_name("x1"));
}

#[test]
fn test_rejects_standard_library_names() {
    for name in ["uint64_t", "size_t", "NULL", "INT8_MAX", "UINT64_MIN", "EOF", "errno"] {
        assert!(!is_valid_attribute_name(name), "{name:?} should be rejected");
        let err = AttributeSpec::parse([(name, "float")]).unwrap_err();
        assert_eq!(err, DescriptorError::InvalidAttributeName { name: name.into() });
    }
    assert!(is_valid_attribute_name("weight_total"));
    assert!(is_valid_attribute_name("X"));
    assert!(is_valid_attribute_name("maxSpeed"));
}

#[test]
fn test_invalid_descriptor_propagates() {
    let err = AttributeSpec::parse([("score", "notatype")]).unwrap_err();
    assert!(matches!(err, DescriptorError::Invalid { .. }));
}

#[test]
fn test_empty_spec() {
    let spec = AttributeSpec::new();
    assert!(spec.is_empty());
    assert_eq!(spec.len(), 0);
    assert!(spec.sorted().is_empty());
}

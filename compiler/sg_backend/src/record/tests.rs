use pretty_assertions::assert_eq;
use sg_dtype::AttributeSpec;

use super::*;

fn record_type(pairs: &[(&str, &str)]) -> RecordType {
    let spec = RecordSpec::generate(&AttributeSpec::parse(pairs.iter().copied()).unwrap()).unwrap();
    RecordType::interpreted("Edge", spec)
}

#[test]
fn test_default_record_is_zeroed() {
    let ty = record_type(&[("score", "float"), ("position", "int64[2]")]);
    let record = ty.default_record();
    assert_eq!(record.len(), 24);
    assert!(record.as_bytes().iter().all(|b| *b == 0));
    assert!(!ty.is_native());
    assert_eq!(ty.name(), "Edge");
}

#[test]
fn test_construct_in_field_order() {
    let ty = record_type(&[("score", "float"), ("position", "int64[2]")]);
    let record = ty
        .construct(&[Value::from(0.5f64), Value::from([7i32, -1])])
        .unwrap();
    let score = ty.accessors().get("score").unwrap();
    let position = ty.accessors().get("position").unwrap();
    assert_eq!(score.get(&record), Value::from(0.5f32));
    assert_eq!(position.get(&record), Value::from([7i64, -1]));
}

#[test]
fn test_construct_rejects_wrong_shape() {
    let ty = record_type(&[("position", "double[3]")]);
    let err = ty.construct(&[Value::from(1.0f64)]).unwrap_err();
    assert_eq!(err.name, "position");
}

#[test]
fn test_empty_record() {
    let ty = record_type(&[]);
    let record = ty.construct(&[]).unwrap();
    assert_eq!(record, ty.default_record());
    assert_eq!(record.len(), 1);
    assert!(!record.is_empty());
}

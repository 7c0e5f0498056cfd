use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_zero_values_follow_the_descriptor() {
    let score = TypeDescriptor::parse("float").unwrap();
    let pos = TypeDescriptor::parse("double[3]").unwrap();
    assert_eq!(Value::zero(&score), Value::from(0.0f32));
    assert_eq!(Value::zero(&pos), Value::from([0.0f64; 3]));
}

#[test]
fn test_shape_checks() {
    let pos = TypeDescriptor::parse("double[3]").unwrap();
    assert!(Value::from([1.0f64, 2.0, 3.0]).fits(&pos));
    assert!(!Value::from([1.0f64, 2.0]).fits(&pos));
    assert!(!Value::from(1.0f64).fits(&pos));
    assert_eq!(Value::from(7u64).as_scalar(), Some(ScalarValue::Uint64(7)));
    assert_eq!(Value::from(vec![1i32, 2]).array_len(), Some(2));
}

#[test]
fn test_cast_applies_to_every_element() {
    let v = Value::from([1.9f64, -2.5]).cast(ScalarKind::Int32);
    assert_eq!(v, Value::from([1i32, -2]));
}

#[test]
fn test_scalar_column_roundtrip() {
    let col = Column::from_vec(vec![3u64, 1, 2]);
    assert_eq!(col.kind(), ScalarKind::Uint64);
    assert_eq!(col.width(), None);
    assert_eq!(col.len(), 3);
    assert_eq!(col.as_slice::<u64>(), Some(&[3u64, 1, 2][..]));
    assert_eq!(col.as_slice::<i64>(), None);
    assert_eq!(col.row(1), Some(Value::from(1u64)));
    assert_eq!(col.row(3), None);
}

#[test]
fn test_array_column_rows() {
    let col = Column::from_rows(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
    assert_eq!(col.len(), 2);
    assert_eq!(col.row(1), Some(Value::from([4.0f64, 5.0, 6.0])));
    let rows: Vec<_> = col.rows().collect();
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_push_casts_and_checks_shape() {
    let pos = TypeDescriptor::parse("float[2]").unwrap();
    let mut col = Column::for_descriptor(&pos, 2);
    assert!(col.is_empty());
    assert!(col.push(&Value::from([1.5f64, 2.5])));
    assert!(!col.push(&Value::from(1.0f32)));
    assert!(!col.push(&Value::from([1.0f32, 2.0, 3.0])));
    assert_eq!(col.len(), 1);
    assert_eq!(col.to_vec::<f32>(), Some(vec![1.5f32, 2.5]));
}

#[test]
#[should_panic(expected = "ragged column")]
fn test_ragged_rows_panic() {
    let _ = Column::from_rows(vec![1u8, 2, 3], 2);
}

#[test]
fn test_column_data_get_and_push() {
    let mut data = ColumnData::with_capacity(ScalarKind::Int8, 4);
    data.push(ScalarValue::Int32(300));
    data.push(ScalarValue::Double(-1.0));
    assert_eq!(data.len(), 2);
    assert_eq!(data.get(0), Some(ScalarValue::Int8(44)));
    assert_eq!(data.get(1), Some(ScalarValue::Int8(-1)));
    assert_eq!(data.get(2), None);
}

#[test]
fn test_cast_slice_borrows_or_converts() {
    let col = Column::from_vec(vec![1.5f64, -2.0]);
    assert!(matches!(col.cast_slice::<f64>(), Cow::Borrowed(_)));
    let ints = col.cast_slice::<i32>();
    assert!(matches!(ints, Cow::Owned(_)));
    assert_eq!(&*ints, &[1, -2]);
}

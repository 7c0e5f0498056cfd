use pretty_assertions::assert_eq;

use super::*;

fn layout(descriptors: &[&str]) -> RecordLayout {
    RecordLayout::compute(descriptors.iter().map(|d| TypeDescriptor::parse(d).unwrap()))
}

#[test]
fn test_align_to() {
    assert_eq!(align_to(0, 8), 0);
    assert_eq!(align_to(1, 8), 8);
    assert_eq!(align_to(8, 8), 8);
    assert_eq!(align_to(5, 2), 6);
    assert_eq!(align_to(5, 1), 5);
}

#[test]
fn test_empty_record_occupies_one_byte() {
    let l = layout(&[]);
    assert_eq!(l.size(), 1);
    assert_eq!(l.align(), 1);
    assert!(l.offsets().is_empty());
}

#[test]
fn test_padding_between_fields() {
    // int8 at 0, double at 8, float at 16, tail padded to 24
    let l = layout(&["int8", "double", "float"]);
    assert_eq!(l.offsets(), &[0, 8, 16]);
    assert_eq!(l.align(), 8);
    assert_eq!(l.size(), 24);
}

#[test]
fn test_arrays_align_to_their_element() {
    let l = layout(&["float", "double[3]", "uint8[3]"]);
    assert_eq!(l.offsets(), &[0, 8, 32]);
    assert_eq!(l.size(), 40);
}

#[test]
fn test_small_record() {
    let l = layout(&["uint8", "int16"]);
    assert_eq!(l.offsets(), &[0, 2]);
    assert_eq!(l.size(), 4);
    assert_eq!(l.align(), 2);
    assert_eq!(l.to_words(), vec![4, 2, 0, 2]);
}

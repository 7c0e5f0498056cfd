use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn parse(s: &str) -> TypeDescriptor {
    TypeDescriptor::parse(s).unwrap_or_else(|e| panic!("{s:?} should parse: {e}"))
}

#[test]
fn test_aliases_are_equivalent() {
    assert_eq!(parse("int"), parse("int64"));
    assert_eq!(parse("uint"), parse("uint64"));
    assert_eq!(parse("float32"), parse("float"));
    assert_eq!(parse("float64"), parse("double"));
    assert_eq!(parse("float64[2]"), parse("double[2]"));
}

#[test]
fn test_array_descriptor() {
    let d = parse("double[3]");
    assert!(d.is_array());
    assert_eq!(d.element_count(), Some(3));
    assert_eq!(d.shape(), vec![3]);
    assert_eq!(d.base(), ScalarKind::Double);
    assert_eq!(d.size(), 24);
    assert_eq!(d.canonical(), "double[3]");
}

#[test]
fn test_scalar_descriptor() {
    let d = parse("uint");
    assert!(!d.is_array());
    assert_eq!(d.element_count(), None);
    assert_eq!(d.shape(), Vec::<usize>::new());
    assert_eq!(d.canonical(), "uint64");
    assert_eq!(d.native_name(), "uint64_t");
}

#[test]
fn test_rejects_invalid_descriptors() {
    for input in [
        "double[0]",
        "int32[abc]",
        "notatype",
        "",
        "[3]",
        "double[",
        "double[3",
        "double[]",
        "double[-1]",
        "double[+1]",
        "double[3][4]",
        " double",
        "double ",
        "double[ 3]",
        "int32[99999999999]",
        "Float",
    ] {
        assert!(
            matches!(TypeDescriptor::parse(input), Err(DescriptorError::Invalid { .. })),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn test_error_names_the_input() {
    let err = TypeDescriptor::parse("int32[abc]").unwrap_err();
    assert!(err.to_string().contains("int32[abc]"));
}

#[test]
fn test_zero_length_array_constructor_fails() {
    assert!(TypeDescriptor::array(ScalarKind::Int8, 0).is_err());
    assert_eq!(TypeDescriptor::array(ScalarKind::Int8, 2).unwrap(), parse("int8[2]"));
}

#[test]
fn test_declarations() {
    let score = parse("float");
    let pos = parse("double[3]");

    assert_eq!(score.field_decl("score"), "float score");
    assert_eq!(pos.field_decl("position"), "double position[3]");

    assert_eq!(score.decl("score", DeclFlavor::VIEW), "float score");
    assert_eq!(pos.decl("position", DeclFlavor::VIEW), "std::span<const double> position");

    assert_eq!(score.decl("score", DeclFlavor::BATCH), "std::span<const float> score");
    assert_eq!(
        pos.decl("position", DeclFlavor::BATCH),
        "std::span<const double[3]> position"
    );
    let both = DeclFlavor {
        unsized_view: true,
        append_leading_dim: true,
    };
    assert_eq!(pos.decl("position", both), "std::span<const double[3]> position");
}

#[test]
fn test_rvalues() {
    let score = parse("float");
    let pos = parse("double[3]");

    assert_eq!(score.rvalue("score", None), RValue::Scalar("score".into()));
    assert_eq!(score.rvalue("score", Some("i")), RValue::Scalar("score[i]".into()));
    assert_eq!(
        pos.rvalue("p", None),
        RValue::Elements(vec!["p[0]".into(), "p[1]".into(), "p[2]".into()])
    );
    assert_eq!(
        pos.rvalue("p", Some("i")),
        RValue::Elements(vec!["p[i, 0]".into(), "p[i, 1]".into(), "p[i, 2]".into()])
    );
    assert_eq!(pos.rvalue("p", None).to_string(), "{p[0], p[1], p[2]}");
}

#[test]
fn test_expect_scalar() {
    assert!(parse("uint64").expect_scalar("element").is_ok());
    let err = parse("uint64[2]").expect_scalar("element").unwrap_err();
    assert_eq!(
        err,
        DescriptorError::ExpectedScalar {
            role: "element",
            descriptor: parse("uint64[2]"),
        }
    );
}

fn descriptor_strings() -> impl Strategy<Value = String> {
    let bases = prop::sample::select(vec![
        "float", "double", "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32",
        "uint64", "int", "uint", "float32", "float64",
    ]);
    (bases, prop::option::of(1u32..10_000)).prop_map(|(base, count)| match count {
        Some(n) => format!("{base}[{n}]"),
        None => base.to_string(),
    })
}

proptest! {
    #[test]
    fn test_canonicalization_is_idempotent(s in descriptor_strings()) {
        let once = TypeDescriptor::parse(&s).unwrap().canonical();
        let twice = TypeDescriptor::parse(&once).unwrap().canonical();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_reparse_yields_equal_descriptor(s in descriptor_strings()) {
        let d = TypeDescriptor::parse(&s).unwrap();
        prop_assert_eq!(TypeDescriptor::parse(&d.canonical()).unwrap(), d);
    }
}

use pretty_assertions::assert_eq;

use super::*;

fn attrs(pairs: &[(&str, &str)]) -> AttributeSpec {
    AttributeSpec::parse(pairs.iter().copied()).unwrap()
}

#[test]
fn test_fields_follow_insertion_order() {
    let record = RecordSpec::generate(&attrs(&[("score", "float"), ("position", "double[3]")])).unwrap();
    let names: Vec<_> = record.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["score", "position"]);
    assert_eq!(record.position("position"), Some(1));
    assert_eq!(record.layout().offsets(), &[0, 8]);
    assert_eq!(record.layout().size(), 32);
}

#[test]
fn test_render_value_constructor() {
    let record = RecordSpec::generate(&attrs(&[("score", "float"), ("position", "double[3]")])).unwrap();
    let expected = "\
struct Edge {
    float score;
    double position[3];

    Edge() : score{}, position{} {}
    Edge(float _score, std::span<const double> _position)
        : score{_score}, position{_position[0], _position[1], _position[2]} {}
};
";
    assert_eq!(record.render("Edge"), expected);
}

#[test]
fn test_parameter_order_is_insertion_order() {
    let record = RecordSpec::generate(&attrs(&[("b", "int8"), ("a", "uint16")])).unwrap();
    let text = record.render("R");
    assert!(text.contains("R(int8_t _b, uint16_t _a)"), "{text}");
}

#[test]
fn test_empty_record_has_only_default_constructor() {
    let record = RecordSpec::generate(&AttributeSpec::new()).unwrap();
    assert!(record.is_empty());
    assert_eq!(record.layout().size(), 1);
    assert_eq!(record.render("Node"), "struct Node {\n    Node() {}\n};\n");
}

#[test]
fn test_field_helpers() {
    let field = FieldSpec {
        name: "position".into(),
        descriptor: TypeDescriptor::parse("int32[2]").unwrap(),
    };
    assert_eq!(field.param_name(), "_position");
    assert_eq!(field.param_decl(), "std::span<const int32_t> _position");
    assert_eq!(field.initializer(), "position{_position[0], _position[1]}");
}

#[test]
fn test_every_scalar_kind_has_a_native_spelling() {
    for kind in ScalarKind::ALL {
        assert_eq!(native_scalar(kind), Some(kind.native_name()));
    }
}

#[test]
fn test_generate_accepts_every_scalar_kind() {
    let names: Vec<_> = ScalarKind::ALL.iter().map(|k| format!("f_{}", k.name())).collect();
    let pairs: Vec<_> = names
        .iter()
        .zip(ScalarKind::ALL)
        .map(|(name, kind)| (name.as_str(), kind.name()))
        .collect();
    let record = RecordSpec::generate(&attrs(&pairs)).unwrap();
    let text = record.render("R");
    for kind in ScalarKind::ALL {
        assert!(text.contains(&format!("    {} f_{};", kind.native_name(), kind.name())), "{text}");
    }
}

use super::*;

fn directed_scored() -> GraphRequest {
    GraphRequest::new("uint64", true)
        .and_then(|r| r.with_edge_attr("score", "float"))
        .and_then(|r| r.with_edge_attr("position", "double[3]"))
        .unwrap()
}

#[test]
fn test_graph_unit_structure() {
    let unit = SourceUnit::graph(&directed_scored(), None).unwrap();
    assert_eq!(unit.key(), &SpecializationKey::for_graph(&directed_scored()));
    assert!(unit.primary().is_empty());
    assert_eq!(unit.secondary().len(), 2);
    assert_eq!(unit.instantiation().template, Template::Graph);
    assert_eq!(unit.instantiation().topology, Topology::Directed);
    assert!(unit.symbols().alias.ends_with("_Graph"));
}

#[test]
fn test_graph_unit_text() {
    let unit = SourceUnit::graph(&directed_scored(), None).unwrap();
    let s = unit.symbols();
    let text = unit.text();

    assert!(text.contains("#include \"sg_templates.hpp\""));
    assert!(text.contains(&format!("struct {} {{", s.primary)));
    assert!(text.contains(&format!("struct {} {{", s.secondary)));
    assert!(text.contains("float score;\n    double position[3];"));
    assert!(text.contains("(float _score, std::span<const double> _position)"));
    assert!(text.contains("position{_position[0], _position[1], _position[2]}"));
    let instance = format!(
        "sg::Graph<uint64_t, {}, {}, sg::Topology::Directed>",
        s.primary, s.secondary
    );
    assert!(text.contains(&format!("using {} = {instance};", s.alias)));
    assert!(text.contains(&format!("template struct {instance};")));
    assert!(text.contains(&format!("{}_layout(std::size_t* out", s.secondary)));
    assert!(text.contains(&format!("offsetof({}, position)", s.secondary)));
    assert!(text.contains("std::span<const double>(static_cast<const double*>(args[1]), 3)"));
    assert!(text.contains(&format!("{}_element_size()", s.alias)));
}

#[test]
fn test_empty_record_init_ignores_args() {
    let unit = SourceUnit::graph(&GraphRequest::new("int32", false).unwrap(), None).unwrap();
    let text = unit.text();
    assert!(text.contains("sg::Topology::Undirected"));
    assert!(text.contains("(void)args;"));
}

#[test]
fn test_spatial_unit() {
    let request = SpatialIndexRequest::new("uint64", "double", 3).unwrap();
    let unit = SourceUnit::spatial_index(&request, None).unwrap();
    let s = unit.symbols();
    assert!(s.primary.ends_with("_Item"));
    assert!(s.secondary.ends_with("_Point"));
    assert!(unit.text().contains(&format!(
        "sg::SpatialIndex<{}, double, {}, 3>",
        s.primary, s.secondary
    )));
    assert!(unit.text().contains("double coord[3];"));
    assert_eq!(unit.secondary().layout().size(), 24);
}

#[test]
fn test_discriminator_changes_names_not_key() {
    let a = SourceUnit::graph(&directed_scored(), Some(1)).unwrap();
    let b = SourceUnit::graph(&directed_scored(), Some(2)).unwrap();
    assert_eq!(a.key(), b.key());
    assert_ne!(a.symbols(), b.symbols());
    assert_ne!(a.source_hash(), b.source_hash());
}

#[test]
fn test_generation_is_deterministic() {
    let a = SourceUnit::graph(&directed_scored(), None).unwrap();
    let b = SourceUnit::graph(&directed_scored(), None).unwrap();
    assert_eq!(a.text(), b.text());
    assert_eq!(a.source_hash(), b.source_hash());
}

#[test]
fn test_prelude_declares_templates() {
    assert!(TEMPLATE_PRELUDE.contains("struct Graph"));
    assert!(TEMPLATE_PRELUDE.contains("struct SpatialIndex"));
    assert!(TEMPLATE_PRELUDE.contains("SG_EXPORT"));
}

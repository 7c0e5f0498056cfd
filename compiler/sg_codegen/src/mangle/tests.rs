use pretty_assertions::assert_eq;

use super::*;

const HASH: ContentHash = ContentHash::new(0x0123_4567_89ab_cdef);

#[test]
fn test_mangle_without_discriminator() {
    let mangler = Mangler::new(HASH);
    assert_eq!(mangler.mangle(Role::Node), "sg_0123456789abcdef_Node");
    assert_eq!(mangler.mangle(Role::Index), "sg_0123456789abcdef_Index");
}

#[test]
fn test_mangle_with_discriminator() {
    let mangler = Mangler::new(HASH).with_discriminator(Some(7));
    assert_eq!(mangler.mangle(Role::Edge), "sg_0123456789abcdef_7_Edge");
}

#[test]
fn test_symbol_sets() {
    let graph = Mangler::new(HASH).symbols(Template::Graph);
    assert_eq!(graph.primary, "sg_0123456789abcdef_Node");
    assert_eq!(graph.secondary, "sg_0123456789abcdef_Edge");
    assert_eq!(graph.alias, "sg_0123456789abcdef_Graph");

    let spatial = Mangler::new(HASH).symbols(Template::SpatialIndex);
    assert_eq!(spatial.primary, "sg_0123456789abcdef_Item");
    assert_eq!(spatial.secondary, "sg_0123456789abcdef_Point");
}

#[test]
fn test_all_symbols_are_distinct() {
    let all = Mangler::new(HASH).symbols(Template::Graph).all();
    assert_eq!(all.len(), 10);
    let mut deduped = all.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), all.len());
    assert!(all.contains(&"sg_0123456789abcdef_Edge_init".to_string()));
    assert!(all.contains(&"sg_0123456789abcdef_Graph_element_size".to_string()));
}

#[test]
fn test_discriminators_separate_names() {
    let a = Mangler::new(HASH).with_discriminator(Some(1));
    let b = Mangler::new(HASH).with_discriminator(Some(2));
    assert_ne!(a.mangle(Role::Graph), b.mangle(Role::Graph));
}

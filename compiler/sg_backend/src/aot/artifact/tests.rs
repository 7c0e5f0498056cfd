use std::io::Write;

use pretty_assertions::assert_eq;
use sg_codegen::GraphRequest;

use super::*;

fn unit() -> SourceUnit {
    let request = GraphRequest::new("uint64", false)
        .unwrap()
        .with_node_attr("weight", "double")
        .unwrap();
    SourceUnit::graph(&request, None).unwrap()
}

fn build_fake(store: &ArtifactStore, unit: &SourceUnit) -> PathBuf {
    let scratch = store.scratch_library(unit).unwrap();
    fs::File::create(&scratch)
        .unwrap()
        .write_all(b"not really a library")
        .unwrap();
    store.commit(unit, scratch).unwrap()
}

#[test]
fn test_open_creates_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = AotConfig::new(dir.path()).with_version("1.2.3");
    let store = ArtifactStore::open(&config).unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("version")).unwrap(), "1.2.3");
    assert!(dir.path().join("lib").is_dir());
    assert!(dir.path().join("meta").is_dir());
    assert_eq!(
        fs::read_to_string(store.include_dir().join(TEMPLATE_PRELUDE_NAME)).unwrap(),
        TEMPLATE_PRELUDE
    );
}

#[test]
fn test_paths_derive_from_key_hash() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::open(&AotConfig::new(dir.path())).unwrap();
    let unit = unit();
    let hex = unit.key().hash().to_hex();
    assert_eq!(store.source_path(&unit), dir.path().join("src").join(format!("{hex}.cpp")));
    assert_eq!(store.meta_path(&unit), dir.path().join("meta").join(format!("{hex}.bin")));
    assert!(store
        .library_path(&unit)
        .starts_with(dir.path().join("lib")));
}

#[test]
fn test_commit_then_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::open(&AotConfig::new(dir.path())).unwrap();
    let unit = unit();
    assert_eq!(store.lookup(&unit).unwrap(), None);

    let source = store.write_source(&unit).unwrap();
    assert_eq!(fs::read_to_string(source).unwrap(), unit.text());

    let library = build_fake(&store, &unit);
    assert_eq!(store.lookup(&unit).unwrap(), Some(library));
    let meta = ArtifactStore::read_meta(&store.meta_path(&unit)).unwrap();
    assert_eq!(meta.key, unit.key().canonical());
    assert_eq!(meta.source_hash, unit.source_hash().value());
}

#[test]
fn test_other_version_is_stale() {
    let dir = tempfile::tempdir().unwrap();
    let unit = unit();
    let old = ArtifactStore::open(&AotConfig::new(dir.path()).with_version("old")).unwrap();
    let library = build_fake(&old, &unit);

    let new = ArtifactStore::open(&AotConfig::new(dir.path()).with_version("new")).unwrap();
    assert_eq!(new.lookup(&unit).unwrap(), None);
    assert!(!library.exists());
    assert!(!new.meta_path(&unit).exists());
}

#[test]
fn test_library_without_metadata_is_stale() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::open(&AotConfig::new(dir.path())).unwrap();
    let unit = unit();
    let library = build_fake(&store, &unit);
    fs::remove_file(store.meta_path(&unit)).unwrap();
    assert_eq!(store.lookup(&unit).unwrap(), None);
    assert!(!library.exists());
}

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_backend(BackendKind::Aot)
        .with_artifact_dir("/tmp/sg-test")
        .with_opt_level(0)
        .with_version("9.9");
    assert_eq!(config.backend, BackendKind::Aot);
    assert_eq!(config.artifact_dir, PathBuf::from("/tmp/sg-test"));

    let aot = config.aot_config();
    assert_eq!(aot.artifact_dir, PathBuf::from("/tmp/sg-test"));
    assert_eq!(aot.opt_level, 0);
    assert_eq!(aot.version, "9.9");
    assert_eq!(aot.compiler, None);
}

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.backend, BackendKind::Jit);
    assert_eq!(config.opt_level, 2);
    assert!(config.artifact_dir.ends_with("spatial_graph"));
}

#[test]
fn test_backend_kind_parsing() {
    assert_eq!("jit".parse::<BackendKind>().unwrap(), BackendKind::Jit);
    assert_eq!("AOT".parse::<BackendKind>().unwrap(), BackendKind::Aot);
    assert!(matches!("llvm".parse::<BackendKind>(), Err(Error::Config(_))));
    assert_eq!(BackendKind::Aot.to_string(), "aot");
}

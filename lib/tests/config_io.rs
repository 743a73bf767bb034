use rya::{RowKeyHashing, RyaConfig};

#[test]
fn config_json_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rya.json");
    let config = RyaConfig::new(RowKeyHashing::Enabled, "prod_");
    config.save_to_file(&path).expect("save");
    let loaded = RyaConfig::from_file(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "{}").expect("write");
    let loaded = RyaConfig::from_file(&path).expect("load");
    assert_eq!(loaded, RyaConfig::default());
}

#[test]
fn unreadable_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json").expect("write");
    assert!(RyaConfig::from_file(&path).is_err());
    assert!(RyaConfig::from_file(&dir.path().join("absent.json")).is_err());
}

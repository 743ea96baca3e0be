use std::io::Write;

use relief_cards::CardRegistry;
use relief_server::{load_sheet_config, validate_startup_config, ConfigError, ServerConfig};
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(json.as_bytes()).expect("write config");
    file
}

#[test]
fn json_file_replaces_the_builtin_table() {
    let file = write_config(
        r#"{"sheet-1": {"Pickups": {"Component": "PickupCard", "StructuredDataRange": "A2:D"}}}"#,
    );
    let sheets = load_sheet_config(Some(file.path())).expect("config");
    let tab = sheets.resolve("sheet-1", "Pickups").expect("tab");
    assert_eq!(tab.component, "PickupCard");
    assert_eq!(tab.range, "A2:D");

    let registry = CardRegistry::with_builtin_cards();
    validate_startup_config(&ServerConfig::default(), &sheets, &registry).expect("valid");
}

#[test]
fn unknown_fields_and_unreadable_paths_are_rejected() {
    let file = write_config(r#"{"sheet-1": {"Tab": {"component": "PickupCard", "range": "A1:B", "extra": 1}}}"#);
    let err = load_sheet_config(Some(file.path())).expect_err("unknown field");
    assert!(matches!(err, ConfigError::InvalidSheetConfig(_)));

    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.json");
    let err = load_sheet_config(Some(&missing)).expect_err("missing file");
    assert!(matches!(err, ConfigError::ReadSheetConfig { .. }));
}

#[test]
fn file_components_must_be_registered() {
    let file = write_config(r#"{"sheet-1": {"Tab": {"component": "MapCard", "range": "A1:B"}}}"#);
    let sheets = load_sheet_config(Some(file.path())).expect("config parses");
    let err = validate_startup_config(
        &ServerConfig::default(),
        &sheets,
        &CardRegistry::with_builtin_cards(),
    )
    .expect_err("unregistered");
    assert!(err.to_string().contains("MapCard"));
}

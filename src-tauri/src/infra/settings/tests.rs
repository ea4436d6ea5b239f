use super::*;
use crate::shared::fs::unique_tmp_dir;
use serde_json::json;

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read settings file");
    serde_json::from_str(&text).expect("parse settings file")
}

#[test]
fn missing_file_loads_defaults_and_writes_them() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);

    let store = SettingsStore::load(path.clone());

    assert_eq!(store.get(None), Some(default_document()));
    assert_eq!(store.get(Some(keys::THEME)), Some(json!("dark")));
    assert_eq!(read_json(&path), default_document());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_file_loads_same_document_as_restore_defaults() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    std::fs::write(&path, "{ not json").expect("write corrupt");

    let mut store = SettingsStore::load(path.clone());
    let loaded = store.get(None).expect("document");
    let restored = store.restore_defaults();

    assert_eq!(loaded, restored);
    assert_eq!(restored, default_document());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn non_object_root_falls_back_to_defaults() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    std::fs::write(&path, "[1, 2, 3]").expect("write array");

    let store = SettingsStore::load(path);
    assert_eq!(store.get(None), Some(default_document()));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn partial_file_is_merged_over_defaults() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    std::fs::write(
        &path,
        r#"{ "appearance": { "theme": "light" }, "plugins": { "enabled": true } }"#,
    )
    .expect("write partial");

    let store = SettingsStore::load(path);

    assert_eq!(store.get(Some(keys::THEME)), Some(json!("light")));
    assert_eq!(store.get(Some(keys::FONT_SIZE)), Some(json!(14)));
    assert_eq!(store.get(Some(keys::CLOSE_TO_TRAY)), Some(json!(true)));
    assert_eq!(store.get(Some("plugins.enabled")), Some(json!(true)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn set_then_get_round_trips_and_persists() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    let mut store = SettingsStore::load(path.clone());

    let ack = store
        .set(keys::THEME, json!("light"))
        .expect("set theme");
    assert!(ack.persisted);
    assert_eq!(store.get(Some(keys::THEME)), Some(json!("light")));

    let on_disk = read_json(&path);
    assert_eq!(on_disk["appearance"]["theme"], json!("light"));
    let text = std::fs::read_to_string(&path).expect("read");
    assert!(text.contains("    \"theme\": \"light\""));

    let reopened = SettingsStore::load(path);
    assert_eq!(reopened.get(Some(keys::THEME)), Some(json!("light")));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn set_accepts_every_primitive_kind() {
    let dir = unique_tmp_dir("settings");
    let mut store = SettingsStore::load(dir.join(SETTINGS_FILE_NAME));

    let cases = [
        (keys::FONT_SIZE, json!(18)),
        (keys::ACCENT_COLOR, json!("#ff8800")),
        (keys::ALWAYS_ON_TOP, json!(true)),
        (keys::WINDOW_X, Value::Null),
        ("advanced.keyboardShortcuts.close", json!("Ctrl+Q")),
        ("advanced.experimental.newFlag", json!(1.5)),
    ];
    for (path, value) in cases {
        store.set(path, value.clone()).expect("set");
        assert_eq!(store.get(Some(path)), Some(value), "path {path}");
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejected_set_leaves_document_and_file_untouched() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    let mut store = SettingsStore::load(path.clone());
    let before = store.get(None);

    assert!(matches!(
        store.set("", json!(1)),
        Err(SettingsError::EmptyPath)
    ));
    assert!(matches!(
        store.set("appearance.theme.mode", json!("x")),
        Err(SettingsError::PathConflict { .. })
    ));
    assert!(matches!(
        store.set("window", json!({ "width": 1 })),
        Err(SettingsError::NonPrimitiveValue { .. })
    ));

    assert_eq!(store.get(None), before);
    assert_eq!(Some(read_json(&path)), before);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sections_cannot_be_overwritten_by_a_primitive() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    let mut store = SettingsStore::load(path.clone());

    assert!(matches!(
        store.set(keys::APPEARANCE, json!("x")),
        Err(SettingsError::PathConflict { .. })
    ));
    assert_eq!(read_json(&path), default_document());

    store.set(keys::THEME, json!("light")).expect("set theme");
    assert_eq!(store.get(Some(keys::THEME)), Some(json!("light")));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn file_with_primitive_section_keeps_default_section() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    std::fs::write(&path, r#"{ "appearance": 5, "behavior": { "alwaysOnTop": true } }"#)
        .expect("write");

    let mut store = SettingsStore::load(path);

    assert_eq!(store.get(Some(keys::THEME)), Some(json!("dark")));
    assert_eq!(store.get(Some(keys::ALWAYS_ON_TOP)), Some(json!(true)));
    store.set(keys::THEME, json!("auto")).expect("set theme");
    assert_eq!(store.get(Some(keys::THEME)), Some(json!("auto")));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn get_falls_back_to_default_when_path_is_unset() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    std::fs::write(&path, r#"{ "behavior": {} }"#).expect("write");

    let mut store = SettingsStore::load(path);
    // A null leaf reads back as null; typed reads fall back to the default.
    store.set("behavior.closeToTray", Value::Null).expect("set null");
    assert_eq!(store.get(Some(keys::CLOSE_TO_TRAY)), Some(Value::Null));
    assert!(store.bool_at(keys::CLOSE_TO_TRAY));

    assert_eq!(store.get(Some("does.not.exist")), None);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn typed_reads_ignore_values_of_the_wrong_type() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    std::fs::write(
        &path,
        r#"{ "appearance": { "fontSize": "huge", "theme": 3 }, "behavior": { "minimizeToTray": "yes" } }"#,
    )
    .expect("write");

    let store = SettingsStore::load(path);
    assert_eq!(store.f64_at(keys::FONT_SIZE), Some(14.0));
    assert_eq!(store.str_at(keys::THEME), "dark");
    assert!(!store.bool_at(keys::MINIMIZE_TO_TRAY));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn restore_defaults_discards_every_change() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    let mut store = SettingsStore::load(path.clone());
    store.set(keys::THEME, json!("light")).expect("set");
    store.set("custom.key", json!("value")).expect("set");

    let restored = store.restore_defaults();

    assert_eq!(restored, default_document());
    assert_eq!(store.get(None), Some(default_document()));
    assert_eq!(read_json(&path), default_document());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn set_many_is_all_or_nothing() {
    let dir = unique_tmp_dir("settings");
    let mut store = SettingsStore::load(dir.join(SETTINGS_FILE_NAME));

    store
        .set_many([(keys::WINDOW_WIDTH, json!(1280)), (keys::WINDOW_HEIGHT, json!(800))])
        .expect("set_many");
    assert_eq!(store.get(Some(keys::WINDOW_WIDTH)), Some(json!(1280)));
    assert_eq!(store.get(Some(keys::WINDOW_HEIGHT)), Some(json!(800)));

    let err = store
        .set_many([(keys::WINDOW_X, json!(10)), ("window.width.bad", json!(1))])
        .unwrap_err();
    assert!(matches!(err, SettingsError::PathConflict { .. }));
    assert_eq!(store.get(Some(keys::WINDOW_X)), Some(Value::Null));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn persist_failure_keeps_memory_authoritative() {
    let dir = unique_tmp_dir("settings");
    // A directory where the file should be makes every flush fail.
    let path = dir.join(SETTINGS_FILE_NAME);
    std::fs::create_dir_all(&path).expect("create blocking dir");

    let mut store = SettingsStore::load(path);
    assert_eq!(store.get(None), Some(default_document()));

    let ack = store.set(keys::THEME, json!("light")).expect("set");
    assert!(!ack.persisted);
    assert_eq!(store.get(Some(keys::THEME)), Some(json!("light")));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn export_writes_current_document() {
    let dir = unique_tmp_dir("settings");
    let mut store = SettingsStore::load(dir.join(SETTINGS_FILE_NAME));
    store.set(keys::ACCENT_COLOR, json!("#123456")).expect("set");

    let destination = dir.join("exports").join("my-settings.json");
    let outcome = store.export(Some(&destination));

    assert_eq!(outcome, ExportOutcome::saved(&destination));
    assert_eq!(Some(read_json(&destination)), store.get(None));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn export_reports_cancel_and_failure() {
    let dir = unique_tmp_dir("settings");
    let store = SettingsStore::load(dir.join(SETTINGS_FILE_NAME));

    assert_eq!(store.export(None), ExportOutcome::canceled());

    let blocked = dir.join("blocked");
    std::fs::create_dir_all(&blocked).expect("create dir");
    match store.export(Some(&blocked)) {
        ExportOutcome::Failed { error } => assert!(!error.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn export_outcome_serializes_to_bridge_shapes() {
    assert_eq!(
        serde_json::to_value(ExportOutcome::saved(Path::new("/tmp/s.json"))).expect("json"),
        json!({ "success": true, "path": "/tmp/s.json" })
    );
    assert_eq!(
        serde_json::to_value(ExportOutcome::canceled()).expect("json"),
        json!({ "canceled": true })
    );
    assert_eq!(
        serde_json::to_value(ExportOutcome::failed("disk full")).expect("json"),
        json!({ "success": false, "error": "disk full" })
    );
}

#[test]
fn reload_picks_up_external_edits_only_when_changed() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join(SETTINGS_FILE_NAME);
    let mut store = SettingsStore::load(path.clone());

    assert_eq!(store.reload(), None);

    std::fs::write(&path, r#"{ "appearance": { "theme": "auto" } }"#).expect("edit");
    let reloaded = store.reload().expect("changed");
    assert_eq!(reloaded["appearance"]["theme"], json!("auto"));
    assert_eq!(reloaded["appearance"]["fontFamily"], json!("system-ui"));

    std::fs::write(&path, "{ half-written").expect("corrupt");
    assert_eq!(store.reload(), None);
    assert_eq!(store.get(Some(keys::THEME)), Some(json!("auto")));
    let _ = std::fs::remove_dir_all(&dir);
}

use buildsweep::core::config::{PluginOptions, DEFAULT_CONFIG_FILE};
use buildsweep::core::plugin::{NoContext, SweepPlugin};
use buildsweep::core::report::{Phase, PhaseState};
use buildsweep::SweepError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_a_phase() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("dist/maps")).unwrap();
    fs::write(root.join("dist/app.js"), "app").unwrap();
    fs::write(root.join("dist/app.js.map"), "map").unwrap();
    fs::write(root.join("dist/maps/vendor.js.map"), "map").unwrap();

    let config = serde_json::json!({
        "after": {
            "root": root,
            "test": [{ "folder": "dist", "extensions": [".map"], "recursive": true }],
            "exclude": ["dist/maps/vendor.js.map"],
            "log": false
        }
    });
    let config_path = root.join(DEFAULT_CONFIG_FILE);
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let options = PluginOptions::load(&config_path).unwrap();
    let plugin = SweepPlugin::new(options).unwrap();
    let outcome = plugin.run_phase(Phase::After, &mut NoContext);

    assert_eq!(outcome.state, PhaseState::Done);
    assert!(root.join("dist/app.js").exists());
    assert!(!root.join("dist/app.js.map").exists());
    assert!(root.join("dist/maps/vendor.js.map").exists());
}

#[test]
fn test_config_without_phases_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&config_path, r#"{ "before": null }"#).unwrap();

    let result = PluginOptions::load(&config_path);
    assert!(matches!(result, Err(SweepError::Config(_))));
}

#[test]
fn test_malformed_config_is_a_serialization_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&config_path, "{ not json").unwrap();

    let result = PluginOptions::load(&config_path);
    assert!(matches!(result, Err(SweepError::Serialization(_))));
}

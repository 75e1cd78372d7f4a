//! Loading form configurations from disk.

use std::io::Write;

use formguard_core::{contact_config, ConfigError, FormConfig, FormSpec, ValidationEngine};

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"fields": [
            {{"name": "email", "rules": ["required", "email"],
              "messages": {{"email": "bad email"}}}}
        ]}}"#
    )
    .unwrap();

    let spec = FormConfig::from_path(file.path()).unwrap().build().unwrap();
    let engine = ValidationEngine::new(spec);
    let state = engine.validate_field("email", "nope").unwrap();
    assert_eq!(state.message(), Some("bad email"));
}

#[test]
fn bad_parameter_in_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"fields": [{{"name": "nombre", "rules": ["minLength:dos"]}}]}}"#
    )
    .unwrap();

    let config = FormConfig::from_path(file.path()).unwrap();
    let err = FormSpec::try_from(config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidParameter { ref field, ref param, .. }
            if field == "nombre" && param == "dos"
    ));
}

#[test]
fn contact_config_survives_json() {
    let config = contact_config();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let reparsed = FormConfig::from_json(&json).unwrap();
    assert_eq!(reparsed.build().unwrap(), config.build().unwrap());
}

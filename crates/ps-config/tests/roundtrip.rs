use ps_config::{ConfigError, OverrideDef, RunConfig, load, load_json, load_yaml, save_yaml};
use ps_species::Element;

fn sample() -> RunConfig {
    RunConfig {
        molset: 1,
        abscale: Some(-0.5),
        overrides: vec![OverrideDef {
            atomic_number: 26,
            log_epsilon: 7.3,
        }],
        reference_wavelength: Some(6000.0),
        verbose: true,
    }
}

#[test]
fn roundtrip_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.yaml");
    save_yaml(&path, &sample()).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), sample());
    assert_eq!(load(&path).unwrap(), sample());
}

#[test]
fn json_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(
        &path,
        r#"{ "molset": 0, "overrides": [{ "atomic_number": 6, "log_epsilon": 8.2 }] }"#,
    )
    .unwrap();
    let config = load(&path).unwrap();
    assert_eq!(config, load_json(&path).unwrap());
    assert_eq!(config.overrides.len(), 1);
    assert!(config.abscale.is_none());
    assert!(!config.verbose);
}

#[test]
fn minimal_yaml_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.yaml");
    std::fs::write(&path, "verbose: true\n").unwrap();
    let config = load_yaml(&path).unwrap();
    assert_eq!(config.molset, 0);
    assert!(config.verbose);
    let settings = config.settings().unwrap();
    assert_eq!(settings.abscale, 0.0);
    assert!(settings.overrides.is_empty());
}

#[test]
fn invalid_file_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(
        &path,
        "molset: 2\noverrides:\n  - { atomic_number: 0, log_epsilon: 1.0 }\n",
    )
    .unwrap();
    match load_yaml(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn invalid_config_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    let config = RunConfig {
        molset: 7,
        ..RunConfig::default()
    };
    assert!(save_yaml(&path, &config).is_err());
    assert!(!path.exists());
}

#[test]
fn settings_carry_overrides() {
    let settings = sample().settings().unwrap();
    assert_eq!(settings.molset, 1);
    assert_eq!(settings.abscale, -0.5);
    assert_eq!(settings.overrides[0].element, Element::FE);
    assert_eq!(settings.reference_wavelength, Some(6000.0));
    assert!(settings.verbose);
}

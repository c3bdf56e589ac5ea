use super::*;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = PathBuf::from("target")
        .join("unit_tmp")
        .join(format!("{name}-{}", crate::JobId::next()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_are_valid() {
    let cfg = AnimatorConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.engine.program, "manim");
    assert_eq!(cfg.engine.scene, "MathSolutionAnimation");
    assert_eq!(cfg.output_dir, PathBuf::from("animations"));
    assert!(!cfg.require_steps);
}

#[test]
fn partial_json_keeps_defaults_for_missing_keys() {
    let path = scratch_file(
        "config_partial",
        r#"{ "output_dir": "media", "engine": { "timeout_secs": 120 } }"#,
    );
    let cfg = AnimatorConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.output_dir, PathBuf::from("media"));
    assert_eq!(cfg.engine.timeout_secs, 120);
    assert_eq!(cfg.engine.program, "manim");
    assert_eq!(cfg.temp_dir, PathBuf::from("temp_manim"));
}

#[test]
fn unknown_keys_are_rejected() {
    let path = scratch_file("config_unknown", r#"{ "outputdir": "media" }"#);
    let err = AnimatorConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, AnimateError::Config(_)));
}

#[test]
fn invalid_values_fail_validation() {
    let path = scratch_file("config_invalid", r#"{ "engine": { "timeout_secs": 0 } }"#);
    let err = AnimatorConfig::from_json_file(&path).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));

    let cfg = AnimatorConfig {
        temp_dir: PathBuf::new(),
        ..AnimatorConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn missing_file_is_io_error() {
    let err = AnimatorConfig::from_json_file(Path::new("target/unit_tmp/does-not-exist.json"))
        .unwrap_err();
    assert!(matches!(err, AnimateError::Io { .. }));
}

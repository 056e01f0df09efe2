use aidsense::config::{
    Config, ConfigError, ENV_MIN_LABEL_SCORE, ENV_MIN_OBJECT_SCORE, ENV_NMS_IOU_THRESHOLD,
    ENV_TEXT_HIT_SCORE,
};
use aidsense::{AnnotationResult, FusionConfig, FusionEngine};
use std::fs;
use tempfile::TempDir;

const ALL_ENV: [&str; 4] = [
    ENV_MIN_OBJECT_SCORE,
    ENV_MIN_LABEL_SCORE,
    ENV_TEXT_HIT_SCORE,
    ENV_NMS_IOU_THRESHOLD,
];

fn cleared_env() -> Vec<(&'static str, Option<&'static str>)> {
    ALL_ENV.iter().map(|k| (*k, None)).collect()
}

#[test]
fn loads_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[fusion]
min_object_score = 0.4
text_hit_score = 0.5

[output]
show_notes = true
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.fusion.min_object_score, 0.4);
    assert_eq!(config.fusion.text_hit_score, 0.5);
    assert_eq!(config.fusion.min_label_score, 0.65);
    assert!(config.output.show_notes);
    assert!(config.output.show_raw_text);
}

#[test]
fn save_then_load_keeps_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.fusion.nms_iou_threshold = 0.3;
    config.output.show_raw_text = false;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.fusion, config.fusion);
    assert!(!loaded.output.show_raw_text);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[fusion\nmin_object_score = ").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn env_overrides_replace_file_values() {
    let mut vars = cleared_env();
    vars[0] = (ENV_MIN_OBJECT_SCORE, Some("0.9"));
    vars[3] = (ENV_NMS_IOU_THRESHOLD, Some("0.2"));

    temp_env::with_vars(vars, || {
        let mut config = Config::from_toml_str("[fusion]\nmin_object_score = 0.4\n").unwrap();
        config.fusion.apply_env_overrides().unwrap();

        assert_eq!(config.fusion.min_object_score, 0.9);
        assert_eq!(config.fusion.nms_iou_threshold, 0.2);
        assert_eq!(config.fusion.min_label_score, 0.65);
    });
}

#[test]
fn unset_env_leaves_defaults() {
    temp_env::with_vars(cleared_env(), || {
        let mut config = FusionConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config, FusionConfig::default());
    });
}

#[test]
fn non_numeric_env_is_rejected() {
    temp_env::with_var(ENV_TEXT_HIT_SCORE, Some("lots"), || {
        let mut config = FusionConfig::default();
        let err = config.apply_env_overrides().unwrap_err();
        assert!(err.to_string().contains(ENV_TEXT_HIT_SCORE));
    });
}

#[test]
fn default_location_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    temp_env::with_vars(
        [
            ("XDG_CONFIG_HOME", Some(dir.path().as_os_str())),
            ("HOME", Some(dir.path().as_os_str())),
        ],
        || {
            let config = Config::load().unwrap();
            assert_eq!(config.fusion, FusionConfig::default());
        },
    );
}

#[test]
fn lower_object_floor_admits_weak_objects() {
    let annotation = AnnotationResult::default().with_object("towel", 0.5, [0.1, 0.1, 0.3, 0.3]);

    let strict = FusionEngine::default().fuse(&annotation);
    assert!(strict.is_empty());

    let loose = FusionEngine::with_default_adapters(FusionConfig {
        min_object_score: 0.4,
        ..FusionConfig::default()
    })
    .fuse(&annotation);
    assert_eq!(loose.boxed_findings.len(), 1);
}

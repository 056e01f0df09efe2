use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Minimum score for localized objects; weaker objects are dropped.
pub const DEFAULT_MIN_OBJECT_SCORE: f32 = 0.55;
/// Minimum score for whole-image labels.
pub const DEFAULT_MIN_LABEL_SCORE: f32 = 0.65;
/// Fixed confidence for OCR-derived hits.
pub const DEFAULT_TEXT_HIT_SCORE: f32 = 0.60;
/// Boxes overlapping a stronger box at or above this IoU are suppressed.
pub const DEFAULT_NMS_IOU_THRESHOLD: f32 = 0.45;

pub const ENV_MIN_OBJECT_SCORE: &str = "AIDSENSE_MIN_OBJECT_SCORE";
pub const ENV_MIN_LABEL_SCORE: &str = "AIDSENSE_MIN_LABEL_SCORE";
pub const ENV_TEXT_HIT_SCORE: &str = "AIDSENSE_TEXT_HIT_SCORE";
pub const ENV_NMS_IOU_THRESHOLD: &str = "AIDSENSE_NMS_IOU_THRESHOLD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {field}: {value} (expected: {expected})")]
    InvalidValue {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    #[error("Invalid environment override {key}={value}: not a number")]
    InvalidEnv { key: String, value: String },
}

/// The tunables of the fusion engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub min_object_score: f32,
    pub min_label_score: f32,
    pub text_hit_score: f32,
    pub nms_iou_threshold: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            min_object_score: DEFAULT_MIN_OBJECT_SCORE,
            min_label_score: DEFAULT_MIN_LABEL_SCORE,
            text_hit_score: DEFAULT_TEXT_HIT_SCORE,
            nms_iou_threshold: DEFAULT_NMS_IOU_THRESHOLD,
        }
    }
}

impl FusionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("min_object_score", self.min_object_score)?;
        check_unit("min_label_score", self.min_label_score)?;
        check_unit("text_hit_score", self.text_hit_score)?;

        let t = self.nms_iou_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "nms_iou_threshold",
                value: t,
                expected: "a number in (0, 1]",
            });
        }
        Ok(())
    }

    /// Apply `AIDSENSE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut f32); 4] = [
            (ENV_MIN_OBJECT_SCORE, &mut self.min_object_score),
            (ENV_MIN_LABEL_SCORE, &mut self.min_label_score),
            (ENV_TEXT_HIT_SCORE, &mut self.text_hit_score),
            (ENV_NMS_IOU_THRESHOLD, &mut self.nms_iou_threshold),
        ];

        for (key, slot) in fields {
            if let Some(raw) = lookup(key) {
                *slot = raw
                    .trim()
                    .parse::<f32>()
                    .map_err(|_| ConfigError::InvalidEnv {
                        key: key.to_string(),
                        value: raw.clone(),
                    })?;
                tracing::debug!(key, value = *slot, "applied environment override");
            }
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            expected: "a number in [0, 1]",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub show_notes: bool,
    pub show_raw_text: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_notes: false,
            show_raw_text: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fusion: FusionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.fusion.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the config file at its default location, falling back to
    /// defaults when there is no file. A file that exists but is invalid is
    /// an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|mut path| {
            path.push("config.toml");
            path
        })
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("aidsense");
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fusion.min_object_score, 0.55);
        assert_eq!(config.fusion.min_label_score, 0.65);
        assert_eq!(config.fusion.text_hit_score, 0.60);
        assert_eq!(config.fusion.nms_iou_threshold, 0.45);
        assert!(!config.output.show_notes);
        assert!(config.output.show_raw_text);
        assert!(config.fusion.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();

        assert!(toml_str.contains("[fusion]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("show_notes = false"));
    }

    #[test]
    fn test_config_partial_deserialization() {
        let toml_str = r#"
[fusion]
nms_iou_threshold = 0.3
"#;

        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.fusion.nms_iou_threshold, 0.3);
        // Missing values keep their defaults
        assert_eq!(config.fusion.min_object_score, 0.55);
        assert!(config.output.show_raw_text);
    }

    #[test]
    fn test_config_rejects_out_of_range() {
        let toml_str = r#"
[fusion]
min_label_score = 1.5
"#;

        let err = Config::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "min_label_score",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_iou_threshold_rejected() {
        let config = FusionConfig {
            nms_iou_threshold: 0.0,
            ..FusionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let env = HashMap::from([
            (ENV_TEXT_HIT_SCORE.to_string(), "0.5".to_string()),
            (ENV_NMS_IOU_THRESHOLD.to_string(), " 0.6 ".to_string()),
        ]);
        let mut config = FusionConfig::default();
        config.apply_overrides(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.text_hit_score, 0.5);
        assert_eq!(config.nms_iou_threshold, 0.6);
        assert_eq!(config.min_object_score, DEFAULT_MIN_OBJECT_SCORE);
    }

    #[test]
    fn test_invalid_override() {
        let mut config = FusionConfig::default();
        let err = config
            .apply_overrides(|k| (k == ENV_MIN_OBJECT_SCORE).then(|| "high".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key, .. } if key == ENV_MIN_OBJECT_SCORE));
    }
}

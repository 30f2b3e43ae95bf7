use crate::config::{validate_provider, DEFAULT_BASE_DIR, DEFAULT_BASE_NAME};
use crate::core::encoding::OutputStyle;
use crate::core::ConfigProvider;
use crate::domain::model::Axis;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    #[serde(default = "default_base_name")]
    pub base_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysConfig {
    #[serde(default = "default_stroke_key")]
    pub stroke: String,
    #[serde(default = "default_roll_key")]
    pub roll: String,
    #[serde(default = "default_pitch_key")]
    pub pitch: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub style: OutputStyle,
    #[serde(default)]
    pub strict_keys: bool,
}

fn default_base_dir() -> String {
    DEFAULT_BASE_DIR.to_string()
}

fn default_base_name() -> String {
    DEFAULT_BASE_NAME.to_string()
}

fn default_stroke_key() -> String {
    Axis::Stroke.default_key().to_string()
}

fn default_roll_key() -> String {
    Axis::Roll.default_key().to_string()
}

fn default_pitch_key() -> String {
    Axis::Pitch.default_key().to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            base_name: default_base_name(),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            stroke: default_stroke_key(),
            roll: default_roll_key(),
            pitch: default_pitch_key(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FUNSCRIPT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn base_dir(&self) -> &str {
        &self.input.base_dir
    }

    fn base_name(&self) -> &str {
        &self.input.base_name
    }

    fn axis_key(&self, axis: Axis) -> &str {
        match axis {
            Axis::Stroke => &self.keys.stroke,
            Axis::Roll => &self.keys.roll,
            Axis::Pitch => &self.keys.pitch,
        }
    }

    fn strict_keys(&self) -> bool {
        self.output.strict_keys
    }

    fn output_style(&self) -> OutputStyle {
        self.output.style
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[input]
base_dir = "/data/scripts"
base_name = "clip01"

[keys]
stroke = "stroke"
roll = "roll"
pitch = "pitch"

[output]
style = "compact"
strict_keys = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_dir(), "/data/scripts");
        assert_eq!(config.base_name(), "clip01");
        assert_eq!(config.axis_key(Axis::Pitch), "pitch");
        assert_eq!(config.output_style(), OutputStyle::Compact);
        assert!(config.strict_keys());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.base_dir(), "./funscript_output/");
        assert_eq!(config.base_name(), "demo");
        assert_eq!(config.axis_key(Axis::Stroke), "L0");
        assert_eq!(config.axis_key(Axis::Roll), "R1");
        assert_eq!(config.axis_key(Axis::Pitch), "R2");
        assert_eq!(config.output_style(), OutputStyle::Python);
        assert!(!config.strict_keys());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FUNSCRIPT_SPLIT_TEST_DIR", "/tmp/funscripts");

        let toml_content = r#"
[input]
base_dir = "${FUNSCRIPT_SPLIT_TEST_DIR}"
base_name = "${FUNSCRIPT_SPLIT_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.base_dir, "/tmp/funscripts");
        assert_eq!(config.input.base_name, "${FUNSCRIPT_SPLIT_UNSET_VAR}");

        std::env::remove_var("FUNSCRIPT_SPLIT_TEST_DIR");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[input\nbase_dir = 1").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[input]
base_name = "nested/name"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\nbase_name = \"file-test\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input.base_name, "file-test");
    }
}

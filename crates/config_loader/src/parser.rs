//! Configuration parsing
//!
//! Supports TOML (primary) and JSON (optional) formats.

use contracts::{MonitorBlueprint, MonitorError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<MonitorBlueprint, MonitorError> {
    toml::from_str(content).map_err(|e| MonitorError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<MonitorBlueprint, MonitorError> {
    serde_json::from_str(content).map_err(|e| MonitorError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<MonitorBlueprint, MonitorError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[pins]
input_a = 18
input_b = 23

[trigger]
cooldown_secs = 2.0

[camera]
width = 640
height = 480
image_dir = "/tmp/snapshots"

[storage]
bucket = "bucket"
base_url = "https://cdn.example.com/bucket"

[notify]
account_sid = "AC1234"
from = "whatsapp:+10000000000"
to = "whatsapp:+19999999999"
template = "Alert! "
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.pins.input_b, 23);
        assert_eq!(bp.trigger.cooldown_secs, 2.0);
        assert_eq!(bp.camera.width, 640);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "pins": { "input_a": 18, "input_b": 23 },
            "camera": { "image_dir": "/tmp/snapshots" },
            "storage": {
                "bucket": "bucket",
                "base_url": "https://cdn.example.com/bucket"
            },
            "notify": {
                "account_sid": "AC1234",
                "from": "whatsapp:+10000000000",
                "to": "whatsapp:+19999999999"
            }
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, MonitorError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}

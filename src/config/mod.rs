//! Engine configuration.
//!
//! The engine is configured with one JSON document. [`EngineConfig`] holds the
//! documented defaults; [`ConfigOverrides`] carries what the command line
//! supplied and is merged on top with [`EngineConfig::with_overrides`].
//! Values are not validated here: the engine is the authority on what it
//! accepts.

pub mod runtime_key;

pub use runtime_key::RuntimeKeyConfig;

use crate::utils::Result;
use base64::Engine as _;
use log::{debug, warn};
use serde::Serialize;
use std::path::Path;

/// Assets folder used when the command line does not name one.
pub const DEFAULT_ASSETS_FOLDER: &str = "../../../assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    Verbose,
    Info,
    Warn,
    Error,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterAccuracy {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    Bilinear,
    Bicubic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    pub debug_level: DebugLevel,
    pub debug_write_input_image_enabled: bool,
    pub debug_internal_data_path: String,

    pub num_threads: i32,
    pub gpgpu_enabled: bool,
    pub gpgpu_workload_balancing_enabled: bool,

    pub segmenter_accuracy: SegmenterAccuracy,
    pub gamma: f64,
    pub interpolation: Interpolation,
    pub min_num_lines: u32,
    /// [left, width, top, height]; all zeros means the whole image.
    pub roi: [i32; 4],
    pub min_score: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_token_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_token_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backpropagation_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_check_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ielcd: Option<bool>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            debug_level: DebugLevel::Info,
            debug_write_input_image_enabled: false,
            debug_internal_data_path: ".".to_string(),
            num_threads: -1,
            gpgpu_enabled: true,
            // Workload balancing pays off on ARM and busy-waits on x86
            gpgpu_workload_balancing_enabled: is_arm_target(),
            segmenter_accuracy: SegmenterAccuracy::High,
            gamma: -1.0,
            interpolation: Interpolation::Bilinear,
            min_num_lines: 2,
            roi: [0, 0, 0, 0],
            min_score: 0.0,
            assets_folder: None,
            license_token_file: None,
            license_token_data: None,
            backpropagation_enabled: None,
            vertical_check_enabled: None,
            ielcd: None,
        }
    }
}

/// Options supplied on the command line. `None` keeps the default.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub assets: Option<String>,
    pub token_file: Option<String>,
    pub token_data: Option<String>,
    pub backprop: Option<String>,
    pub vcheck: Option<String>,
    pub ielcd: Option<String>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge command-line overrides into the defaults.
    ///
    /// Paths and token data are passed through as given. A token file that
    /// does not exist, or token data that is not base64, only produces a
    /// warning.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(assets) = non_empty(&overrides.assets) {
            self.assets_folder = Some(normalize_path(assets));
        }
        if let Some(token_file) = non_empty(&overrides.token_file) {
            if !Path::new(token_file).is_file() {
                warn!("License token file not found: {}", token_file);
            }
            self.license_token_file = Some(normalize_path(token_file));
        }
        if let Some(token_data) = non_empty(&overrides.token_data) {
            if base64::engine::general_purpose::STANDARD
                .decode(token_data.trim())
                .is_err()
            {
                warn!("License token data is not valid base64");
            }
            self.license_token_data = Some(token_data.to_string());
        }

        self.backpropagation_enabled = Some(toggle(&overrides.backprop));
        self.vertical_check_enabled = Some(toggle(&overrides.vcheck));
        self.ielcd = Some(toggle(&overrides.ielcd));
        self
    }

    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        debug!("Engine configuration: {}", json);
        Ok(json)
    }
}

/// Feature toggles are enabled only by the literal text `True`.
pub fn flag_from_text(text: &str) -> bool {
    text == "True"
}

/// Default for feature toggles the user did not set: on for x86, off for ARM.
pub fn default_toggle() -> bool {
    !is_arm_target()
}

pub fn is_arm_target() -> bool {
    cfg!(any(target_arch = "arm", target_arch = "aarch64"))
}

fn toggle(value: &Option<String>) -> bool {
    match value {
        Some(text) => flag_from_text(text),
        None => default_toggle(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// The engine expects forward slashes on every platform.
pub fn normalize_path(path: &str) -> String {
    if cfg!(windows) {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn payload(config: &EngineConfig) -> Value {
        serde_json::from_str(&config.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults_serialize_with_documented_keys() {
        let json = payload(&EngineConfig::default());
        assert_eq!(json["debug_level"], "info");
        assert_eq!(json["debug_write_input_image_enabled"], false);
        assert_eq!(json["debug_internal_data_path"], ".");
        assert_eq!(json["num_threads"], -1);
        assert_eq!(json["gpgpu_enabled"], true);
        assert_eq!(json["gpgpu_workload_balancing_enabled"], is_arm_target());
        assert_eq!(json["segmenter_accuracy"], "high");
        assert_eq!(json["gamma"], -1.0);
        assert_eq!(json["interpolation"], "bilinear");
        assert_eq!(json["min_num_lines"], 2);
        assert_eq!(json["roi"], serde_json::json!([0, 0, 0, 0]));
        assert_eq!(json["min_score"], 0.0);
        assert!(json.get("assets_folder").is_none());
        assert!(json.get("license_token_file").is_none());
        assert!(json.get("license_token_data").is_none());
    }

    #[test]
    fn test_overrides_appear_verbatim() {
        let overrides = ConfigOverrides {
            assets: Some("/opt/mrz/assets".into()),
            token_file: Some("/nonexistent/token.lic".into()),
            token_data: Some("not base64 at all!".into()),
            ..Default::default()
        };
        let json = payload(&EngineConfig::new().with_overrides(&overrides));
        assert_eq!(json["assets_folder"], "/opt/mrz/assets");
        assert_eq!(json["license_token_file"], "/nonexistent/token.lic");
        assert_eq!(json["license_token_data"], "not base64 at all!");
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let overrides = ConfigOverrides {
            assets: Some(String::new()),
            token_file: Some(String::new()),
            ..Default::default()
        };
        let config = EngineConfig::new().with_overrides(&overrides);
        assert_eq!(config.assets_folder, None);
        assert_eq!(config.license_token_file, None);
        assert_eq!(config.license_token_data, None);
    }

    #[test]
    fn test_only_literal_true_enables() {
        assert!(flag_from_text("True"));
        for text in ["False", "true", "TRUE", "1", "yes", ""] {
            assert!(!flag_from_text(text), "{:?} should disable", text);
        }

        let overrides = ConfigOverrides {
            backprop: Some("True".into()),
            vcheck: Some("true".into()),
            ielcd: Some("False".into()),
            ..Default::default()
        };
        let json = payload(&EngineConfig::new().with_overrides(&overrides));
        assert_eq!(json["backpropagation_enabled"], true);
        assert_eq!(json["vertical_check_enabled"], false);
        assert_eq!(json["ielcd"], false);
    }

    #[test]
    fn test_unset_toggles_follow_target() {
        let config = EngineConfig::new().with_overrides(&ConfigOverrides::default());
        assert_eq!(config.backpropagation_enabled, Some(default_toggle()));
        assert_eq!(config.vertical_check_enabled, Some(default_toggle()));
        assert_eq!(config.ielcd, Some(default_toggle()));
    }
}

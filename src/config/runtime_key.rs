use crate::config::normalize_path;
use crate::utils::{MrzError, Result};
use serde::Serialize;

/// Host type that binds a license to a mobile application.
pub const HOST_TYPE_ANDROID_APP: &str = "android-app";

/// Configuration used to request a runtime license key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuntimeKeyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_app_sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_app_store: Option<String>,
}

impl RuntimeKeyConfig {
    /// Build the request configuration.
    ///
    /// An `android-app` host requires the application id, signature and
    /// store list. Colons are stripped from the signature so both
    /// `AB:CD:..` and `ABCD..` fingerprints are accepted.
    pub fn build(
        assets: Option<&str>,
        host_type: Option<&str>,
        app_id: Option<&str>,
        app_sign: Option<&str>,
        app_store: Option<&str>,
    ) -> Result<Self> {
        let mut config = RuntimeKeyConfig {
            assets_folder: assets.map(normalize_path),
            host_type: host_type.filter(|t| !t.is_empty()).map(str::to_string),
            ..Default::default()
        };

        if config.host_type.as_deref() == Some(HOST_TYPE_ANDROID_APP) {
            let app_id = required("--appid", app_id)?;
            let app_sign: String = required("--appsign", app_sign)?
                .chars()
                .filter(|c| *c != ':')
                .collect();
            let app_store = required("--appstore", app_store)?;
            if app_sign.is_empty() {
                return Err(MrzError::InvalidArgument("--appsign is empty".to_string()));
            }

            config.license_app_id = Some(app_id.to_string());
            config.license_app_sign = Some(app_sign);
            config.license_app_store = Some(app_store.to_string());
        }

        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MrzError::InvalidArgument(format!("{} is required", name)))
}

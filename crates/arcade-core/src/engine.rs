//! Resource naming and configuration for the embedded engine's web build.
//!
//! A build directory holds `WebGL_build.loader.js` plus data, framework and
//! code files. Compressed builds append `.unityweb` to the last three.

use serde::{Deserialize, Serialize};

use crate::catalog::GameDescriptor;

pub const BUILD_NAME: &str = "WebGL_build";
pub const WEB_EXTENSION: &str = ".unityweb";
pub const STREAMING_ASSETS_URL: &str = "StreamingAssets";
pub const COMPANY_NAME: &str = "sci5th";
pub const PRODUCT_VERSION: &str = "1.0";

/// URL of the bootstrap script that defines `createUnityInstance`.
pub fn loader_url(path: &str) -> String {
    format!("{path}/{BUILD_NAME}.loader.js")
}

/// Configuration record handed to the engine factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub data_url: String,
    pub framework_url: String,
    pub code_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming_assets_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
}

impl EngineConfig {
    pub fn for_game(game: &GameDescriptor) -> Self {
        let ext = if game.uses_web_extension() {
            WEB_EXTENSION
        } else {
            ""
        };
        let base = format!("{}/{BUILD_NAME}", game.path);
        Self {
            data_url: format!("{base}.data{ext}"),
            framework_url: format!("{base}.framework.js{ext}"),
            code_url: format!("{base}.wasm{ext}"),
            streaming_assets_url: Some(STREAMING_ASSETS_URL.to_string()),
            company_name: Some(COMPANY_NAME.to_string()),
            product_name: Some(game.name.clone()),
            product_version: Some(PRODUCT_VERSION.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Map a fractional progress report to a whole percentage.
///
/// Values are shown as they arrive, including ones that go backwards.
pub fn progress_percent(progress: f64) -> u8 {
    if progress.is_nan() {
        return 0;
    }
    (progress * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn loader_url_joins_path() {
        assert_eq!(
            loader_url("/UnityGames/Essentials"),
            "/UnityGames/Essentials/WebGL_build.loader.js"
        );
    }

    #[test]
    fn compressed_build_urls() {
        let catalog = Catalog::builtin();
        let cfg = EngineConfig::for_game(catalog.get("essentials").unwrap());
        assert_eq!(
            cfg.data_url,
            "/UnityGames/Essentials/WebGL_build.data.unityweb"
        );
        assert_eq!(
            cfg.framework_url,
            "/UnityGames/Essentials/WebGL_build.framework.js.unityweb"
        );
        assert_eq!(
            cfg.code_url,
            "/UnityGames/Essentials/WebGL_build.wasm.unityweb"
        );
        assert_eq!(cfg.product_name.as_deref(), Some("Essentials"));
        assert_eq!(cfg.company_name.as_deref(), Some("sci5th"));
    }

    #[test]
    fn plain_build_urls() {
        let catalog = Catalog::builtin();
        let cfg = EngineConfig::for_game(catalog.get("clickyCrates").unwrap());
        assert_eq!(cfg.data_url, "/UnityGames/Clicky Crates/WebGL_build.data");
        assert_eq!(
            cfg.framework_url,
            "/UnityGames/Clicky Crates/WebGL_build.framework.js"
        );
        assert_eq!(cfg.code_url, "/UnityGames/Clicky Crates/WebGL_build.wasm");
    }

    #[test]
    fn config_json_matches_factory_keys() {
        let catalog = Catalog::builtin();
        let cfg = EngineConfig::for_game(catalog.get("essentials").unwrap());
        let json: serde_json::Value = serde_json::from_str(&cfg.to_json().unwrap()).unwrap();
        for key in [
            "dataUrl",
            "frameworkUrl",
            "codeUrl",
            "streamingAssetsUrl",
            "companyName",
            "productName",
            "productVersion",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["streamingAssetsUrl"], "StreamingAssets");
        assert_eq!(json["productVersion"], "1.0");
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        assert_eq!(progress_percent(0.0), 0);
        assert_eq!(progress_percent(0.004), 0);
        assert_eq!(progress_percent(0.005), 1);
        assert_eq!(progress_percent(0.5), 50);
        assert_eq!(progress_percent(0.996), 100);
        assert_eq!(progress_percent(1.0), 100);
    }

    #[test]
    fn progress_out_of_range_is_clamped() {
        assert_eq!(progress_percent(-0.3), 0);
        assert_eq!(progress_percent(1.7), 100);
        assert_eq!(progress_percent(f64::NAN), 0);
    }
}

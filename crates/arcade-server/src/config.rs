use std::path::Path;

use serde::Deserialize;

use arcade_core::catalog::Catalog;

/// Top-level server configuration, loaded from `arcade.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Directory with thumbnails, engine builds and the client wasm package.
    pub web_root: String,
    /// Optional TOML catalog; the builtin catalog is used when unset.
    pub catalog_path: Option<String>,
    pub site: SiteConfig,
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            web_root: "web".to_string(),
            catalog_path: None,
            site: SiteConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Page metadata and branding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub icon: String,
    pub logo_dark: String,
    pub logo_light: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "sci5th".to_string(),
            description: "Science and Technology through Games by sci5th".to_string(),
            keywords: ["science", "technology", "sci5th", "games", "unity", "ai"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            icon: "/sci5th_Logo_Blue.svg".to_string(),
            logo_dark: "/sci5th_Logo_Black.svg".to_string(),
            logo_light: "/sci5th_Logo_Blue.svg".to_string(),
        }
    }
}

/// Request handling limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Validate configuration, exiting on values the server cannot run with.
    pub fn validate(&self) {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            tracing::error!(
                addr = %self.listen_addr,
                "listen_addr is not a valid socket address"
            );
            std::process::exit(1);
        }

        if self.limits.request_timeout_secs == 0 {
            tracing::error!("limits.request_timeout_secs must be > 0");
            std::process::exit(1);
        }

        if !Path::new(&self.web_root).is_dir() {
            tracing::warn!(
                web_root = %self.web_root,
                "web_root does not exist, static assets will 404"
            );
        }
    }

    /// Load the game catalog, falling back to the builtin one.
    pub fn load_catalog(&self) -> Catalog {
        let Some(path) = self.catalog_path.as_deref() else {
            return Catalog::builtin();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match Catalog::from_toml_str(&content) {
                Ok(catalog) => {
                    tracing::info!(path, games = catalog.len(), "Loaded game catalog");
                    catalog
                },
                Err(e) => {
                    tracing::warn!(path, "Invalid catalog: {e}, using builtin catalog");
                    Catalog::builtin()
                },
            },
            Err(e) => {
                tracing::warn!(path, "Cannot read catalog: {e}, using builtin catalog");
                Catalog::builtin()
            },
        }
    }

    /// Load config from `arcade.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("arcade.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from arcade.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse arcade.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No arcade.toml found, using defaults");
                ServerConfig::default()
            },
        };

        if let Ok(addr) = std::env::var("ARCADE_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("ARCADE_WEB_ROOT")
            && !root.is_empty()
        {
            config.web_root = root;
        }
        if let Ok(path) = std::env::var("ARCADE_CATALOG")
            && !path.is_empty()
        {
            config.catalog_path = Some(path);
        }
        if let Ok(val) = std::env::var("ARCADE_REQUEST_TIMEOUT_SECS")
            && let Ok(n) = val.parse::<u64>()
        {
            config.limits.request_timeout_secs = n;
        }

        config
    }
}

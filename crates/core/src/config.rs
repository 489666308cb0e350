//! Shell configuration
//!
//! Everything here is read once at startup; nothing is mutated afterwards.

use crate::bundle::BundleRegistry;
use crate::error::{Result, ShellError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use waypost_api::{BundleId, PageId};

pub const DEFAULT_EVENT_CAPACITY: usize = 64;
pub const DEFAULT_SILENT_CHECK_SSO_PATH: &str = "silent-check-sso.html";
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ShellConfig {
    /// Application title shown by the shell
    pub title: String,
    /// Bundles in declaration order; the first bundle listing a page owns it
    pub bundles: Vec<BundleSpec>,
    pub auth: AuthConfig,
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct BundleSpec {
    pub name: String,
    #[serde(default)]
    pub pages: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(default)]
pub struct AuthConfig {
    pub require_auth: bool,
    /// Passed through untouched to whoever constructs the identity client
    pub client_init: serde_json::Value,
    pub oidc_scope: Option<String>,
    /// Relative to the window origin
    pub silent_check_sso_path: String,
    pub unauthorized_path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(default)]
pub struct NavigationConfig {
    /// Drop navigations that finish after a newer one was requested.
    ///
    /// Off by default: the most recently completed navigation wins.
    pub discard_stale: bool,
    /// Buffer size of the broadcast channel behind the app state model
    pub event_capacity: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Install the global subscriber when the shell launches
    pub enabled: bool,
    /// `EnvFilter` directive, e.g. `info` or `waypost_core=debug`
    pub level: String,
    /// Defaults to `~/.waypost/logs`
    pub directory: Option<PathBuf>,
    pub to_stderr: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            bundles: vec![
                BundleSpec {
                    name: BundleId::ALL.to_string(),
                    pages: Vec::new(),
                },
                BundleSpec {
                    name: BundleId::ADMIN.to_string(),
                    pages: Vec::new(),
                },
            ],
            auth: AuthConfig::default(),
            navigation: NavigationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            client_init: serde_json::Value::Object(serde_json::Map::new()),
            oidc_scope: None,
            silent_check_sso_path: DEFAULT_SILENT_CHECK_SSO_PATH.to_string(),
            unauthorized_path: DEFAULT_UNAUTHORIZED_PATH.to_string(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            discard_stale: false,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
            to_stderr: false,
        }
    }
}

impl ShellConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: ShellConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.navigation.event_capacity == 0 {
            return Err(ShellError::Config(
                "navigation.event_capacity must be greater than zero".to_string(),
            ));
        }
        for bundle in &self.bundles {
            if bundle.name.trim().is_empty() {
                return Err(ShellError::Config("bundle name must not be empty".to_string()));
            }
            for page in &bundle.pages {
                let page = PageId::from(page.as_str());
                if page == PageId::HOME || page == PageId::NOT_LOADED {
                    return Err(ShellError::Config(format!(
                        "page '{page}' is rendered without a bundle and cannot be listed in '{}'",
                        bundle.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the static page → bundle mapping.
    pub fn bundle_registry(&self) -> BundleRegistry {
        BundleRegistry::new(self.bundles.iter().map(|spec| {
            (
                BundleId::from(spec.name.as_str()),
                spec.pages.iter().map(|p| PageId::from(p.as_str())),
            )
        }))
    }

    /// JSON schema of the configuration file
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ShellConfig)
    }
}

//! Store configuration
//!
//! Names the reducer, middleware, enhancers and listeners a store is
//! assembled from. The names are resolved against a `reflux::Registry`.

use anyhow::{Context, Result};
use log::LevelFilter;
use reflux::Blueprint;
use serde::{Deserialize, Serialize};

/// Store configuration loaded from .reflux.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Name of the root reducer
    #[serde(default = "default_reducer")]
    pub reducer: String,

    /// Middleware names, in the order actions pass through them
    #[serde(default = "default_middleware")]
    pub middleware: Vec<String>,

    /// Enhancer names, first is outermost
    #[serde(default)]
    pub enhancers: Vec<String>,

    /// Compose several enhancers into one instead of rejecting them
    #[serde(default)]
    pub compose_enhancers: bool,

    /// Listener names subscribed right after construction
    #[serde(default)]
    pub listeners: Vec<String>,

    /// Initial state, overriding reducer defaults for the keys it contains
    #[serde(default)]
    pub preloaded_state: Option<toml::Table>,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_reducer() -> String {
    "root".to_string()
}

fn default_middleware() -> Vec<String> {
    vec!["logger".to_string()]
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            reducer: default_reducer(),
            middleware: default_middleware(),
            enhancers: Vec::new(),
            compose_enhancers: false,
            listeners: Vec::new(),
            preloaded_state: None,
            log_level: default_log_level(),
        }
    }
}

impl StoreConfig {
    /// Load config from the usual locations
    ///
    /// `Ok(None)` when no config file exists. Nothing is logged, callers
    /// usually run this before the logger is up.
    pub fn load() -> Result<Option<Self>> {
        crate::load_config_file()?
            .map(|content| Self::from_toml(&content))
            .transpose()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid store config")
    }

    /// Parsed log level
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .ok()
            .with_context(|| format!("Unknown log level `{}`", self.log_level))
    }

    /// The names to resolve against a registry
    pub fn blueprint(&self) -> Blueprint {
        Blueprint {
            reducer: self.reducer.clone(),
            middleware: self.middleware.clone(),
            enhancers: self.enhancers.clone(),
            compose_enhancers: self.compose_enhancers,
            listeners: self.listeners.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.reducer, "root");
        assert_eq!(config.middleware, vec!["logger"]);
        assert!(config.enhancers.is_empty());
        assert!(!config.compose_enhancers);
        assert!(config.preloaded_state.is_none());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = StoreConfig::from_toml(
            r#"
            reducer = "todo"
            listeners = ["render"]
            log_level = "WARN"
        "#,
        )
        .unwrap();

        assert_eq!(config.reducer, "todo");
        assert_eq!(config.listeners, vec!["render"]);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Warn);
        // Other fields should use defaults
        assert_eq!(config.middleware, vec!["logger"]);
    }

    #[test]
    fn test_config_preloaded_state() {
        let config = StoreConfig::from_toml(
            r#"
            [preloaded_state]
            visibility_filter = "active"
            todos = [{ id = 1, text = "write docs", completed = false }]
        "#,
        )
        .unwrap();

        let state = config.preloaded_state.unwrap();
        assert_eq!(
            state.get("visibility_filter").and_then(|v| v.as_str()),
            Some("active")
        );
        assert_eq!(
            state.get("todos").and_then(|v| v.as_array()).map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn test_blueprint_mirrors_names() {
        let config = StoreConfig {
            enhancers: vec!["devtools".to_string(), "persist".to_string()],
            compose_enhancers: true,
            ..StoreConfig::default()
        };

        let blueprint = config.blueprint();
        assert_eq!(blueprint.reducer, "root");
        assert_eq!(blueprint.middleware, vec!["logger"]);
        assert_eq!(blueprint.enhancers, vec!["devtools", "persist"]);
        assert!(blueprint.compose_enhancers);
    }

    #[test]
    fn test_unknown_log_level_is_an_error() {
        let config = StoreConfig {
            log_level: "chatty".to_string(),
            ..StoreConfig::default()
        };
        let error = config.level_filter().unwrap_err();
        assert_eq!(error.to_string(), "Unknown log level `chatty`");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(StoreConfig::from_toml("middleware = 3").is_err());
    }
}

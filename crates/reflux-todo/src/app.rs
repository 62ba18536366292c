//! Wiring between the configuration and the todo store

use crate::actions::TodoAction;
use crate::enhancers;
use crate::middleware::ThunkMiddleware;
use crate::reducers;
use crate::render;
use crate::state::{self, TodoState};
use anyhow::{Context, Result};
use log::LevelFilter;
use reflux::{LoggingMiddleware, Registry, Store};
use reflux_config::StoreConfig;

/// Configuration settled before the logger exists
///
/// Problems met on the way are kept in `warnings` so they can be reported
/// once logging is up.
#[derive(Debug)]
pub struct Startup {
    pub config: StoreConfig,
    pub level: LevelFilter,
    pub warnings: Vec<String>,
}

impl Startup {
    /// Fall back to defaults for anything that failed to load or parse
    pub fn new(loaded: Result<Option<StoreConfig>>) -> Self {
        let mut warnings = Vec::new();
        let config = match loaded {
            Ok(Some(config)) => config,
            Ok(None) => StoreConfig::default(),
            Err(e) => {
                warnings.push(format!("Failed to load config file, using defaults: {:#}", e));
                StoreConfig::default()
            }
        };
        let level = config.level_filter().unwrap_or_else(|e| {
            warnings.push(format!("{:#}, using debug", e));
            LevelFilter::Debug
        });

        Self {
            config,
            level,
            warnings,
        }
    }
}

/// Everything a `.reflux.toml` may name for the todo store
pub fn registry() -> Result<Registry<TodoState, TodoAction>> {
    let mut registry = Registry::new();
    registry
        .register_reducer("root", reducers::root()?)
        .register_middleware("logger", || Box::new(LoggingMiddleware::new()))
        .register_middleware("action_logger", || Box::new(LoggingMiddleware::actions_only()))
        .register_middleware("thunk", || Box::new(ThunkMiddleware::new()))
        .register_enhancer("timing", enhancers::timing)
        .register_enhancer("welcome", enhancers::welcome)
        .register_listener("render", render::print_visible)
        .register_listener("summary", render::log_summary);
    Ok(registry)
}

/// Build the store described by `config`
pub fn create_store(config: &StoreConfig) -> Result<Store<TodoState, TodoAction>> {
    let preloaded_state = config
        .preloaded_state
        .as_ref()
        .map(state::from_table)
        .transpose()?;

    registry()?
        .create_store(&config.blueprint(), preloaded_state)
        .context("Failed to create the todo store")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflux::StoreError;

    fn config(toml: &str) -> StoreConfig {
        StoreConfig::from_toml(toml).unwrap()
    }

    #[test]
    fn test_startup_keeps_load_failure_for_later() {
        let startup = Startup::new(StoreConfig::from_toml("middleware = 3").map(Some));

        assert_eq!(startup.config, StoreConfig::default());
        assert_eq!(startup.level, LevelFilter::Debug);
        assert_eq!(startup.warnings.len(), 1);
        assert!(startup.warnings[0]
            .starts_with("Failed to load config file, using defaults: Invalid store config"));
    }

    #[test]
    fn test_startup_keeps_unknown_level_for_later() {
        let startup = Startup::new(StoreConfig::from_toml(r#"log_level = "chatty""#).map(Some));

        assert_eq!(startup.config.log_level, "chatty");
        assert_eq!(startup.level, LevelFilter::Debug);
        assert_eq!(startup.warnings, vec!["Unknown log level `chatty`, using debug"]);
    }

    #[test]
    fn test_startup_without_config_file() {
        let startup = Startup::new(Ok(None));

        assert_eq!(startup.config, StoreConfig::default());
        assert!(startup.warnings.is_empty());
    }

    #[test]
    fn test_default_config_builds_a_store() {
        let store = create_store(&StoreConfig::default()).unwrap();

        store
            .dispatch(TodoAction::AddTodo {
                id: 1,
                text: "configure".to_string(),
            })
            .unwrap();

        assert_eq!(state::todos(&store.get_state().unwrap()).len(), 1);
    }

    #[test]
    fn test_preloaded_state_from_config() {
        let store = create_store(&config(
            r#"
            middleware = ["thunk", "logger"]

            [preloaded_state]
            visibility_filter = "completed"
            todos = [{ id = 3, text = "done already", completed = true }]
        "#,
        ))
        .unwrap();

        let state = store.get_state().unwrap();
        assert_eq!(state::visible_todos(&state).len(), 1);
    }

    #[test]
    fn test_enhancers_need_composition() {
        let rejected = config(r#"enhancers = ["timing", "welcome"]"#);
        let composed = config(
            r#"
            enhancers = ["timing", "welcome"]
            compose_enhancers = true
        "#,
        );

        let error = create_store(&rejected).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<StoreError>(),
            Some(StoreError::MultipleEnhancers)
        ));

        let store = create_store(&composed).unwrap();
        assert_eq!(state::todos(&store.get_state().unwrap()).len(), 1);
    }

    #[test]
    fn test_unknown_listener_is_reported() {
        let error = create_store(&config(r#"listeners = ["beep"]"#)).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidListener(name)) if name == "beep"
        ));
    }
}

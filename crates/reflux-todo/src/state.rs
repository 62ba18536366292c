//! Todo application state
//!
//! The root state is a `CombinedState` keyed by slice name; each entry holds
//! one [`Slice`] variant.

use anyhow::{Context, Result};
use reflux::CombinedState;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const TODOS: &str = "todos";
pub const VISIBILITY_FILTER: &str = "visibility_filter";

pub type TodoState = CombinedState<Slice>;

/// One todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Which todos are shown
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VisibilityFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl VisibilityFilter {
    pub fn shows(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

/// Value stored under one key of the root state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slice {
    Todos(Vec<Todo>),
    VisibilityFilter(VisibilityFilter),
}

/// Todos of `state`, empty when the slice is missing
pub fn todos(state: &TodoState) -> &[Todo] {
    match state.get(TODOS) {
        Some(Slice::Todos(todos)) => todos,
        _ => &[],
    }
}

pub fn visibility_filter(state: &TodoState) -> VisibilityFilter {
    match state.get(VISIBILITY_FILTER) {
        Some(Slice::VisibilityFilter(filter)) => *filter,
        _ => VisibilityFilter::default(),
    }
}

/// The todos passing the current visibility filter
pub fn visible_todos(state: &TodoState) -> Vec<&Todo> {
    let filter = visibility_filter(state);
    todos(state).iter().filter(|todo| filter.shows(todo)).collect()
}

/// Convert the configured `[preloaded_state]` table into a root state
///
/// Keys keep their values even when no reducer manages them; the combined
/// reducer warns about and drops those.
pub fn from_table(table: &toml::Table) -> Result<TodoState> {
    table
        .iter()
        .map(|(key, value)| -> Result<(String, Slice)> {
            let slice = value
                .clone()
                .try_into::<Slice>()
                .with_context(|| format!("Invalid preloaded state for `{}`", key))?;
            Ok((key.clone(), slice))
        })
        .collect()
}

//! Commands typed at the prompt
//!
//! Each line is parsed into a [`Command`]; state changing commands are
//! turned into actions against the current state.

use crate::actions::{Thunk, TodoAction};
use crate::state::{self, TodoState, VisibilityFilter};
use anyhow::{bail, Context};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  add <text>          add a todo
  toggle <id>         toggle a todo
  filter <all|active|completed>
  clear               remove completed todos
  import <a>; <b>...  add several todos at once (needs the thunk middleware)
  list                show visible todos
  state               print the state tree as JSON
  help                show this help
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(u64),
    Filter(VisibilityFilter),
    ClearCompleted,
    Import(Vec<String>),
    List,
    State,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word {
            "add" if !rest.is_empty() => Self::Add(rest.to_string()),
            "add" => bail!("add needs the todo text"),
            "toggle" => Self::Toggle(
                rest.parse::<u64>()
                    .with_context(|| format!("`{}` is not a todo id", rest))?,
            ),
            "filter" => Self::Filter(
                rest.parse::<VisibilityFilter>()
                    .with_context(|| format!("`{}` is not a filter", rest))?,
            ),
            "clear" => Self::ClearCompleted,
            "import" => Self::Import(
                rest.split(';')
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "list" | "ls" => Self::List,
            "state" => Self::State,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command `{}`, try `help`", other),
        };
        Ok(command)
    }
}

impl Command {
    /// The action this command dispatches, if it changes state
    pub fn to_action(&self, state: &TodoState) -> Option<TodoAction> {
        match self {
            Self::Add(text) => Some(TodoAction::AddTodo {
                id: next_id(state),
                text: text.clone(),
            }),
            Self::Toggle(id) => Some(TodoAction::ToggleTodo { id: *id }),
            Self::Filter(filter) => Some(TodoAction::SetVisibilityFilter(*filter)),
            Self::ClearCompleted => Some(TodoAction::ClearCompleted),
            Self::Import(texts) => Some(import(texts.clone())),
            Self::List | Self::State | Self::Help | Self::Quit => None,
        }
    }
}

fn next_id(state: &TodoState) -> u64 {
    state::todos(state)
        .iter()
        .map(|todo| todo.id)
        .max()
        .map_or(1, |id| id + 1)
}

/// Thunk adding every text as its own todo
fn import(texts: Vec<String>) -> TodoAction {
    TodoAction::Thunk(Thunk::new("import", move |api| {
        for text in &texts {
            let id = next_id(&api.get_state()?);
            api.dispatch(TodoAction::AddTodo {
                id,
                text: text.clone(),
            })?;
        }
        log::info!("Imported {} todos", texts.len());
        Ok(())
    }))
}

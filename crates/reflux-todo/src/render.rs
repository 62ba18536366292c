//! Listeners presenting the state

use crate::state::{self, TodoState};

/// Format the visible todos, one per line
pub fn format_visible(state: &TodoState) -> String {
    let visible = state::visible_todos(state);
    if visible.is_empty() {
        return format!("(no {} todos)", state::visibility_filter(state));
    }

    visible
        .iter()
        .map(|todo| {
            let mark = if todo.completed { "x" } else { " " };
            format!("[{}] {:>3}  {}", mark, todo.id, todo.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the visible todos after every change
pub fn print_visible(state: &TodoState) {
    println!("{}", format_visible(state));
}

/// Log how many todos are left
pub fn log_summary(state: &TodoState) {
    let todos = state::todos(state);
    let open = todos.iter().filter(|todo| !todo.completed).count();
    log::info!("{} of {} todos open", open, todos.len());
}

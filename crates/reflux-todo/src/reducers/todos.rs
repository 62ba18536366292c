use crate::actions::TodoAction;
use crate::state::Todo;

/// Reduce the todo list
pub fn reduce_todos(mut todos: Vec<Todo>, action: &TodoAction) -> Vec<Todo> {
    match action {
        TodoAction::AddTodo { id, text } => {
            todos.push(Todo {
                id: *id,
                text: text.clone(),
                completed: false,
            });
        }
        TodoAction::ToggleTodo { id } => {
            if let Some(todo) = todos.iter_mut().find(|todo| todo.id == *id) {
                todo.completed = !todo.completed;
            }
        }
        TodoAction::ClearCompleted => {
            todos.retain(|todo| !todo.completed);
        }
        _ => {}
    }
    todos
}

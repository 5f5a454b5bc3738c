//! Plain-text rendering of the view-model.

use std::fmt::Write as _;

use todo_core::{Level, LoadState, Notification, Priority, Todo};

pub fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "* low",
        Priority::Medium => "** medium",
        Priority::High => "*** high",
    }
}

pub fn todo_card(todo: &Todo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", todo.id, todo.title);
    let _ = writeln!(out, "    description: {}", todo.description);
    let _ = writeln!(out, "    due date:    {}", todo.due_date.format("%Y-%m-%d"));
    let _ = writeln!(out, "    priority:    {}", priority_badge(todo.priority));
    let _ = write!(out, "    status:      {}", todo.status.label());
    if todo.status.is_finished() {
        out.push_str("  [done]");
    }
    out
}

pub fn todo_list(todos: &[Todo], load_state: LoadState) -> String {
    if todos.is_empty() {
        return match load_state {
            LoadState::Failed(kind) => format!("Could not load your todos ({}).", kind.describe()),
            LoadState::NotLoaded | LoadState::Loaded => "It's empty.".to_string(),
        };
    }
    todos.iter().map(todo_card).collect::<Vec<_>>().join("\n")
}

pub fn notification(note: &Notification) -> String {
    match (note.level, note.kind) {
        (Level::Success, _) => format!("[ok] {}: {}", note.title, note.text),
        (Level::Error, Some(kind)) => format!("[error] {} ({})", note.text, kind.describe()),
        (Level::Error, None) => format!("[error] {}", note.text),
    }
}

//! In-memory state of the todo page and the user actions that change it.
//!
//! # Design
//! `TodoApp` owns the list of todos, the creation draft and a queue of
//! pending notifications. Every action performs at most one mutation call
//! through `TodoResource` and reconciles local state only after the server
//! answered, so a failure never needs a rollback.
//!
//! A todo moves from not finished to finished and never back. Deletion is
//! allowed from either state.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::draft::{local_today, TodoDraft};
use crate::error::{AppError, ErrorKind};
use crate::notification::Notification;
use crate::resource::TodoResource;
use crate::transport::Transport;
use crate::types::{Todo, TodoId};

/// Outcome of the most recent full list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    /// The list is empty because loading failed, not because there are no
    /// todos.
    Failed(ErrorKind),
}

pub struct TodoApp<T> {
    resource: TodoResource<T>,
    todos: Vec<Todo>,
    draft: TodoDraft,
    load_state: LoadState,
    notifications: Vec<Notification>,
    today: fn() -> NaiveDate,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(resource: TodoResource<T>) -> Self {
        Self::with_clock(resource, local_today)
    }

    /// Use `today` for the draft's default due date.
    pub fn with_clock(resource: TodoResource<T>, today: fn() -> NaiveDate) -> Self {
        Self {
            resource,
            todos: Vec::new(),
            draft: TodoDraft::new(today()),
            load_state: LoadState::NotLoaded,
            notifications: Vec::new(),
            today,
        }
    }

    pub fn resource(&self) -> &TodoResource<T> {
        &self.resource
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn draft(&self) -> &TodoDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TodoDraft {
        &mut self.draft
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Drain the notifications queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Whether the "mark finished" control is enabled for `id`.
    pub fn can_mark_finished(&self, id: TodoId) -> bool {
        self.todo(id).is_some_and(|todo| !todo.status.is_finished())
    }

    /// Replace local state with the server's list. A failure is logged and
    /// recorded in `load_state` but not notified.
    pub fn load(&mut self) {
        match self.resource.list_all() {
            Ok(todos) => {
                self.todos = todos;
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "could not load todos");
                self.todos.clear();
                self.load_state = LoadState::Failed(err.kind());
            }
        }
    }

    /// Create a todo from the draft, then re-read the list from the server.
    pub fn submit(&mut self) -> Result<Todo, AppError> {
        let input = match self.draft.to_new_todo() {
            Ok(input) => input,
            Err(err) => return Err(self.fail("Please fill in all required fields.", err.into())),
        };

        match self.resource.create(&input) {
            Ok(created) => {
                info!(id = %created.id, "todo created");
                self.notifications.push(Notification::success(
                    "Todo created",
                    "A new todo has been created successfully.",
                ));
                self.draft = TodoDraft::new((self.today)());
                self.todos.push(created.clone());
                self.resync();
                Ok(created)
            }
            Err(err) => Err(self.fail("An error occurred while creating a new Todo.", err.into())),
        }
    }

    /// Flip a not-finished todo to finished. Finished todos are left alone
    /// without a request.
    pub fn mark_finished(&mut self, id: TodoId) -> Result<(), AppError> {
        let Some(current) = self.todo(id).map(|todo| todo.status) else {
            return Err(self.fail(
                "An error occurred while updating the Todo status.",
                AppError::UnknownTodo(id),
            ));
        };
        if current.is_finished() {
            debug!(%id, "todo already finished, nothing to send");
            return Err(AppError::AlreadyFinished(id));
        }

        match self.resource.update_status(id, current.toggled()) {
            Ok(updated) => {
                info!(%id, status = %updated.status, "todo updated");
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.status = updated.status;
                }
                self.notifications.push(Notification::success(
                    "Todo updated",
                    "The todo status has been updated successfully.",
                ));
                Ok(())
            }
            Err(err) => Err(self.fail("An error occurred while updating the Todo status.", err.into())),
        }
    }

    pub fn delete(&mut self, id: TodoId) -> Result<(), AppError> {
        match self.resource.delete(id) {
            Ok(_) => {
                info!(%id, "todo deleted");
                self.todos.retain(|todo| todo.id != id);
                self.notifications.push(Notification::success(
                    "Todo deleted",
                    "The todo has been deleted successfully.",
                ));
                Ok(())
            }
            Err(err) => Err(self.fail("An error occurred while deleting the Todo.", err.into())),
        }
    }

    /// Re-read one todo. A todo the server no longer knows is dropped.
    pub fn refresh(&mut self, id: TodoId) -> Result<&Todo, AppError> {
        match self.resource.get_by_id(id) {
            Ok(fresh) => {
                let index = match self.todos.iter().position(|todo| todo.id == id) {
                    Some(index) => {
                        self.todos[index] = fresh;
                        index
                    }
                    None => {
                        self.todos.push(fresh);
                        self.todos.len() - 1
                    }
                };
                Ok(&self.todos[index])
            }
            Err(err) => {
                if err.kind() == ErrorKind::NotFound {
                    self.todos.retain(|todo| todo.id != id);
                }
                Err(self.fail("An error occurred while fetching the Todo.", err.into()))
            }
        }
    }

    /// Post-create reconciliation. On failure the locally appended todo
    /// stays in place.
    fn resync(&mut self) {
        match self.resource.list_all() {
            Ok(todos) => {
                self.todos = todos;
                self.load_state = LoadState::Loaded;
            }
            Err(err) => warn!(error = %err, "could not re-read todos after create, keeping local copy"),
        }
    }

    fn fail(&mut self, text: &str, err: AppError) -> AppError {
        warn!(error = %err, kind = ?err.kind(), "{text}");
        self.notifications.push(Notification::failure(err.kind(), text));
        err
    }
}

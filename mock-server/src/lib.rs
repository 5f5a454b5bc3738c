use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub duedate: NaiveDate,
    pub priority: Priority,
    pub status: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duedate: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: bool,
}

/// `PUT` only ever changes the status; any other field in the body is ignored.
#[derive(Deserialize)]
pub struct UpdateTodo {
    pub status: bool,
}

/// Ids are handed out sequentially, so map order is creation order.
#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("todo {0} not found")]
    NotFound(u64),

    #[error("{0}")]
    Invalid(&'static str),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// The `/todo` routes at the root, without the `/api` prefix.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todo/", get(list_todos).post(create_todo))
        .route("/todo/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

/// The full service as deployed: `app()` nested under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/api", app())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, router()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ServerError> {
    if input.title.trim().is_empty() {
        return Err(ServerError::Invalid("title is required"));
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let todo = Todo {
        id: store.next_id,
        title: input.title,
        description: input.description,
        duedate: input.duedate,
        priority: input.priority,
        status: input.status,
    };
    store.todos.insert(todo.id, todo.clone());
    info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Todo>, ServerError> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(ServerError::NotFound(id))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ServerError> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(ServerError::NotFound(id))?;
    if todo.status && !input.status {
        return Err(ServerError::Invalid("finished todos cannot be reopened"));
    }
    todo.status = input.status;
    info!(id, status = todo.status, "todo updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let mut store = db.write().await;
    store.todos.remove(&id).ok_or(ServerError::NotFound(id))?;
    info!(id, "todo deleted");
    Ok(Json(json!({ "message": format!("todo {id} deleted") })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_wire_shape() {
        let todo = Todo {
            id: 1,
            title: "Test".to_string(),
            description: "desc".to_string(),
            duedate: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            priority: Priority::Medium,
            status: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["duedate"], "2025-01-01");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["status"], false);
    }

    #[test]
    fn create_todo_defaults_optional_fields() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"No extras","duedate":"2025-01-01"}"#).unwrap();
        assert_eq!(input.priority, Priority::Low);
        assert!(input.description.is_empty());
        assert!(!input.status);
    }

    #[test]
    fn create_todo_rejects_unknown_priority() {
        let result: Result<CreateTodo, _> =
            serde_json::from_str(r#"{"title":"t","duedate":"2025-01-01","priority":"urgent"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"duedate":"2025-01-01"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_requires_status() {
        let result: Result<UpdateTodo, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_ignores_other_fields() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"status":true,"title":"Renamed","priority":"high"}"#).unwrap();
        assert!(input.status);
    }
}

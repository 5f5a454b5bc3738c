//! The `/todo/` resource: one method per REST call.
//!
//! Each operation builds a request with `TodoClient`, executes it on the
//! `Transport`, and parses the answer. Failures are logged here and returned
//! unchanged; the caller decides what the user sees.

use tracing::{error, instrument};

use crate::client::TodoClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewTodo, Status, Todo, TodoId};

#[derive(Debug, Clone)]
pub struct TodoResource<T> {
    client: TodoClient,
    transport: T,
}

impl TodoResource<UreqTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(TodoClient::new(&config.base_url), UreqTransport::new())
    }
}

impl<T: Transport> TodoResource<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos();
        self.round_trip("list todos", Ok(request), TodoClient::parse_list_todos)
    }

    #[instrument(skip(self))]
    pub fn get_by_id(&self, id: TodoId) -> Result<Todo, ApiError> {
        let request = self.client.build_get_todo(id);
        self.round_trip("fetch todo", Ok(request), TodoClient::parse_get_todo)
    }

    #[instrument(skip_all, fields(title = %input.title))]
    pub fn create(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input);
        self.round_trip("create todo", request, TodoClient::parse_create_todo)
    }

    #[instrument(skip(self))]
    pub fn update_status(&self, id: TodoId, status: Status) -> Result<Todo, ApiError> {
        let request = self.client.build_update_status(id, status);
        self.round_trip("update todo", request, TodoClient::parse_update_status)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: TodoId) -> Result<Option<serde_json::Value>, ApiError> {
        let request = self.client.build_delete_todo(id);
        self.round_trip("delete todo", Ok(request), TodoClient::parse_delete_todo)
    }

    fn round_trip<R>(
        &self,
        action: &'static str,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        request
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| parse(&self.client, response))
            .inspect_err(|err| error!(error = %err, "failed to {action}"))
    }
}
